//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products/:handle       - Product detail
//! GET  /api/products/:handle   - Product page data (JSON)
//!
//! # Cart
//! POST /cart                   - Cart form action (LinesAdd)
//! GET  /cart/count             - Cart count badge (fragment)
//! ```

pub mod cart;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/{handle}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(cart::submit))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Product routes
        .nest("/products", product_routes())
        .route("/api/products/{handle}", get(products::show_json))
        // Cart routes
        .nest("/cart", cart_routes())
}
