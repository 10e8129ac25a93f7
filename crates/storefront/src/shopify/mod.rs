//! Shopify Storefront API client.
//!
//! # Architecture
//!
//! - `graphql_client` request/response envelopes with hand-written operation
//!   types (see `storefront::queries`)
//! - Shopify is source of truth - NO local sync, direct API calls
//! - In-memory caching via `moka` for product responses (5 minute TTL)
//!
//! # Operations
//!
//! - Product by handle / by ID, with `selectedOrFirstAvailableVariant` and
//!   `adjacentVariants` resolved for the requested options
//! - Cart create, lines add, and quantity lookup
//!
//! # Example
//!
//! ```rust,ignore
//! use lookbook_storefront::shopify::StorefrontClient;
//!
//! let client = StorefrontClient::new(&config.shopify)?;
//! let product = client
//!     .get_product_by_handle(&handle, &SelectedOptions::new())
//!     .await?;
//! ```

mod storefront;
pub mod types;

pub use storefront::StorefrontClient;
pub use types::*;

pub use crate::graphql::{GraphQLError, GraphQLErrorLocation};

use thiserror::Error;

use crate::graphql::format_graphql_errors;

/// Errors that can occur when interacting with Shopify APIs.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// User error from mutation (e.g., invalid input).
    #[error("User error: {0}")]
    UserError(String),
}
