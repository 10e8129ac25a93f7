//! Cart route handlers.
//!
//! The add-to-cart form posts a `LinesAdd` cart action here. Cart IDs are
//! stored in the session and mapped to Shopify carts. Requests from the page
//! script (`HX-Request`) get the cart count fragment back; plain form posts
//! are redirected to the page they came from.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{HeaderMap, header::REFERER},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use lookbook_core::CartId;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{debug, instrument};

use crate::components::CartAction;
use crate::error::{AppError, add_breadcrumb};
use crate::filters;
use crate::shopify::ShopifyError;
use crate::shopify::types::CartLineInput;
use crate::state::AppState;

/// Session key for the Shopify cart ID.
pub const CART_ID_KEY: &str = "cart_id";

/// Header the page script sets on cart submissions.
const HX_REQUEST: &str = "HX-Request";

/// Cart form data.
#[derive(Debug, Deserialize)]
pub struct CartForm {
    #[serde(rename = "cartFormInput")]
    pub cart_form_input: String,
    pub analytics: Option<String>,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart ID from the session.
async fn get_cart_id(session: &Session) -> Option<CartId> {
    session.get::<CartId>(CART_ID_KEY).await.ok().flatten()
}

/// Set the cart ID in the session.
async fn set_cart_id(
    session: &Session,
    cart_id: &CartId,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(CART_ID_KEY, cart_id).await
}

// =============================================================================
// Form Parsing
// =============================================================================

/// Parse the `cartFormInput` field into lines to add.
///
/// # Errors
///
/// Returns `BadRequest` for malformed JSON, unsupported actions, no lines,
/// or a quantity below one.
pub fn parse_lines(cart_form_input: &str) -> Result<Vec<CartLineInput>, AppError> {
    let CartAction::LinesAdd { lines } = serde_json::from_str(cart_form_input)
        .map_err(|e| AppError::BadRequest(format!("Invalid cart form input: {e}")))?;

    if lines.is_empty() {
        return Err(AppError::BadRequest("No cart lines to add".to_string()));
    }
    if lines.iter().any(|line| line.quantity < 1) {
        return Err(AppError::BadRequest(
            "Quantity must be at least 1".to_string(),
        ));
    }

    Ok(lines)
}

/// Path and query of the referring page, or `/`.
fn back_path(headers: &HeaderMap) -> String {
    headers
        .get(REFERER)
        .and_then(|value| value.to_str().ok())
        .and_then(|referer| url::Url::parse(referer).ok())
        .map_or_else(
            || "/".to_string(),
            |url| match url.query() {
                Some(query) => format!("{}?{query}", url.path()),
                None => url.path().to_string(),
            },
        )
}

fn cart_count(total_quantity: i64) -> u32 {
    u32::try_from(total_quantity).unwrap_or(0)
}

// =============================================================================
// Handlers
// =============================================================================

/// Add lines to the session cart, creating the cart on first use.
#[instrument(skip(state, session, headers, form))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<CartForm>,
) -> Result<Response, AppError> {
    let lines = parse_lines(&form.cart_form_input)?;
    debug!(
        analytics = form.analytics.as_deref().unwrap_or("undefined"),
        line_count = lines.len(),
        "Cart form submitted"
    );

    let result = match get_cart_id(&session).await {
        Some(cart_id) => state.storefront().add_to_cart(&cart_id, lines).await,
        None => state.storefront().create_cart(lines).await,
    };

    let cart = result.map_err(|e| match e {
        ShopifyError::UserError(message) => AppError::BadRequest(message),
        other => AppError::Shopify(other),
    })?;

    if let Err(e) = set_cart_id(&session, &cart.id).await {
        tracing::error!("Failed to save cart ID to session: {e}");
    }

    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("cart_id", cart.id.as_str())]),
    );

    if headers.contains_key(HX_REQUEST) {
        // Return cart count with HTMX trigger to update other elements
        return Ok((
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            CartCountTemplate {
                count: cart_count(cart.total_quantity),
            },
        )
            .into_response());
    }

    Ok(Redirect::to(&back_path(&headers)).into_response())
}

/// Get cart count badge.
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let count = match get_cart_id(&session).await {
        Some(cart_id) => match state.storefront().get_cart(&cart_id).await {
            Ok(cart) => cart.map_or(0, |cart| cart_count(cart.total_quantity)),
            Err(e) => {
                tracing::warn!("Failed to fetch cart {cart_id}: {e}");
                0
            }
        },
        None => 0,
    };

    CartCountTemplate { count }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_parse_lines_add() {
        let lines = parse_lines(
            r#"{"action":"LinesAdd","inputs":{"lines":[{"merchandiseId":"gid://shopify/ProductVariant/11","quantity":2}]}}"#,
        )
        .unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 2);
    }

    #[test]
    fn test_parse_lines_rejects_bad_input() {
        for input in [
            "not json",
            r#"{"action":"LinesRemove","inputs":{"lineIds":["x"]}}"#,
            r#"{"action":"LinesAdd","inputs":{"lines":[]}}"#,
            r#"{"action":"LinesAdd","inputs":{"lines":[{"merchandiseId":"gid://shopify/ProductVariant/11","quantity":0}]}}"#,
        ] {
            assert!(matches!(parse_lines(input), Err(AppError::BadRequest(_))), "{input}");
        }
    }

    #[test]
    fn test_back_path_uses_referer_path_only() {
        let mut headers = HeaderMap::new();
        assert_eq!(back_path(&headers), "/");

        headers.insert(
            REFERER,
            HeaderValue::from_static("https://evil.example/products/linen-shirt?Size=M"),
        );
        assert_eq!(back_path(&headers), "/products/linen-shirt?Size=M");
    }

    #[test]
    fn test_cart_count_clamps_negative() {
        assert_eq!(cart_count(-1), 0);
        assert_eq!(cart_count(3), 3);
    }
}
