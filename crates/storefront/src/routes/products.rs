//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::{Path, RawQuery, State},
};
use lookbook_core::SelectedOptions;
use tracing::instrument;

use crate::components::{AddToCartButton, Button, ButtonStyle, ButtonType, FetcherState};
use crate::error::{AppError, add_breadcrumb};
use crate::filters;
use crate::services::ContentNode;
use crate::services::ProductPageData;
use crate::services::product_page::parse_selected_options;
use crate::services::variants::{
    ProductOptionView, product_options, resolve_variant, selected_options_query,
};
use crate::shopify::types::{CartLineInput, Image, Product, ProductVariant};
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub handle: String,
    pub title: String,
    pub vendor: String,
    pub description_html: String,
    pub price: Option<String>,
    pub compare_at_price: Option<String>,
    pub image: Option<ImageView>,
    pub options: Vec<ProductOptionView>,
    /// Rendered add-to-cart form.
    pub add_to_cart: String,
}

/// Image display data for templates.
#[derive(Clone)]
pub struct ImageView {
    pub url: String,
    pub alt: String,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

/// One CMS block ready to render.
#[derive(Clone)]
pub struct ContentView {
    pub text: String,
    pub bullet: bool,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub page_title: String,
    pub canonical_url: String,
    pub product: ProductView,
    pub complete_the_look: Option<ProductView>,
    pub content: Vec<ContentView>,
    /// `product_view` analytics payload, safe to embed in a script tag.
    pub analytics_json: String,
    /// Query string selecting the displayed variant.
    pub selected_query: String,
}

// =============================================================================
// View Building
// =============================================================================

fn image_view(image: &Image, fallback_alt: &str) -> ImageView {
    ImageView {
        url: image.url.clone(),
        alt: image
            .alt_text
            .clone()
            .unwrap_or_else(|| fallback_alt.to_string()),
        width: image.width,
        height: image.height,
    }
}

/// Analytics payload describing one product with its displayed variant.
#[must_use]
pub fn product_analytics(product: &Product, variant: Option<&ProductVariant>) -> serde_json::Value {
    serde_json::json!({
        "products": [{
            "id": product.id,
            "title": product.title,
            "price": variant.map_or("0", |v| v.price.amount.as_str()),
            "vendor": product.vendor,
            "variantId": variant.map_or("", |v| v.id.as_str()),
            "variantTitle": variant.map_or("", |v| v.title.as_str()),
            "quantity": 1,
        }]
    })
}

/// JSON for a `<script type="application/json">` block.
fn script_json(value: &serde_json::Value) -> String {
    value.to_string().replace('<', "\\u003c")
}

fn add_to_cart_html(product: &Product, variant: Option<&ProductVariant>) -> Result<String, AppError> {
    let Some(variant) = variant else {
        return Ok(
            Button::new("sold out", "sold out", ButtonType::Button, ButtonStyle::Secondary)
                .disabled(true)
                .render()?,
        );
    };

    let html = AddToCartButton::new(vec![CartLineInput::new(variant.id.clone(), 1)])?
        .analytics(Some(product_analytics(product, Some(variant))))
        .disabled((!variant.available_for_sale).then_some(true))
        .render(FetcherState::Idle)?;
    Ok(html)
}

fn product_view(
    product: &Product,
    requested: &SelectedOptions,
) -> Result<(ProductView, Option<ProductVariant>), AppError> {
    let selected = resolve_variant(
        product.selected_or_first_available_variant.as_ref(),
        &product.adjacent_variants,
        requested,
    );

    let view = ProductView {
        handle: product.handle.clone(),
        title: product.title.clone(),
        vendor: product.vendor.clone(),
        description_html: product.description_html.clone(),
        price: selected.as_ref().map(|v| v.price.display()),
        compare_at_price: selected
            .as_ref()
            .filter(|v| v.is_on_sale())
            .and_then(|v| v.compare_at_price.as_ref())
            .map(crate::shopify::types::Money::display),
        image: selected
            .as_ref()
            .and_then(|v| v.image.as_ref())
            .map(|image| image_view(image, &product.title)),
        options: product_options(product, selected.as_ref()),
        add_to_cart: add_to_cart_html(product, selected.as_ref())?,
    };

    Ok((view, selected))
}

fn content_views(nodes: Option<&[ContentNode]>) -> Vec<ContentView> {
    nodes
        .unwrap_or_default()
        .iter()
        .filter_map(|node| {
            node.text().map(|text| ContentView {
                text: text.to_string(),
                bullet: node.is_bullet(),
            })
        })
        .collect()
}

/// Build the page template from loaded data.
///
/// # Errors
///
/// Returns an error if a component fails to render.
pub fn show_template(
    state: &AppState,
    data: &ProductPageData,
    query: Option<&str>,
) -> Result<ProductShowTemplate, AppError> {
    let config = state.config();
    let requested = parse_selected_options(query);

    let (product, selected) = product_view(&data.product, &requested)?;
    let complete_the_look = data
        .complete_the_look_product
        .as_ref()
        .map(|ctl| product_view(ctl, &requested).map(|(view, _)| view))
        .transpose()?;

    let analytics = product_analytics(&data.product, selected.as_ref());
    add_breadcrumb(
        "analytics",
        "product_view",
        Some(&[
            ("product_id", data.product.id.as_str()),
            ("variant_id", selected.as_ref().map_or("", |v| v.id.as_str())),
        ]),
    );

    Ok(ProductShowTemplate {
        page_title: format!("{} | {}", config.shop_name, data.product.title),
        canonical_url: format!(
            "{}/products/{}",
            config.base_url.trim_end_matches('/'),
            data.product.handle
        ),
        product,
        complete_the_look,
        content: content_views(data.dato_content.as_deref()),
        analytics_json: script_json(&analytics),
        selected_query: selected
            .as_ref()
            .map(|v| selected_options_query(&v.selected_options))
            .unwrap_or_default(),
    })
}

// =============================================================================
// Handlers
// =============================================================================

/// Display product detail page.
#[instrument(skip(state, query))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<ProductShowTemplate, AppError> {
    let data = state
        .product_page()
        .load(Some(&handle), query.as_deref())
        .await?;

    show_template(&state, &data, query.as_deref())
}

/// Product page data as JSON.
#[instrument(skip(state, query))]
pub async fn show_json(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Json<ProductPageData>, AppError> {
    let data = state
        .product_page()
        .load(Some(&handle), query.as_deref())
        .await?;

    Ok(Json(data))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::services::variants::tests::{product, variant};

    #[test]
    fn test_product_analytics_with_variant() {
        let selected = variant(1, "S", "Sand", true);
        let product = product(Some(selected.clone()), vec![]);

        let payload = product_analytics(&product, Some(&selected));
        let entry = &payload["products"][0];
        assert_eq!(entry["id"], "gid://shopify/Product/1");
        assert_eq!(entry["price"], "48.0");
        assert_eq!(entry["vendor"], "Lookbook");
        assert_eq!(entry["variantId"], "gid://shopify/ProductVariant/1");
        assert_eq!(entry["variantTitle"], "S / Sand");
        assert_eq!(entry["quantity"], 1);
    }

    #[test]
    fn test_product_analytics_without_variant() {
        let product = product(None, vec![]);
        let payload = product_analytics(&product, None);
        assert_eq!(payload["products"][0]["price"], "0");
        assert_eq!(payload["products"][0]["variantId"], "");
    }

    #[test]
    fn test_script_json_escapes_tags() {
        let json = script_json(&serde_json::json!({"title": "</script><b>"}));
        assert!(!json.contains('<'));
        assert!(json.contains("\\u003c/script>"));
    }

    #[test]
    fn test_product_view_falls_back_for_unknown_selection() {
        let first = variant(1, "S", "Sand", true);
        let product = product(Some(first), vec![variant(2, "M", "Sand", true)]);
        let requested = SelectedOptions::from_pairs([("Size", "XXL")]);

        let (view, selected) = product_view(&product, &requested).unwrap();
        assert_eq!(selected.unwrap().id.as_str(), "gid://shopify/ProductVariant/1");
        assert_eq!(view.price.as_deref(), Some("$48.00"));
        assert!(view.add_to_cart.contains(r#"name="cartFormInput""#));
    }

    #[test]
    fn test_sold_out_variant_disables_form() {
        let sold_out = variant(1, "S", "Sand", false);
        let product = product(Some(sold_out), vec![]);

        let (view, _) = product_view(&product, &SelectedOptions::new()).unwrap();
        assert!(view.add_to_cart.contains(" disabled"));
    }

    #[test]
    fn test_no_variant_renders_disabled_button() {
        let product = product(None, vec![]);
        let (view, selected) = product_view(&product, &SelectedOptions::new()).unwrap();
        assert!(selected.is_none());
        assert!(!view.add_to_cart.contains("cartFormInput"));
        assert!(view.add_to_cart.contains(" disabled"));
    }

    #[test]
    fn test_content_views_skip_unsupported() {
        let nodes = vec![
            ContentNode::RichTextRecord {
                text_content: Some("Washed linen.".to_string()),
            },
            ContentNode::Unsupported,
            ContentNode::BulletRecord { content: None },
        ];
        let views = content_views(Some(&nodes));
        assert_eq!(views.len(), 1);
        assert!(!views[0].bullet);
        assert!(content_views(None).is_empty());
    }
}
