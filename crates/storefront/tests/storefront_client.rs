//! Tests for `StorefrontClient` against a `wiremock` Storefront API.
//!
//! Each test stands up its own server, so no real network traffic is made.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use lookbook_core::{CartId, Handle, ProductId, SelectedOptions, VariantId};
use lookbook_storefront::config::ShopifyStorefrontConfig;
use lookbook_storefront::shopify::{CartLineInput, ShopifyError, StorefrontClient};
use secrecy::SecretString;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GRAPHQL_PATH: &str = "/api/2026-01/graphql.json";

fn shopify_config() -> ShopifyStorefrontConfig {
    ShopifyStorefrontConfig {
        store: "lookbook-test.myshopify.com".to_string(),
        api_version: "2026-01".to_string(),
        storefront_private_token: SecretString::from("shpat_test_private_token"),
        country: Some("US".to_string()),
        language: Some("EN".to_string()),
    }
}

fn client(server: &MockServer) -> StorefrontClient {
    StorefrontClient::with_endpoint(&shopify_config(), format!("{}{GRAPHQL_PATH}", server.uri()))
        .unwrap()
}

fn variant_json(id: u32, size: &str) -> Value {
    json!({
        "availableForSale": true,
        "compareAtPrice": null,
        "id": format!("gid://shopify/ProductVariant/{id}"),
        "image": null,
        "price": {"amount": "48.0", "currencyCode": "USD"},
        "product": {"title": "Linen Shirt", "handle": "linen-shirt"},
        "selectedOptions": [{"name": "Size", "value": size}],
        "sku": "LS-01",
        "title": size,
        "unitPrice": null
    })
}

fn product_json(metafield: Value) -> Value {
    json!({
        "data": {
            "product": {
                "id": "gid://shopify/Product/1",
                "title": "Linen Shirt",
                "vendor": "Lookbook",
                "handle": "linen-shirt",
                "descriptionHtml": "<p>Breathable.</p>",
                "description": "Breathable.",
                "metafield": metafield,
                "options": [{
                    "name": "Size",
                    "optionValues": [
                        {"name": "S", "firstSelectableVariant": variant_json(1, "S"), "swatch": null},
                        {"name": "M", "firstSelectableVariant": variant_json(2, "M"), "swatch": null}
                    ]
                }],
                "selectedOrFirstAvailableVariant": variant_json(2, "M"),
                "adjacentVariants": [variant_json(1, "S")],
                "seo": {"title": null, "description": null}
            }
        }
    })
}

fn handle() -> Handle {
    Handle::parse("linen-shirt").unwrap()
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[tokio::test]
async fn product_by_handle_sends_token_and_variables() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(header("Shopify-Storefront-Private-Token", "shpat_test_private_token"))
        .and(body_partial_json(json!({
            "operationName": "ProductByHandle",
            "variables": {
                "handle": "linen-shirt",
                "country": "US",
                "language": "EN",
                "selectedOptions": [{"name": "Size", "value": "M"}]
            }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(product_json(json!({"value": "gid://shopify/Product/2"}))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let options = SelectedOptions::from_pairs([("Size", "M")]);
    let product = client(&server)
        .get_product_by_handle(&handle(), &options)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(product.title, "Linen Shirt");
    assert_eq!(
        product.complete_the_look,
        Some(ProductId::new("gid://shopify/Product/2"))
    );
    assert_eq!(product.adjacent_variants.len(), 1);
    assert_eq!(
        product.selected_or_first_available_variant.unwrap().id,
        VariantId::new("gid://shopify/ProductVariant/2")
    );
}

#[tokio::test]
async fn product_by_handle_returns_none_for_unknown_handle() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"product": null}})))
        .mount(&server)
        .await;

    let result = client(&server)
        .get_product_by_handle(&handle(), &SelectedOptions::new())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn found_products_are_cached_per_selection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_json(Value::Null)))
        .expect(2)
        .mount(&server)
        .await;

    let client = client(&server);
    let small = SelectedOptions::from_pairs([("Size", "S")]);
    let medium = SelectedOptions::from_pairs([("Size", "M")]);

    client.get_product_by_handle(&handle(), &small).await.unwrap();
    client.get_product_by_handle(&handle(), &small).await.unwrap();
    client.get_product_by_handle(&handle(), &medium).await.unwrap();
}

#[tokio::test]
async fn product_by_id_uses_id_query() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "ProductById",
            "variables": {"id": "gid://shopify/Product/2"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_json(Value::Null)))
        .expect(1)
        .mount(&server)
        .await;

    let product = client(&server)
        .get_product_by_id(
            &ProductId::new("gid://shopify/Product/2"),
            &SelectedOptions::new(),
        )
        .await
        .unwrap();
    assert!(product.is_some());
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rate_limit_reports_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .mount(&server)
        .await;

    let err = client(&server)
        .get_product_by_handle(&handle(), &SelectedOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ShopifyError::RateLimited(7)), "got: {err:?}");
}

#[tokio::test]
async fn graphql_errors_are_surfaced_with_paths() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{
                "message": "Variable $selectedOptions is invalid",
                "locations": [{"line": 2, "column": 3}],
                "path": ["product", 0]
            }]
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .get_product_by_handle(&handle(), &SelectedOptions::new())
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "GraphQL errors: Variable $selectedOptions is invalid path: product.0 at line 2:3"
    );
}

#[tokio::test]
async fn server_errors_include_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let err = client(&server)
        .get_product_by_handle(&handle(), &SelectedOptions::new())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("HTTP 503"), "got: {err}");
}

#[tokio::test]
async fn malformed_body_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"data\": {\"product\": ["))
        .mount(&server)
        .await;

    let err = client(&server)
        .get_product_by_handle(&handle(), &SelectedOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ShopifyError::Parse(_)), "got: {err:?}");
}

// ---------------------------------------------------------------------------
// Carts
// ---------------------------------------------------------------------------

fn cart_json(total_quantity: i64) -> Value {
    json!({
        "id": "gid://shopify/Cart/c1",
        "checkoutUrl": "https://lookbook-test.myshopify.com/cart/c/c1",
        "totalQuantity": total_quantity
    })
}

#[tokio::test]
async fn create_cart_sends_lines() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "CartCreate",
            "variables": {"input": {"lines": [{
                "merchandiseId": "gid://shopify/ProductVariant/2",
                "quantity": 1
            }]}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"cartCreate": {"cart": cart_json(1), "userErrors": []}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cart = client(&server)
        .create_cart(vec![CartLineInput::new(
            VariantId::new("gid://shopify/ProductVariant/2"),
            1,
        )])
        .await
        .unwrap();

    assert_eq!(cart.id, CartId::new("gid://shopify/Cart/c1"));
    assert_eq!(cart.total_quantity, 1);
}

#[tokio::test]
async fn add_to_cart_user_errors_are_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "CartLinesAdd",
            "variables": {"cartId": "gid://shopify/Cart/c1"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"cartLinesAdd": {
                "cart": null,
                "userErrors": [{
                    "code": "INVALID",
                    "field": ["lines", "0", "merchandiseId"],
                    "message": "The merchandise does not exist"
                }]
            }}
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .add_to_cart(
            &CartId::new("gid://shopify/Cart/c1"),
            vec![CartLineInput::new(VariantId::new("gid://shopify/ProductVariant/404"), 1)],
        )
        .await
        .unwrap_err();

    match err {
        ShopifyError::UserError(message) => {
            assert!(message.contains("The merchandise does not exist"));
        }
        other => panic!("expected user error, got {other:?}"),
    }
}

#[tokio::test]
async fn get_cart_returns_none_for_expired_cart() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({"operationName": "CartCount"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"cart": null}})))
        .mount(&server)
        .await;

    let cart = client(&server)
        .get_cart(&CartId::new("gid://shopify/Cart/expired"))
        .await
        .unwrap();
    assert!(cart.is_none());
}
