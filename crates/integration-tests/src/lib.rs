//! Integration tests for the Lookbook storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p lookbook-integration-tests
//! ```
//!
//! Tests drive the full router in-process with `tower::ServiceExt::oneshot`.
//! Shopify and DatoCMS are replaced by `wiremock` servers, so no credentials
//! or network access are needed.
//!
//! # Test Categories
//!
//! - `product_page` - Product page HTML and JSON rendering
//! - `cart` - Cart form submission and the cart count fragment

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use lookbook_storefront::config::{DatoConfig, ShopifyStorefrontConfig, StorefrontConfig};
use lookbook_storefront::shopify::StorefrontClient;
use lookbook_storefront::state::AppState;
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path the mocked Storefront API listens on.
pub const SHOPIFY_GRAPHQL_PATH: &str = "/api/2026-01/graphql.json";

/// Public base URL used for canonical links.
pub const BASE_URL: &str = "http://localhost:3000";

/// Shop name used in page titles.
pub const SHOP_NAME: &str = "Lookbook";

/// Storefront configuration pointing DatoCMS at `dato_endpoint`.
#[must_use]
pub fn test_config(dato_endpoint: String) -> StorefrontConfig {
    StorefrontConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 3000,
        base_url: BASE_URL.to_string(),
        shop_name: SHOP_NAME.to_string(),
        shopify: ShopifyStorefrontConfig {
            store: "lookbook-test.myshopify.com".to_string(),
            api_version: "2026-01".to_string(),
            storefront_private_token: SecretString::from("shpat_integration_private_token"),
            country: Some("US".to_string()),
            language: Some("EN".to_string()),
        },
        dato: DatoConfig {
            endpoint: dato_endpoint,
            api_token: SecretString::from("dato_integration_token"),
            timeout: Duration::from_secs(2),
        },
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

// =============================================================================
// Test App
// =============================================================================

/// The storefront router wired to mock upstreams.
pub struct TestApp {
    pub shopify: MockServer,
    pub dato: MockServer,
    pub router: Router,
}

/// A fully buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Parse the body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not valid JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("response body is JSON")
    }

    /// Value of a response header, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// `name=value` pair of the session cookie, for replaying on a later request.
    #[must_use]
    pub fn session_cookie(&self) -> Option<String> {
        self.header(header::SET_COOKIE.as_str())
            .and_then(|cookie| cookie.split(';').next())
            .map(str::to_string)
    }
}

impl TestApp {
    /// Start mock upstreams and build the router against them.
    ///
    /// # Panics
    ///
    /// Panics if application state cannot be built.
    pub async fn start() -> Self {
        let shopify = MockServer::start().await;
        let dato = MockServer::start().await;

        let config = test_config(dato.uri());
        let storefront = StorefrontClient::with_endpoint(
            &config.shopify,
            format!("{}{SHOPIFY_GRAPHQL_PATH}", shopify.uri()),
        )
        .expect("storefront client builds");
        let state = AppState::with_storefront(config, storefront).expect("state builds");

        Self {
            shopify,
            dato,
            router: lookbook_storefront::app(state),
        }
    }

    /// Send a request through a clone of the router.
    ///
    /// # Panics
    ///
    /// Panics if the router fails or the body cannot be read.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body is readable");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// GET `uri`.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built.
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
    }

    /// POST a urlencoded form to `uri` with extra headers.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built.
    pub async fn post_form(
        &self,
        uri: &str,
        fields: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();

        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        self.send(builder.body(Body::from(body)).expect("valid request"))
            .await
    }

    /// Answer `ProductByHandle` for `handle` with `product` (or `null`).
    pub async fn mock_product_by_handle(&self, handle: &str, product: Value) {
        Mock::given(method("POST"))
            .and(path(SHOPIFY_GRAPHQL_PATH))
            .and(body_partial_json(json!({
                "operationName": "ProductByHandle",
                "variables": {"handle": handle}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"product": product}
            })))
            .mount(&self.shopify)
            .await;
    }

    /// Answer `ProductById` for `id` with `product`, expecting `calls` requests.
    pub async fn mock_product_by_id(&self, id: &str, product: Value, calls: u64) {
        Mock::given(method("POST"))
            .and(path(SHOPIFY_GRAPHQL_PATH))
            .and(body_partial_json(json!({
                "operationName": "ProductById",
                "variables": {"id": id}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"product": product}
            })))
            .expect(calls)
            .mount(&self.shopify)
            .await;
    }

    /// Answer every DatoCMS query with `response`.
    pub async fn mock_dato(&self, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .respond_with(response)
            .mount(&self.dato)
            .await;
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// A variant of the "Linen Shirt" fixture product.
#[must_use]
pub fn variant(id: u32, size: &str, available: bool) -> Value {
    json!({
        "availableForSale": available,
        "compareAtPrice": null,
        "id": format!("gid://shopify/ProductVariant/{id}"),
        "image": {
            "id": null,
            "url": format!("https://cdn.shopify.com/s/files/linen-{id}.jpg"),
            "altText": null,
            "width": 800,
            "height": 1000
        },
        "price": {"amount": "48.0", "currencyCode": "USD"},
        "product": {"title": "Linen Shirt", "handle": "linen-shirt"},
        "selectedOptions": [{"name": "Size", "value": size}],
        "sku": null,
        "title": size,
        "unitPrice": null
    })
}

/// A product with one `Size` option (S, M) and the given metafield.
#[must_use]
pub fn product(id: u32, handle: &str, title: &str, complete_the_look: Option<&str>) -> Value {
    json!({
        "id": format!("gid://shopify/Product/{id}"),
        "title": title,
        "vendor": "Lookbook",
        "handle": handle,
        "descriptionHtml": "<p>Breathable summer weight.</p>",
        "description": "Breathable summer weight.",
        "metafield": complete_the_look.map(|value| json!({"value": value})),
        "options": [{
            "name": "Size",
            "optionValues": [
                {"name": "S", "firstSelectableVariant": variant(id * 10 + 1, "S", true), "swatch": null},
                {"name": "M", "firstSelectableVariant": variant(id * 10 + 2, "M", true), "swatch": null}
            ]
        }],
        "selectedOrFirstAvailableVariant": variant(id * 10 + 1, "S", true),
        "adjacentVariants": [variant(id * 10 + 2, "M", true)],
        "seo": {"title": null, "description": null}
    })
}

/// A cart payload with `total_quantity` items.
#[must_use]
pub fn cart(total_quantity: i64) -> Value {
    json!({
        "id": "gid://shopify/Cart/integration",
        "checkoutUrl": "https://lookbook-test.myshopify.com/cart/c/integration",
        "totalQuantity": total_quantity
    })
}

/// A DatoCMS detail record with one paragraph and one bullet.
#[must_use]
pub fn dato_detail() -> Value {
    json!({
        "data": {"detail": {
            "title": "Linen Shirt",
            "content": [
                {"__typename": "RichTextRecord", "textContent": "Cut from washed Belgian linen."},
                {"__typename": "BulletRecord", "content": "Relaxed fit"}
            ]
        }}
    })
}
