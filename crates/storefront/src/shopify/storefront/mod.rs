//! Shopify Storefront API client implementation.
//!
//! Uses `graphql_client` envelopes with `reqwest` 0.13 for HTTP.
//! Caches products using `moka` (5-minute TTL).

mod cache;
mod conversions;

pub mod queries;

use std::sync::Arc;
use std::time::Duration;

use graphql_client::{GraphQLQuery, Response};
use lookbook_core::{CartId, Handle, ProductId, SelectedOptions};
use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use crate::config::ShopifyStorefrontConfig;
use crate::graphql::{GraphQLError, snippet};
use crate::shopify::ShopifyError;
use crate::shopify::types::{Cart, CartLineInput, Product};

use cache::CacheKey;
use conversions::cart::format_user_errors;
use conversions::{convert_cart, convert_product, convert_user_errors};
use queries::{
    CartCount, CartCreate, CartLinesAdd, CartMutationPayload, ProductByHandle, ProductById,
    cart_count, cart_create, cart_lines_add, product_by_handle, product_by_id,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// =============================================================================
// StorefrontClient
// =============================================================================

/// Client for the Shopify Storefront API.
///
/// Provides type-safe access to product page data and cart mutations.
/// Products are cached for 5 minutes per handle/ID and option selection.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    endpoint: String,
    access_token: SecretString,
    country: Option<String>,
    language: Option<String>,
    cache: Cache<CacheKey, Arc<Product>>,
}

impl StorefrontClient {
    /// Create a new Storefront API client for the configured store.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ShopifyStorefrontConfig) -> Result<Self, ShopifyError> {
        Self::with_endpoint(config, config.graphql_endpoint())
    }

    /// Create a client that sends requests to `endpoint` instead of the
    /// store's public GraphQL URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn with_endpoint(
        config: &ShopifyStorefrontConfig,
        endpoint: impl Into<String>,
    ) -> Result<Self, ShopifyError> {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            inner: Arc::new(StorefrontClientInner {
                client,
                endpoint: endpoint.into(),
                access_token: config.storefront_private_token.clone(),
                country: config.country.clone(),
                language: config.language.clone(),
                cache,
            }),
        })
    }

    /// Execute a GraphQL operation.
    async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, ShopifyError>
    where
        Q::Variables: serde::Serialize,
    {
        let request_body = Q::build_query(variables);

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            // Private access tokens use a different header than public tokens
            // See: https://shopify.dev/docs/storefronts/headless/building-with-the-storefront-api/getting-started
            .header(
                "Shopify-Storefront-Private-Token",
                self.inner.access_token.expose_secret(),
            )
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ShopifyError::RateLimited(retry_after));
        }

        // Body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                operation = request_body.operation_name,
                body = %snippet(&response_text, 500),
                "Shopify API returned non-success status"
            );
            return Err(ShopifyError::GraphQL(vec![GraphQLError::message(format!(
                "HTTP {status}: {}",
                snippet(&response_text, 200)
            ))]));
        }

        let response: Response<Q::ResponseData> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    operation = request_body.operation_name,
                    body = %snippet(&response_text, 500),
                    "Failed to parse Shopify GraphQL response"
                );
                return Err(ShopifyError::Parse(e));
            }
        };

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            tracing::debug!(errors = ?errors, "GraphQL errors in response");
            return Err(ShopifyError::GraphQL(
                errors.into_iter().map(GraphQLError::from).collect(),
            ));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                operation = request_body.operation_name,
                body = %snippet(&response_text, 500),
                "Shopify GraphQL response has no data and no errors"
            );
            ShopifyError::GraphQL(vec![GraphQLError::message("No data in response")])
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get a product by its handle, resolving variants for `selected_options`.
    ///
    /// Returns `Ok(None)` when no product has this handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, selected_options), fields(handle = %handle))]
    pub async fn get_product_by_handle(
        &self,
        handle: &Handle,
        selected_options: &SelectedOptions,
    ) -> Result<Option<Product>, ShopifyError> {
        let cache_key = CacheKey::ProductByHandle(handle.clone(), selected_options.clone());
        if let Some(product) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(Some(Product::clone(&product)));
        }

        let variables = product_by_handle::Variables {
            country: self.inner.country.clone(),
            handle: handle.as_str().to_string(),
            language: self.inner.language.clone(),
            selected_options: selected_options.as_slice().to_vec(),
        };

        let data = self.execute::<ProductByHandle>(variables).await?;
        let Some(fields) = data.product else {
            debug!("Product not found");
            return Ok(None);
        };

        let product = convert_product(fields);
        self.inner
            .cache
            .insert(cache_key, Arc::new(product.clone()))
            .await;

        Ok(Some(product))
    }

    /// Get a product by its global ID, resolving variants for `selected_options`.
    ///
    /// Returns `Ok(None)` when the ID does not resolve to a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, selected_options), fields(product_id = %id))]
    pub async fn get_product_by_id(
        &self,
        id: &ProductId,
        selected_options: &SelectedOptions,
    ) -> Result<Option<Product>, ShopifyError> {
        let cache_key = CacheKey::ProductById(id.clone(), selected_options.clone());
        if let Some(product) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(Some(Product::clone(&product)));
        }

        let variables = product_by_id::Variables {
            country: self.inner.country.clone(),
            id: id.as_str().to_string(),
            language: self.inner.language.clone(),
            selected_options: selected_options.as_slice().to_vec(),
        };

        let data = self.execute::<ProductById>(variables).await?;
        let Some(fields) = data.product else {
            debug!("Product not found");
            return Ok(None);
        };

        let product = convert_product(fields);
        self.inner
            .cache
            .insert(cache_key, Arc::new(product.clone()))
            .await;

        Ok(Some(product))
    }

    // =========================================================================
    // Cart Methods
    // =========================================================================

    /// Create a new cart containing `lines`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or Shopify rejects the lines.
    #[instrument(skip(self, lines), fields(line_count = lines.len()))]
    pub async fn create_cart(&self, lines: Vec<CartLineInput>) -> Result<Cart, ShopifyError> {
        let variables = cart_create::Variables {
            input: cart_create::CartInput { lines },
        };
        let data = self.execute::<CartCreate>(variables).await?;
        mutation_cart(data.cart_create, "cartCreate")
    }

    /// Add lines to an existing cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or Shopify rejects the lines.
    #[instrument(skip(self, lines), fields(cart_id = %cart_id, line_count = lines.len()))]
    pub async fn add_to_cart(
        &self,
        cart_id: &CartId,
        lines: Vec<CartLineInput>,
    ) -> Result<Cart, ShopifyError> {
        let variables = cart_lines_add::Variables {
            cart_id: cart_id.as_str().to_string(),
            lines,
        };
        let data = self.execute::<CartLinesAdd>(variables).await?;
        mutation_cart(data.cart_lines_add, "cartLinesAdd")
    }

    /// Look up a cart's summary. Returns `Ok(None)` for expired or unknown carts.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    pub async fn get_cart(&self, cart_id: &CartId) -> Result<Option<Cart>, ShopifyError> {
        let variables = cart_count::Variables {
            cart_id: cart_id.as_str().to_string(),
        };
        let data = self.execute::<CartCount>(variables).await?;
        Ok(data.cart.map(convert_cart))
    }
}

/// Pull the cart out of a mutation payload, surfacing user errors.
fn mutation_cart(
    payload: Option<CartMutationPayload>,
    mutation: &str,
) -> Result<Cart, ShopifyError> {
    let payload = payload.ok_or_else(|| {
        ShopifyError::GraphQL(vec![GraphQLError::message(format!(
            "{mutation} returned no payload"
        ))])
    })?;

    let user_errors = convert_user_errors(payload.user_errors);
    if !user_errors.is_empty() {
        return Err(ShopifyError::UserError(format_user_errors(&user_errors)));
    }

    payload.cart.map(convert_cart).ok_or_else(|| {
        ShopifyError::GraphQL(vec![GraphQLError::message(format!(
            "{mutation} returned no cart"
        ))])
    })
}
