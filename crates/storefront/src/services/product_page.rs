//! Product page data loading.
//!
//! The critical phase fetches the product for the URL handle, the optional
//! complete-the-look product named by its metafield, and editorial content
//! from DatoCMS. Only the commerce queries can fail the page; CMS problems
//! degrade to "no content".
//!
//! Both fetches run concurrently. A commerce error is returned as soon as it
//! happens without waiting on the CMS, and a found product waits at most the
//! loader's content budget for CMS content.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lookbook_core::{Handle, ProductId, SelectedOptions};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::services::dato::{ContentNode, DatoClient, DatoError};
use crate::shopify::types::Product;
use crate::shopify::{ShopifyError, StorefrontClient};

/// Commerce data source for product lookups.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Product by URL handle, with variants resolved for `selected_options`.
    async fn product_by_handle(
        &self,
        handle: &Handle,
        selected_options: &SelectedOptions,
    ) -> Result<Option<Product>, ShopifyError>;

    /// Product by global ID, with variants resolved for `selected_options`.
    async fn product_by_id(
        &self,
        id: &ProductId,
        selected_options: &SelectedOptions,
    ) -> Result<Option<Product>, ShopifyError>;
}

/// Editorial content source keyed by product handle.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn detail_content(&self, handle: &Handle)
    -> Result<Option<Vec<ContentNode>>, DatoError>;
}

#[async_trait]
impl ProductSource for StorefrontClient {
    async fn product_by_handle(
        &self,
        handle: &Handle,
        selected_options: &SelectedOptions,
    ) -> Result<Option<Product>, ShopifyError> {
        self.get_product_by_handle(handle, selected_options).await
    }

    async fn product_by_id(
        &self,
        id: &ProductId,
        selected_options: &SelectedOptions,
    ) -> Result<Option<Product>, ShopifyError> {
        self.get_product_by_id(id, selected_options).await
    }
}

#[async_trait]
impl ContentSource for DatoClient {
    async fn detail_content(
        &self,
        handle: &Handle,
    ) -> Result<Option<Vec<ContentNode>>, DatoError> {
        Self::detail_content(self, handle).await
    }
}

/// Errors that fail the product page.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The route matched without a handle.
    #[error("Expected product handle to be defined")]
    MissingHandle,

    /// No product has this handle.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// A commerce query failed.
    #[error(transparent)]
    Upstream(#[from] ShopifyError),
}

/// Below-the-fold data. Nothing is loaded here yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeferredData {}

/// Everything the product page renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPageData {
    pub product: Product,
    pub complete_the_look_product: Option<Product>,
    pub dato_content: Option<Vec<ContentNode>>,
    pub deferred: DeferredData,
}

/// Loads [`ProductPageData`] from its upstream sources.
#[derive(Clone)]
pub struct ProductPageLoader {
    products: Arc<dyn ProductSource>,
    content: Arc<dyn ContentSource>,
    content_budget: Duration,
}

impl ProductPageLoader {
    /// How long a found product waits for CMS content by default.
    pub const DEFAULT_CONTENT_BUDGET: Duration = Duration::from_millis(800);

    #[must_use]
    pub fn new(products: Arc<dyn ProductSource>, content: Arc<dyn ContentSource>) -> Self {
        Self {
            products,
            content,
            content_budget: Self::DEFAULT_CONTENT_BUDGET,
        }
    }

    /// Cap how long a found product waits for CMS content. Past the budget
    /// the page renders without it.
    #[must_use]
    pub const fn with_content_budget(mut self, budget: Duration) -> Self {
        self.content_budget = budget;
        self
    }

    /// Load the page for `handle`, selecting variants from the raw request
    /// `query` string.
    ///
    /// # Errors
    ///
    /// - `MissingHandle` when `handle` is absent or empty (nothing is fetched)
    /// - `NotFound` when no product has this handle
    /// - `Upstream` when a commerce query fails
    #[instrument(skip(self, query), fields(handle = handle.unwrap_or_default()))]
    pub async fn load(
        &self,
        handle: Option<&str>,
        query: Option<&str>,
    ) -> Result<ProductPageData, LoaderError> {
        let raw = handle
            .filter(|h| !h.is_empty())
            .ok_or(LoaderError::MissingHandle)?;

        let handle = Handle::parse(raw).map_err(|e| {
            debug!(error = %e, "Rejected product handle");
            LoaderError::NotFound(raw.to_string())
        })?;

        let selected_options = parse_selected_options(query);

        let commerce = self.load_commerce(&handle, &selected_options);
        let content = self.load_content(&handle);
        tokio::pin!(commerce);
        tokio::pin!(content);

        // A commerce error returns immediately; the CMS fetch is dropped.
        let ((product, complete_the_look_product), dato_content) = tokio::select! {
            result = &mut commerce => {
                let found = result?;
                let nodes = match tokio::time::timeout(self.content_budget, content).await {
                    Ok(nodes) => nodes,
                    Err(_) => {
                        warn!(
                            budget_ms = self.content_budget.as_millis(),
                            "CMS content exceeded budget"
                        );
                        None
                    }
                };
                (found, nodes)
            }
            nodes = &mut content => (commerce.await?, nodes),
        };

        Ok(ProductPageData {
            product,
            complete_the_look_product,
            dato_content,
            deferred: Self::load_deferred(),
        })
    }

    /// Data that must never fail the page.
    #[must_use]
    pub const fn load_deferred() -> DeferredData {
        DeferredData {}
    }

    async fn load_commerce(
        &self,
        handle: &Handle,
        selected_options: &SelectedOptions,
    ) -> Result<(Product, Option<Product>), LoaderError> {
        let product = self
            .products
            .product_by_handle(handle, selected_options)
            .await?
            .ok_or_else(|| LoaderError::NotFound(handle.to_string()))?;

        let complete_the_look = match &product.complete_the_look {
            Some(id) => {
                let found = self.products.product_by_id(id, selected_options).await?;
                if found.is_none() {
                    debug!(product_id = %id, "Complete-the-look product not found");
                }
                found
            }
            None => None,
        };

        Ok((product, complete_the_look))
    }

    async fn load_content(&self, handle: &Handle) -> Option<Vec<ContentNode>> {
        match self.content.detail_content(handle).await {
            Ok(Some(nodes)) => Some(nodes),
            Ok(None) => {
                debug!("No CMS content for product");
                None
            }
            Err(e) => {
                warn!(error = %e, "CMS content unavailable");
                None
            }
        }
    }
}

/// Parse `Name=Value` pairs from a raw query string.
#[must_use]
pub fn parse_selected_options(query: Option<&str>) -> SelectedOptions {
    let query = query.unwrap_or_default().trim_start_matches('?');
    SelectedOptions::from_pairs(url::form_urlencoded::parse(query.as_bytes()))
}
