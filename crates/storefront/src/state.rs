//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::services::{DatoClient, DatoError, ProductPageLoader};
use crate::shopify::{ShopifyError, StorefrontClient};

/// Error building application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("storefront client: {0}")]
    Shopify(#[from] ShopifyError),
    #[error("dato client: {0}")]
    Dato(#[from] DatoError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like API clients and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    storefront: StorefrontClient,
    product_page: ProductPageLoader,
}

impl AppState {
    /// Create application state with clients built from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if either HTTP client fails to build.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateError> {
        let storefront = StorefrontClient::new(&config.shopify)?;
        Self::with_storefront(config, storefront)
    }

    /// Create application state around an existing Storefront client.
    ///
    /// # Errors
    ///
    /// Returns an error if the DatoCMS client fails to build.
    pub fn with_storefront(
        config: StorefrontConfig,
        storefront: StorefrontClient,
    ) -> Result<Self, StateError> {
        let dato = DatoClient::new(&config.dato)?;
        let product_page = ProductPageLoader::new(Arc::new(storefront.clone()), Arc::new(dato));

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                storefront,
                product_page,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the Shopify Storefront API client.
    #[must_use]
    pub fn storefront(&self) -> &StorefrontClient {
        &self.inner.storefront
    }

    /// Get a reference to the product page loader.
    #[must_use]
    pub fn product_page(&self) -> &ProductPageLoader {
        &self.inner.product_page
    }
}
