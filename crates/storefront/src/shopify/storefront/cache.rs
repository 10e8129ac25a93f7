//! Cache keys for Storefront API responses.

use lookbook_core::{Handle, ProductId, SelectedOptions};

/// Cache key for product lookups.
///
/// The selected options are part of the key because they change which
/// variant Shopify resolves as selected and which variants are adjacent.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    ProductByHandle(Handle, SelectedOptions),
    ProductById(ProductId, SelectedOptions),
}
