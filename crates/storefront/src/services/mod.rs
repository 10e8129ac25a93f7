//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `dato` - DatoCMS client for editorial product content
//! - `product_page` - Product page loader (Shopify + DatoCMS)
//! - `variants` - Variant selection and option pickers

pub mod dato;
pub mod product_page;
pub mod variants;

pub use dato::{ContentNode, DatoClient, DatoError};
pub use product_page::{
    ContentSource, DeferredData, LoaderError, ProductPageData, ProductPageLoader, ProductSource,
};
