//! Core types for the Lookbook storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod handle;
pub mod id;
pub mod options;
pub mod price;

pub use handle::{Handle, HandleError};
pub use id::*;
pub use options::{SelectedOption, SelectedOptions};
pub use price::{CurrencyCode, Price, PriceError};
