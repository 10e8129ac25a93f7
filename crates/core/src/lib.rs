//! Lookbook Core - Shared domain types.
//!
//! This crate provides the types shared by the storefront binary and its
//! integration tests:
//! - product handles and Shopify global IDs
//! - prices with currency codes
//! - the ordered option selection parsed from a product URL
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Anything
//! that talks to Shopify or DatoCMS lives in the storefront crate.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for handles, IDs, prices, and option selections

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
