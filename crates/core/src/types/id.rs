//! Newtype IDs for Shopify global identifiers.
//!
//! Shopify identifies every object with a global ID string such as
//! `gid://shopify/Product/8123456789`. Use the `define_gid!` macro to create
//! type-safe wrappers that prevent mixing IDs of different resource types.

/// Macro to define a type-safe Shopify global ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Accessors: `new()`, `as_str()`, `resource_id()`
/// - `Display` and `From<String>` implementations
///
/// # Example
///
/// ```rust
/// # use lookbook_core::define_gid;
/// define_gid!(CollectionId);
///
/// let id = CollectionId::new("gid://shopify/Collection/42");
/// assert_eq!(id.resource_id(), Some("42"));
/// ```
#[macro_export]
macro_rules! define_gid {
    ($name:ident) => {
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a global ID string.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the global ID as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// The trailing resource ID (`8123456789` in
            /// `gid://shopify/Product/8123456789`), ignoring any query suffix.
            #[must_use]
            pub fn resource_id(&self) -> Option<&str> {
                let path = self.0.strip_prefix("gid://")?;
                let path = path.split('?').next().unwrap_or(path);
                path.rsplit('/').next().filter(|id| !id.is_empty())
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }
    };
}

define_gid!(ProductId);
define_gid!(VariantId);
define_gid!(CartId);
