//! Product handle type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Handle`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HandleError {
    /// The input string is empty.
    #[error("handle cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("handle must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains whitespace or a path separator.
    #[error("handle contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// A product handle: the URL slug Shopify uses as a unique lookup key.
///
/// Handles are matched exactly by Shopify, so parsing does not normalize
/// case. It only rejects values that can never name a product.
///
/// ## Constraints
///
/// - Length: 1-255 characters
/// - No whitespace, no `/`, no `?`, no `#`
///
/// ## Examples
///
/// ```
/// use lookbook_core::Handle;
///
/// let handle = Handle::parse("linen-shirt").unwrap();
/// assert_eq!(handle.cms_slug(), "/linen-shirt");
///
/// assert!(Handle::parse("").is_err());
/// assert!(Handle::parse("linen shirt").is_err());
/// assert!(Handle::parse("shirts/linen").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Handle(String);

impl Handle {
    /// Maximum length of a Shopify handle.
    pub const MAX_LENGTH: usize = 255;

    /// Parse a `Handle` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 255 characters,
    /// or contains whitespace or URL delimiters.
    pub fn parse(s: &str) -> Result<Self, HandleError> {
        if s.is_empty() {
            return Err(HandleError::Empty);
        }

        if s.chars().count() > Self::MAX_LENGTH {
            return Err(HandleError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(c) = s
            .chars()
            .find(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#'))
        {
            return Err(HandleError::InvalidCharacter(c));
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the handle as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Handle` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the CMS slug for this handle (the handle prefixed with `/`).
    #[must_use]
    pub fn cms_slug(&self) -> String {
        format!("/{}", self.0)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
