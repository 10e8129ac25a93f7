//! Product option selection.
//!
//! A product URL such as `/products/linen-shirt?Size=M&Color=Sand` selects
//! option values by name. The selection is kept in request order, and names
//! compare case-insensitively because Shopify matches them that way.

use serde::{Deserialize, Serialize};

/// A single chosen option value (e.g., `Size` = `M`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectedOption {
    /// Option name (e.g., "Size", "Color").
    pub name: String,
    /// Selected value (e.g., "Large", "Blue").
    pub value: String,
}

impl SelectedOption {
    /// Create a new selected option.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Whether this option has the given name (case-insensitive).
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Whether this option has the given name and value (case-insensitive).
    #[must_use]
    pub fn matches(&self, name: &str, value: &str) -> bool {
        self.is_named(name) && self.value.eq_ignore_ascii_case(value)
    }
}

/// Ordered mapping from option name to chosen value.
///
/// Built from query-string pairs. Empty names or values are dropped, and a
/// repeated name keeps its first occurrence. Unrecognized names are kept
/// here; whether they mean anything is decided against a product's options.
///
/// ```
/// use lookbook_core::SelectedOptions;
///
/// let options = SelectedOptions::from_pairs([("Size", "M"), ("size", "L"), ("Color", "")]);
/// assert_eq!(options.len(), 1);
/// assert_eq!(options.get("SIZE"), Some("M"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectedOptions(Vec<SelectedOption>);

impl SelectedOptions {
    /// An empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Build a selection from name/value pairs in order.
    pub fn from_pairs<I, N, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: AsRef<str>,
    {
        let mut options = Self::new();
        for (name, value) in pairs {
            options.push(name.as_ref(), value.as_ref());
        }
        options
    }

    /// Append a selection unless the name is empty or already present.
    pub fn push(&mut self, name: &str, value: &str) {
        let name = name.trim();
        let value = value.trim();
        if name.is_empty() || value.is_empty() || self.get(name).is_some() {
            return;
        }
        self.0.push(SelectedOption::new(name, value));
    }

    /// Get the chosen value for an option name (case-insensitive).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|option| option.is_named(name))
            .map(|option| option.value.as_str())
    }

    /// Return a copy with `name` set to `value`, keeping the position of an
    /// existing entry or appending a new one.
    #[must_use]
    pub fn with(&self, name: &str, value: &str) -> Self {
        let mut next = self.clone();
        match next.0.iter_mut().find(|option| option.is_named(name)) {
            Some(option) => value.clone_into(&mut option.value),
            None => next.0.push(SelectedOption::new(name, value)),
        }
        next
    }

    /// Keep only the options whose names satisfy `known`.
    #[must_use]
    pub fn retain_known(&self, known: impl Fn(&str) -> bool) -> Self {
        Self(
            self.0
                .iter()
                .filter(|option| known(&option.name))
                .cloned()
                .collect(),
        )
    }

    /// Iterate over the selections in order.
    pub fn iter(&self) -> std::slice::Iter<'_, SelectedOption> {
        self.0.iter()
    }

    /// Number of selections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The selections as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[SelectedOption] {
        &self.0
    }
}

impl From<Vec<SelectedOption>> for SelectedOptions {
    fn from(options: Vec<SelectedOption>) -> Self {
        Self::from_pairs(options.into_iter().map(|o| (o.name, o.value)))
    }
}

impl<'a> IntoIterator for &'a SelectedOptions {
    type Item = &'a SelectedOption;
    type IntoIter = std::slice::Iter<'a, SelectedOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
