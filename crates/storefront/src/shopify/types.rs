//! Domain types for Shopify Storefront API.
//!
//! These types provide a clean, ergonomic API separate from the raw wire
//! types the GraphQL queries deserialize into.

use lookbook_core::{CartId, Price, ProductId, SelectedOption, VariantId};
use serde::{Deserialize, Serialize};

// =============================================================================
// Money Types
// =============================================================================

/// Monetary amount with currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Decimal amount as string (preserves precision).
    pub amount: String,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

impl Money {
    /// Format for display, falling back to `"{amount} {code}"` for
    /// currencies the storefront doesn't know.
    #[must_use]
    pub fn display(&self) -> String {
        Price::parse(&self.amount, &self.currency_code).map_or_else(
            |_| format!("{} {}", self.amount, self.currency_code),
            |price| price.display(),
        )
    }
}

// =============================================================================
// Image Types
// =============================================================================

/// Product or variant image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Shopify image ID.
    pub id: Option<String>,
    /// Image URL.
    pub url: String,
    /// Alt text for accessibility.
    pub alt_text: Option<String>,
    /// Image width in pixels.
    pub width: Option<i64>,
    /// Image height in pixels.
    pub height: Option<i64>,
}

// =============================================================================
// SEO Types
// =============================================================================

/// SEO metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seo {
    /// Page title for search engines.
    pub title: Option<String>,
    /// Meta description.
    pub description: Option<String>,
}

// =============================================================================
// Product Types
// =============================================================================

/// Minimal product reference carried by a variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantProduct {
    /// Product title.
    pub title: String,
    /// Product handle.
    pub handle: String,
}

/// A product variant (specific combination of options).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    /// Variant ID.
    pub id: VariantId,
    /// Variant title (combination of option values).
    pub title: String,
    /// Whether this variant is available for sale.
    pub available_for_sale: bool,
    /// SKU code.
    pub sku: Option<String>,
    /// Current price.
    pub price: Money,
    /// Compare-at price (original price if on sale).
    pub compare_at_price: Option<Money>,
    /// Unit price (e.g., per 100ml).
    pub unit_price: Option<Money>,
    /// Selected options for this variant.
    pub selected_options: Vec<SelectedOption>,
    /// Variant image.
    pub image: Option<Image>,
    /// Owning product.
    pub product: VariantProduct,
}

impl ProductVariant {
    /// The value this variant has for an option (case-insensitive name).
    #[must_use]
    pub fn option_value(&self, name: &str) -> Option<&str> {
        self.selected_options
            .iter()
            .find(|o| o.is_named(name))
            .map(|o| o.value.as_str())
    }

    /// Whether the compare-at price marks this variant as on sale.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        let Some(compare_at) = &self.compare_at_price else {
            return false;
        };
        match (
            Price::parse(&compare_at.amount, &compare_at.currency_code),
            Price::parse(&self.price.amount, &self.price.currency_code),
        ) {
            (Ok(compare_at), Ok(price)) => compare_at.is_above(&price),
            _ => false,
        }
    }
}

/// Swatch shown for an option value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionSwatch {
    /// Hex colour.
    pub color: Option<String>,
    /// Preview image URL.
    pub image_url: Option<String>,
}

/// One value of a product option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOptionValue {
    /// Value name (e.g., "Medium").
    pub name: String,
    /// First variant that can be selected with this value.
    pub first_selectable_variant: Option<ProductVariant>,
    /// Swatch, if the merchant configured one.
    pub swatch: Option<OptionSwatch>,
}

/// Product option definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOption {
    /// Option name (e.g., "Size").
    pub name: String,
    /// Available values in merchant order.
    pub option_values: Vec<ProductOptionValue>,
}

/// A product in the store, as needed by the product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// URL handle.
    pub handle: String,
    /// Product title.
    pub title: String,
    /// Vendor name.
    pub vendor: String,
    /// Plain text description.
    pub description: String,
    /// HTML description.
    pub description_html: String,
    /// Product referenced by the `custom.complete_the_look` metafield.
    pub complete_the_look: Option<ProductId>,
    /// Product options.
    pub options: Vec<ProductOption>,
    /// Variant matching the requested options, or the first available one.
    pub selected_or_first_available_variant: Option<ProductVariant>,
    /// Variants one option change away from the selected variant.
    pub adjacent_variants: Vec<ProductVariant>,
    /// SEO metadata.
    pub seo: Seo,
}

impl Product {
    /// Whether the product declares an option with this name (case-insensitive).
    #[must_use]
    pub fn has_option(&self, name: &str) -> bool {
        self.options
            .iter()
            .any(|option| option.name.eq_ignore_ascii_case(name))
    }
}

// =============================================================================
// Cart Types
// =============================================================================

/// A custom key/value attribute on a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute key.
    pub key: String,
    /// Attribute value.
    pub value: String,
}

/// Input for adding a line to a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineInput {
    /// Variant ID to add.
    pub merchandise_id: VariantId,
    /// Quantity to add.
    pub quantity: i64,
    /// Optional line attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<Attribute>>,
    /// Optional selling plan (subscription) ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selling_plan_id: Option<String>,
}

impl CartLineInput {
    /// A plain line for `quantity` of one variant.
    #[must_use]
    pub const fn new(merchandise_id: VariantId, quantity: i64) -> Self {
        Self {
            merchandise_id,
            quantity,
            attributes: None,
            selling_plan_id: None,
        }
    }
}

/// The cart summary the storefront keeps track of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Cart ID.
    pub id: CartId,
    /// Checkout URL.
    pub checkout_url: String,
    /// Total number of items.
    pub total_quantity: i64,
}

/// A user error returned by a cart mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartUserError {
    /// Error code, if provided.
    pub code: Option<String>,
    /// Input path the error refers to.
    pub field: Option<Vec<String>>,
    /// Human-readable message.
    pub message: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn money(amount: &str) -> Money {
        Money {
            amount: amount.to_string(),
            currency_code: "USD".to_string(),
        }
    }

    fn variant(price: &str, compare_at: Option<&str>) -> ProductVariant {
        ProductVariant {
            id: VariantId::new("gid://shopify/ProductVariant/1"),
            title: "M / Sand".to_string(),
            available_for_sale: true,
            sku: None,
            price: money(price),
            compare_at_price: compare_at.map(money),
            unit_price: None,
            selected_options: vec![
                SelectedOption::new("Size", "M"),
                SelectedOption::new("Color", "Sand"),
            ],
            image: None,
            product: VariantProduct {
                title: "Linen Shirt".to_string(),
                handle: "linen-shirt".to_string(),
            },
        }
    }

    #[test]
    fn test_money_display() {
        assert_eq!(money("48.0").display(), "$48.00");
    }

    #[test]
    fn test_money_display_unknown_currency() {
        let m = Money {
            amount: "10.0".to_string(),
            currency_code: "XTS".to_string(),
        };
        assert_eq!(m.display(), "10.0 XTS");
    }

    #[test]
    fn test_option_value_case_insensitive() {
        let v = variant("48.0", None);
        assert_eq!(v.option_value("color"), Some("Sand"));
        assert_eq!(v.option_value("Fit"), None);
    }

    #[test]
    fn test_is_on_sale() {
        assert!(variant("40.0", Some("48.0")).is_on_sale());
        assert!(!variant("48.0", Some("48.0")).is_on_sale());
        assert!(!variant("48.0", None).is_on_sale());
    }

    #[test]
    fn test_cart_line_input_serializes_camel_case() {
        let line = CartLineInput::new(VariantId::new("gid://shopify/ProductVariant/1"), 2);
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "merchandiseId": "gid://shopify/ProductVariant/1",
                "quantity": 2
            })
        );
    }
}
