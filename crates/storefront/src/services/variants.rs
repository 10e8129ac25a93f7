//! Variant selection for the product page.
//!
//! Shopify resolves `selectedOrFirstAvailableVariant` and the adjacent
//! variants for the requested options; this module picks the variant to show
//! from those candidates and builds the option pickers around it.

use lookbook_core::{SelectedOption, SelectedOptions, VariantId};
use serde::Serialize;

use crate::shopify::types::{OptionSwatch, Product, ProductVariant};

/// An option picker (e.g. "Size") with its values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOptionView {
    pub name: String,
    pub values: Vec<ProductOptionValueView>,
}

/// One selectable value of an option picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOptionValueView {
    pub name: String,
    /// Part of the currently selected variant.
    pub selected: bool,
    /// Some variant has this value combined with the rest of the selection.
    pub exists: bool,
    /// That variant can be purchased.
    pub available: bool,
    pub variant_id: Option<VariantId>,
    /// Query string (without `?`) that selects this value.
    pub query: String,
    pub swatch: Option<OptionSwatch>,
}

/// Pick the variant to display for `requested`.
///
/// Candidates are the server-selected variant followed by the adjacent
/// variants. Requested names no candidate knows are ignored, and names and
/// values compare case-insensitively. Without a full match the
/// server-selected variant is used, then the first available adjacent
/// variant, then the first adjacent variant.
#[must_use]
pub fn resolve_variant(
    selected_or_first: Option<&ProductVariant>,
    adjacent: &[ProductVariant],
    requested: &SelectedOptions,
) -> Option<ProductVariant> {
    let candidates = || selected_or_first.into_iter().chain(adjacent);

    let known = requested.retain_known(|name| {
        candidates().any(|variant| variant.option_value(name).is_some())
    });

    if !known.is_empty()
        && let Some(variant) = candidates().find(|variant| matches_all(variant, &known))
    {
        return Some(variant.clone());
    }

    selected_or_first
        .or_else(|| adjacent.iter().find(|variant| variant.available_for_sale))
        .or_else(|| adjacent.first())
        .cloned()
}

fn matches_all(variant: &ProductVariant, options: &SelectedOptions) -> bool {
    options.iter().all(|option| {
        variant
            .option_value(&option.name)
            .is_some_and(|value| value.eq_ignore_ascii_case(&option.value))
    })
}

/// Build option pickers for `product` around `selected`.
///
/// Each value describes the variant reached by swapping that one value into
/// the current selection. When no known variant has that exact combination,
/// the value's first selectable variant stands in.
#[must_use]
pub fn product_options(
    product: &Product,
    selected: Option<&ProductVariant>,
) -> Vec<ProductOptionView> {
    let current: SelectedOptions = selected
        .map(|variant| SelectedOptions::from(variant.selected_options.clone()))
        .unwrap_or_default();

    let known: Vec<&ProductVariant> = selected
        .into_iter()
        .chain(product.selected_or_first_available_variant.as_ref())
        .chain(&product.adjacent_variants)
        .collect();

    product
        .options
        .iter()
        .map(|option| ProductOptionView {
            name: option.name.clone(),
            values: option
                .option_values
                .iter()
                .map(|value| {
                    let target = current.with(&option.name, &value.name);
                    let variant = known
                        .iter()
                        .copied()
                        .find(|variant| {
                            variant.selected_options.len() == target.len()
                                && matches_all(variant, &target)
                        })
                        .or(value.first_selectable_variant.as_ref());

                    let query = variant.map_or_else(
                        || selected_options_query(target.as_slice()),
                        |variant| selected_options_query(&variant.selected_options),
                    );

                    ProductOptionValueView {
                        name: value.name.clone(),
                        selected: current
                            .get(&option.name)
                            .is_some_and(|v| v.eq_ignore_ascii_case(&value.name)),
                        exists: variant.is_some(),
                        available: variant.is_some_and(|variant| variant.available_for_sale),
                        variant_id: variant.map(|variant| variant.id.clone()),
                        query,
                        swatch: value.swatch.clone(),
                    }
                })
                .collect(),
        })
        .collect()
}

/// Encode a selection as a query string, e.g. `Size=M&Color=Sea+Green`.
#[must_use]
pub fn selected_options_query(options: &[SelectedOption]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for option in options {
        serializer.append_pair(&option.name, &option.value);
    }
    serializer.finish()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
pub(crate) mod tests {
    use super::*;
    use crate::shopify::types::{Money, ProductOption, ProductOptionValue, Seo, VariantProduct};
    use lookbook_core::ProductId;

    pub(crate) fn variant(id: u32, size: &str, color: &str, available: bool) -> ProductVariant {
        ProductVariant {
            id: VariantId::new(format!("gid://shopify/ProductVariant/{id}")),
            title: format!("{size} / {color}"),
            available_for_sale: available,
            sku: None,
            price: Money {
                amount: "48.0".to_string(),
                currency_code: "USD".to_string(),
            },
            compare_at_price: None,
            unit_price: None,
            selected_options: vec![
                SelectedOption::new("Size", size),
                SelectedOption::new("Color", color),
            ],
            image: None,
            product: VariantProduct {
                title: "Linen Shirt".to_string(),
                handle: "linen-shirt".to_string(),
            },
        }
    }

    pub(crate) fn product(
        selected: Option<ProductVariant>,
        adjacent: Vec<ProductVariant>,
    ) -> Product {
        let value = |name: &str, first: Option<ProductVariant>| ProductOptionValue {
            name: name.to_string(),
            first_selectable_variant: first,
            swatch: None,
        };
        Product {
            id: ProductId::new("gid://shopify/Product/1"),
            handle: "linen-shirt".to_string(),
            title: "Linen Shirt".to_string(),
            vendor: "Lookbook".to_string(),
            description: String::new(),
            description_html: String::new(),
            complete_the_look: None,
            options: vec![
                ProductOption {
                    name: "Size".to_string(),
                    option_values: vec![
                        value("S", Some(variant(1, "S", "Sand", true))),
                        value("M", Some(variant(2, "M", "Sand", true))),
                        value("L", None),
                    ],
                },
                ProductOption {
                    name: "Color".to_string(),
                    option_values: vec![
                        value("Sand", Some(variant(1, "S", "Sand", true))),
                        value("Sea Green", Some(variant(4, "S", "Sea Green", false))),
                    ],
                },
            ],
            selected_or_first_available_variant: selected,
            adjacent_variants: adjacent,
            seo: Seo::default(),
        }
    }

    #[test]
    fn test_resolve_exact_match_case_insensitive() {
        let first = variant(1, "S", "Sand", true);
        let adjacent = vec![variant(2, "M", "Sand", true), variant(3, "L", "Sand", true)];
        let requested = SelectedOptions::from_pairs([("size", "l"), ("COLOR", "sand")]);

        let resolved = resolve_variant(Some(&first), &adjacent, &requested).unwrap();
        assert_eq!(resolved.id, adjacent[1].id);
    }

    #[test]
    fn test_resolve_ignores_unknown_options() {
        let first = variant(1, "S", "Sand", true);
        let adjacent = vec![variant(2, "M", "Sand", true)];
        let requested = SelectedOptions::from_pairs([("Size", "M"), ("Material", "Wool")]);

        let resolved = resolve_variant(Some(&first), &adjacent, &requested).unwrap();
        assert_eq!(resolved.id, adjacent[0].id);
    }

    #[test]
    fn test_resolve_non_matching_falls_back_to_first_available() {
        let first = variant(1, "S", "Sand", true);
        let adjacent = vec![variant(2, "M", "Sand", true)];
        let requested = SelectedOptions::from_pairs([("Size", "XXL")]);

        let resolved = resolve_variant(Some(&first), &adjacent, &requested).unwrap();
        assert_eq!(resolved.id, first.id);
    }

    #[test]
    fn test_resolve_without_server_variant() {
        let adjacent = vec![variant(2, "M", "Sand", false), variant(3, "L", "Sand", true)];
        let resolved = resolve_variant(None, &adjacent, &SelectedOptions::new()).unwrap();
        assert_eq!(resolved.id, adjacent[1].id);

        let sold_out = vec![variant(2, "M", "Sand", false)];
        let resolved = resolve_variant(None, &sold_out, &SelectedOptions::new()).unwrap();
        assert_eq!(resolved.id, sold_out[0].id);

        assert!(resolve_variant(None, &[], &SelectedOptions::new()).is_none());
    }

    #[test]
    fn test_product_options_marks_selection_and_availability() {
        let selected = variant(1, "S", "Sand", true);
        let product = product(
            Some(selected.clone()),
            vec![
                variant(2, "M", "Sand", true),
                variant(4, "S", "Sea Green", false),
            ],
        );

        let options = product_options(&product, Some(&selected));
        assert_eq!(options.len(), 2);

        let sizes = &options[0].values;
        assert!(sizes[0].selected);
        assert!(!sizes[1].selected);
        assert!(sizes[1].exists && sizes[1].available);
        assert_eq!(sizes[1].query, "Size=M&Color=Sand");
        assert!(!sizes[2].exists);
        assert!(!sizes[2].available);
        assert_eq!(sizes[2].query, "Size=L&Color=Sand");

        let colors = &options[1].values;
        assert!(colors[1].exists);
        assert!(!colors[1].available);
        assert_eq!(colors[1].query, "Size=S&Color=Sea+Green");
    }

    #[test]
    fn test_product_options_uses_first_selectable_fallback() {
        let selected = variant(2, "M", "Sand", true);
        let product = product(Some(selected.clone()), vec![]);

        let options = product_options(&product, Some(&selected));
        let small = &options[0].values[0];
        assert!(small.exists);
        assert_eq!(
            small.variant_id.as_ref().unwrap().as_str(),
            "gid://shopify/ProductVariant/1"
        );
    }

    #[test]
    fn test_selected_options_query_encodes() {
        let query = selected_options_query(&[
            SelectedOption::new("Size", "M"),
            SelectedOption::new("Color", "Sea Green & Sand"),
        ]);
        assert_eq!(query, "Size=M&Color=Sea+Green+%26+Sand");
    }
}
