//! Product type conversion functions.

use lookbook_core::{ProductId, SelectedOption, VariantId};

use crate::shopify::types::{
    Image, Money, OptionSwatch, Product, ProductOption, ProductOptionValue, ProductVariant, Seo,
    VariantProduct,
};

use super::super::queries::{
    ImageFields, MetafieldFields, MoneyFields, ProductFields, ProductOptionFields,
    ProductOptionValueFields, ProductVariantFields, SwatchFields,
};

pub fn convert_product(fields: ProductFields) -> Product {
    Product {
        id: ProductId::new(fields.id),
        handle: fields.handle,
        title: fields.title,
        vendor: fields.vendor,
        description: fields.description,
        description_html: fields.description_html,
        complete_the_look: fields.metafield.and_then(convert_reference),
        options: fields.options.into_iter().map(convert_option).collect(),
        selected_or_first_available_variant: fields
            .selected_or_first_available_variant
            .map(convert_variant),
        adjacent_variants: fields
            .adjacent_variants
            .into_iter()
            .map(convert_variant)
            .collect(),
        seo: Seo {
            title: fields.seo.title,
            description: fields.seo.description,
        },
    }
}

/// A product reference metafield holds the referenced product's GID.
/// Blank values are treated as unset.
fn convert_reference(metafield: MetafieldFields) -> Option<ProductId> {
    let value = metafield.value.trim();
    (!value.is_empty()).then(|| ProductId::new(value))
}

fn convert_option(o: ProductOptionFields) -> ProductOption {
    ProductOption {
        name: o.name,
        option_values: o.option_values.into_iter().map(convert_option_value).collect(),
    }
}

fn convert_option_value(v: ProductOptionValueFields) -> ProductOptionValue {
    ProductOptionValue {
        name: v.name,
        first_selectable_variant: v.first_selectable_variant.map(convert_variant),
        swatch: v.swatch.map(convert_swatch),
    }
}

fn convert_swatch(s: SwatchFields) -> OptionSwatch {
    OptionSwatch {
        color: s.color,
        image_url: s.image.and_then(|i| i.preview_image).map(|p| p.url),
    }
}

fn convert_money(m: MoneyFields) -> Money {
    Money {
        amount: m.amount,
        currency_code: m.currency_code,
    }
}

fn convert_image(i: ImageFields) -> Image {
    Image {
        id: i.id,
        url: i.url,
        alt_text: i.alt_text,
        width: i.width,
        height: i.height,
    }
}

fn convert_variant(v: ProductVariantFields) -> ProductVariant {
    ProductVariant {
        id: VariantId::new(v.id),
        title: v.title,
        available_for_sale: v.available_for_sale,
        sku: v.sku.filter(|s| !s.is_empty()),
        price: convert_money(v.price),
        compare_at_price: v.compare_at_price.map(convert_money),
        unit_price: v.unit_price.map(convert_money),
        selected_options: v
            .selected_options
            .into_iter()
            .map(|o| SelectedOption::new(o.name, o.value))
            .collect(),
        image: v.image.map(convert_image),
        product: VariantProduct {
            title: v.product.title,
            handle: v.product.handle,
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::shopify::storefront::queries::ProductResponse;

    fn response(metafield: serde_json::Value) -> ProductResponse {
        let variant = serde_json::json!({
            "availableForSale": true,
            "compareAtPrice": null,
            "id": "gid://shopify/ProductVariant/11",
            "image": {"id": "gid://shopify/ProductImage/5", "url": "https://cdn.shopify.com/a.jpg", "altText": null, "width": 800, "height": 1000},
            "price": {"amount": "48.0", "currencyCode": "USD"},
            "product": {"title": "Linen Shirt", "handle": "linen-shirt"},
            "selectedOptions": [{"name": "Size", "value": "M"}],
            "sku": "",
            "title": "M",
            "unitPrice": null
        });
        serde_json::from_value(serde_json::json!({
            "product": {
                "id": "gid://shopify/Product/1",
                "title": "Linen Shirt",
                "vendor": "Lookbook",
                "handle": "linen-shirt",
                "descriptionHtml": "<p>Breathable.</p>",
                "description": "Breathable.",
                "metafield": metafield,
                "options": [{
                    "name": "Size",
                    "optionValues": [{
                        "name": "M",
                        "firstSelectableVariant": variant,
                        "swatch": {"color": "#eee", "image": {"previewImage": {"url": "https://cdn.shopify.com/s.png"}}}
                    }]
                }],
                "selectedOrFirstAvailableVariant": variant,
                "adjacentVariants": [],
                "seo": {"title": null, "description": null}
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_convert_product_with_reference() {
        let fields = response(serde_json::json!({"value": "gid://shopify/Product/2"}))
            .product
            .unwrap();
        let product = convert_product(fields);

        assert_eq!(product.id.as_str(), "gid://shopify/Product/1");
        assert_eq!(
            product.complete_the_look,
            Some(ProductId::new("gid://shopify/Product/2"))
        );
        let variant = product.selected_or_first_available_variant.unwrap();
        assert_eq!(variant.option_value("size"), Some("M"));
        assert_eq!(variant.sku, None);
        assert_eq!(variant.image.unwrap().width, Some(800));
        assert_eq!(
            product.options[0].option_values[0]
                .swatch
                .as_ref()
                .unwrap()
                .image_url
                .as_deref(),
            Some("https://cdn.shopify.com/s.png")
        );
    }

    #[test]
    fn test_convert_product_without_metafield() {
        let product = convert_product(response(serde_json::Value::Null).product.unwrap());
        assert_eq!(product.complete_the_look, None);
    }

    #[test]
    fn test_blank_reference_is_unset() {
        let product = convert_product(
            response(serde_json::json!({"value": "  "}))
                .product
                .unwrap(),
        );
        assert_eq!(product.complete_the_look, None);
    }
}
