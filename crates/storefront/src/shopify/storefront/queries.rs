//! GraphQL operation definitions for Shopify Storefront API.
//!
//! The operations implement [`GraphQLQuery`] by hand: each one pairs a
//! document from `graphql/storefront/queries/` with the variables it sends
//! and the response shape it reads. Wire types mirror the selection sets
//! exactly and are converted to domain types in `conversions`.

use graphql_client::{GraphQLQuery, QueryBody};
use lookbook_core::SelectedOption;
use serde::{Deserialize, Serialize};

use crate::shopify::types::CartLineInput;

const PRODUCTS_DOCUMENT: &str =
    include_str!("../../../graphql/storefront/queries/products.graphql");
const CART_DOCUMENT: &str = include_str!("../../../graphql/storefront/queries/cart.graphql");

// =============================================================================
// Product queries
// =============================================================================

/// `query ProductByHandle` - product page data by URL handle.
pub struct ProductByHandle;

/// `query ProductById` - product page data by global ID.
pub struct ProductById;

pub mod product_by_handle {
    use super::{SelectedOption, Serialize};

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub country: Option<String>,
        pub handle: String,
        pub language: Option<String>,
        pub selected_options: Vec<SelectedOption>,
    }
}

pub mod product_by_id {
    use super::{SelectedOption, Serialize};

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub country: Option<String>,
        pub id: String,
        pub language: Option<String>,
        pub selected_options: Vec<SelectedOption>,
    }
}

impl GraphQLQuery for ProductByHandle {
    type Variables = product_by_handle::Variables;
    type ResponseData = ProductResponse;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: PRODUCTS_DOCUMENT,
            operation_name: "ProductByHandle",
        }
    }
}

impl GraphQLQuery for ProductById {
    type Variables = product_by_id::Variables;
    type ResponseData = ProductResponse;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: PRODUCTS_DOCUMENT,
            operation_name: "ProductById",
        }
    }
}

/// Response of both product queries.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductResponse {
    pub product: Option<ProductFields>,
}

/// `fragment ProductPage`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFields {
    pub id: String,
    pub title: String,
    pub vendor: String,
    pub handle: String,
    pub description_html: String,
    pub description: String,
    pub metafield: Option<MetafieldFields>,
    pub options: Vec<ProductOptionFields>,
    pub selected_or_first_available_variant: Option<ProductVariantFields>,
    #[serde(default)]
    pub adjacent_variants: Vec<ProductVariantFields>,
    pub seo: SeoFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetafieldFields {
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOptionFields {
    pub name: String,
    pub option_values: Vec<ProductOptionValueFields>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOptionValueFields {
    pub name: String,
    pub first_selectable_variant: Option<ProductVariantFields>,
    pub swatch: Option<SwatchFields>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SwatchFields {
    pub color: Option<String>,
    pub image: Option<SwatchImageFields>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwatchImageFields {
    pub preview_image: Option<UrlFields>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UrlFields {
    pub url: String,
}

/// `fragment ProductPageVariant`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariantFields {
    pub available_for_sale: bool,
    pub compare_at_price: Option<MoneyFields>,
    pub id: String,
    pub image: Option<ImageFields>,
    pub price: MoneyFields,
    pub product: VariantProductFields,
    pub selected_options: Vec<SelectedOptionFields>,
    pub sku: Option<String>,
    pub title: String,
    pub unit_price: Option<MoneyFields>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyFields {
    pub amount: String,
    pub currency_code: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFields {
    pub id: Option<String>,
    pub url: String,
    pub alt_text: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VariantProductFields {
    pub title: String,
    pub handle: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectedOptionFields {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeoFields {
    pub title: Option<String>,
    pub description: Option<String>,
}

// =============================================================================
// Cart mutations and queries
// =============================================================================

/// `mutation CartCreate`.
pub struct CartCreate;

/// `mutation CartLinesAdd`.
pub struct CartLinesAdd;

/// `query CartCount`.
pub struct CartCount;

pub mod cart_create {
    use super::{CartLineInput, Serialize};

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub input: CartInput,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct CartInput {
        pub lines: Vec<CartLineInput>,
    }
}

pub mod cart_lines_add {
    use super::{CartLineInput, Serialize};

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
        pub lines: Vec<CartLineInput>,
    }
}

pub mod cart_count {
    use super::Serialize;

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
    }
}

impl GraphQLQuery for CartCreate {
    type Variables = cart_create::Variables;
    type ResponseData = CartCreateResponse;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: CART_DOCUMENT,
            operation_name: "CartCreate",
        }
    }
}

impl GraphQLQuery for CartLinesAdd {
    type Variables = cart_lines_add::Variables;
    type ResponseData = CartLinesAddResponse;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: CART_DOCUMENT,
            operation_name: "CartLinesAdd",
        }
    }
}

impl GraphQLQuery for CartCount {
    type Variables = cart_count::Variables;
    type ResponseData = CartCountResponse;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: CART_DOCUMENT,
            operation_name: "CartCount",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCreateResponse {
    pub cart_create: Option<CartMutationPayload>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLinesAddResponse {
    pub cart_lines_add: Option<CartMutationPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartCountResponse {
    pub cart: Option<CartSummaryFields>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMutationPayload {
    pub cart: Option<CartSummaryFields>,
    #[serde(default)]
    pub user_errors: Vec<CartUserErrorFields>,
}

/// `fragment CartSummary`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummaryFields {
    pub id: String,
    pub checkout_url: String,
    pub total_quantity: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartUserErrorFields {
    pub code: Option<String>,
    pub field: Option<Vec<String>>,
    pub message: String,
}
