//! DatoCMS GraphQL client for editorial product content.
//!
//! Fetches the `detail` record whose slug is `/{handle}` and returns its
//! content blocks. Content is secondary: callers treat every error as
//! "no content".

use graphql_client::{GraphQLQuery, QueryBody, Response};
use lookbook_core::Handle;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::config::DatoConfig;
use crate::graphql::{GraphQLError, format_graphql_errors, snippet};

const DETAIL_DOCUMENT: &str = include_str!("../../graphql/dato/detail.graphql");

/// Errors that can occur when interacting with the DatoCMS API.
#[derive(Debug, Error)]
pub enum DatoError {
    /// HTTP request failed (including timeouts).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// One content block of a CMS detail record, tagged by `__typename`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum ContentNode {
    #[serde(rename_all = "camelCase")]
    RichTextRecord { text_content: Option<String> },
    BulletRecord { content: Option<String> },
    /// A block type this storefront does not render.
    #[serde(other)]
    Unsupported,
}

impl ContentNode {
    /// Text to render for this block, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::RichTextRecord { text_content } => text_content.as_deref(),
            Self::BulletRecord { content } => content.as_deref(),
            Self::Unsupported => None,
        }
    }

    /// Whether this block renders as a bullet point.
    #[must_use]
    pub const fn is_bullet(&self) -> bool {
        matches!(self, Self::BulletRecord { .. })
    }
}

// =============================================================================
// Query
// =============================================================================

/// `query DatoQuery` - detail record by slug.
pub struct DatoQuery;

pub mod dato_query {
    use serde::Serialize;

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub handle: String,
    }
}

impl GraphQLQuery for DatoQuery {
    type Variables = dato_query::Variables;
    type ResponseData = DetailResponse;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: DETAIL_DOCUMENT,
            operation_name: "DatoQuery",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DetailResponse {
    pub detail: Option<DetailFields>,
}

#[derive(Debug, Deserialize)]
pub struct DetailFields {
    pub title: Option<String>,
    pub content: Option<Vec<ContentNode>>,
}

// =============================================================================
// Client
// =============================================================================

/// DatoCMS Content Delivery API client.
#[derive(Clone)]
pub struct DatoClient {
    client: reqwest::Client,
    endpoint: String,
}

impl DatoClient {
    /// Create a new DatoCMS client.
    ///
    /// # Errors
    ///
    /// Returns error if the token is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &DatoConfig) -> Result<Self, DatoError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.api_token.expose_secret());
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&auth_value)
                .map_err(|e| DatoError::Parse(format!("Invalid API token format: {e}")))?,
        );
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        headers.insert("Accept", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Fetch the content blocks of the detail record for `handle`.
    ///
    /// Returns `Ok(None)` when no record matches or it has no content.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, times out, or the body is not a
    /// valid GraphQL response.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn detail_content(
        &self,
        handle: &Handle,
    ) -> Result<Option<Vec<ContentNode>>, DatoError> {
        let body = DatoQuery::build_query(dato_query::Variables {
            handle: handle.cms_slug(),
        });

        let response = self.client.post(&self.endpoint).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(DatoError::Api {
                status: status.as_u16(),
                message: snippet(&text, 200),
            });
        }

        let response: Response<DetailResponse> =
            serde_json::from_str(&text).map_err(|e| DatoError::Parse(e.to_string()))?;

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            return Err(DatoError::GraphQL(
                errors.into_iter().map(GraphQLError::from).collect(),
            ));
        }

        Ok(response
            .data
            .and_then(|d| d.detail)
            .and_then(|d| d.content)
            .filter(|nodes| !nodes.is_empty()))
    }
}
