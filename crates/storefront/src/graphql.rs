//! GraphQL error reporting shared by the Shopify and DatoCMS clients.

use graphql_client::PathFragment;

/// A GraphQL error returned by an upstream API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

impl GraphQLError {
    /// An error with only a message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: vec![],
            path: vec![],
        }
    }
}

impl From<graphql_client::Error> for GraphQLError {
    fn from(e: graphql_client::Error) -> Self {
        Self {
            message: e.message,
            locations: e.locations.map_or_else(Vec::new, |locs| {
                locs.into_iter()
                    .map(|l| GraphQLErrorLocation {
                        line: i64::from(l.line),
                        column: i64::from(l.column),
                    })
                    .collect()
            }),
            path: e.path.map_or_else(Vec::new, |p| {
                p.into_iter()
                    .map(|fragment| match fragment {
                        PathFragment::Key(s) => serde_json::Value::String(s),
                        PathFragment::Index(i) => serde_json::Value::Number(i.into()),
                    })
                    .collect()
            }),
        }
    }
}

/// Render a list of GraphQL errors on one line.
pub fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let mut parts = Vec::new();

            if !e.message.is_empty() {
                parts.push(e.message.clone());
            }

            if !e.path.is_empty() {
                let path_str = e
                    .path
                    .iter()
                    .map(|p| match p {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(".");
                parts.push(format!("path: {path_str}"));
            }

            if let Some(loc) = e.locations.first() {
                parts.push(format!("at line {}:{}", loc.line, loc.column));
            }

            if parts.is_empty() {
                format!("[error {}]: (no details)", i + 1)
            } else {
                parts.join(" ")
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Truncate an upstream response body for logging.
pub(crate) fn snippet(body: &str, max_chars: usize) -> String {
    body.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_messages() {
        let errors = vec![
            GraphQLError::message("Field not found"),
            GraphQLError::message("Invalid ID"),
        ];
        assert_eq!(format_graphql_errors(&errors), "Field not found; Invalid ID");
    }

    #[test]
    fn test_format_path_and_location() {
        let errors = vec![GraphQLError {
            message: String::new(),
            locations: vec![GraphQLErrorLocation { line: 5, column: 10 }],
            path: vec![
                serde_json::Value::String("product".to_string()),
                serde_json::Value::Number(0.into()),
            ],
        }];
        assert_eq!(format_graphql_errors(&errors), "path: product.0 at line 5:10");
    }

    #[test]
    fn test_format_no_details() {
        let errors = vec![GraphQLError::message("")];
        assert_eq!(format_graphql_errors(&errors), "[error 1]: (no details)");
    }

    #[test]
    fn test_format_empty_vec() {
        assert_eq!(format_graphql_errors(&[]), "(no error details provided)");
    }

    #[test]
    fn test_snippet_truncates_on_chars() {
        assert_eq!(snippet("héllo world", 5), "héllo");
    }
}
