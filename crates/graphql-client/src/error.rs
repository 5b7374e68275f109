//! Error types for GraphQL operations
//!
//! Every failure the transport can produce is a [`GraphqlError`]. Callers that
//! only care about the broad category use [`GraphqlError::kind`].

use thiserror::Error;

/// Broad failure category
///
/// No category is retried automatically, so consumers use this for display
/// and logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request never produced a usable HTTP response
    Network,
    /// The response did not have the expected shape
    Schema,
    /// The endpoint rejected the credentials
    Auth,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Network => write!(f, "network"),
            ErrorKind::Schema => write!(f, "schema"),
            ErrorKind::Auth => write!(f, "auth"),
        }
    }
}

/// GraphQL error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphqlError {
    /// Endpoint is not a usable http(s) URL
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// A configured header value cannot be sent over HTTP
    #[error("Invalid header {0}")]
    InvalidHeader(String),

    /// Connection, TLS, timeout or body read failure
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status other than an auth rejection
    #[error("HTTP {status}: {body}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// Credentials were rejected (401/403)
    #[error("Authorization rejected (HTTP {status})")]
    Auth {
        /// HTTP status code
        status: u16,
    },

    /// The server answered with a non-empty `errors` array
    #[error("GraphQL errors: {}", .0.join("; "))]
    Graphql(Vec<String>),

    /// The response body or its data did not match the expected shape
    #[error("Schema mismatch: {0}")]
    Schema(String),
}

impl GraphqlError {
    /// Collapse into the broad failure category
    pub fn kind(&self) -> ErrorKind {
        match self {
            GraphqlError::InvalidEndpoint(_)
            | GraphqlError::InvalidHeader(_)
            | GraphqlError::Network(_)
            | GraphqlError::Http { .. } => ErrorKind::Network,
            GraphqlError::Auth { .. } => ErrorKind::Auth,
            GraphqlError::Graphql(_) | GraphqlError::Schema(_) => ErrorKind::Schema,
        }
    }
}

impl From<serde_json::Error> for GraphqlError {
    fn from(err: serde_json::Error) -> Self {
        GraphqlError::Schema(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_collapses_variants() {
        assert_eq!(GraphqlError::Network("refused".into()).kind(), ErrorKind::Network);
        assert_eq!(
            GraphqlError::Http { status: 502, body: String::new() }.kind(),
            ErrorKind::Network
        );
        assert_eq!(GraphqlError::Auth { status: 401 }.kind(), ErrorKind::Auth);
        assert_eq!(GraphqlError::Graphql(vec!["bad field".into()]).kind(), ErrorKind::Schema);
        assert_eq!(GraphqlError::Schema("missing data".into()).kind(), ErrorKind::Schema);
    }

    #[test]
    fn test_display_joins_graphql_messages() {
        let err = GraphqlError::Graphql(vec!["first".into(), "second".into()]);
        assert_eq!(err.to_string(), "GraphQL errors: first; second");
    }

    #[test]
    fn test_from_serde_error_is_schema() {
        let err: GraphqlError = serde_json::from_str::<u32>("\"x\"").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Schema);
    }
}
