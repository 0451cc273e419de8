//! Error types for the Wikidata client.

use thiserror::Error;

/// Result type for Wikidata client operations.
pub type Result<T> = std::result::Result<T, WikidataError>;

/// Wikidata client errors.
#[derive(Debug, Error)]
pub enum WikidataError {
    /// Configuration error (invalid API root, client could not be built)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (DNS, connection refused, reset)
    #[error("Network error: {0}")]
    Network(String),

    /// The request did not complete within the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// API error (non-2xx response)
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Query text contains characters that cannot be placed in a request
    #[error("malformed query: {query:?}")]
    MalformedQuery { query: String },

    /// Identifier does not look like `Q<digits>`
    #[error("invalid entity id: {0:?}")]
    InvalidEntityId(String),
}

impl WikidataError {
    /// True for failures reaching or reading from the remote service.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Timeout(_) | Self::Api { .. } | Self::Parse(_)
        )
    }

    pub fn is_malformed_query(&self) -> bool {
        matches!(self, Self::MalformedQuery { .. })
    }
}

impl From<reqwest::Error> for WikidataError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e.to_string())
        } else if e.is_decode() {
            Self::Parse(e.to_string())
        } else if let Some(status) = e.status() {
            Self::Api {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else {
            Self::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for WikidataError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        assert!(WikidataError::Network("reset".into()).is_transport());
        assert!(WikidataError::Timeout("30s".into()).is_transport());
        assert!(WikidataError::Api {
            status: 503,
            message: "unavailable".into()
        }
        .is_transport());
        assert!(WikidataError::Parse("eof".into()).is_transport());

        let malformed = WikidataError::MalformedQuery {
            query: "a|b".into(),
        };
        assert!(!malformed.is_transport());
        assert!(malformed.is_malformed_query());
        assert!(!WikidataError::InvalidEntityId("X1".into()).is_transport());
    }

    #[test]
    fn test_json_error_is_parse() {
        let err: WikidataError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, WikidataError::Parse(_)));
    }
}
