//! Error types for the pharma/biotech paper search.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::path::PathBuf;
use std::time::Duration;

use crate::registry::SourceId;

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// Rate limited by the remote API (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from API
        message: String,
    },

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// XML parsing error
    #[error("Failed to parse XML: {0}")]
    Xml(String),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited {
            retry_after: Duration::from_secs(seconds),
        }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    /// Create an XML parse error.
    #[must_use]
    pub fn xml(message: impl std::fmt::Display) -> Self {
        Self::Xml(message.to_string())
    }
}

/// Errors reading or writing the persisted company registry.
#[derive(thiserror::Error, Debug)]
pub enum PersistenceError {
    /// Filesystem error on the cache file
    #[error("I/O error on {}: {error}", path.display())]
    Io {
        /// Cache file path
        path: PathBuf,
        /// Underlying error
        #[source]
        error: std::io::Error,
    },

    /// Cache content could not be encoded or decoded
    #[error("Invalid cache content: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl PersistenceError {
    /// Create an I/O error for the given path.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            error,
        }
    }
}

/// Errors from building the company registry.
#[derive(thiserror::Error, Debug)]
pub enum RegistryError {
    /// One remote source failed; recovered by the builder, never returned from it
    #[error("Failed to fetch companies from {source_id}: {error}")]
    SourceFetch {
        /// Source that failed
        source_id: SourceId,
        /// Underlying client error
        #[source]
        error: ClientError,
    },

    /// Persisted registry could not be read or written
    #[error("Registry persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// No usable registry could be built
    #[error("Company registry unavailable: {0}")]
    Unavailable(String),
}

impl RegistryError {
    /// Create a source fetch error.
    #[must_use]
    pub fn source_fetch(source_id: SourceId, error: ClientError) -> Self {
        Self::SourceFetch {
            source_id,
            error,
        }
    }
}

/// Errors from query syntax analysis.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum QueryError {
    /// Query is empty or whitespace only
    #[error("Query cannot be empty")]
    Empty,
}

/// Errors from the search pipeline.
#[derive(thiserror::Error, Debug)]
pub enum SearchError {
    /// Error from the literature database client
    #[error("PubMed error: {0}")]
    Client(#[from] ClientError),

    /// Invalid query
    #[error("Invalid query: {0}")]
    Query(#[from] QueryError),
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Result type alias for search operations.
pub type SearchResult<T> = Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_messages() {
        assert_eq!(
            ClientError::rate_limited(60).to_string(),
            "Rate limited, retry after 60s"
        );
        assert_eq!(
            ClientError::server(503, "unavailable").to_string(),
            "Server error (503): unavailable"
        );
        assert_eq!(
            ClientError::xml("unexpected eof").to_string(),
            "Failed to parse XML: unexpected eof"
        );
    }

    #[test]
    fn test_source_fetch_message_names_source() {
        let err =
            RegistryError::source_fetch(SourceId::OpenFda, ClientError::server(502, "bad gateway"));
        let msg = err.to_string();
        assert!(msg.contains("openfda"), "{msg}");
        assert!(msg.contains("bad gateway"), "{msg}");
    }

    #[test]
    fn test_persistence_error_wraps_into_registry_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: RegistryError = PersistenceError::io("/tmp/cache.json", io).into();
        assert!(matches!(err, RegistryError::Persistence(PersistenceError::Io { .. })));
        assert!(err.to_string().contains("/tmp/cache.json"));
    }

    #[test]
    fn test_query_error_message() {
        assert_eq!(QueryError::Empty.to_string(), "Query cannot be empty");
    }
}
