//! Error types for the query helper.

use thiserror::Error;

/// A specialized Result type for query helper operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors raised by the query helper.
///
/// Malformed persisted input never surfaces here: raw query strings that fail
/// to decode are logged and dropped. These variants cover caller mistakes and
/// encoding failures only.
#[derive(Debug, Error)]
pub enum QueryError {
    /// An OR-group filter was supplied without a key or operator.
    #[error("or-filter at position {index} must have a key and a non-empty operator")]
    InvalidOrFilter {
        /// Position of the offending entry in the supplied batch.
        index: usize,
    },

    /// A raw query could not be encoded or decoded as JSON.
    #[error("raw query JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A timezone name is not a known IANA zone.
    #[error("unknown timezone: {name}")]
    UnknownTimezone {
        /// The name that failed to parse.
        name: String,
    },
}

impl QueryError {
    /// Creates an invalid or-filter error.
    pub fn invalid_or_filter(index: usize) -> Self {
        QueryError::InvalidOrFilter { index }
    }

    /// Creates an unknown timezone error.
    pub fn unknown_timezone(name: impl Into<String>) -> Self {
        QueryError::UnknownTimezone { name: name.into() }
    }
}
