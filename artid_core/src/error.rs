//! Error types for artid_core.

use thiserror::Error;

/// Result type alias using artid_core's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while addressing artifacts or parsing identifiers.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error occurred while reading artifact bytes.
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Invalid digest format or encoding.
    #[error("Invalid digest: {reason}")]
    InvalidDigest { reason: String },

    /// Invalid directory entry (duplicate or ill-formed name).
    #[error("Invalid directory entry: {reason}")]
    InvalidEntry { reason: String },

    /// Grammar violation in a core identifier string.
    #[error("Malformed identifier: {reason}")]
    Malformed { reason: String },

    /// Grammar violation in a qualifier suffix.
    #[error("Malformed qualifier: {reason}")]
    MalformedQualifier { reason: String },

    /// Content exceeds the configured size ceiling.
    #[error("Content too large: {actual} bytes (limit {limit})")]
    ResourceLimit { limit: u64, actual: u64 },

    /// Snapshot payload could not be serialized.
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl Error {
    /// Create an InvalidDigest error.
    pub fn invalid_digest(reason: impl Into<String>) -> Self {
        Error::InvalidDigest {
            reason: reason.into(),
        }
    }

    /// Create an InvalidEntry error.
    pub fn invalid_entry(reason: impl Into<String>) -> Self {
        Error::InvalidEntry {
            reason: reason.into(),
        }
    }

    /// Create a Malformed error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Error::Malformed {
            reason: reason.into(),
        }
    }

    /// Create a MalformedQualifier error.
    pub fn malformed_qualifier(reason: impl Into<String>) -> Self {
        Error::MalformedQualifier {
            reason: reason.into(),
        }
    }

    /// Create a ResourceLimit error.
    pub fn resource_limit(limit: u64, actual: u64) -> Self {
        Error::ResourceLimit { limit, actual }
    }

    /// Create a Serialization error.
    pub fn serialization(reason: impl Into<String>) -> Self {
        Error::Serialization {
            reason: reason.into(),
        }
    }
}

// Additional From implementations for external error types

impl From<ignore::Error> for Error {
    fn from(err: ignore::Error) -> Self {
        // ignore::Error can wrap an io::Error or be a path error
        match err.io_error() {
            Some(io_err) => Error::Io {
                source: std::io::Error::new(io_err.kind(), io_err.to_string()),
            },
            None => Error::Io {
                source: std::io::Error::other(err.to_string()),
            },
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization {
            reason: err.to_string(),
        }
    }
}
