//! Error types for the storage layer
//!
//! `StorageError` is the single error type returned by every store operation.
//! Validation failures are raised before any backend call; backend failures are
//! carried in `Internal` together with the operation that produced them.

use std::fmt::{Display, Formatter};

/// Result alias used across the storage layer
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error taxonomy
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("pageToken is not valid: {0:?}")]
    InvalidPageToken(String),

    #[error("{kind} {key:?} not found")]
    NotFound { kind: &'static str, key: String },

    #[error("{kind} {key:?} is not unique")]
    AlreadyExists { kind: &'static str, key: String },

    #[error("{context}: {source}")]
    Internal {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl StorageError {
    /// Invalid request field, e.g. `invalid field offset: must be non-negative`
    pub fn invalid_field(field: &str, reason: &str) -> Self {
        StorageError::InvalidArgument(format!("invalid field {}: {}", field, reason))
    }

    pub fn not_found(kind: &'static str, key: impl Into<String>) -> Self {
        StorageError::NotFound {
            kind,
            key: key.into(),
        }
    }

    pub fn already_exists(kind: &'static str, key: impl Into<String>) -> Self {
        StorageError::AlreadyExists {
            kind,
            key: key.into(),
        }
    }

    pub fn internal(
        context: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        StorageError::Internal {
            context: context.into(),
            source: source.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StorageError::InvalidArgument(_) | StorageError::InvalidPageToken(_) => {
                ErrorKind::InvalidArgument
            }
            StorageError::NotFound { .. } => ErrorKind::NotFound,
            StorageError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            StorageError::Internal { .. } => ErrorKind::Internal,
        }
    }
}

/// Coarse error classification used by callers to pick a response status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    AlreadyExists,
    Internal,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "INVALID_ARGUMENT",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::AlreadyExists => "ALREADY_EXISTS",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
