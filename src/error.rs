//! Error types for the vector store

use thiserror::Error;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, VectorDbError>;

/// Coarse classification a caller maps onto its own error surface
/// (e.g. client vs. server errors).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed input
    InvalidArgument,
    /// Unexpected failure inside the store
    Internal,
}

/// Error types that can occur in store operations
#[derive(Error, Debug)]
pub enum VectorDbError {
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("{reason}")]
    InvalidArgument { reason: String },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl VectorDbError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        VectorDbError::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            VectorDbError::DimensionMismatch { .. }
            | VectorDbError::InvalidArgument { .. }
            | VectorDbError::SerializationError(_) => ErrorKind::InvalidArgument,
            VectorDbError::Internal(_) | VectorDbError::IoError(_) => ErrorKind::Internal,
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        self.kind() == ErrorKind::InvalidArgument
    }
}
