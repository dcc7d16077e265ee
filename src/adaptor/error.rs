//! Error types for storage adaptors.

use thiserror::Error;

/// Errors an [`Adaptor`](super::Adaptor) may report.
///
/// The facade never translates these; they reach the caller as
/// [`Error::Adaptor`](crate::Error::Adaptor).
#[derive(Error, Debug)]
pub enum AdaptorError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("quota exceeded while writing key '{key}'")]
    QuotaExceeded { key: String },

    #[error("invalid namespace '{namespace}' with separator '{separator}': {reason}")]
    InvalidNamespace {
        namespace: String,
        separator: String,
        reason: &'static str,
    },

    #[error("operation not supported by this adaptor: {0}")]
    Unsupported(&'static str),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl AdaptorError {
    /// Returns `true` if the adaptor does not implement the operation.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }
}
