//! Infrastructure error model.

use thiserror::Error;

use storefront_core::DomainError;

/// Result type used by the infra layer.
pub type InfraResult<T> = Result<T, InfraError>;

/// Infrastructure-level error.
///
/// Domain failures (validation, not-found, rejected transitions) pass through
/// unchanged in `Domain`; everything else is a storage or configuration fault.
#[derive(Debug, Error)]
pub enum InfraError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("document (de)serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("document store unavailable: {0}")]
    Store(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl InfraError {
    /// The wrapped domain error, if any.
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            InfraError::Domain(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.as_domain().is_some_and(DomainError::is_not_found)
    }
}
