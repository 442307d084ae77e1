//! Domain Errors
//!
//! Error types for domain operations. A missing entity is not an error:
//! lookups return `Ok(None)` and deletes return `Ok(false)`.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Malformed or out-of-range field, dangling reference, or a forbidden mutation
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("External service error: {0}")]
    ExternalService(String),
}

impl DomainError {
    pub fn validation<T: Into<String>>(reason: T) -> Self {
        Self::Validation(reason.into())
    }

    /// Dangling reference to another entity
    pub fn missing_reference<T: AsRef<str>>(entity_type: T, id: &str) -> Self {
        Self::Validation(format!(
            "{} with ID {} does not exist",
            entity_type.as_ref(),
            id
        ))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
