//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures a caller can act on
/// (bad input, uniqueness conflicts, missing records). Driver and IO
/// failures belong to the infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input failed shape/type/length validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The storage layer rejected a write (e.g. duplicate unique value).
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// The referenced record does not exist.
    #[error("not found")]
    NotFound,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::ConstraintViolation(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_message() {
        assert_eq!(
            DomainError::validation("email: missing").to_string(),
            "validation failed: email: missing"
        );
        assert_eq!(
            DomainError::constraint("email taken").to_string(),
            "constraint violation: email taken"
        );
        assert_eq!(DomainError::not_found().to_string(), "not found");
    }
}
