//! Domain errors

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Position conflict: {0}")]
    PositionConflict(String),

    #[error("Operation timed out after {0} ms")]
    Timeout(u64),

    #[error("Write rejected: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Stable classification of a [`DomainError`], independent of its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Forbidden,
    Validation,
    Unavailable,
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        DomainError::NotFound { entity, id }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::NotFound { .. } => ErrorKind::NotFound,
            DomainError::PositionConflict(_) | DomainError::Timeout(_) => ErrorKind::Conflict,
            DomainError::Forbidden(_) => ErrorKind::Forbidden,
            DomainError::ValidationError(_) => ErrorKind::Validation,
            DomainError::DatabaseError(_) | DomainError::InternalError(_) => ErrorKind::Unavailable,
        }
    }
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Conflict => "CONFLICT",
            ErrorKind::Forbidden => "FORBIDDEN",
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::Unavailable => "UNAVAILABLE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeouts_are_conflicts() {
        assert_eq!(DomainError::Timeout(50).kind(), ErrorKind::Conflict);
        assert_eq!(DomainError::PositionConflict("x".into()).kind(), ErrorKind::Conflict);
    }

    #[test]
    fn not_found_message_names_the_entity() {
        let id = Uuid::nil();
        let err = DomainError::not_found("Menu item", id);
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), format!("Menu item not found: {}", id));
    }
}
