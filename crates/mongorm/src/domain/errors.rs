//! Domain Errors
//!
//! Two-tier error taxonomy for entity services, plus the raw error type that
//! store adapters report. `StoreError` never crosses a service boundary: the
//! generic service re-classifies every store failure into a `ServiceError`.

use thiserror::Error;

/// How a failed service operation should be treated by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Anticipated negative outcome (not found, unconfirmed write)
    Warning,
    /// A store operation itself failed unexpectedly
    Critical,
}

/// Errors returned by entity service operations.
///
/// Callers branch on the variant (or [`ServiceError::severity`]), never on
/// the message text: `Warning` maps to "not found" style responses and
/// `Critical` to "internal error" style responses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Known circumstance, e.g. no entity with the requested id
    #[error("{0}")]
    Warning(String),

    /// Unknown circumstance, e.g. an insert failed at the store
    #[error("{0}")]
    Critical(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn severity(&self) -> Severity {
        match self {
            Self::Warning(_) => Severity::Warning,
            Self::Critical(_) => Severity::Critical,
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Warning(_))
    }

    pub fn is_critical(&self) -> bool {
        matches!(self, Self::Critical(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Warning(msg) | Self::Critical(msg) => msg,
        }
    }

    pub fn not_found(entity_type: &str, id: &str) -> Self {
        Self::Warning(format!("could not find {} with Id {}", entity_type, id))
    }

    pub fn creation_failed(entity_type: &str) -> Self {
        Self::Critical(format!("{} creation failed!", entity_type))
    }

    pub fn save_unconfirmed(entity_type: &str) -> Self {
        Self::Warning(format!(
            "{} save successful but does not appear in the database!",
            entity_type
        ))
    }

    pub fn update_failed(entity_type: &str) -> Self {
        Self::Warning(format!("{} update not successful!", entity_type))
    }

    pub fn update_unconfirmed(entity_type: &str) -> Self {
        Self::Warning(format!(
            "{} update successful but does not appear in the database!",
            entity_type
        ))
    }

    pub fn delete_not_found(entity_type: &str, id: &str) -> Self {
        Self::Warning(format!("{} with id {} not found!", entity_type, id))
    }

    pub fn delete_failed(entity_type: &str) -> Self {
        Self::Warning(format!("{} delete not successful!", entity_type))
    }

    pub fn delete_unconfirmed(entity_type: &str) -> Self {
        Self::Warning(format!(
            "{} delete successful but does not appear in the database!",
            entity_type
        ))
    }
}

/// Errors raised by document store adapters
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Write error: {0}")]
    Write(String),

    #[error("Duplicate key: {collection} already contains id {id}")]
    DuplicateKey { collection: String, id: String },
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_follows_variant() {
        assert_eq!(ServiceError::not_found("Book", "1").severity(), Severity::Warning);
        assert_eq!(ServiceError::creation_failed("Book").severity(), Severity::Critical);
        assert!(ServiceError::update_failed("Book").is_warning());
        assert!(ServiceError::delete_failed("Book").is_warning());
    }

    #[test]
    fn test_messages_name_entity_and_id() {
        assert_eq!(
            ServiceError::not_found("Book", "abc123").to_string(),
            "could not find Book with Id abc123"
        );
        assert_eq!(
            ServiceError::delete_not_found("Book", "abc123").message(),
            "Book with id abc123 not found!"
        );
        assert_eq!(
            ServiceError::save_unconfirmed("Book").message(),
            "Book save successful but does not appear in the database!"
        );
    }
}
