//! Errors shared by the analytics ports and handlers.

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors that can occur while acquiring data for, or persisting results of,
/// an analytics run.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("Insufficient data: found {found} evaluations, at least {required} required")]
    InsufficientData { found: usize, required: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<sqlx::Error> for AnalyticsError {
    fn from(err: sqlx::Error) -> Self {
        AnalyticsError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for AnalyticsError {
    fn from(err: serde_json::Error) -> Self {
        AnalyticsError::Serialization(err.to_string())
    }
}

impl From<ValidationError> for AnalyticsError {
    fn from(err: ValidationError) -> Self {
        AnalyticsError::InvalidInput(err.to_string())
    }
}

impl From<AnalyticsError> for DomainError {
    fn from(err: AnalyticsError) -> Self {
        let code = match &err {
            AnalyticsError::InsufficientData { .. } => ErrorCode::InsufficientData,
            AnalyticsError::InvalidInput(_) => ErrorCode::ValidationFailed,
            AnalyticsError::Database(_) => ErrorCode::DatabaseError,
            AnalyticsError::Serialization(_) => ErrorCode::InternalError,
        };
        DomainError::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_from_sqlx() {
        let err: AnalyticsError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AnalyticsError::Database(_)));
    }

    #[test]
    fn test_error_conversion_from_validation() {
        let err: AnalyticsError = ValidationError::empty_field("evaluator_id").into();
        match err {
            AnalyticsError::InvalidInput(msg) => assert!(msg.contains("evaluator_id")),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_insufficient_data_message() {
        let err = AnalyticsError::InsufficientData {
            found: 3,
            required: 4,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient data: found 3 evaluations, at least 4 required"
        );
    }

    #[test]
    fn test_domain_error_code_mapping() {
        let err: DomainError = AnalyticsError::Database("down".to_string()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);

        let err: DomainError = AnalyticsError::InsufficientData {
            found: 1,
            required: 4,
        }
        .into();
        assert_eq!(err.code, ErrorCode::InsufficientData);
    }
}
