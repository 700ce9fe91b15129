//! Unified error handling for Metaforge Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Metaforge Core operations.
#[derive(Debug, Error, Clone)]
pub enum MetaforgeError {
    /// Errors from the domain layer (metadata rule violations).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (I/O and process failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),
}

impl MetaforgeError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Configuration => ErrorCategory::Configuration,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type MetaforgeResult<T> = Result<T, MetaforgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_from_domain_keep_their_category() {
        let err: MetaforgeError = DomainError::MissingDisplayFormat {
            object: "Offer".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.suggestions().iter().any(|s| s.contains("display_format")));
    }

    #[test]
    fn application_errors_keep_their_category() {
        let err: MetaforgeError = ApplicationError::ExternalCommand {
            command: "sf".into(),
            reason: "not found".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.to_string().starts_with("Application error:"));
    }
}
