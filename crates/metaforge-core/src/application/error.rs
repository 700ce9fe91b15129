//! Application layer errors.
//!
//! These errors represent failures in orchestration, not metadata rules.
//! Rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Shared in-memory state could not be locked.
    #[error("Storage lock poisoned")]
    StoreLockError,

    /// JSON or TOML (de)serialization failed.
    #[error("Serialization failed: {reason}")]
    SerializationFailed { reason: String },

    /// The platform CLI could not be started at all.
    #[error("Could not run '{command}': {reason}")]
    ExternalCommand { command: String, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Run from the root of the project (where sfdx-project.json lives)".into(),
            ],
            Self::StoreLockError => vec![
                "Internal storage is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::SerializationFailed { reason } => vec![
                format!("Could not read or write structured data: {}", reason),
                "Check the input file is valid JSON".into(),
            ],
            Self::ExternalCommand { command, .. } => vec![
                format!("'{}' is not available", command),
                "Install the Salesforce CLI and make sure it is on your PATH".into(),
                "Or set platform.program in metaforge.toml".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::StoreLockError => ErrorCategory::Internal,
            Self::SerializationFailed { .. } => ErrorCategory::Validation,
            Self::ExternalCommand { .. } => ErrorCategory::Configuration,
        }
    }
}
