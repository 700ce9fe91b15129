// ============================================================================
// domain/error.rs - METADATA RULE VIOLATIONS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (blueprints are validated before anything touches disk)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Configuration Errors (fatal, raised while compiling metadata)
    // ========================================================================
    #[error("object '{object}' uses an auto-number name field but has no display format")]
    MissingDisplayFormat { object: String },

    #[error("{field_type} field '{field}' requires a referenceTo target")]
    MissingReferenceTo { field: String, field_type: String },

    #[error("unknown field type '{value}' on field '{field}'")]
    UnknownFieldType { field: String, value: String },

    #[error("invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("invalid blueprint: {0}")]
    InvalidBlueprint(String),

    // ========================================================================
    // Document Errors (existing metadata that cannot be edited)
    // ========================================================================
    #[error("malformed {kind} document: {reason}")]
    MalformedDocument { kind: &'static str, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingDisplayFormat { object } => vec![
                format!("Add a display_format to the name_field of '{}'", object),
                "Example: display_format = \"OFF-{0000}\"".into(),
            ],
            Self::MissingReferenceTo { field, field_type } => vec![
                format!("{} fields must name the object they point at", field_type),
                format!("Add reference_to = \"Account\" (or another object) to '{}'", field),
            ],
            Self::UnknownFieldType { .. } => vec![
                "Supported field types:".into(),
                "  • text, textarea, email, phone, url".into(),
                "  • number, currency, percent, checkbox".into(),
                "  • date, datetime".into(),
                "  • lookup, master-detail".into(),
            ],
            Self::InvalidName { name, .. } => vec![
                format!("'{}' cannot be used as an API name", name),
                "Use letters, digits and underscores, starting with a letter".into(),
            ],
            Self::InvalidBlueprint(msg) => vec![
                "Check the blueprint file".into(),
                format!("Details: {}", msg),
            ],
            Self::MalformedDocument { kind, .. } => vec![
                format!("The {} file could not be edited safely", kind),
                "Retrieve a fresh copy from the org and try again".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingDisplayFormat { .. }
            | Self::MissingReferenceTo { .. }
            | Self::UnknownFieldType { .. }
            | Self::InvalidBlueprint(_) => ErrorCategory::Configuration,
            Self::InvalidName { .. } => ErrorCategory::Validation,
            Self::MalformedDocument { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    NotFound,
    Internal,
}
