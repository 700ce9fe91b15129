//! Typed result of a single write or edit.

use std::fmt;
use std::path::PathBuf;

/// What happened to one metadata file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A new file was written (or an existing one overwritten).
    Created { path: PathBuf },
    /// An existing document was edited in place.
    Updated { path: PathBuf },
    /// The item was already in the document; nothing changed.
    AlreadyPresent { path: PathBuf, item: String },
    /// The document to edit does not exist locally.
    MissingResource { path: PathBuf },
    /// The layout has no two-column section to add fields to.
    NoTargetSection { path: PathBuf },
    /// The operation does not apply to this input.
    NotApplicable { reason: String },
}

/// How an outcome should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
}

impl Outcome {
    pub fn severity(&self) -> Severity {
        match self {
            Self::Created { .. } | Self::Updated { .. } => Severity::Success,
            Self::AlreadyPresent { .. } | Self::NotApplicable { .. } => Severity::Info,
            Self::MissingResource { .. } | Self::NoTargetSection { .. } => Severity::Warning,
        }
    }

    /// Whether anything was written to disk.
    pub fn is_change(&self) -> bool {
        matches!(self, Self::Created { .. } | Self::Updated { .. })
    }

    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Created { path }
            | Self::Updated { path }
            | Self::AlreadyPresent { path, .. }
            | Self::MissingResource { path }
            | Self::NoTargetSection { path } => Some(path),
            Self::NotApplicable { .. } => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created { path } => write!(f, "wrote {}", path.display()),
            Self::Updated { path } => write!(f, "updated {}", path.display()),
            Self::AlreadyPresent { path, item } => {
                write!(f, "{item} already in {}", path.display())
            }
            Self::MissingResource { path } => write!(f, "not found: {}", path.display()),
            Self::NoTargetSection { path } => {
                write!(f, "no two-column section in {}", path.display())
            }
            Self::NotApplicable { reason } => f.write_str(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severities() {
        let path = PathBuf::from("x");
        assert_eq!(Outcome::Created { path: path.clone() }.severity(), Severity::Success);
        assert_eq!(
            Outcome::AlreadyPresent {
                path: path.clone(),
                item: "Price__c".into()
            }
            .severity(),
            Severity::Info
        );
        assert_eq!(Outcome::MissingResource { path }.severity(), Severity::Warning);
    }

    #[test]
    fn only_writes_count_as_changes() {
        assert!(Outcome::Updated { path: "a".into() }.is_change());
        assert!(!Outcome::NoTargetSection { path: "a".into() }.is_change());
        assert!(!Outcome::NotApplicable { reason: "standard object".into() }.is_change());
    }
}
