//! Application layer for Metaforge.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (MetadataService, DataService, OrgService)
//! - **Ports**: Interface definitions (traits) for the filesystem and platform CLI
//! - **Paths**: The conventional source-format folder layout
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! metadata rules itself. All rules live in `crate::domain`.

pub mod error;
pub mod paths;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    AssignmentReport, DataReport, DataService, GenerationReport, MetadataService, ObjectReport,
    OrgService,
};

// Re-export port traits (for adapter implementation)
pub use ports::{CommandOutput, Filesystem, PlatformCli};

pub use error::ApplicationError;
pub use paths::ProjectPaths;
