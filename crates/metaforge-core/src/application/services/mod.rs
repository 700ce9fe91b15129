//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "apply a blueprint" or "assign a permission set".

pub mod data_service;
pub mod metadata_service;
pub mod org_service;

pub use data_service::{DataReport, DataService, parse_rows};
pub use metadata_service::{GenerationReport, MetadataService, ObjectReport};
pub use org_service::{AssignmentReport, DEPLOY_HINT, OrgService};
