//! Metaforge Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Metaforge,
//! a generator for Salesforce source-format metadata and seed data.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          metaforge-cli (CLI)            │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (MetadataService, DataService, Org...)  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │        (Filesystem, PlatformCli)        │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     metaforge-adapters (Infrastructure) │
//! │ (LocalFilesystem, ProcessPlatformCli)   │
//! └─────────────────────────────────────────┘
//!
//!   Domain layer (pure): naming, fields, objects, layouts,
//!   permission sets, record batches
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use metaforge_core::prelude::*;
//!
//! # fn run(filesystem: Box<dyn Filesystem>) -> MetaforgeResult<()> {
//! let resolver = NameResolver::default();
//! let offer = ObjectBlueprint::new(
//!     ObjectDescriptor::new(&resolver, "Offer"),
//!     vec![FieldDescriptor::new("Amount", FieldType::Currency).required(true)],
//! );
//!
//! let service = MetadataService::new(filesystem, ProjectPaths::new("."), resolver);
//! service.write_object(&offer)?;
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        DataService, MetadataService, OrgService, ProjectPaths,
        ports::{CommandOutput, Filesystem, PlatformCli},
    };
    pub use crate::domain::{
        Blueprint, FieldDescriptor, FieldType, LayoutEdit, NameFieldSpec, NameResolver,
        ObjectBlueprint, ObjectDescriptor, Outcome, StandardObjects,
    };
    pub use crate::error::{MetaforgeError, MetaforgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
