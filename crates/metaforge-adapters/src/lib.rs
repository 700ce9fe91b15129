//! Infrastructure adapters for Metaforge.
//!
//! This crate implements the ports defined in `metaforge-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod blueprint_loader;
pub mod filesystem;
pub mod platform;

// Re-export commonly used adapters
pub use blueprint_loader::BlueprintLoader;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use platform::ProcessPlatformCli;
