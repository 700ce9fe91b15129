//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `metaforge-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::error::MetaforgeResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `metaforge_adapters::filesystem::LocalFilesystem` (production)
/// - `metaforge_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Writes are independent: nothing is rolled back if a later write fails.
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> MetaforgeResult<()>;

    /// Write content to a file, replacing anything already there.
    fn write_file(&self, path: &Path, content: &str) -> MetaforgeResult<()>;

    /// Read a whole file as UTF-8.
    fn read_file(&self, path: &Path) -> MetaforgeResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Files directly inside `dir`, sorted by path.
    fn list_files(&self, dir: &Path) -> MetaforgeResult<Vec<PathBuf>>;
}

/// Captured result of one platform CLI invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// The process exited with status zero.
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// stdout and stderr joined, for inspection and display.
    pub fn combined(&self) -> String {
        match (self.stdout.trim().is_empty(), self.stderr.trim().is_empty()) {
            (true, _) => self.stderr.trim().to_string(),
            (false, true) => self.stdout.trim().to_string(),
            (false, false) => format!("{}\n{}", self.stdout.trim(), self.stderr.trim()),
        }
    }
}

/// Port for the external platform CLI (`sf`).
///
/// Implemented by:
/// - `metaforge_adapters::platform::ProcessPlatformCli` (spawns the binary)
#[cfg_attr(test, mockall::automock)]
pub trait PlatformCli: Send + Sync {
    /// Program name, for messages.
    fn program(&self) -> String;

    /// Run the CLI with `args` and capture its output.
    ///
    /// Returns `Err` only when the process could not be started; a command
    /// that ran and failed is reported through [`CommandOutput::success`].
    fn run(&self, args: &[String]) -> MetaforgeResult<CommandOutput>;
}
