//! Platform CLI adapter: spawns the `sf` binary and captures its output.

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use metaforge_core::{
    application::{
        ApplicationError,
        ports::{CommandOutput, PlatformCli},
    },
    error::MetaforgeResult,
};

pub const DEFAULT_PROGRAM: &str = "sf";

/// Runs the platform CLI as a child process.
#[derive(Debug, Clone)]
pub struct ProcessPlatformCli {
    program: String,
    working_dir: Option<PathBuf>,
}

impl ProcessPlatformCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            working_dir: None,
        }
    }

    /// Run from `dir` instead of the current directory, so the CLI picks up
    /// that project's configuration.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

impl Default for ProcessPlatformCli {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl PlatformCli for ProcessPlatformCli {
    fn program(&self) -> String {
        self.program.clone()
    }

    fn run(&self, args: &[String]) -> MetaforgeResult<CommandOutput> {
        debug!(program = %self.program, ?args, "Spawning platform CLI");

        let mut command = Command::new(&self.program);
        command.args(args);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        let output = command
            .output()
            .map_err(|e| ApplicationError::ExternalCommand {
                command: self.program.clone(),
                reason: e.to_string(),
            })?;

        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
