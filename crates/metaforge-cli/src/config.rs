//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `METAFORGE__<SECTION>__<KEY>`
//! 3. `--config FILE`, or else `metaforge.toml` in the project directory
//!    layered over the user file from [`AppConfig::config_path`]
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use metaforge_core::{
    application::{
        ProjectPaths,
        paths::{DEFAULT_DATA_DIR, DEFAULT_PACKAGE_DIR},
    },
    domain::{NameResolver, StandardObjects},
};

/// Project-local configuration file name.
pub const LOCAL_CONFIG_FILE: &str = "metaforge.toml";

const ENV_PREFIX: &str = "METAFORGE";
const ENV_SEPARATOR: &str = "__";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where metadata and data files live.
    pub project: ProjectConfig,
    /// The external platform CLI.
    pub platform: PlatformConfig,
    /// Output settings.
    pub output: OutputConfig,

    /// File the values were read from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub root: PathBuf,
    pub package_dir: PathBuf,
    pub data_dir: PathBuf,
    /// Names to treat as standard objects on top of the built-in list.
    pub extra_standard_objects: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    pub program: String,
    pub target_org: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            package_dir: PathBuf::from(DEFAULT_PACKAGE_DIR),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            extra_standard_objects: Vec::new(),
        }
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            program: "sf".into(),
            target_org: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then files, then environment.
    ///
    /// `config_file` is the path the user passed via `--config`; it must
    /// exist. Without it, the user file and `metaforge.toml` in `project`
    /// (or the current directory) are both optional.
    pub fn load(config_file: Option<&PathBuf>, project: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_from(config_file, project.unwrap_or(Path::new(".")))
    }

    fn load_from(config_file: Option<&PathBuf>, cwd: &Path) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&AppConfig::default()).context("Failed to build default configuration")?;
        let mut builder = Config::builder().add_source(defaults);

        let source = match config_file {
            Some(path) => {
                builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml));
                Some(path.clone())
            }
            None => {
                let user = Self::config_path();
                let local = cwd.join(LOCAL_CONFIG_FILE);
                builder = builder
                    .add_source(File::from(user.as_path()).format(FileFormat::Toml).required(false))
                    .add_source(File::from(local.as_path()).format(FileFormat::Toml).required(false));
                [local, user].into_iter().find(|p| p.is_file())
            }
        };

        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;

        let mut config: AppConfig = settings
            .try_deserialize()
            .context("Invalid configuration values")?;
        config.source = source;
        Ok(config)
    }

    /// Apply CLI overrides that take precedence over every other source.
    pub fn with_project_root(mut self, root: Option<PathBuf>) -> Self {
        if let Some(root) = root {
            self.project.root = root;
        }
        self
    }

    /// Folder layout rooted at the configured project.
    pub fn project_paths(&self) -> ProjectPaths {
        ProjectPaths::new(&self.project.root)
            .with_package_dir(&self.project.package_dir)
            .with_data_dir(&self.project.data_dir)
    }

    /// Name resolver with any extra standard objects from the configuration.
    pub fn resolver(&self) -> NameResolver {
        if self.project.extra_standard_objects.is_empty() {
            NameResolver::default()
        } else {
            NameResolver::new(StandardObjects::with_extra(
                self.project.extra_standard_objects.iter().cloned(),
            ))
        }
    }

    /// Path to the user-wide configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.metaforge.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "metaforge", "metaforge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".metaforge.toml"))
    }

    /// Project-local configuration file under `root`.
    pub fn local_path(root: &Path) -> PathBuf {
        root.join(LOCAL_CONFIG_FILE)
    }
}
