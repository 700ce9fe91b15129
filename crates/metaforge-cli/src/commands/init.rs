//! `metaforge init` - write a default configuration file.

use std::path::PathBuf;

use crate::{
    cli::InitArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Write the default configuration to `metaforge.toml` in the project, or
/// to the user configuration directory with `--global`.
pub fn execute(args: InitArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let config_path = target_path(&args, &config);

    if config_path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            config_path.display(),
        ))?;
        return Ok(());
    }

    let toml = default_toml()?;

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| CliError::IoError {
                message: format!("Failed to create config directory '{}'", parent.display()),
                source: e,
            })?;
        }
    }

    std::fs::write(&config_path, &toml).map_err(|e| CliError::IoError {
        message: format!("Failed to write config to '{}'", config_path.display()),
        source: e,
    })?;

    output.success(&format!("Configuration created at {}", config_path.display()))?;
    Ok(())
}

fn target_path(args: &InitArgs, config: &AppConfig) -> PathBuf {
    if args.global {
        AppConfig::config_path()
    } else {
        AppConfig::local_path(&config.project.root)
    }
}

fn default_toml() -> CliResult<String> {
    toml::to_string_pretty(&AppConfig::default()).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise default config: {e}"),
        source: Some(Box::new(e)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_init_targets_local_file() {
        let config = AppConfig::default().with_project_root(Some(PathBuf::from("/work/dreamhouse")));
        let args = InitArgs {
            global: false,
            force: false,
        };
        assert_eq!(
            target_path(&args, &config),
            PathBuf::from("/work/dreamhouse/metaforge.toml")
        );
    }

    #[test]
    fn default_toml_round_trips_through_config() {
        let text = default_toml().unwrap();
        assert!(text.contains("[platform]"));
        assert!(text.contains("program = \"sf\""));
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.project.package_dir, AppConfig::default().project.package_dir);
    }
}
