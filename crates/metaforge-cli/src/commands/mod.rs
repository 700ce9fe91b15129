//! Command handlers.
//!
//! Each handler translates parsed arguments into service calls and renders
//! the result. No metadata rules live here.

use std::path::Path;

use metaforge_adapters::{BlueprintLoader, LocalFilesystem, ProcessPlatformCli};
use metaforge_core::{
    application::{DataService, MetadataService, OrgService},
    domain::Blueprint,
};

use crate::{
    config::AppConfig,
    error::{CliError, CliResult},
};

pub mod assign;
pub mod completions;
pub mod config;
pub mod data;
pub mod generate;
pub mod init;
pub mod layout;
pub mod permset;
pub mod resolve;

pub(crate) fn metadata_service(config: &AppConfig) -> MetadataService {
    MetadataService::new(
        Box::new(LocalFilesystem::new()),
        config.project_paths(),
        config.resolver(),
    )
}

pub(crate) fn data_service(config: &AppConfig) -> DataService {
    DataService::new(Box::new(LocalFilesystem::new()), config.project_paths())
}

pub(crate) fn org_service(config: &AppConfig) -> OrgService {
    let cli = ProcessPlatformCli::new(config.platform.program.clone())
        .current_dir(config.project.root.clone());
    OrgService::new(Box::new(cli))
}

/// Load a blueprint file or directory, reporting a missing path as not found.
pub(crate) fn load_blueprint(path: &Path, config: &AppConfig) -> CliResult<Blueprint> {
    if !path.exists() {
        return Err(CliError::NotFound {
            what: "Blueprint".into(),
            path: path.to_path_buf(),
        });
    }
    Ok(BlueprintLoader::new(config.resolver()).load(path)?)
}
