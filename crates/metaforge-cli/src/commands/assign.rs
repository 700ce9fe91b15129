//! `metaforge assign` - assign a permission set in a connected org.

use tracing::instrument;

use crate::{
    cli::AssignArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(permission_set = %args.permission_set))]
pub fn execute(args: AssignArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    // Flag first, then configuration, then the platform CLI's own default.
    let target_org = args.target_org.or_else(|| config.platform.target_org.clone());

    let report = super::org_service(&config)
        .assign_permission_set(&args.permission_set, target_org.as_deref())?;

    if !report.success {
        return Err(CliError::ExternalCommandFailed {
            command: report.command,
            output: report.output,
        });
    }

    output.success(&format!("Assigned {}", report.permission_set))?;
    Ok(())
}
