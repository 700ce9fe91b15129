//! `metaforge data` - format JSON rows into an import-ready data file.

use tracing::instrument;

use metaforge_core::application::services::parse_rows;

use crate::{
    cli::DataArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all, fields(object = %args.object))]
pub fn execute(args: DataArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let blueprint = super::load_blueprint(&args.blueprint, &config)?;
    let resolver = config.resolver();
    let api_name = resolver.resolve(&args.object).api_name;

    let entry = blueprint
        .find_object(&args.object)
        .or_else(|| blueprint.find_object(&api_name))
        .ok_or_else(|| {
            CliError::invalid_input(format!(
                "object '{}' is not declared in {}",
                args.object,
                args.blueprint.display()
            ))
        })?;

    if !args.rows.is_file() {
        return Err(CliError::NotFound {
            what: "Rows file".into(),
            path: args.rows,
        });
    }
    let raw = std::fs::read_to_string(&args.rows)
        .with_cli_context(|| format!("Failed to read rows from '{}'", args.rows.display()))?;
    let rows = parse_rows(&raw)?;

    let report = super::data_service(&config).write_records(entry, rows)?;

    output.outcomes(std::slice::from_ref(&report.outcome))?;
    for warning in &report.warnings {
        output.warning(&warning.to_string())?;
    }
    if !output.is_json() {
        output.success(&format!("{} record(s) prepared", report.records))?;
    }
    Ok(())
}
