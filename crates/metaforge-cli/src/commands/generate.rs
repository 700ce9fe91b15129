//! `metaforge generate` - apply a blueprint to the project.

use tracing::{info, instrument};

use metaforge_core::domain::{Blueprint, PermissionSetSpec};

use crate::{
    cli::GenerateArgs,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(blueprint = %args.blueprint.display(), dry_run = args.dry_run))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let blueprint = super::load_blueprint(&args.blueprint, &config)?;

    if args.dry_run {
        return describe(&blueprint, &config, &output);
    }

    let service = super::metadata_service(&config);
    output.header(&format!(
        "Generating {} object(s) into {}",
        blueprint.objects.len(),
        service.paths().package_root().display()
    ))?;

    let report = service.generate(&blueprint)?;
    output.outcomes(&report.outcomes)?;

    let warnings = report.warnings().count();
    info!(changes = report.changes(), warnings, "Generate finished");
    if !output.is_json() {
        output.success(&format!("{} file(s) written or updated", report.changes()))?;
        if warnings > 0 {
            output.warning(&format!(
                "{warnings} item(s) skipped; retrieve missing layouts and apps from the org first"
            ))?;
        }
    }
    Ok(())
}

/// Dry run: the blueprint is already validated, list what would be written.
fn describe(blueprint: &Blueprint, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let paths = config.project_paths();
    output.header("Dry run, nothing written")?;

    for entry in &blueprint.objects {
        let object = &entry.object;
        if object.is_standard() {
            output.info(&format!(
                "{} is a standard object, {} field(s) -> {}",
                object.api_name(),
                entry.fields.len(),
                paths.fields_dir(object.folder_name()).display()
            ))?;
        } else {
            output.info(&format!(
                "{} ({} field(s)) -> {}",
                object.api_name(),
                entry.fields.len(),
                paths.object_file(object.api_name()).display()
            ))?;
        }
        if !object.is_standard() {
            output.info(&format!("  tab -> {}", paths.tab_file(object.api_name()).display()))?;
        }
        let permset = PermissionSetSpec::manager(object, entry.field_api_names());
        output.info(&format!(
            "  permission set -> {}",
            paths.permission_set_file(&permset.name).display()
        ))?;
    }

    if let Some(app) = &blueprint.app {
        output.info(&format!("app -> {}", paths.app_file(app).display()))?;
    }
    for edit in &blueprint.layouts {
        let object = config.resolver().resolve(&edit.object).api_name;
        output.info(&format!(
            "layout -> {} (+{} field(s), +{} related list(s))",
            paths.layout_file(&object, &edit.layout).display(),
            edit.fields.len(),
            edit.related_lists.len()
        ))?;
    }
    Ok(())
}
