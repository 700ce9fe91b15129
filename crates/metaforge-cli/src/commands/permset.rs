//! `metaforge permset` - write `<Object>_Manager` from the fields on disk.

use tracing::instrument;

use metaforge_core::domain::ObjectDescriptor;

use crate::{cli::PermsetArgs, config::AppConfig, error::CliResult, output::OutputManager};

#[instrument(skip_all, fields(object = %args.object))]
pub fn execute(args: PermsetArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = super::metadata_service(&config);
    let object = ObjectDescriptor::new(service.resolver(), &args.object);
    object.validate().map_err(metaforge_core::error::MetaforgeError::from)?;

    let outcomes = service.write_permission_set_from_disk(&object)?;
    output.outcomes(&outcomes)?;
    Ok(())
}
