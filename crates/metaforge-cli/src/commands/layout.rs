//! `metaforge layout` - edit a retrieved page layout in place.

use metaforge_core::{
    domain::naming::{simple_name, validate_identifier},
    error::MetaforgeError,
};

use crate::{
    cli::LayoutCommands,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(cmd: LayoutCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = super::metadata_service(&config);

    let outcome = match cmd {
        LayoutCommands::AddField {
            object,
            field,
            layout,
        } => {
            check_names(&[&object, &field])?;
            let layout = layout_name(&object, layout);
            service.add_field_to_layout(&object, &layout, &field)?
        }
        LayoutCommands::AddRelatedList {
            object,
            child,
            lookup_field,
            layout,
        } => {
            check_names(&[&object, &child, &lookup_field])?;
            let layout = layout_name(&object, layout);
            service.add_related_list(&object, &layout, &child, &lookup_field)?
        }
    };

    output.outcomes(std::slice::from_ref(&outcome))?;
    Ok(())
}

fn check_names(names: &[&str]) -> CliResult<()> {
    for name in names {
        validate_identifier(name).map_err(MetaforgeError::from)?;
    }
    Ok(())
}

/// Layouts are named after the object unless told otherwise.
fn layout_name(object: &str, explicit: Option<String>) -> String {
    explicit.unwrap_or_else(|| simple_name(object).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_drops_custom_suffix() {
        assert_eq!(layout_name("Property__c", None), "Property");
        assert_eq!(layout_name("Account", None), "Account");
        assert_eq!(layout_name("Property", Some("Property Custom".into())), "Property Custom");
    }

    #[test]
    fn names_that_would_need_escaping_are_user_errors() {
        let err = check_names(&["Property", "R&D"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(check_names(&["Property__c", "Offer", "Property"]).is_ok());
    }
}
