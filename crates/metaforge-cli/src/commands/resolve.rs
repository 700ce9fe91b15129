//! `metaforge resolve` - show how object names map to API names.

use serde_json::{Value, json};

use metaforge_core::domain::{NameResolver, ResolvedName};

use crate::{cli::ResolveArgs, config::AppConfig, error::CliResult, output::OutputManager};

pub fn execute(args: ResolveArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let resolver = config.resolver();
    let resolved = resolve_all(&resolver, &args.names);

    if output.is_json() {
        let items: Vec<Value> = resolved
            .iter()
            .map(|(name, r)| {
                json!({
                    "name": name,
                    "api_name": r.api_name,
                    "folder_name": r.folder_name,
                    "standard": r.is_standard,
                })
            })
            .collect();
        output.json(&Value::Array(items))?;
        return Ok(());
    }

    for (name, r) in &resolved {
        let kind = if r.is_standard { "standard" } else { "custom" };
        output.print(&format!("{name}\t{}\t{kind}", r.api_name))?;
    }
    Ok(())
}

fn resolve_all<'a>(resolver: &NameResolver, names: &'a [String]) -> Vec<(&'a str, ResolvedName)> {
    names
        .iter()
        .map(|name| (name.as_str(), resolver.resolve(name)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_input_order() {
        let names = vec!["Property".to_string(), "Account".to_string(), "Offer__c".to_string()];
        let resolved = resolve_all(&NameResolver::default(), &names);

        let apis: Vec<&str> = resolved.iter().map(|(_, r)| r.api_name.as_str()).collect();
        assert_eq!(apis, ["Property__c", "Account", "Offer__c"]);
        assert!(resolved[1].1.is_standard);
    }
}
