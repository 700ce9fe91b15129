//! TOML blueprint loader.
//!
//! Parses blueprint files into the domain [`Blueprint`]. A path may point at a
//! single file or at a directory, in which case every `*.toml` directly inside
//! it is loaded in name order and merged.
//!
//! # Format
//!
//! ```toml
//! [app]
//! name = "Dreamhouse"                # optional; tabs are registered here
//!
//! [[objects]]
//! name         = "Offer"
//! label        = "Offer"             # optional, default from name
//! plural_label = "Offers"            # optional, default label + "s"
//!
//! [objects.name_field]               # optional, default text "<label> Name"
//! type            = "auto-number"    # text | auto-number
//! label           = "Offer Number"
//! display_format  = "OFF-{0000}"     # required for auto-number
//! starting_number = 1
//!
//! [[objects.fields]]
//! name         = "Property"
//! type         = "master-detail"
//! reference_to = "Property"          # required for lookup / master-detail
//! required     = true
//!
//! [[layouts]]
//! object = "Property"
//! layout = "Property"                # optional, default object name
//! fields = ["Price", "Bedrooms"]
//!
//! [[layouts.related_lists]]
//! child        = "Offer"
//! lookup_field = "Property"
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, instrument};
use walkdir::WalkDir;

use metaforge_core::{
    application::ApplicationError,
    domain::{
        Blueprint, DomainError, FieldDescriptor, FieldType, LayoutEdit, NameFieldSpec,
        NameResolver, ObjectBlueprint, ObjectDescriptor, naming::simple_name,
    },
    error::MetaforgeResult,
};

const BLUEPRINT_EXTENSION: &str = "toml";

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of one blueprint file.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct BlueprintManifest {
    #[serde(default)]
    pub app: Option<AppSection>,
    #[serde(default)]
    pub objects: Vec<ObjectEntry>,
    #[serde(default)]
    pub layouts: Vec<LayoutEntry>,
}

/// `[app]` section.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct AppSection {
    pub name: String,
}

/// One entry under `[[objects]]`.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ObjectEntry {
    pub name: String,
    pub label: Option<String>,
    pub plural_label: Option<String>,
    pub description: Option<String>,
    pub name_field: Option<NameFieldEntry>,
    #[serde(default)]
    pub fields: Vec<FieldEntry>,
}

/// `[objects.name_field]` table.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct NameFieldEntry {
    #[serde(rename = "type", default)]
    pub kind: NameFieldKind,
    pub label: Option<String>,
    pub display_format: Option<String>,
    pub starting_number: Option<u32>,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum NameFieldKind {
    #[default]
    Text,
    #[serde(alias = "autonumber", alias = "auto_number")]
    AutoNumber,
}

/// One entry under `[[objects.fields]]`.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct FieldEntry {
    pub name: String,
    /// Kept as a string so an unknown type can be reported with its field.
    #[serde(rename = "type")]
    pub field_type: String,
    pub label: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    pub reference_to: Option<String>,
    pub relationship_label: Option<String>,
    pub relationship_name: Option<String>,
}

/// One entry under `[[layouts]]`.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct LayoutEntry {
    pub object: String,
    pub layout: Option<String>,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub related_lists: Vec<RelatedListEntry>,
}

/// One entry under `[[layouts.related_lists]]`.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct RelatedListEntry {
    pub child: String,
    pub lookup_field: String,
}

// ── Conversion ────────────────────────────────────────────────────────────────

impl BlueprintManifest {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        toml::from_str(raw).map_err(|e| DomainError::InvalidBlueprint(e.to_string()))
    }

    /// Fold `other` into `self`. Two different app names are an error.
    pub fn merge(mut self, other: BlueprintManifest) -> Result<Self, DomainError> {
        if let (Some(mine), Some(theirs)) = (&self.app, &other.app) {
            if mine.name != theirs.name {
                return Err(DomainError::InvalidBlueprint(format!(
                    "conflicting app names '{}' and '{}'",
                    mine.name, theirs.name
                )));
            }
        }
        if self.app.is_none() {
            self.app = other.app;
        }
        self.objects.extend(other.objects);
        self.layouts.extend(other.layouts);
        Ok(self)
    }

    pub fn into_blueprint(self, resolver: &NameResolver) -> Result<Blueprint, DomainError> {
        let objects = self
            .objects
            .into_iter()
            .map(|entry| entry.into_object(resolver))
            .collect::<Result<Vec<_>, _>>()?;

        let layouts = self.layouts.into_iter().map(LayoutEntry::into_edit).collect();

        Ok(Blueprint {
            objects,
            app: self.app.map(|a| a.name),
            layouts,
        })
    }
}

impl ObjectEntry {
    fn into_object(self, resolver: &NameResolver) -> Result<ObjectBlueprint, DomainError> {
        let mut object = ObjectDescriptor::new(resolver, &self.name);
        if let Some(label) = self.label {
            object.plural_label = format!("{label}s");
            object = object.label(label);
        }
        if let Some(plural) = self.plural_label {
            object = object.plural_label(plural);
        }
        if let Some(description) = self.description {
            object = object.description(description);
        }

        let default_name_label = format!("{} Name", object.label);
        let name_field = match self.name_field {
            None => NameFieldSpec::text(default_name_label),
            Some(entry) => {
                let label = entry.label.unwrap_or(default_name_label);
                match entry.kind {
                    NameFieldKind::Text => NameFieldSpec::text(label),
                    NameFieldKind::AutoNumber => {
                        NameFieldSpec::auto_number(label, entry.display_format.unwrap_or_default())
                            .starting_at(entry.starting_number.unwrap_or(1))
                    }
                }
            }
        };
        object = object.name_field(name_field);

        let fields = self
            .fields
            .into_iter()
            .map(FieldEntry::into_descriptor)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ObjectBlueprint::new(object, fields))
    }
}

impl FieldEntry {
    fn into_descriptor(self) -> Result<FieldDescriptor, DomainError> {
        let field_type: FieldType = self.field_type.parse().map_err(|_| {
            DomainError::UnknownFieldType {
                field: self.name.clone(),
                value: self.field_type.clone(),
            }
        })?;

        Ok(FieldDescriptor {
            name: self.name,
            label: self.label,
            field_type,
            description: self.description,
            required: self.required,
            reference_to: self.reference_to,
            relationship_label: self.relationship_label,
            relationship_name: self.relationship_name,
        })
    }
}

impl LayoutEntry {
    fn into_edit(self) -> LayoutEdit {
        let layout = self
            .layout
            .unwrap_or_else(|| simple_name(&self.object).to_string());
        let mut edit = LayoutEdit::new(self.object, layout);
        edit.fields = self.fields;
        for list in self.related_lists {
            edit = edit.related_list(list.child, list.lookup_field);
        }
        edit
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads a [`Blueprint`] from a file or a directory of files.
pub struct BlueprintLoader {
    resolver: NameResolver,
}

impl BlueprintLoader {
    pub fn new(resolver: NameResolver) -> Self {
        Self { resolver }
    }

    /// Load and validate the blueprint at `path`.
    ///
    /// # Errors
    ///
    /// - `FilesystemError` when the path cannot be read.
    /// - `InvalidBlueprint` / `UnknownFieldType` for malformed content.
    /// - Any rule violation reported by [`Blueprint::validate`].
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn load(&self, path: &Path) -> MetaforgeResult<Blueprint> {
        let mut manifest = BlueprintManifest::default();
        for file in self.blueprint_files(path)? {
            let raw = fs::read_to_string(&file).map_err(|e| ApplicationError::FilesystemError {
                path: file.clone(),
                reason: format!("Failed to read blueprint: {e}"),
            })?;
            let parsed = BlueprintManifest::parse(&raw).map_err(|e| match e {
                DomainError::InvalidBlueprint(reason) => {
                    DomainError::InvalidBlueprint(format!("{}: {reason}", file.display()))
                }
                other => other,
            })?;
            debug!(file = %file.display(), objects = parsed.objects.len(), "Parsed blueprint");
            manifest = manifest.merge(parsed)?;
        }

        let blueprint = manifest.into_blueprint(&self.resolver)?;
        blueprint.validate(&self.resolver)?;
        Ok(blueprint)
    }

    /// Parse and validate blueprint text.
    pub fn load_str(&self, raw: &str) -> MetaforgeResult<Blueprint> {
        let blueprint = BlueprintManifest::parse(raw)?.into_blueprint(&self.resolver)?;
        blueprint.validate(&self.resolver)?;
        Ok(blueprint)
    }

    fn blueprint_files(&self, path: &Path) -> MetaforgeResult<Vec<PathBuf>> {
        if !path.is_dir() {
            return Ok(vec![path.to_path_buf()]);
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(path).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: format!("Failed to list blueprints: {e}"),
            })?;
            let is_blueprint = entry.file_type().is_file()
                && entry.path().extension().and_then(|e| e.to_str()) == Some(BLUEPRINT_EXTENSION);
            if is_blueprint {
                files.push(entry.into_path());
            }
        }

        if files.is_empty() {
            return Err(DomainError::InvalidBlueprint(format!(
                "no *.{BLUEPRINT_EXTENSION} blueprint in {}",
                path.display()
            ))
            .into());
        }
        Ok(files)
    }
}

impl Default for BlueprintLoader {
    fn default() -> Self {
        Self::new(NameResolver::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metaforge_core::error::MetaforgeError;
    use tempfile::TempDir;

    const DREAMHOUSE: &str = r#"
[app]
name = "Dreamhouse"

[[objects]]
name = "Property"
plural_label = "Properties"

[[objects.fields]]
name = "Price"
type = "currency"
required = true

[[objects.fields]]
name = "Listed_On"
type = "date"

[[objects]]
name = "Offer"

[objects.name_field]
type = "auto-number"
label = "Offer Number"
display_format = "OFF-{0000}"

[[objects.fields]]
name = "Property"
type = "master-detail"
reference_to = "Property"
required = true

[[layouts]]
object = "Property"
fields = ["Price"]

[[layouts.related_lists]]
child = "Offer"
lookup_field = "Property"
"#;

    #[test]
    fn parses_full_blueprint() {
        let blueprint = BlueprintLoader::default().load_str(DREAMHOUSE).unwrap();

        assert_eq!(blueprint.app.as_deref(), Some("Dreamhouse"));
        assert_eq!(blueprint.objects.len(), 2);

        let property = &blueprint.objects[0];
        assert_eq!(property.object.api_name(), "Property__c");
        assert_eq!(property.object.plural_label, "Properties");
        assert_eq!(property.object.name_field, NameFieldSpec::text("Property Name"));
        assert_eq!(property.fields[0].field_type, FieldType::Currency);
        assert!(property.fields[0].required);

        let offer = &blueprint.objects[1];
        assert!(offer.object.name_field.is_auto_number());
        assert_eq!(offer.fields[0].reference_to.as_deref(), Some("Property"));

        let layout = &blueprint.layouts[0];
        assert_eq!(layout.layout, "Property");
        assert_eq!(layout.fields, vec!["Price"]);
        assert_eq!(layout.related_lists[0].child, "Offer");
    }

    #[test]
    fn label_override_carries_into_defaults() {
        let blueprint = BlueprintLoader::default()
            .load_str("[[objects]]\nname = \"Broker\"\nlabel = \"Agent\"\n")
            .unwrap();
        let object = &blueprint.objects[0].object;
        assert_eq!(object.label, "Agent");
        assert_eq!(object.plural_label, "Agents");
        assert_eq!(object.name_field.label(), "Agent Name");
    }

    #[test]
    fn unknown_field_type_names_field_and_value() {
        let raw = "[[objects]]\nname = \"Offer\"\n[[objects.fields]]\nname = \"Size\"\ntype = \"blob\"\n";
        let err = BlueprintLoader::default().load_str(raw).unwrap_err();
        assert!(matches!(
            err,
            MetaforgeError::Domain(DomainError::UnknownFieldType { ref field, ref value })
                if field == "Size" && value == "blob"
        ));
    }

    #[test]
    fn auto_number_without_format_is_rejected() {
        let raw = "[[objects]]\nname = \"Offer\"\n[objects.name_field]\ntype = \"auto-number\"\n";
        let err = BlueprintLoader::default().load_str(raw).unwrap_err();
        assert!(matches!(
            err,
            MetaforgeError::Domain(DomainError::MissingDisplayFormat { .. })
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = BlueprintLoader::default()
            .load_str("[[objects]]\nname = \"Offer\"\ncolour = \"red\"\n")
            .unwrap_err();
        assert!(matches!(err, MetaforgeError::Domain(DomainError::InvalidBlueprint(_))));
    }

    #[test]
    fn directory_blueprints_are_merged_in_name_order() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("b.toml"),
            "[[objects]]\nname = \"Offer\"\n",
        )
        .unwrap();
        fs::write(
            temp.path().join("a.toml"),
            "[app]\nname = \"Dreamhouse\"\n[[objects]]\nname = \"Property\"\n",
        )
        .unwrap();
        fs::write(temp.path().join("notes.md"), "ignored").unwrap();

        let blueprint = BlueprintLoader::default().load(temp.path()).unwrap();
        let names: Vec<_> = blueprint.objects.iter().map(|o| o.object.api_name()).collect();
        assert_eq!(names, vec!["Property__c", "Offer__c"]);
        assert_eq!(blueprint.app.as_deref(), Some("Dreamhouse"));
    }

    #[test]
    fn conflicting_apps_are_rejected() {
        let a = BlueprintManifest::parse("[app]\nname = \"One\"\n").unwrap();
        let b = BlueprintManifest::parse("[app]\nname = \"Two\"\n").unwrap();
        assert!(a.merge(b).is_err());
    }

    #[test]
    fn empty_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        assert!(BlueprintLoader::default().load(temp.path()).is_err());
    }

    #[test]
    fn missing_file_is_filesystem_error() {
        let temp = TempDir::new().unwrap();
        let err = BlueprintLoader::default()
            .load(&temp.path().join("missing.toml"))
            .unwrap_err();
        assert!(matches!(
            err,
            MetaforgeError::Application(ApplicationError::FilesystemError { .. })
        ));
    }
}
