//! Blueprint: the declarative description of what to generate.
//!
//! A blueprint lists objects (with their fields), an optional app to
//! register tabs with, and edits to apply to existing page layouts.

use std::collections::HashSet;

use crate::domain::{
    error::DomainError,
    field::{FieldCompiler, FieldDescriptor, FieldType},
    naming::{NameResolver, field_api_name, validate_identifier},
    object::{ObjectDescriptor, SharingModel},
};

/// One object and its fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectBlueprint {
    pub object: ObjectDescriptor,
    pub fields: Vec<FieldDescriptor>,
}

impl ObjectBlueprint {
    pub fn new(object: ObjectDescriptor, fields: Vec<FieldDescriptor>) -> Self {
        Self { object, fields }
    }

    pub fn sharing_model(&self) -> SharingModel {
        if self
            .fields
            .iter()
            .any(|f| f.field_type == FieldType::MasterDetail)
        {
            SharingModel::ControlledByParent
        } else {
            SharingModel::ReadWrite
        }
    }

    /// API names of fields every imported record must carry.
    pub fn required_field_names(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| f.is_required_on_record())
            .map(FieldDescriptor::api_name)
            .collect()
    }

    pub fn field_api_names(&self) -> Vec<String> {
        self.fields.iter().map(FieldDescriptor::api_name).collect()
    }
}

/// A related list to add to a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedListSpec {
    pub child: String,
    pub lookup_field: String,
}

/// Edits to one existing page layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutEdit {
    pub object: String,
    pub layout: String,
    pub fields: Vec<String>,
    pub related_lists: Vec<RelatedListSpec>,
}

impl LayoutEdit {
    pub fn new(object: impl Into<String>, layout: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            layout: layout.into(),
            fields: Vec::new(),
            related_lists: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.fields.push(name.into());
        self
    }

    pub fn related_list(mut self, child: impl Into<String>, lookup_field: impl Into<String>) -> Self {
        self.related_lists.push(RelatedListSpec {
            child: child.into(),
            lookup_field: lookup_field.into(),
        });
        self
    }

    /// Field API names, suffixed like every custom field. Standard fields
    /// cannot be placed this way.
    pub fn field_api_names(&self) -> Vec<String> {
        self.fields.iter().map(|f| field_api_name(f)).collect()
    }
}

/// Everything one `generate` run produces.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Blueprint {
    pub objects: Vec<ObjectBlueprint>,
    pub app: Option<String>,
    pub layouts: Vec<LayoutEdit>,
}

impl Blueprint {
    pub fn find_object(&self, raw_or_api_name: &str) -> Option<&ObjectBlueprint> {
        self.objects.iter().find(|o| {
            o.object.raw_name == raw_or_api_name || o.object.api_name() == raw_or_api_name
        })
    }

    /// Check every invariant before anything is written.
    pub fn validate(&self, resolver: &NameResolver) -> Result<(), DomainError> {
        let compiler = FieldCompiler::new(resolver);
        let mut seen_objects = HashSet::new();

        for entry in &self.objects {
            entry.object.validate()?;
            if !seen_objects.insert(entry.object.api_name().to_string()) {
                return Err(DomainError::InvalidBlueprint(format!(
                    "object '{}' is declared twice",
                    entry.object.raw_name
                )));
            }

            let mut seen_fields = HashSet::new();
            for field in &entry.fields {
                validate_identifier(&field.name)?;
                if !seen_fields.insert(field.api_name()) {
                    return Err(DomainError::InvalidBlueprint(format!(
                        "field '{}' is declared twice on '{}'",
                        field.name, entry.object.raw_name
                    )));
                }
                compiler.compile(field)?;
            }
        }

        for edit in &self.layouts {
            validate_identifier(&edit.object)?;
            if edit.layout.trim().is_empty() {
                return Err(DomainError::InvalidBlueprint(format!(
                    "layout edit for '{}' has no layout name",
                    edit.object
                )));
            }
            for field in &edit.fields {
                validate_identifier(field)?;
            }
            for list in &edit.related_lists {
                validate_identifier(&list.child)?;
                validate_identifier(&list.lookup_field)?;
            }
        }

        Ok(())
    }
}
