//! Object descriptors and the `CustomObject` document.

use crate::domain::{
    error::DomainError,
    naming::{NameResolver, ResolvedName, humanize, validate_identifier},
    xml::XmlWriter,
};

/// The record-name field of an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameFieldSpec {
    /// User-entered text name.
    Text { label: String },
    /// System-generated name, e.g. `OFF-{0000}`.
    AutoNumber {
        label: String,
        display_format: String,
        starting_number: u32,
    },
}

impl NameFieldSpec {
    pub fn text(label: impl Into<String>) -> Self {
        Self::Text {
            label: label.into(),
        }
    }

    pub fn auto_number(label: impl Into<String>, display_format: impl Into<String>) -> Self {
        Self::AutoNumber {
            label: label.into(),
            display_format: display_format.into(),
            starting_number: 1,
        }
    }

    pub fn starting_at(self, start: u32) -> Self {
        match self {
            Self::AutoNumber {
                label,
                display_format,
                ..
            } => Self::AutoNumber {
                label,
                display_format,
                starting_number: start,
            },
            text => text,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Text { label } | Self::AutoNumber { label, .. } => label,
        }
    }

    pub fn is_auto_number(&self) -> bool {
        matches!(self, Self::AutoNumber { .. })
    }
}

/// Sharing model of a custom object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharingModel {
    ReadWrite,
    /// Required as soon as the object has a master-detail parent.
    ControlledByParent,
}

impl SharingModel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ReadWrite => "ReadWrite",
            Self::ControlledByParent => "ControlledByParent",
        }
    }
}

/// A declared object and its derived names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectDescriptor {
    pub raw_name: String,
    pub resolved: ResolvedName,
    pub label: String,
    pub plural_label: String,
    pub description: Option<String>,
    pub name_field: NameFieldSpec,
}

impl ObjectDescriptor {
    /// Describe an object with labels derived from its name.
    pub fn new(resolver: &NameResolver, raw_name: impl Into<String>) -> Self {
        let raw_name = raw_name.into();
        let resolved = resolver.resolve(&raw_name);
        let label = humanize(crate::domain::naming::simple_name(&raw_name));
        Self {
            plural_label: format!("{label}s"),
            name_field: NameFieldSpec::text(format!("{label} Name")),
            raw_name,
            resolved,
            label,
            description: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn plural_label(mut self, plural: impl Into<String>) -> Self {
        self.plural_label = plural.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name_field(mut self, spec: NameFieldSpec) -> Self {
        self.name_field = spec;
        self
    }

    pub fn api_name(&self) -> &str {
        &self.resolved.api_name
    }

    pub fn folder_name(&self) -> &str {
        &self.resolved.folder_name
    }

    pub fn is_standard(&self) -> bool {
        self.resolved.is_standard
    }

    /// Tab name as the platform knows it: `standard-Account` for standard
    /// objects, the API name for custom ones.
    pub fn tab_name(&self) -> String {
        if self.is_standard() {
            format!("standard-{}", self.api_name())
        } else {
            self.api_name().to_string()
        }
    }

    /// Raw name without the custom suffix, used for data files and
    /// permission-set names.
    pub fn simple_name(&self) -> &str {
        crate::domain::naming::simple_name(&self.raw_name)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        validate_identifier(&self.raw_name)?;
        if matches!(
            &self.name_field,
            NameFieldSpec::AutoNumber { display_format, .. } if display_format.trim().is_empty()
        ) {
            return Err(DomainError::MissingDisplayFormat {
                object: self.raw_name.clone(),
            });
        }
        Ok(())
    }

    /// Render the `CustomObject` document.
    pub fn render(&self, sharing: SharingModel) -> Result<String, DomainError> {
        self.validate()?;

        let mut w = XmlWriter::document("CustomObject");
        w.leaf("fullName", self.api_name())
            .leaf("deploymentStatus", "Deployed")
            .leaf_opt("description", self.description.as_deref())
            .leaf_bool("enableActivities", true)
            .leaf_bool("enableBulkApi", true)
            .leaf_bool("enableReports", true)
            .leaf_bool("enableSearch", true)
            .leaf_bool("enableSharing", true)
            .leaf_bool("enableStreamingApi", true)
            .leaf("label", &self.label);

        w.open("nameField");
        match &self.name_field {
            NameFieldSpec::Text { label } => {
                w.leaf("label", label).leaf("type", "Text");
            }
            NameFieldSpec::AutoNumber {
                label,
                display_format,
                starting_number,
            } => {
                w.leaf("displayFormat", display_format)
                    .leaf("label", label)
                    .leaf("startingNumber", starting_number.to_string())
                    .leaf("type", "AutoNumber");
            }
        }
        w.close();

        w.leaf("pluralLabel", &self.plural_label)
            .leaf("sharingModel", sharing.as_str());

        Ok(w.finish())
    }
}
