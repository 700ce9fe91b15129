//! Field descriptors and their compilation into `CustomField` documents.
//!
//! Each [`FieldType`] maps onto a fixed set of type-specific child tags:
//!
//! | Type                         | Extra tags                                         |
//! |------------------------------|----------------------------------------------------|
//! | Currency, Percent            | `precision=18`, `scale=2`                          |
//! | Number                       | `precision=18`, `scale=0`                          |
//! | Text, Email, Url, Phone      | `length=255`                                       |
//! | Lookup                       | `deleteConstraint=SetNull` + relationship tags     |
//! | MasterDetail                 | master-read / reparent flags + relationship tags   |
//! | Date, DateTime, Checkbox, TextArea | none                                         |
//!
//! MasterDetail never carries a `<required>` tag: the relationship itself
//! makes the parent mandatory.

use std::fmt;
use std::str::FromStr;

use crate::domain::{
    error::DomainError,
    naming::{NameResolver, field_api_name, humanize},
    xml::XmlWriter,
};

const DEFAULT_PRECISION: u8 = 18;
const DEFAULT_LENGTH: u16 = 255;

/// Supported field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Text,
    Number,
    Currency,
    Checkbox,
    Date,
    DateTime,
    Email,
    Percent,
    Phone,
    Url,
    TextArea,
    Lookup,
    MasterDetail,
}

impl FieldType {
    /// Name of the type in metadata documents.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Number => "Number",
            Self::Currency => "Currency",
            Self::Checkbox => "Checkbox",
            Self::Date => "Date",
            Self::DateTime => "DateTime",
            Self::Email => "Email",
            Self::Percent => "Percent",
            Self::Phone => "Phone",
            Self::Url => "Url",
            Self::TextArea => "TextArea",
            Self::Lookup => "Lookup",
            Self::MasterDetail => "MasterDetail",
        }
    }

    pub const fn is_relationship(&self) -> bool {
        matches!(self, Self::Lookup | Self::MasterDetail)
    }

    /// `(precision, scale)` for numeric types.
    pub const fn numeric_shape(&self) -> Option<(u8, u8)> {
        match self {
            Self::Currency | Self::Percent => Some((DEFAULT_PRECISION, 2)),
            Self::Number => Some((DEFAULT_PRECISION, 0)),
            _ => None,
        }
    }

    pub const fn length(&self) -> Option<u16> {
        match self {
            Self::Text | Self::Email | Self::Url | Self::Phone => Some(DEFAULT_LENGTH),
            _ => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "text" => Ok(Self::Text),
            "number" => Ok(Self::Number),
            "currency" => Ok(Self::Currency),
            "checkbox" | "boolean" => Ok(Self::Checkbox),
            "date" => Ok(Self::Date),
            "datetime" => Ok(Self::DateTime),
            "email" => Ok(Self::Email),
            "percent" => Ok(Self::Percent),
            "phone" => Ok(Self::Phone),
            "url" => Ok(Self::Url),
            "textarea" => Ok(Self::TextArea),
            "lookup" => Ok(Self::Lookup),
            "masterdetail" => Ok(Self::MasterDetail),
            _ => Err(DomainError::UnknownFieldType {
                field: String::new(),
                value: s.to_string(),
            }),
        }
    }
}

/// A declared field on an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: Option<String>,
    pub field_type: FieldType,
    pub description: Option<String>,
    pub required: bool,
    pub reference_to: Option<String>,
    pub relationship_label: Option<String>,
    pub relationship_name: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            label: None,
            field_type,
            description: None,
            required: false,
            reference_to: None,
            relationship_label: None,
            relationship_name: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn reference_to(mut self, object: impl Into<String>) -> Self {
        self.reference_to = Some(object.into());
        self
    }

    pub fn relationship(mut self, label: impl Into<String>, name: impl Into<String>) -> Self {
        self.relationship_label = Some(label.into());
        self.relationship_name = Some(name.into());
        self
    }

    pub fn api_name(&self) -> String {
        field_api_name(&self.name)
    }

    /// Explicit label, or the name with underscores turned into spaces.
    pub fn effective_label(&self) -> String {
        self.label.clone().unwrap_or_else(|| humanize(&self.name))
    }

    /// Whether records must supply a value for this field.
    pub fn is_required_on_record(&self) -> bool {
        self.required && self.field_type != FieldType::MasterDetail
    }
}

/// Output of [`FieldCompiler::compile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledField {
    pub api_name: String,
    pub label: String,
    pub field_type: FieldType,
    pub required_on_record: bool,
    /// Complete `CustomField` document.
    pub xml: String,
}

/// Turns [`FieldDescriptor`]s into `CustomField` documents.
#[derive(Debug, Clone)]
pub struct FieldCompiler<'a> {
    resolver: &'a NameResolver,
}

impl<'a> FieldCompiler<'a> {
    pub fn new(resolver: &'a NameResolver) -> Self {
        Self { resolver }
    }

    pub fn compile(&self, field: &FieldDescriptor) -> Result<CompiledField, DomainError> {
        let api_name = field.api_name();
        let label = field.effective_label();
        let field_type = field.field_type;

        let reference = if field_type.is_relationship() {
            let target = field
                .reference_to
                .as_deref()
                .filter(|t| !t.trim().is_empty())
                .ok_or_else(|| DomainError::MissingReferenceTo {
                    field: field.name.clone(),
                    field_type: field_type.to_string(),
                })?;
            Some(self.resolver.resolve(target.trim()).api_name)
        } else {
            None
        };

        let mut w = XmlWriter::document("CustomField");
        w.leaf("fullName", &api_name)
            .leaf_opt("description", field.description.as_deref())
            .leaf("label", &label);

        if field_type != FieldType::MasterDetail {
            w.leaf_bool("required", field.required);
        }
        w.leaf("type", field_type.as_str());

        if let Some((precision, scale)) = field_type.numeric_shape() {
            w.leaf("precision", precision.to_string())
                .leaf("scale", scale.to_string());
        }
        if let Some(length) = field_type.length() {
            w.leaf("length", length.to_string());
        }

        if let Some(reference) = reference {
            let relationship_label = field
                .relationship_label
                .clone()
                .unwrap_or_else(|| label.clone());
            let relationship_name = field
                .relationship_name
                .clone()
                .unwrap_or_else(|| field.name.clone());

            match field_type {
                FieldType::Lookup => {
                    w.leaf("deleteConstraint", "SetNull");
                }
                FieldType::MasterDetail => {
                    w.leaf_bool("reparentableMasterDetail", false)
                        .leaf_bool("writeRequiresMasterRead", false);
                }
                _ => {}
            }

            w.leaf("referenceTo", reference)
                .leaf("relationshipLabel", relationship_label)
                .leaf("relationshipName", relationship_name);
        }

        Ok(CompiledField {
            required_on_record: field.is_required_on_record(),
            api_name,
            label,
            field_type,
            xml: w.finish(),
        })
    }

    /// Compile a whole field list, stopping at the first configuration error.
    pub fn compile_all(&self, fields: &[FieldDescriptor]) -> Result<Vec<CompiledField>, DomainError> {
        fields.iter().map(|f| self.compile(f)).collect()
    }
}
