//! Record batches for the platform's tree-import JSON format.
//!
//! ```json
//! { "records": [ { "attributes": { "type": "Offer__c", "referenceId": "ref0" }, "Amount__c": 10 } ] }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::object::ObjectDescriptor;

/// A free-form user row.
pub type Row = Map<String, Value>;

const NAME_FIELD: &str = "Name";
const ATTRIBUTES_KEY: &str = "attributes";
const REFERENCE_PREFIX: &str = "ref";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordAttributes {
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(rename = "referenceId")]
    pub reference_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub attributes: RecordAttributes,
    #[serde(flatten)]
    pub fields: Row,
}

impl Record {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

/// The `{ "records": [...] }` document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecordEnvelope {
    pub records: Vec<Record>,
}

/// Something the formatter changed in a user row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordWarning {
    /// The object's name is auto-numbered, so a supplied `Name` was dropped.
    AutoNumberNameDropped { row: usize },
    /// A required field was missing and has been set to `null`.
    MissingRequiredFilled { row: usize, field: String },
}

impl fmt::Display for RecordWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AutoNumberNameDropped { row } => write!(
                f,
                "row {row}: Name is auto-numbered and was removed"
            ),
            Self::MissingRequiredFilled { row, field } => {
                write!(f, "row {row}: required field {field} missing, set to null")
            }
        }
    }
}

/// Formatter output: the envelope plus everything it had to change.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedBatch {
    pub envelope: RecordEnvelope,
    pub warnings: Vec<RecordWarning>,
}

/// Wraps rows in the import envelope for one object.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordBatchFormatter;

impl RecordBatchFormatter {
    pub fn format(
        &self,
        object: &ObjectDescriptor,
        rows: Vec<Row>,
        required_fields: &[String],
    ) -> FormattedBatch {
        let auto_number = object.name_field.is_auto_number();
        let mut warnings = Vec::new();

        let records = rows
            .into_iter()
            .enumerate()
            .map(|(index, mut row)| {
                row.remove(ATTRIBUTES_KEY);

                if auto_number && row.remove(NAME_FIELD).is_some() {
                    tracing::warn!(row = index, object = %object.api_name(), "dropping Name on auto-number object");
                    warnings.push(RecordWarning::AutoNumberNameDropped { row: index });
                }

                for field in required_fields {
                    if !row.contains_key(field) {
                        tracing::warn!(row = index, field = %field, "required field missing, filling with null");
                        row.insert(field.clone(), Value::Null);
                        warnings.push(RecordWarning::MissingRequiredFilled {
                            row: index,
                            field: field.clone(),
                        });
                    }
                }

                Record {
                    attributes: RecordAttributes {
                        record_type: object.api_name().to_string(),
                        reference_id: format!("{REFERENCE_PREFIX}{index}"),
                    },
                    fields: row,
                }
            })
            .collect();

        FormattedBatch {
            envelope: RecordEnvelope { records },
            warnings,
        }
    }
}
