//! Data Service - turns free-form rows into an import-ready data file.

use serde_json::Value;
use tracing::{info, instrument};

use crate::{
    application::{ApplicationError, ProjectPaths, ports::Filesystem},
    domain::{ObjectBlueprint, Outcome, RecordBatchFormatter, RecordWarning, Row},
    error::MetaforgeResult,
};

/// What writing one data file produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataReport {
    pub outcome: Outcome,
    pub records: usize,
    pub warnings: Vec<RecordWarning>,
}

pub struct DataService {
    filesystem: Box<dyn Filesystem>,
    paths: ProjectPaths,
    formatter: RecordBatchFormatter,
}

impl DataService {
    pub fn new(filesystem: Box<dyn Filesystem>, paths: ProjectPaths) -> Self {
        Self {
            filesystem,
            paths,
            formatter: RecordBatchFormatter,
        }
    }

    /// Format `rows` for `entry`'s object and write `<Object>-data.json`.
    #[instrument(skip_all, fields(object = %entry.object.api_name(), rows = rows.len()))]
    pub fn write_records(&self, entry: &ObjectBlueprint, rows: Vec<Row>) -> MetaforgeResult<DataReport> {
        let required = entry.required_field_names();
        let batch = self.formatter.format(&entry.object, rows, &required);

        let json = serde_json::to_string_pretty(&batch.envelope).map_err(|e| {
            ApplicationError::SerializationFailed {
                reason: e.to_string(),
            }
        })?;

        self.filesystem.create_dir_all(&self.paths.data_dir())?;
        let path = self.paths.data_file(entry.object.simple_name());
        self.filesystem.write_file(&path, &json)?;

        let records = batch.envelope.records.len();
        info!(records, warnings = batch.warnings.len(), "Data file written");
        Ok(DataReport {
            outcome: Outcome::Created { path },
            records,
            warnings: batch.warnings,
        })
    }
}

/// Parse rows from JSON: either a bare array of objects or an existing
/// `{ "records": [...] }` document.
pub fn parse_rows(json: &str) -> MetaforgeResult<Vec<Row>> {
    let value: Value = serde_json::from_str(json).map_err(|e| ApplicationError::SerializationFailed {
        reason: e.to_string(),
    })?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("records") {
            Some(Value::Array(items)) => items,
            _ => return Err(not_rows("expected an array or an object with a \"records\" array")),
        },
        _ => return Err(not_rows("expected an array of objects")),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(row) => Ok(row),
            _ => Err(not_rows(&format!("row {index} is not an object"))),
        })
        .collect()
}

fn not_rows(reason: &str) -> crate::error::MetaforgeError {
    ApplicationError::SerializationFailed {
        reason: reason.to_string(),
    }
    .into()
}
