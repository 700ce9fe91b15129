//! Core domain layer for Metaforge.
//!
//! Pure metadata rules: naming, field compilation, document rendering and
//! text-level edits of existing documents. Nothing in here touches the
//! filesystem or spawns processes; those concerns live behind the ports in
//! `crate::application`.

pub mod blueprint;
pub mod error;
pub mod field;
pub mod layout;
pub mod naming;
pub mod object;
pub mod outcome;
pub mod permission_set;
pub mod records;
pub mod tab;
pub mod xml;

pub use blueprint::{Blueprint, LayoutEdit, ObjectBlueprint, RelatedListSpec};
pub use error::{DomainError, ErrorCategory};
pub use field::{CompiledField, FieldCompiler, FieldDescriptor, FieldType};
pub use layout::{LayoutChange, LayoutDocument, LayoutSection, related_list_id};
pub use naming::{CUSTOM_SUFFIX, NameResolver, ResolvedName, StandardObjects, field_api_name};
pub use object::{NameFieldSpec, ObjectDescriptor, SharingModel};
pub use outcome::{Outcome, Severity};
pub use permission_set::PermissionSetSpec;
pub use records::{
    FormattedBatch, Record, RecordAttributes, RecordBatchFormatter, RecordEnvelope, RecordWarning,
    Row,
};
pub use tab::{AppChange, AppDocument, render_tab};
