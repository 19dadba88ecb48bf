//! Error types for column I/O tree construction.

use columnio_core::{ColumnPath, SchemaError};

/// Errors produced while reconciling schemas or building a column I/O tree.
///
/// Every variant aborts the whole build; no partial tree is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColumnIoError {
    /// A requested field has no counterpart in the full schema, or its
    /// repetition disagrees with the full schema.
    #[error("schema mismatch at '{path}': {detail}")]
    SchemaMismatch { path: ColumnPath, detail: String },

    /// A requested field's type disagrees with the full schema.
    #[error("type conflict at '{path}': requested {requested}, full schema declares {full}")]
    TypeConflict {
        path: ColumnPath,
        requested: String,
        full: String,
    },

    /// One of the input schemas violates a structural invariant.
    #[error(transparent)]
    MalformedSchema(#[from] SchemaError),
}
