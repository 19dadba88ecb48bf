//! Error types for the type model.

use crate::path::ColumnPath;

/// Structural invariant violated by a schema.
///
/// This points at a bug in whatever produced the schema; it is reported as
/// is and never patched up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("malformed schema at '{path}': {detail}")]
    Malformed { path: ColumnPath, detail: String },
}

impl SchemaError {
    pub fn malformed(path: ColumnPath, detail: impl Into<String>) -> Self {
        SchemaError::Malformed {
            path,
            detail: detail.into(),
        }
    }
}
