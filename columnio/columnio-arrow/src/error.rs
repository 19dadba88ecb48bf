use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArrowSchemaError {
    #[error("flattened column name collision: '{0}'")]
    PathCollision(String),

    #[error("column '{name}' has no Arrow representation: {detail}")]
    Unrepresentable { name: String, detail: String },
}
