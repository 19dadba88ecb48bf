use columnio_core::SchemaError;

/// Error returned by [`parse_message_type`](crate::parse_message_type).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The text does not follow the message syntax.
    #[error("parse error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// The text parsed but describes a structurally invalid schema.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl ParseError {
    pub(crate) fn syntax(line: usize, message: impl Into<String>) -> Self {
        ParseError::Syntax {
            line,
            message: message.into(),
        }
    }
}
