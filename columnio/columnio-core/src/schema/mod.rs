//! Nested schema type model.

mod format;
mod types;

pub use format::format_message_type;
pub use types::{
    GroupType, LogicalType, MessageType, PrimitiveKind, PrimitiveType, Repetition, Type,
};
