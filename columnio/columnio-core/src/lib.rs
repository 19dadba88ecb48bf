//! Type model for nested columnar schemas.
//!
//! A schema is a [`MessageType`] root holding an ordered tree of
//! [`GroupType`] and [`PrimitiveType`] nodes. Every primitive node stands for
//! one physical column; [`MessageType::leaf_paths`] enumerates them in the
//! depth-first order used for column storage.

mod error;
mod path;
mod schema;

pub use error::SchemaError;
pub use path::ColumnPath;
pub use schema::{
    GroupType, LogicalType, MessageType, PrimitiveKind, PrimitiveType, Repetition, Type,
    format_message_type,
};
