//! Arrow integration layer for `columnio`.
//!
//! Converts a built [`MessageColumnIo`](columnio::MessageColumnIo) into
//! Arrow schemas, either nested ([`message_column_io_to_arrow_schema`]) or as
//! one flat field per leaf column ([`leaf_fields`]).
//!
//! Conventions:
//! - `optional` fields are nullable, `required` fields are not.
//! - `repeated` fields become a non-nullable `List` of their element.
//! - Types come from the declared (requested) column type, so widened
//!   columns convert to the wider Arrow type.
pub mod error;
pub mod schema_convert;

/// Re-export of [`error::ArrowSchemaError`].
pub use error::ArrowSchemaError;
/// Re-exports from [`schema_convert`].
pub use schema_convert::{
    MAX_DEFINITION_LEVEL_KEY, MAX_REPETITION_LEVEL_KEY, leaf_fields,
    message_column_io_to_arrow_schema, primitive_to_datatype,
};

pub(crate) const TIMESTAMP_TZ: &str = "+00:00";
