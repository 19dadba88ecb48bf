//! Parser for textual message schemas.
//!
//! ```
//! let schema = columnio_parser::parse_message_type(
//!     "message doc {
//!        required int64 id;
//!        optional group links {
//!          repeated int64 forward;
//!        }
//!      }",
//! )
//! .unwrap();
//! assert_eq!(schema.leaf_count(), 2);
//! ```

mod error;
mod lex;
mod parser;

pub use error::ParseError;
pub use parser::parse_message_type;
