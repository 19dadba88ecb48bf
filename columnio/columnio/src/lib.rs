//! Column I/O tree construction.
//!
//! Given a full schema and a requested projection of it, this crate
//! reconciles the two ([`reconcile`]) and builds ([`build`]) an immutable
//! [`MessageColumnIo`] tree that mirrors the projection, together with the
//! [`LeafSequence`] of primitive columns in physical storage order. Record
//! shredding and assembly index into that sequence by column position.
//!
//! # Typical Flow
//! ```rust
//! use columnio::ColumnIoFactory;
//! use columnio::core::{MessageType, PrimitiveKind, Repetition, Type};
//!
//! let full = MessageType::new(
//!     "m",
//!     vec![
//!         Type::primitive("a", Repetition::Required, PrimitiveKind::Int32),
//!         Type::primitive("b", Repetition::Optional, PrimitiveKind::Binary),
//!     ],
//! );
//! let requested = MessageType::new(
//!     "m",
//!     vec![Type::primitive("b", Repetition::Optional, PrimitiveKind::Binary)],
//! );
//!
//! let factory = ColumnIoFactory::builder().strict_type_checking(true).build();
//! let tree = factory.column_io(&full, &requested).unwrap();
//! assert_eq!(tree.leaf_count(), 1);
//! assert_eq!(tree.leaves()[0].path().to_string(), "b");
//! ```

mod builder;
mod error;
mod factory;
mod leaves;
mod reconcile;
mod tree;

pub use builder::build;
pub use columnio_core as core;
pub use error::ColumnIoError;
pub use factory::{ColumnIoFactory, ColumnIoFactoryBuilder};
pub use leaves::LeafSequence;
pub use reconcile::{
    MatchedGroup, MatchedNode, MatchedPrimitive, MatchedSchema, is_widening, reconcile,
};
pub use tree::{
    ColumnDescriptor, ColumnIo, GroupColumnIo, MessageColumnIo, NodeInfo, PrimitiveColumnIo,
};
