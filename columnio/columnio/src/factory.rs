//! Entry point combining reconciliation and tree building.

use columnio_core::MessageType;

use crate::{builder::build, error::ColumnIoError, reconcile::reconcile, tree::MessageColumnIo};

/// Builds [`MessageColumnIo`] trees with a fixed set of options.
///
/// A factory holds no state beyond its options; independent builds may run
/// in parallel on shared or separate factories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIoFactory {
    strict_type_checking: bool,
    validating: bool,
}

/// Builder for configuring [`ColumnIoFactory`].
#[derive(Debug, Clone, Copy)]
pub struct ColumnIoFactoryBuilder {
    strict_type_checking: bool,
    validating: bool,
}

impl ColumnIoFactory {
    /// Create a builder for [`ColumnIoFactory`].
    pub fn builder() -> ColumnIoFactoryBuilder {
        ColumnIoFactoryBuilder {
            strict_type_checking: true,
            validating: false,
        }
    }

    /// Factory with strict type checking on and validation off.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn strict_type_checking(&self) -> bool {
        self.strict_type_checking
    }

    pub fn validating(&self) -> bool {
        self.validating
    }

    /// Build the tree for `requested` read out of data written with `full`.
    ///
    /// Fails without returning any tree if the projection does not match
    /// the full schema.
    pub fn column_io(
        &self,
        full: &MessageType,
        requested: &MessageType,
    ) -> Result<MessageColumnIo, ColumnIoError> {
        let matched = reconcile(full, requested, self.strict_type_checking)?;
        Ok(build(&matched, self.validating))
    }

    /// Build the tree for `schema` without projection.
    pub fn column_io_for(&self, schema: &MessageType) -> Result<MessageColumnIo, ColumnIoError> {
        self.column_io(schema, schema)
    }
}

impl Default for ColumnIoFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnIoFactoryBuilder {
    /// Reject any primitive kind difference between projection and full
    /// schema (default: `true`).
    pub fn strict_type_checking(mut self, strict: bool) -> Self {
        self.strict_type_checking = strict;
        self
    }

    /// Mark the built trees as validating (default: `false`).
    pub fn validating(mut self, validating: bool) -> Self {
        self.validating = validating;
        self
    }

    /// Build the factory.
    pub fn build(self) -> ColumnIoFactory {
        ColumnIoFactory {
            strict_type_checking: self.strict_type_checking,
            validating: self.validating,
        }
    }
}
