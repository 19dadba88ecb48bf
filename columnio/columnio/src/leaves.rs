//! Leaf column collection in physical column order.

use std::{ops::Deref, slice, sync::Arc};

use columnio_core::ColumnPath;

use crate::tree::PrimitiveColumnIo;

/// Append-only accumulator of primitive nodes, filled in depth-first order
/// while a tree is being built.
///
/// Internal to the builder, which creates every leaf with the index the
/// collector hands out, so `sequence[i].leaf_index() == i` holds by
/// construction.
#[derive(Debug, Default)]
pub(crate) struct LeafCollector {
    leaves: Vec<Arc<PrimitiveColumnIo>>,
}

impl LeafCollector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Index the next appended leaf will receive.
    pub(crate) fn next_index(&self) -> usize {
        self.leaves.len()
    }

    /// Append a leaf. Its `leaf_index` must be [`next_index`](Self::next_index).
    pub(crate) fn append(&mut self, node: Arc<PrimitiveColumnIo>) {
        debug_assert_eq!(node.leaf_index(), self.leaves.len());
        self.leaves.push(node);
    }

    /// Finish collection; the result can no longer grow.
    pub(crate) fn freeze(self) -> LeafSequence {
        LeafSequence(self.leaves)
    }
}

/// Frozen, ordered sequence of leaf columns.
///
/// `sequence[i].leaf_index() == i` for every `i`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LeafSequence(Vec<Arc<PrimitiveColumnIo>>);

impl LeafSequence {
    /// Leaves in column order.
    pub fn sequence(&self) -> &[Arc<PrimitiveColumnIo>] {
        &self.0
    }

    pub fn iter(&self) -> slice::Iter<'_, Arc<PrimitiveColumnIo>> {
        self.0.iter()
    }

    /// Leaf paths joined with `.`, in column order.
    pub fn dotted_paths(&self) -> Vec<String> {
        self.0.iter().map(|l| l.path().join(".")).collect()
    }

    /// Find the column index of the leaf at `path`.
    pub fn position(&self, path: &ColumnPath) -> Option<usize> {
        self.0.iter().position(|l| l.path() == path)
    }
}

impl Deref for LeafSequence {
    type Target = [Arc<PrimitiveColumnIo>];

    fn deref(&self) -> &Self::Target {
        self.sequence()
    }
}

impl<'a> IntoIterator for &'a LeafSequence {
    type Item = &'a Arc<PrimitiveColumnIo>;
    type IntoIter = slice::Iter<'a, Arc<PrimitiveColumnIo>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
