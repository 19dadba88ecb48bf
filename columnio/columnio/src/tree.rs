//! Column I/O tree nodes.
//!
//! A built tree is immutable: nodes expose accessors only. Group nodes own
//! their children; primitive nodes are shared with the [`LeafSequence`]
//! through an [`Arc`], so a leaf can be reached both from its parent and by
//! its column position.

use std::{ops::Range, sync::Arc};

use columnio_core::{ColumnPath, LogicalType, PrimitiveKind, PrimitiveType, Repetition};

use crate::leaves::LeafSequence;

/// Position and level metadata shared by every node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInfo {
    name: String,
    index: usize,
    path: ColumnPath,
    index_path: Vec<usize>,
    repetition: Repetition,
    repetition_level: u16,
    definition_level: u16,
}

impl NodeInfo {
    pub(crate) fn root(name: &str) -> Self {
        Self {
            name: name.to_string(),
            index: 0,
            path: ColumnPath::root(),
            index_path: Vec::new(),
            repetition: Repetition::Required,
            repetition_level: 0,
            definition_level: 0,
        }
    }

    /// Metadata for the child at `index` below this node.
    pub(crate) fn child(&self, name: &str, index: usize, repetition: Repetition) -> Self {
        let mut index_path = Vec::with_capacity(self.index_path.len() + 1);
        index_path.extend_from_slice(&self.index_path);
        index_path.push(index);

        let (repetition_level, definition_level) = match repetition {
            Repetition::Required => (self.repetition_level, self.definition_level),
            Repetition::Optional => (self.repetition_level, self.definition_level + 1),
            Repetition::Repeated => (self.repetition_level + 1, self.definition_level + 1),
        };

        Self {
            name: name.to_string(),
            index,
            path: self.path.child(name),
            index_path,
            repetition,
            repetition_level,
            definition_level,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Index among the requested siblings.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn path(&self) -> &ColumnPath {
        &self.path
    }

    /// Sibling indices from the root down to this node.
    pub fn index_path(&self) -> &[usize] {
        &self.index_path
    }

    pub fn repetition(&self) -> Repetition {
        self.repetition
    }

    /// Maximum repetition level: repeated nodes on the path from the root.
    pub fn repetition_level(&self) -> u16 {
        self.repetition_level
    }

    /// Maximum definition level: non-required nodes on the path from the root.
    pub fn definition_level(&self) -> u16 {
        self.definition_level
    }
}

/// Everything a shredder or assembler needs to know about one leaf column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    path: ColumnPath,
    declared: PrimitiveType,
    physical: PrimitiveKind,
    max_repetition_level: u16,
    max_definition_level: u16,
}

impl ColumnDescriptor {
    pub fn path(&self) -> &ColumnPath {
        &self.path
    }

    /// Type the caller asked for, with the logical annotation resolved.
    pub fn declared(&self) -> &PrimitiveType {
        &self.declared
    }

    /// Kind the column is stored as.
    pub fn physical(&self) -> PrimitiveKind {
        self.physical
    }

    pub fn max_repetition_level(&self) -> u16 {
        self.max_repetition_level
    }

    pub fn max_definition_level(&self) -> u16 {
        self.max_definition_level
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimitiveColumnIo {
    info: NodeInfo,
    leaf_index: usize,
    descriptor: ColumnDescriptor,
}

impl PrimitiveColumnIo {
    pub(crate) fn new(
        info: NodeInfo,
        leaf_index: usize,
        declared: PrimitiveType,
        physical: PrimitiveKind,
    ) -> Self {
        let descriptor = ColumnDescriptor {
            path: info.path.clone(),
            declared,
            physical,
            max_repetition_level: info.repetition_level,
            max_definition_level: info.definition_level,
        };
        Self {
            info,
            leaf_index,
            descriptor,
        }
    }

    pub fn info(&self) -> &NodeInfo {
        &self.info
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn path(&self) -> &ColumnPath {
        &self.info.path
    }

    /// Position in the leaf sequence, i.e. the physical column index.
    pub fn leaf_index(&self) -> usize {
        self.leaf_index
    }

    pub fn descriptor(&self) -> &ColumnDescriptor {
        &self.descriptor
    }

    /// `true` when the column is read as a wider kind than it is stored as.
    pub fn is_widened(&self) -> bool {
        self.descriptor.declared.kind != self.descriptor.physical
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupColumnIo {
    info: NodeInfo,
    logical: Option<LogicalType>,
    children: Vec<ColumnIo>,
    leaf_range: Range<usize>,
}

impl GroupColumnIo {
    pub(crate) fn new(
        info: NodeInfo,
        logical: Option<LogicalType>,
        children: Vec<ColumnIo>,
        leaf_range: Range<usize>,
    ) -> Self {
        Self {
            info,
            logical,
            children,
            leaf_range,
        }
    }

    pub fn info(&self) -> &NodeInfo {
        &self.info
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn path(&self) -> &ColumnPath {
        &self.info.path
    }

    pub fn logical(&self) -> Option<LogicalType> {
        self.logical
    }

    pub fn children(&self) -> &[ColumnIo] {
        &self.children
    }

    pub fn child(&self, name: &str) -> Option<&ColumnIo> {
        self.children.iter().find(|c| c.name() == name)
    }

    /// Half-open range of leaf indices of the columns below this group.
    pub fn leaf_range(&self) -> Range<usize> {
        self.leaf_range.clone()
    }

    pub fn first_leaf(&self) -> Option<usize> {
        (!self.leaf_range.is_empty()).then_some(self.leaf_range.start)
    }

    pub fn last_leaf(&self) -> Option<usize> {
        (!self.leaf_range.is_empty()).then(|| self.leaf_range.end - 1)
    }
}

/// A node below the message root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnIo {
    Group(GroupColumnIo),
    Primitive(Arc<PrimitiveColumnIo>),
}

impl ColumnIo {
    pub fn info(&self) -> &NodeInfo {
        match self {
            ColumnIo::Group(g) => &g.info,
            ColumnIo::Primitive(p) => &p.info,
        }
    }

    pub fn name(&self) -> &str {
        &self.info().name
    }

    pub fn path(&self) -> &ColumnPath {
        &self.info().path
    }

    pub fn as_group(&self) -> Option<&GroupColumnIo> {
        match self {
            ColumnIo::Group(g) => Some(g),
            ColumnIo::Primitive(_) => None,
        }
    }

    pub fn as_primitive(&self) -> Option<&PrimitiveColumnIo> {
        match self {
            ColumnIo::Primitive(p) => Some(p),
            ColumnIo::Group(_) => None,
        }
    }
}

/// Root of a built column I/O tree, together with its leaf sequence.
///
/// Built once per (full schema, requested schema) pair and read-only
/// afterwards; it can be shared across threads without locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageColumnIo {
    info: NodeInfo,
    children: Vec<ColumnIo>,
    validating: bool,
    leaves: LeafSequence,
}

impl MessageColumnIo {
    pub(crate) fn new(
        info: NodeInfo,
        children: Vec<ColumnIo>,
        validating: bool,
        leaves: LeafSequence,
    ) -> Self {
        Self {
            info,
            children,
            validating,
            leaves,
        }
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn info(&self) -> &NodeInfo {
        &self.info
    }

    pub fn children(&self) -> &[ColumnIo] {
        &self.children
    }

    /// Whether readers built on this tree check values against the declared types.
    pub fn validating(&self) -> bool {
        self.validating
    }

    pub fn leaves(&self) -> &LeafSequence {
        &self.leaves
    }

    pub fn leaf(&self, index: usize) -> Option<&PrimitiveColumnIo> {
        self.leaves.get(index).map(Arc::as_ref)
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Leaf column paths in physical column order.
    pub fn column_paths(&self) -> Vec<ColumnPath> {
        self.leaves.iter().map(|l| l.path().clone()).collect()
    }

    /// Look up a node by path. The root path yields `None`.
    pub fn column(&self, path: &[String]) -> Option<&ColumnIo> {
        let (first, rest) = path.split_first()?;
        let mut current = self.children.iter().find(|c| c.name() == first.as_str())?;
        for name in rest {
            current = current.as_group()?.child(name)?;
        }
        Some(current)
    }

    /// Look up a node by its sibling indices from the root.
    pub fn node_at(&self, index_path: &[usize]) -> Option<&ColumnIo> {
        let (first, rest) = index_path.split_first()?;
        let mut current = self.children.get(*first)?;
        for index in rest {
            current = current.as_group()?.children.get(*index)?;
        }
        Some(current)
    }
}
