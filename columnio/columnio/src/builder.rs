//! Column I/O tree builder.
//!
//! A recursive descent over the matched schema. The position of the group
//! being filled travels down the recursion as a [`NodeInfo`] value; nothing
//! outlives the build except the finished tree.

use std::sync::Arc;

use tracing::debug;

use crate::{
    leaves::LeafCollector,
    reconcile::{MatchedNode, MatchedSchema},
    tree::{ColumnIo, GroupColumnIo, MessageColumnIo, NodeInfo, PrimitiveColumnIo},
};

/// Build the column I/O tree for a reconciled schema.
///
/// Deterministic: the same matched schema always yields the same tree shape
/// and leaf order.
pub fn build(matched: &MatchedSchema, validating: bool) -> MessageColumnIo {
    let root = NodeInfo::root(&matched.name);
    let mut leaves = LeafCollector::new();
    let children = build_children(&matched.fields, &root, &mut leaves);
    let leaves = leaves.freeze();

    debug!(
        message = %matched.name,
        leaves = leaves.len(),
        validating,
        "built column io tree"
    );
    MessageColumnIo::new(root, children, validating, leaves)
}

fn build_children(
    fields: &[MatchedNode],
    parent: &NodeInfo,
    leaves: &mut LeafCollector,
) -> Vec<ColumnIo> {
    let mut children = Vec::with_capacity(fields.len());
    for (index, field) in fields.iter().enumerate() {
        children.push(build_node(field, index, parent, leaves));
    }
    children
}

fn build_node(
    node: &MatchedNode,
    index: usize,
    parent: &NodeInfo,
    leaves: &mut LeafCollector,
) -> ColumnIo {
    match node {
        MatchedNode::Group(group) => {
            let info = parent.child(&group.name, index, group.repetition);
            let first_leaf = leaves.next_index();
            let children = build_children(&group.fields, &info, leaves);
            let leaf_range = first_leaf..leaves.next_index();
            ColumnIo::Group(GroupColumnIo::new(
                info,
                group.logical,
                children,
                leaf_range,
            ))
        }
        MatchedNode::Primitive(primitive) => {
            let declared = &primitive.declared;
            let info = parent.child(&declared.name, index, declared.repetition);
            let leaf = Arc::new(PrimitiveColumnIo::new(
                info,
                leaves.next_index(),
                declared.clone(),
                primitive.physical,
            ));
            leaves.append(Arc::clone(&leaf));
            ColumnIo::Primitive(leaf)
        }
    }
}
