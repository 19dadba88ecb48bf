use std::fmt::{Result as FmtResult, Write as _};

use anyhow::Result;
use clap::Args;
use columnio::{ColumnIo, MessageColumnIo};

use super::{ProjectionArgs, write_output};

#[derive(Args)]
pub struct TreeArgs {
    #[command(flatten)]
    common: ProjectionArgs,
}

impl TreeArgs {
    pub fn run(self) -> Result<()> {
        let tree = self.common.build_tree()?;
        let text = format_tree(&tree)?;
        write_output(self.common.output(), &text)
    }
}

fn format_tree(tree: &MessageColumnIo) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(
        out,
        "message {} (leaves: {}, validating: {})",
        tree.name(),
        tree.leaf_count(),
        tree.validating()
    )?;
    for child in tree.children() {
        format_node(child, 1, &mut out)?;
    }
    Ok(out)
}

fn format_node(node: &ColumnIo, depth: usize, out: &mut String) -> FmtResult {
    let pad = "  ".repeat(depth);
    let info = node.info();
    match node {
        ColumnIo::Group(group) => {
            let leaves = group.leaf_range();
            writeln!(
                out,
                "{pad}{} group {} [leaves {}..{}] R={} D={}",
                info.repetition(),
                info.name(),
                leaves.start,
                leaves.end,
                info.repetition_level(),
                info.definition_level()
            )?;
            for child in group.children() {
                format_node(child, depth + 1, out)?;
            }
        }
        ColumnIo::Primitive(leaf) => {
            writeln!(
                out,
                "{pad}{} {} {} #{} R={} D={}",
                info.repetition(),
                leaf.descriptor().declared().kind,
                info.name(),
                leaf.leaf_index(),
                info.repetition_level(),
                info.definition_level()
            )?;
        }
    }
    Ok(())
}
