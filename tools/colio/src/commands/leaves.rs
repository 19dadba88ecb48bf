use std::fmt::Write as _;

use anyhow::Result;
use clap::Args;
use columnio::MessageColumnIo;

use super::{ProjectionArgs, write_output};

#[derive(Args)]
pub struct LeavesArgs {
    #[command(flatten)]
    common: ProjectionArgs,
}

impl LeavesArgs {
    pub fn run(self) -> Result<()> {
        let tree = self.common.build_tree()?;
        let text = format_leaves(&tree)?;
        write_output(self.common.output(), &text)
    }
}

/// One line per leaf: index, path, declared type, levels.
fn format_leaves(tree: &MessageColumnIo) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    for leaf in tree.leaves() {
        let d = leaf.descriptor();
        let declared = d.declared();
        write!(
            out,
            "{:>4}  {}  {} {}",
            leaf.leaf_index(),
            leaf.path(),
            declared.repetition,
            declared.kind
        )?;
        if let Some(logical) = declared.logical {
            write!(out, " ({logical})")?;
        }
        if leaf.is_widened() {
            write!(out, " [stored as {}]", d.physical())?;
        }
        writeln!(
            out,
            "  R={} D={}",
            d.max_repetition_level(),
            d.max_definition_level()
        )?;
    }
    Ok(out)
}
