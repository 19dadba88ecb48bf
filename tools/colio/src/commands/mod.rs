pub mod arrow;
pub mod leaves;
pub mod schema;
pub mod tree;

use std::{fs, path::Path, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use columnio::{ColumnIoFactory, MessageColumnIo, core::MessageType};
use columnio_parser::parse_message_type;
use tracing::info;

/// Arguments shared by every command that builds a column I/O tree.
#[derive(Args)]
pub struct ProjectionArgs {
    /// Path to the full schema file
    schema: PathBuf,

    /// Path to the requested (projected) schema file; the full schema is used if omitted
    #[arg(short, long)]
    projection: Option<PathBuf>,

    /// Accept documented primitive widenings instead of failing on any type difference
    #[arg(long)]
    non_strict: bool,

    /// Mark the tree as validating
    #[arg(long)]
    validating: bool,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ProjectionArgs {
    pub fn build_tree(&self) -> Result<MessageColumnIo> {
        let full = read_schema(&self.schema)?;
        let requested = match &self.projection {
            Some(path) => read_schema(path)?,
            None => full.clone(),
        };

        let factory = ColumnIoFactory::builder()
            .strict_type_checking(!self.non_strict)
            .validating(self.validating)
            .build();
        let tree = factory
            .column_io(&full, &requested)
            .context("failed to build column io tree")?;
        info!(
            schema = %self.schema.display(),
            leaves = tree.leaf_count(),
            "column io tree ready"
        );
        Ok(tree)
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }
}

pub fn read_schema(path: &Path) -> Result<MessageType> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read schema file {}", path.display()))?;
    parse_message_type(&text).with_context(|| format!("invalid schema in {}", path.display()))
}

pub fn write_output(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{text}"),
    }
    Ok(())
}
