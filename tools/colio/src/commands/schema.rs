use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::{read_schema, write_output};

#[derive(Args)]
pub struct SchemaArgs {
    /// Path to the schema file
    input: PathBuf,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl SchemaArgs {
    pub fn run(self) -> Result<()> {
        let schema = read_schema(&self.input)?;
        write_output(self.output.as_deref(), &schema.to_string())
    }
}
