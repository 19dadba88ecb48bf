use std::fmt::Write as _;

use anyhow::Result;
use arrow::datatypes::Field;
use clap::Args;
use columnio_arrow::{leaf_fields, message_column_io_to_arrow_schema};

use super::{ProjectionArgs, write_output};

#[derive(Args)]
pub struct ArrowArgs {
    #[command(flatten)]
    common: ProjectionArgs,

    /// Print one flat field per leaf column instead of the nested schema
    #[arg(long)]
    flat: bool,

    /// Path separator for --flat field names
    #[arg(long, default_value_t = '.')]
    separator: char,
}

impl ArrowArgs {
    pub fn run(self) -> Result<()> {
        let tree = self.common.build_tree()?;
        let fields: Vec<Field> = if self.flat {
            leaf_fields(&tree, Some(self.separator))?
        } else {
            message_column_io_to_arrow_schema(&tree)?
                .fields()
                .iter()
                .map(|f| f.as_ref().clone())
                .collect()
        };

        let mut text = String::new();
        for field in &fields {
            writeln!(
                text,
                "{}: {} (nullable: {})",
                field.name(),
                field.data_type(),
                field.is_nullable()
            )?;
        }
        write_output(self.common.output(), &text)
    }
}
