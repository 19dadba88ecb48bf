mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{arrow::ArrowArgs, leaves::LeavesArgs, schema::SchemaArgs, tree::TreeArgs};

#[derive(Parser)]
#[command(name = "colio", about = "Inspect column I/O trees built from message schemas")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse, validate and re-render a schema file
    Schema(SchemaArgs),
    /// Print the leaf columns of a (projected) schema in column order
    Leaves(LeavesArgs),
    /// Print the column I/O tree of a (projected) schema
    Tree(TreeArgs),
    /// Print the Arrow schema of a (projected) schema
    Arrow(ArrowArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Schema(args) => args.run(),
        Commands::Leaves(args) => args.run(),
        Commands::Tree(args) => args.run(),
        Commands::Arrow(args) => args.run(),
    }
}
