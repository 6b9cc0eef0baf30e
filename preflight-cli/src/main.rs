use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "preflight", about = "Version and model snapshot for codegen freshness")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate or refresh the snapshot
    Snapshot(commands::snapshot::SnapshotArgs),
    /// Show cache status and the current selection
    Status(commands::status::StatusArgs),
    /// Render the rule document from the cached snapshot
    Rule(commands::rule::RuleArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Snapshot(args) => commands::snapshot::run(args).await,
        Commands::Status(args) => commands::status::run(args).await,
        Commands::Rule(args) => commands::rule::run(args).await,
    }
}
