//! `preflight snapshot` - generate or refresh the snapshot.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use preflight_core::{Credentials, PreflightConfig, SnapshotService};
use tracing::debug;

/// Snapshot generation arguments.
#[derive(Args, Debug)]
pub struct SnapshotArgs {
    /// Regenerate even if the cached snapshot is still fresh
    #[arg(long)]
    pub force: bool,

    /// Workspace root (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Override the OpenAI API base URL (falls back to $OPENAI_BASE_URL)
    #[arg(long)]
    pub openai_base_url: Option<String>,
}

pub async fn run(args: SnapshotArgs) -> Result<()> {
    let root = super::resolve_root(args.root)?;
    let credentials = Credentials::from_env();
    if credentials.is_empty() {
        debug!("no provider credentials configured; model discovery will be empty");
    }

    let openai_base_url = args
        .openai_base_url
        .or_else(|| std::env::var("OPENAI_BASE_URL").ok());
    let config = PreflightConfig {
        credentials,
        openai_base_url,
        ..Default::default()
    };
    let service = SnapshotService::new(&root, config);

    let snapshot = service.get_snapshot(args.force).await?;

    println!("Snapshot generated: {}", snapshot.generated_at_iso);
    println!(
        "  npm versions:   {:>4}",
        snapshot.deps.npm_latest.len()
    );
    println!(
        "  PyPI versions:  {:>4}",
        snapshot.deps.pypi_latest.len()
    );
    println!(
        "  models found:   {:>4}",
        snapshot.models.discovered.len()
    );
    println!("  cache:          {}", service.cache().snapshot_path().display());
    println!("  rule document:  {}", service.cache().rule_path().display());

    if let Some(notes) = &snapshot.notes {
        for note in notes {
            println!("  note: {note}");
        }
    }

    Ok(())
}
