//! `preflight rule` - render the rule document from the cached snapshot.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use preflight_core::{CacheManager, rule::snapshot_to_rule};

/// Rule rendering arguments.
#[derive(Args, Debug)]
pub struct RuleArgs {
    /// Workspace root (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Write to a file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub async fn run(args: RuleArgs) -> Result<()> {
    let root = super::resolve_root(args.root)?;
    let cache = CacheManager::new(&root);

    let Some(snapshot) = cache.load().await else {
        bail!(
            "no cached snapshot at {}; run `preflight snapshot` first",
            cache.snapshot_path().display()
        );
    };

    let document = snapshot_to_rule(&snapshot);
    match args.output {
        Some(path) => {
            tokio::fs::write(&path, &document).await?;
            println!("Wrote rule document to {}", path.display());
        }
        None => print!("{document}"),
    }

    Ok(())
}
