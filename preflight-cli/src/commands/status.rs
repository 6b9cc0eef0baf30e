//! `preflight status` - cache state and current selection.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use preflight_core::{CacheManager, Snapshot};

/// Status arguments.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Workspace root (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,
}

pub async fn run(args: StatusArgs) -> Result<()> {
    let root = super::resolve_root(args.root)?;
    let cache = CacheManager::new(&root);

    let info = cache.cache_info().await;
    if !info.exists {
        println!("No cached snapshot at {}", info.path.display());
        println!("Run `preflight snapshot` to generate one.");
        return Ok(());
    }

    println!("Cached snapshot: {}", info.path.display());
    println!("  age:           {:.1} hours", info.age_hours);
    println!(
        "  needs refresh: {}",
        if cache.needs_refresh().await { "yes" } else { "no" }
    );

    if let Some(snapshot) = cache.load().await {
        println!();
        print_selection(&snapshot);
    }

    Ok(())
}

/// Render the selection table, one row per category/provider cell.
fn print_selection(snapshot: &Snapshot) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Category").fg(Color::Cyan),
        Cell::new("Provider").fg(Color::Cyan),
        Cell::new("Selected Model").fg(Color::Cyan),
    ]);

    for (category, row) in &snapshot.models.selected {
        for (provider, model) in row {
            table.add_row(vec![
                Cell::new(category),
                Cell::new(provider),
                match model {
                    Some(id) => Cell::new(id),
                    None => Cell::new("(no match)").fg(Color::DarkGrey),
                },
            ]);
        }
    }

    println!("{table}");
}
