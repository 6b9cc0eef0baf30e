//! CLI subcommand implementations.

pub mod rule;
pub mod snapshot;
pub mod status;

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Resolve the workspace root for cache-scoped commands.
///
/// An explicit `--root` wins; otherwise the current directory is the
/// workspace.
pub fn resolve_root(root: Option<PathBuf>) -> Result<PathBuf> {
    match root {
        Some(path) => Ok(path),
        None => std::env::current_dir().context("could not determine current directory"),
    }
}
