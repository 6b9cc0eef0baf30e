//! Snapshot cache keyed by a workspace root.
//!
//! The cache is one JSON document at a fixed workspace-relative path. A
//! missing or unparsable file is a cache miss, never an error; only write
//! failures propagate, since a failed persist would silently break every
//! later freshness check. There is no cross-process lock: concurrent runs
//! against the same root are last-writer-wins.

use std::path::PathBuf;

use chrono::Utc;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{CacheInfo, Snapshot};

/// Workspace-relative cache directory.
pub const CACHE_DIR: &str = ".preflight";

/// Snapshot file name inside the cache directory.
pub const SNAPSHOT_FILE: &str = "snapshot.json";

/// Rule document file name inside the cache directory.
pub const RULE_FILE: &str = "snapshot-rules.md";

/// Owns the persisted copy of the most recent snapshot for one workspace.
pub struct CacheManager {
    root: PathBuf,
}

impl CacheManager {
    /// Create a cache manager scoped to a workspace root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The cache directory for this workspace.
    pub fn cache_dir(&self) -> PathBuf {
        self.root.join(CACHE_DIR)
    }

    /// Path of the snapshot cache file.
    pub fn snapshot_path(&self) -> PathBuf {
        self.cache_dir().join(SNAPSHOT_FILE)
    }

    /// Path of the generated rule document.
    pub fn rule_path(&self) -> PathBuf {
        self.cache_dir().join(RULE_FILE)
    }

    /// Load the cached snapshot, if a parsable one exists.
    pub async fn load(&self) -> Option<Snapshot> {
        let path = self.snapshot_path();
        let content = tokio::fs::read_to_string(&path).await.ok()?;
        match serde_json::from_str(&content) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "unparsable cache treated as miss");
                None
            }
        }
    }

    /// Persist a snapshot, creating the cache directory if needed.
    pub async fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let path = self.snapshot_path();
        let body = serde_json::to_string_pretty(snapshot)?;
        let write = async {
            tokio::fs::create_dir_all(self.cache_dir()).await?;
            tokio::fs::write(&path, body).await
        };
        write.await.map_err(|source| Error::CacheWrite {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "snapshot persisted");
        Ok(())
    }

    /// Write the rule document next to the snapshot.
    pub async fn save_rule(&self, content: &str) -> Result<()> {
        let path = self.rule_path();
        let write = async {
            tokio::fs::create_dir_all(self.cache_dir()).await?;
            tokio::fs::write(&path, content).await
        };
        write.await.map_err(|source| Error::CacheWrite {
            path: path.clone(),
            source,
        })
    }

    /// Read-only view of the cache state. Never triggers a fetch.
    pub async fn cache_info(&self) -> CacheInfo {
        let path = self.snapshot_path();
        match self.load().await {
            Some(snapshot) => CacheInfo {
                exists: true,
                age_hours: snapshot.age_hours(Utc::now()),
                path,
            },
            None => CacheInfo {
                exists: false,
                age_hours: f64::INFINITY,
                path,
            },
        }
    }

    /// Whether a regeneration is needed: no cached snapshot, or a stale one.
    pub async fn needs_refresh(&self) -> bool {
        match self.load().await {
            Some(snapshot) => !snapshot.is_fresh(Utc::now()),
            None => true,
        }
    }
}
