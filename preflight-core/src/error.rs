//! Error types for the snapshot engine.
//!
//! Per-source fetch failures are deliberately not represented here: a
//! registry or provider that cannot be reached is skipped and omitted from
//! the snapshot (see [`crate::providers::Skipped`]). The variants below
//! cover only the failures that propagate to the caller.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during snapshot operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A static selection pattern failed to compile. This is a programming
    /// error in the built-in selection table, not a runtime condition.
    #[error("invalid selection pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// The offending pattern text.
        pattern: String,
        /// The underlying regex error.
        source: regex::Error,
    },

    /// Failed to persist a snapshot to the cache file.
    #[error("failed to write snapshot cache at {path}: {source}")]
    CacheWrite {
        /// The cache file path that could not be written.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
