//! Snapshot engine for preflight.
//!
//! This crate aggregates point-in-time facts about package registries and
//! LLM provider model catalogs into a single deterministic [`Snapshot`],
//! then derives a canonical default-model selection from that data.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    SnapshotService                       │
//! │  ┌───────────────────────┐  ┌─────────────────────────┐  │
//! │  │   SnapshotAssembler   │  │      CacheManager       │  │
//! │  │  versions │ providers │  │  .preflight/snapshot.json│ │
//! │  │  extract  │ select    │  │  freshness / cache info │  │
//! │  └───────────────────────┘  └─────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//!                             │
//!                             ▼
//!                npm · PyPI · OpenAI · Anthropic · Gemini
//! ```
//!
//! All external lookups are best-effort and concurrent: a source that is
//! unreachable or unconfigured is simply absent from the snapshot, with an
//! advisory note where that matters. Only cache-write failures and
//! malformed static selection patterns surface as errors.

mod error;
mod types;

pub mod assemble;
pub mod cache;
pub mod config;
pub mod extract;
pub mod instructions;
pub mod providers;
pub mod rule;
pub mod select;
pub mod service;
pub mod versions;

pub use assemble::SnapshotAssembler;
pub use cache::CacheManager;
pub use config::{Credentials, Ecosystem, PreflightConfig, WatchList};
pub use error::{Error, Result};
pub use service::SnapshotService;
pub use types::{
    CacheInfo, CodegenInstruction, DepsSection, ModelInfo, ModelType, ModelsSection, Provenance,
    ProvenanceSet, SelectionTable, Snapshot, SourceType,
};
