//! Snapshot assembly: orchestrates fetchers, extraction, and selection.
//!
//! The assembler is constructed once with its configuration and HTTP
//! client injected; there is no lazy module-global state. One `generate`
//! call is one assembly run: a single timestamp is captured up front and
//! reused everywhere (including every provenance `fetched_at`) so the
//! snapshot is internally consistent.

use chrono::{SecondsFormat, Utc};
use tracing::info;

use crate::config::{Ecosystem, PreflightConfig};
use crate::error::Result;
use crate::instructions::fetch_all_instructions;
use crate::providers::discover_models;
use crate::select::select_default_models;
use crate::types::{
    DepsSection, ModelsSection, Provenance, ProvenanceSet, Snapshot, SourceType,
};
use crate::versions::latest_versions;

/// Assembles snapshots from the configured external sources.
pub struct SnapshotAssembler {
    config: PreflightConfig,
    client: reqwest::Client,
}

impl SnapshotAssembler {
    /// Create an assembler with the given run configuration.
    pub fn new(config: PreflightConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Run one assembly and return the completed snapshot.
    ///
    /// Individual sources are best-effort and cannot fail the run; the
    /// only error paths are genuine programming errors such as a
    /// malformed pattern in the built-in selection table.
    pub async fn generate(&self) -> Result<Snapshot> {
        let now = Utc::now();
        let generated_at_unix = now.timestamp();
        let generated_at_iso = now.to_rfc3339_opts(SecondsFormat::Millis, true);

        let npm_packages: Vec<_> = self
            .config
            .watch_list
            .npm
            .iter()
            .map(|p| (p.clone(), Ecosystem::Npm))
            .collect();
        let pypi_packages: Vec<_> = self
            .config
            .watch_list
            .pypi
            .iter()
            .map(|p| (p.clone(), Ecosystem::Pypi))
            .collect();

        let (npm_latest, pypi_latest, discovered, codegen_instructions) = tokio::join!(
            latest_versions(&self.client, &npm_packages),
            latest_versions(&self.client, &pypi_packages),
            discover_models(&self.client, &self.config),
            fetch_all_instructions(&self.client),
        );

        let selected = select_default_models(&discovered)?;
        let provenance = self.build_provenance(&generated_at_iso, &codegen_instructions);
        let notes = self.build_notes(&discovered);

        info!(
            npm = npm_latest.len(),
            pypi = pypi_latest.len(),
            models = discovered.len(),
            "assembled snapshot"
        );

        Ok(Snapshot {
            generated_at_unix,
            generated_at_iso,
            deps: DepsSection {
                npm_latest,
                pypi_latest,
            },
            models: ModelsSection {
                discovered,
                selected,
            },
            codegen_instructions: if codegen_instructions.is_empty() {
                None
            } else {
                Some(codegen_instructions)
            },
            provenance: Some(provenance),
            notes: Some(notes),
        })
    }

    /// Static description of every known source, stamped with the run's
    /// single timestamp.
    fn build_provenance(
        &self,
        fetched_at: &str,
        instructions: &[crate::types::CodegenInstruction],
    ) -> ProvenanceSet {
        let entry = |data_source: &str, source_type, source_url: &str, method: &str| Provenance {
            data_source: data_source.to_string(),
            source_type,
            source_url: Some(source_url.to_string()),
            fetched_at: fetched_at.to_string(),
            method: method.to_string(),
        };

        ProvenanceSet {
            npm_registry: Some(entry(
                "npm registry",
                SourceType::Registry,
                "https://registry.npmjs.org",
                "GET /{package} (dist-tags.latest)",
            )),
            pypi_registry: Some(entry(
                "PyPI registry",
                SourceType::Registry,
                "https://pypi.org/pypi",
                "GET /{package}/json (info.version)",
            )),
            openai_api: Some(entry(
                "OpenAI API",
                SourceType::Api,
                &self.config.openai_base_url(),
                "GET /v1/models (Bearer token)",
            )),
            anthropic_api: Some(entry(
                "Anthropic API",
                SourceType::Api,
                "https://api.anthropic.com",
                "GET /v1/models (x-api-key header)",
            )),
            gemini_api: Some(entry(
                "Google Gemini API",
                SourceType::Api,
                "https://generativelanguage.googleapis.com",
                "GET /v1beta/models (x-goog-api-key header)",
            )),
            codegen_instructions: instructions
                .iter()
                .map(|inst| Provenance {
                    data_source: format!("{} codegen instructions", inst.sdk),
                    source_type: SourceType::Github,
                    source_url: inst.source_url.clone(),
                    fetched_at: fetched_at.to_string(),
                    method: "GET (raw GitHub content)".to_string(),
                })
                .collect(),
        }
    }

    /// Advisory notes derived from simple conditions on the assembled data.
    fn build_notes(&self, discovered: &[crate::types::ModelInfo]) -> Vec<String> {
        let mut notes = vec![
            "This snapshot supersedes any previous one; sections absent here were \
             unavailable at generation time."
                .to_string(),
        ];
        if discovered.is_empty() {
            if self.config.credentials.is_empty() {
                notes.push(
                    "No models discovered: set OPENAI_API_KEY / ANTHROPIC_API_KEY / \
                     GEMINI_API_KEY and regenerate."
                        .to_string(),
                );
            } else {
                notes.push(
                    "No models discovered despite configured credentials; provider \
                     listings may be unreachable."
                        .to_string(),
                );
            }
        }
        notes
    }
}
