//! Core types for the snapshot data model.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Hours a snapshot stays fresh after generation.
pub const FRESHNESS_WINDOW_HOURS: f64 = 24.0;

/// Category of a discovered model, derived from its identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    /// Conversational / text generation model (the default category).
    Chat,
    /// Image generation model.
    Image,
    /// Text embedding model.
    Embedding,
    /// Speech or audio model.
    Audio,
    /// Anything that does not fit the categories above.
    Other,
}

/// A model discovered from a provider's listing endpoint.
///
/// `model_id` is the provider's canonical identifier string, used verbatim
/// in selection and downstream guidance. Uniqueness is per
/// `(provider, model_id)`. Values are immutable once extracted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Provider name (e.g., "anthropic", "openai", "google").
    pub provider: String,
    /// Canonical model identifier as returned by the provider.
    pub model_id: String,
    /// Human-readable name, when the provider supplies one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Release date in `YYYY-MM-DD` form, parsed from the identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    /// Whether the identifier marks a pre-release model.
    #[serde(default)]
    pub is_preview: bool,
    /// Whether the identifier marks a deprecated or retired model.
    #[serde(default)]
    pub is_deprecated: bool,
    /// Model category.
    pub model_type: ModelType,
}

/// Selection table: category name to per-provider chosen model ID.
///
/// `None` means no pattern matched for that provider. Categories and
/// providers come from the static selection table, not from discovered
/// data. `BTreeMap` keeps serialized output deterministic.
pub type SelectionTable = BTreeMap<String, BTreeMap<String, Option<String>>>;

/// Latest-version mappings per tracked ecosystem.
///
/// A package whose fetch failed is simply absent from its map; there are
/// never placeholder values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DepsSection {
    /// npm package name to latest version.
    pub npm_latest: BTreeMap<String, String>,
    /// PyPI package name to latest version.
    pub pypi_latest: BTreeMap<String, String>,
}

/// Discovered models and the selection derived from them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelsSection {
    /// All models discovered across providers, in provider union order.
    pub discovered: Vec<ModelInfo>,
    /// Default-model selection per category and provider.
    pub selected: SelectionTable,
}

/// Kind of external source a piece of snapshot data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Authenticated provider API.
    Api,
    /// Public package registry.
    Registry,
    /// Raw GitHub content.
    Github,
    /// Local file.
    File,
}

/// Descriptive metadata about one external source.
///
/// Provenance never affects selection logic; it exists so a reader of the
/// snapshot can tell where each section came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    /// Human-readable source name.
    pub data_source: String,
    /// Kind of source.
    pub source_type: SourceType,
    /// Base URL queried, when applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// ISO timestamp of the assembly run that fetched this source.
    pub fetched_at: String,
    /// Request shape, e.g. `GET /v1/models (Bearer token)`.
    pub method: String,
}

/// Provenance entries for every known source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProvenanceSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub npm_registry: Option<Provenance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pypi_registry: Option<Provenance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openai_api: Option<Provenance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anthropic_api: Option<Provenance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gemini_api: Option<Provenance>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub codegen_instructions: Vec<Provenance>,
}

/// Code generation guidance fetched from an SDK repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodegenInstruction {
    /// SDK package name (e.g., "google-genai").
    pub sdk: String,
    /// Provider the SDK belongs to.
    pub provider: String,
    /// Guidance text, capped at a few thousand characters.
    pub content: String,
    /// Where the content was fetched from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

/// The aggregate result of one assembly run.
///
/// A snapshot is created fresh on every successful assembly, never mutated
/// afterwards, and superseded (not merged) by the next run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Generation time as a unix timestamp in seconds.
    pub generated_at_unix: i64,
    /// The same instant in RFC 3339 form.
    pub generated_at_iso: String,
    /// Latest package versions per ecosystem.
    pub deps: DepsSection,
    /// Discovered models and the derived selection.
    pub models: ModelsSection,
    /// SDK codegen guidance, when any was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codegen_instructions: Option<Vec<CodegenInstruction>>,
    /// Per-source provenance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provenance: Option<ProvenanceSet>,
    /// Human-readable advisory notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<String>>,
}

impl Snapshot {
    /// Age of this snapshot in hours at the given instant.
    pub fn age_hours(&self, now: DateTime<Utc>) -> f64 {
        let age_secs = now.timestamp() - self.generated_at_unix;
        age_secs as f64 / 3600.0
    }

    /// Whether this snapshot is fresh (strictly less than 24 hours old).
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.age_hours(now) < FRESHNESS_WINDOW_HOURS
    }
}

/// Read-only view of the cache state.
///
/// Derived from the stored snapshot's timestamp and the current time;
/// never persisted itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheInfo {
    /// Whether a parsable cached snapshot exists.
    pub exists: bool,
    /// Age of the cached snapshot in hours; infinite when absent.
    pub age_hours: f64,
    /// The cache file path that was inspected.
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn snapshot_generated_at(unix: i64) -> Snapshot {
        Snapshot {
            generated_at_unix: unix,
            generated_at_iso: Utc
                .timestamp_opt(unix, 0)
                .unwrap()
                .to_rfc3339(),
            deps: DepsSection::default(),
            models: ModelsSection::default(),
            codegen_instructions: None,
            provenance: None,
            notes: None,
        }
    }

    #[test]
    fn snapshot_one_second_past_window_is_stale() {
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 1).unwrap();
        let snapshot = snapshot_generated_at(
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap().timestamp(),
        );
        assert!(!snapshot.is_fresh(now));
    }

    #[test]
    fn snapshot_one_second_inside_window_is_fresh() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 23, 59, 59).unwrap();
        let snapshot = snapshot_generated_at(
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap().timestamp(),
        );
        assert!(snapshot.is_fresh(now));
    }

    #[test]
    fn snapshot_exactly_at_window_is_stale() {
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();
        let snapshot = snapshot_generated_at(
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap().timestamp(),
        );
        assert!(!snapshot.is_fresh(now));
    }

    #[test]
    fn model_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ModelType::Embedding).unwrap(),
            "\"embedding\""
        );
    }

    #[test]
    fn snapshot_omits_absent_optional_sections() {
        let snapshot = snapshot_generated_at(0);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(!json.contains("provenance"));
        assert!(!json.contains("notes"));
        assert!(!json.contains("codegen_instructions"));
    }

    #[test]
    fn model_info_omits_absent_release_date() {
        let info = ModelInfo {
            provider: "openai".to_string(),
            model_id: "gpt-4o".to_string(),
            display_name: None,
            release_date: None,
            is_preview: false,
            is_deprecated: false,
            model_type: ModelType::Chat,
        };
        let json = serde_json::to_string(&info).unwrap();
        assert!(!json.contains("release_date"));
        assert!(!json.contains("display_name"));
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut snapshot = snapshot_generated_at(1_700_000_000);
        snapshot
            .deps
            .npm_latest
            .insert("react".to_string(), "19.0.0".to_string());
        snapshot.notes = Some(vec!["note".to_string()]);

        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }
}
