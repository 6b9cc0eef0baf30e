//! Metadata extraction from raw model identifiers.
//!
//! Pure string analysis, no I/O: identical `(model_id, provider)` input
//! always yields identical output. The rules mirror what providers encode
//! in their identifier strings rather than any documented schema, so they
//! are keyword tables plus two date-suffix patterns.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::ModelType;

/// Trailing 8-digit date, e.g. `claude-opus-4-5-20251101`.
static COMPACT_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{8})$").expect("static pattern"));

/// Trailing hyphenated date, e.g. `gpt-4o-2024-05-13`.
static HYPHENATED_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4}-\d{2}-\d{2})$").expect("static pattern"));

/// Substrings marking a pre-release model.
const PREVIEW_MARKERS: &[&str] = &["preview", "beta", "exp", "experimental"];

/// Substrings marking a deprecated model, any provider.
const DEPRECATION_MARKERS: &[&str] = &["deprecated", "retired"];

/// Known-retired OpenAI identifiers still returned by the listing endpoint.
const RETIRED_OPENAI_MODELS: &[&str] = &["davinci-002", "babbage-002"];

/// Attributes derived from a model identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelMetadata {
    pub is_preview: bool,
    pub is_deprecated: bool,
    pub model_type: ModelType,
    pub release_date: Option<String>,
}

/// Derive structured attributes from a raw `(model_id, provider)` pair.
pub fn extract_model_metadata(model_id: &str, provider: &str) -> ModelMetadata {
    ModelMetadata {
        is_preview: PREVIEW_MARKERS.iter().any(|m| model_id.contains(m)),
        is_deprecated: detect_deprecated(model_id, provider),
        model_type: classify(model_id),
        release_date: extract_release_date(model_id),
    }
}

/// Classify a model into its category by identifier keywords.
///
/// First matching category wins, in fixed priority order; chat is the
/// default when nothing matches.
fn classify(model_id: &str) -> ModelType {
    let contains_any = |markers: &[&str]| markers.iter().any(|m| model_id.contains(m));
    if contains_any(&["image", "dall-e", "gpt-image"]) {
        ModelType::Image
    } else if contains_any(&["embedding", "text-embedding"]) {
        ModelType::Embedding
    } else if contains_any(&["tts", "whisper", "audio"]) {
        ModelType::Audio
    } else {
        ModelType::Chat
    }
}

/// Parse a trailing date-like suffix into `YYYY-MM-DD`.
///
/// Two alternative shapes: a contiguous 8-digit suffix (Anthropic style)
/// or an already-hyphenated suffix (OpenAI style). The hyphenated form is
/// the rightmost value when both could apply. Dates are taken at face
/// value; there is no calendar validation.
fn extract_release_date(model_id: &str) -> Option<String> {
    if let Some(m) = HYPHENATED_DATE.captures(model_id) {
        return Some(m[1].to_string());
    }
    if let Some(m) = COMPACT_DATE.captures(model_id) {
        let digits = &m[1];
        return Some(format!(
            "{}-{}-{}",
            &digits[0..4],
            &digits[4..6],
            &digits[6..8]
        ));
    }
    None
}

fn detect_deprecated(model_id: &str, provider: &str) -> bool {
    if DEPRECATION_MARKERS.iter().any(|m| model_id.contains(m)) {
        return true;
    }
    provider == "openai" && RETIRED_OPENAI_MODELS.iter().any(|m| model_id.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_date_suffix_is_hyphenated() {
        let meta = extract_model_metadata("claude-opus-4-5-20251101", "anthropic");
        assert_eq!(meta.release_date.as_deref(), Some("2025-11-01"));
    }

    #[test]
    fn hyphenated_date_suffix_is_kept_verbatim() {
        let meta = extract_model_metadata("gpt-4o-2024-05-13", "openai");
        assert_eq!(meta.release_date.as_deref(), Some("2024-05-13"));
    }

    #[test]
    fn dateless_id_has_no_release_date() {
        let meta = extract_model_metadata("gemini-2.5-pro", "google");
        assert!(meta.release_date.is_none());
    }

    #[test]
    fn date_must_be_a_suffix() {
        let meta = extract_model_metadata("gpt-4-0613-tuned", "openai");
        assert!(meta.release_date.is_none());
    }

    #[test]
    fn invalid_calendar_dates_are_not_validated() {
        // Rule is shape-only by design.
        let meta = extract_model_metadata("some-model-20259999", "openai");
        assert_eq!(meta.release_date.as_deref(), Some("2025-99-99"));
    }

    #[test]
    fn preview_markers_set_flag() {
        assert!(extract_model_metadata("gemini-2.0-flash-exp", "google").is_preview);
        assert!(extract_model_metadata("gpt-4.5-preview", "openai").is_preview);
        assert!(extract_model_metadata("o1-beta", "openai").is_preview);
        assert!(!extract_model_metadata("gpt-4o", "openai").is_preview);
    }

    #[test]
    fn category_priority_is_image_embedding_audio_chat() {
        assert_eq!(
            extract_model_metadata("dall-e-3", "openai").model_type,
            ModelType::Image
        );
        assert_eq!(
            extract_model_metadata("text-embedding-3-large", "openai").model_type,
            ModelType::Embedding
        );
        assert_eq!(
            extract_model_metadata("whisper-1", "openai").model_type,
            ModelType::Audio
        );
        assert_eq!(
            extract_model_metadata("claude-sonnet-4-5-20250929", "anthropic").model_type,
            ModelType::Chat
        );
    }

    #[test]
    fn retired_openai_models_are_deprecated() {
        assert!(extract_model_metadata("davinci-002", "openai").is_deprecated);
        assert!(extract_model_metadata("babbage-002", "openai").is_deprecated);
        // The fixed retired list is OpenAI-specific.
        assert!(!extract_model_metadata("davinci-002", "google").is_deprecated);
    }

    #[test]
    fn deprecation_keywords_apply_to_any_provider() {
        assert!(extract_model_metadata("some-model-deprecated", "google").is_deprecated);
        assert!(extract_model_metadata("old-retired-model", "anthropic").is_deprecated);
    }

    #[test]
    fn extraction_is_deterministic() {
        let a = extract_model_metadata("claude-opus-4-5-20251101", "anthropic");
        let b = extract_model_metadata("claude-opus-4-5-20251101", "anthropic");
        assert_eq!(a, b);
    }
}
