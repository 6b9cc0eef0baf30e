//! Provider model discovery for OpenAI, Anthropic, and Google Gemini.
//!
//! Each provider has one independent routine returning
//! `Result<Vec<ModelInfo>, Skipped>`. Partial failure is the normal case
//! and is visible in the type: a missing credential or a failed listing
//! call produces a [`Skipped`], never an error, and the aggregation in
//! [`discover_models`] reduces to the success set.

use std::collections::HashSet;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::PreflightConfig;
use crate::extract::extract_model_metadata;
use crate::types::ModelInfo;

/// Anthropic models endpoint.
const ANTHROPIC_MODELS_URL: &str = "https://api.anthropic.com/v1/models";

/// Anthropic API version header value.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Gemini models endpoint.
const GEMINI_MODELS_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Image-generation model IDs known to appear in OpenAI's main listing.
const KNOWN_OPENAI_IMAGE_MODELS: &[&str] = &[
    "dall-e-2",
    "dall-e-3",
    "gpt-image-1",
    "gpt-image-1-mini",
    "gpt-image-1.5",
];

/// Why a provider contributed no models to this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skipped {
    /// No credential configured; the provider was not queried at all.
    NoCredential,
    /// The listing call was made but failed (network, status, decode).
    Fetch(String),
}

/// Per-provider discovery outcome.
pub type SourceResult = Result<Vec<ModelInfo>, Skipped>;

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

/// Response from OpenAI's `/v1/models`.
#[derive(Debug, Deserialize)]
struct OpenAiModelList {
    #[serde(default)]
    data: Vec<OpenAiModelEntry>,
}

#[derive(Debug, Deserialize)]
struct OpenAiModelEntry {
    id: Option<String>,
    name: Option<String>,
}

/// Response from Anthropic's `/v1/models`.
#[derive(Debug, Deserialize)]
struct AnthropicModelList {
    #[serde(default)]
    data: Vec<AnthropicModelEntry>,
}

#[derive(Debug, Deserialize)]
struct AnthropicModelEntry {
    id: Option<String>,
    display_name: Option<String>,
}

/// Response from Gemini's `/v1beta/models`.
#[derive(Debug, Deserialize)]
struct GeminiModelList {
    #[serde(default)]
    models: Vec<GeminiModelEntry>,
}

#[derive(Debug, Deserialize)]
struct GeminiModelEntry {
    name: Option<String>,
    #[serde(rename = "displayName")]
    display_name: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Mapping
// ────────────────────────────────────────────────────────────────────────────

/// Build a [`ModelInfo`] from a raw identifier and optional display name.
fn to_model_info(provider: &str, model_id: String, display_name: Option<String>) -> ModelInfo {
    let meta = extract_model_metadata(&model_id, provider);
    ModelInfo {
        provider: provider.to_string(),
        model_id,
        display_name: display_name.filter(|n| !n.is_empty()),
        release_date: meta.release_date,
        is_preview: meta.is_preview,
        is_deprecated: meta.is_deprecated,
        model_type: meta.model_type,
    }
}

fn map_openai_entries(entries: Vec<OpenAiModelEntry>) -> Vec<ModelInfo> {
    entries
        .into_iter()
        .filter_map(|e| e.id.map(|id| to_model_info("openai", id, e.name)))
        .collect()
}

fn map_anthropic_entries(entries: Vec<AnthropicModelEntry>) -> Vec<ModelInfo> {
    entries
        .into_iter()
        .filter_map(|e| e.id.map(|id| to_model_info("anthropic", id, e.display_name)))
        .collect()
}

fn map_gemini_entries(entries: Vec<GeminiModelEntry>) -> Vec<ModelInfo> {
    entries
        .into_iter()
        .filter_map(|e| {
            e.name.map(|name| {
                // Listing entries come back as `models/gemini-2.5-pro`.
                let id = name.strip_prefix("models/").unwrap_or(&name).to_string();
                to_model_info("google", id, e.display_name)
            })
        })
        .collect()
}

/// Keep only entries that look like image-generation models.
fn filter_image_models(models: Vec<ModelInfo>) -> Vec<ModelInfo> {
    models
        .into_iter()
        .filter(|m| {
            let id = m.model_id.to_lowercase();
            KNOWN_OPENAI_IMAGE_MODELS.iter().any(|k| id.contains(k))
                || id.contains("image")
                || id.contains("dall-e")
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Fetch routines
// ────────────────────────────────────────────────────────────────────────────

async fn fetch_openai_listing(
    client: &reqwest::Client,
    base_url: &str,
    api_key: &str,
) -> Result<Vec<OpenAiModelEntry>, Skipped> {
    let url = format!("{base_url}/v1/models");
    let response = client
        .get(&url)
        .bearer_auth(api_key)
        .send()
        .await
        .map_err(|e| Skipped::Fetch(e.to_string()))?;
    if !response.status().is_success() {
        return Err(Skipped::Fetch(format!("status {}", response.status())));
    }
    let list: OpenAiModelList = response
        .json()
        .await
        .map_err(|e| Skipped::Fetch(e.to_string()))?;
    Ok(list.data)
}

/// List models from OpenAI's main listing endpoint.
pub async fn list_openai_models(client: &reqwest::Client, config: &PreflightConfig) -> SourceResult {
    let Some(api_key) = config.credentials.openai.as_deref() else {
        return Err(Skipped::NoCredential);
    };
    let entries = fetch_openai_listing(client, &config.openai_base_url(), api_key).await?;
    Ok(map_openai_entries(entries))
}

/// Second pass over OpenAI's listing keeping only image-generation models.
///
/// OpenAI has no dedicated image-model endpoint; this mirrors the main
/// listing filtered by the known image-model names and keywords.
pub async fn list_openai_image_models(
    client: &reqwest::Client,
    config: &PreflightConfig,
) -> SourceResult {
    let Some(api_key) = config.credentials.openai.as_deref() else {
        return Err(Skipped::NoCredential);
    };
    let entries = fetch_openai_listing(client, &config.openai_base_url(), api_key).await?;
    Ok(filter_image_models(map_openai_entries(entries)))
}

/// List models from Anthropic.
pub async fn list_anthropic_models(
    client: &reqwest::Client,
    config: &PreflightConfig,
) -> SourceResult {
    let Some(api_key) = config.credentials.anthropic.as_deref() else {
        return Err(Skipped::NoCredential);
    };
    let response = client
        .get(ANTHROPIC_MODELS_URL)
        .header("x-api-key", api_key)
        .header("anthropic-version", ANTHROPIC_VERSION)
        .send()
        .await
        .map_err(|e| Skipped::Fetch(e.to_string()))?;
    if !response.status().is_success() {
        return Err(Skipped::Fetch(format!("status {}", response.status())));
    }
    let list: AnthropicModelList = response
        .json()
        .await
        .map_err(|e| Skipped::Fetch(e.to_string()))?;
    Ok(map_anthropic_entries(list.data))
}

/// List models from Google Gemini.
pub async fn list_gemini_models(client: &reqwest::Client, config: &PreflightConfig) -> SourceResult {
    let Some(api_key) = config.credentials.google.as_deref() else {
        return Err(Skipped::NoCredential);
    };
    let response = client
        .get(GEMINI_MODELS_URL)
        .header("x-goog-api-key", api_key)
        .send()
        .await
        .map_err(|e| Skipped::Fetch(e.to_string()))?;
    if !response.status().is_success() {
        return Err(Skipped::Fetch(format!("status {}", response.status())));
    }
    let list: GeminiModelList = response
        .json()
        .await
        .map_err(|e| Skipped::Fetch(e.to_string()))?;
    Ok(map_gemini_entries(list.models))
}

/// Reduce one provider's outcome to its success set, logging skips.
fn reduce(provider: &str, result: SourceResult) -> Vec<ModelInfo> {
    match result {
        Ok(models) => {
            debug!(provider, count = models.len(), "provider listing succeeded");
            models
        }
        Err(Skipped::NoCredential) => {
            debug!(provider, "no credential configured, skipping");
            Vec::new()
        }
        Err(Skipped::Fetch(reason)) => {
            warn!(provider, %reason, "provider listing failed, skipping");
            Vec::new()
        }
    }
}

/// Union the per-provider outcomes into the discovered-model set.
///
/// Union order is fixed: OpenAI, Anthropic, Google, then the OpenAI image
/// pass; duplicates by `model_id` keep their first occurrence.
fn merge_sources(
    openai: SourceResult,
    anthropic: SourceResult,
    gemini: SourceResult,
    openai_images: SourceResult,
) -> Vec<ModelInfo> {
    let mut seen = HashSet::new();
    let mut discovered = Vec::new();
    for models in [
        reduce("openai", openai),
        reduce("anthropic", anthropic),
        reduce("google", gemini),
        reduce("openai-images", openai_images),
    ] {
        for model in models {
            if seen.insert(model.model_id.clone()) {
                discovered.push(model);
            }
        }
    }
    discovered
}

/// Discover models from all providers concurrently.
pub async fn discover_models(client: &reqwest::Client, config: &PreflightConfig) -> Vec<ModelInfo> {
    let (openai, anthropic, gemini, openai_images) = tokio::join!(
        list_openai_models(client, config),
        list_anthropic_models(client, config),
        list_gemini_models(client, config),
        list_openai_image_models(client, config),
    );
    merge_sources(openai, anthropic, gemini, openai_images)
}
