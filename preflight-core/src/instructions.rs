//! Best-effort codegen guidance fetched from SDK repositories.
//!
//! Some SDKs publish notes useful for code generation (migration hints,
//! canonical usage) in their repo docs. This module probes a small set of
//! raw-content candidates per SDK and keeps the first hit that actually
//! talks about codegen. Everything here is optional: no hit, no section.

use tracing::debug;

use crate::types::CodegenInstruction;

/// Maximum characters of guidance kept per SDK.
const MAX_CONTENT_CHARS: usize = 5000;

/// Keywords a candidate document must mention to count as guidance.
const GUIDANCE_KEYWORDS: &[&str] = &["codegen", "llm", "code generation"];

/// Raw-content candidates for the google-genai SDK, most specific first.
const GOOGLE_GENAI_CANDIDATES: &[&str] = &[
    "https://raw.githubusercontent.com/googleapis/python-genai/main/CONTRIBUTING.md",
    "https://raw.githubusercontent.com/googleapis/python-genai/main/docs/LLM.md",
    "https://raw.githubusercontent.com/googleapis/python-genai/main/README.md",
];

/// Truncate to a character budget without splitting a UTF-8 boundary.
fn cap_content(content: &str) -> String {
    match content.char_indices().nth(MAX_CONTENT_CHARS) {
        Some((byte_index, _)) => content[..byte_index].to_string(),
        None => content.to_string(),
    }
}

fn mentions_guidance(content: &str) -> bool {
    let lowered = content.to_lowercase();
    GUIDANCE_KEYWORDS.iter().any(|k| lowered.contains(k))
}

/// Probe the google-genai SDK docs for codegen guidance.
async fn fetch_google_genai(client: &reqwest::Client) -> Option<CodegenInstruction> {
    for url in GOOGLE_GENAI_CANDIDATES {
        let Ok(response) = client.get(*url).send().await else {
            continue;
        };
        if !response.status().is_success() {
            continue;
        }
        let Ok(content) = response.text().await else {
            continue;
        };
        if mentions_guidance(&content) {
            return Some(CodegenInstruction {
                sdk: "google-genai".to_string(),
                provider: "google".to_string(),
                content: cap_content(&content),
                source_url: Some((*url).to_string()),
            });
        }
    }
    debug!(sdk = "google-genai", "no codegen guidance found");
    None
}

/// Fetch codegen guidance for every known SDK.
///
/// Each SDK is independent and best-effort; the result holds only the
/// SDKs that produced a hit.
pub async fn fetch_all_instructions(client: &reqwest::Client) -> Vec<CodegenInstruction> {
    let mut instructions = Vec::new();
    if let Some(google) = fetch_google_genai(client).await {
        instructions.push(google);
    }
    instructions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guidance_keywords_are_case_insensitive() {
        assert!(mentions_guidance("Notes on Code Generation for SDK users"));
        assert!(mentions_guidance("See the LLM section"));
        assert!(!mentions_guidance("installation instructions only"));
    }

    #[test]
    fn content_cap_respects_char_boundaries() {
        let content = "é".repeat(MAX_CONTENT_CHARS + 100);
        let capped = cap_content(&content);
        assert_eq!(capped.chars().count(), MAX_CONTENT_CHARS);
    }

    #[test]
    fn short_content_is_kept_whole() {
        assert_eq!(cap_content("short"), "short");
    }
}
