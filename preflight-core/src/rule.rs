//! Rule document rendering.
//!
//! Turns a complete [`Snapshot`] into the human-readable rule document
//! that editors inject into codegen context. Pure formatting: identical
//! snapshots produce byte-identical output.

use std::fmt::Write;

use serde::Serialize;

use crate::types::{Provenance, Snapshot};

/// How many discovered models the preview section shows.
const DISCOVERED_PREVIEW_LIMIT: usize = 20;

/// Characters of each SDK guidance block kept in the document.
const INSTRUCTION_PREVIEW_CHARS: usize = 2000;

fn json_block<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

fn provenance_line(label: &str, entry: Option<&Provenance>) -> Option<String> {
    entry.map(|p| {
        format!(
            "- **{label}**: {} ({})",
            p.source_url.as_deref().unwrap_or("N/A"),
            p.method
        )
    })
}

/// Render the rule document for a snapshot.
pub fn snapshot_to_rule(snapshot: &Snapshot) -> String {
    let mut doc = String::new();

    let _ = writeln!(doc, "# Version & Model Snapshot (AUTO-GENERATED)");
    let _ = writeln!(doc);
    let _ = writeln!(doc, "Generated: {}", snapshot.generated_at_iso);
    let _ = writeln!(doc);

    if let Some(provenance) = &snapshot.provenance {
        let _ = writeln!(doc, "## Data Provenance");
        let _ = writeln!(doc);
        let _ = writeln!(doc, "### Package Registries");
        let _ = writeln!(doc);
        for line in [
            provenance_line("npm", provenance.npm_registry.as_ref()),
            provenance_line("PyPI", provenance.pypi_registry.as_ref()),
        ]
        .into_iter()
        .flatten()
        {
            let _ = writeln!(doc, "{line}");
        }
        let _ = writeln!(doc);
        let _ = writeln!(doc, "### LLM Provider APIs");
        let _ = writeln!(doc);
        for line in [
            provenance_line("OpenAI", provenance.openai_api.as_ref()),
            provenance_line("Anthropic", provenance.anthropic_api.as_ref()),
            provenance_line("Google Gemini", provenance.gemini_api.as_ref()),
        ]
        .into_iter()
        .flatten()
        {
            let _ = writeln!(doc, "{line}");
        }
        if !provenance.codegen_instructions.is_empty() {
            let _ = writeln!(doc);
            let _ = writeln!(doc, "### Codegen Instructions Sources");
            let _ = writeln!(doc);
            for p in &provenance.codegen_instructions {
                let _ = writeln!(
                    doc,
                    "- **{}**: {} ({})",
                    p.data_source,
                    p.source_url.as_deref().unwrap_or("N/A"),
                    p.method
                );
            }
        }
        let _ = writeln!(doc);
        let _ = writeln!(doc, "---");
        let _ = writeln!(doc);
    }

    let _ = writeln!(doc, "## Selected Default Models (deterministic)");
    let _ = writeln!(doc);
    let _ = writeln!(doc, "```json\n{}\n```", json_block(&snapshot.models.selected));
    let _ = writeln!(doc);

    let _ = writeln!(doc, "## SDK Latest Versions (registry)");
    let _ = writeln!(doc);
    let _ = writeln!(doc, "### npm");
    let _ = writeln!(doc);
    let _ = writeln!(doc, "```json\n{}\n```", json_block(&snapshot.deps.npm_latest));
    let _ = writeln!(doc);
    let _ = writeln!(doc, "### PyPI");
    let _ = writeln!(doc);
    let _ = writeln!(doc, "```json\n{}\n```", json_block(&snapshot.deps.pypi_latest));
    let _ = writeln!(doc);

    let discovered = &snapshot.models.discovered;
    let _ = writeln!(doc, "## Discovered Models");
    let _ = writeln!(doc);
    let _ = writeln!(doc, "Total models discovered: {}", discovered.len());
    let _ = writeln!(doc);
    if discovered.is_empty() {
        let _ = writeln!(
            doc,
            "*No models discovered. Set OPENAI_API_KEY / ANTHROPIC_API_KEY / \
             GEMINI_API_KEY to enable model discovery.*"
        );
    } else {
        let preview: Vec<_> = discovered.iter().take(DISCOVERED_PREVIEW_LIMIT).collect();
        let _ = writeln!(doc, "```json\n{}", json_block(&preview));
        if discovered.len() > DISCOVERED_PREVIEW_LIMIT {
            let _ = writeln!(
                doc,
                "... and {} more",
                discovered.len() - DISCOVERED_PREVIEW_LIMIT
            );
        }
        let _ = writeln!(doc, "```");
    }
    let _ = writeln!(doc);

    if let Some(instructions) = &snapshot.codegen_instructions {
        let _ = writeln!(doc, "## SDK Codegen Instructions");
        let _ = writeln!(doc);
        for inst in instructions {
            let _ = writeln!(doc, "### {} ({})", inst.sdk, inst.provider);
            let _ = writeln!(doc);
            if let Some(url) = &inst.source_url {
                let _ = writeln!(doc, "Source: {url}");
                let _ = writeln!(doc);
            }
            let truncated = inst
                .content
                .char_indices()
                .nth(INSTRUCTION_PREVIEW_CHARS)
                .map(|(i, _)| format!("{}...", &inst.content[..i]))
                .unwrap_or_else(|| inst.content.clone());
            let _ = writeln!(doc, "{truncated}");
            let _ = writeln!(doc);
        }
    }

    let _ = writeln!(doc, "## Rules for Codegen");
    let _ = writeln!(doc);
    let _ = writeln!(
        doc,
        "* Use the **selected default models** above unless the user explicitly pins \
         something else."
    );
    let _ = writeln!(
        doc,
        "* When writing provider code, use **canonical discovered model IDs** (or these \
         selections)."
    );
    let _ = writeln!(
        doc,
        "* When writing install snippets, prefer the **latest versions** above unless repo \
         policy pins older versions."
    );
    let _ = writeln!(
        doc,
        "* Never invent model IDs. Only use model IDs that appear in the discovered models \
         list above."
    );
    let _ = writeln!(
        doc,
        "* Never recommend deprecated SDKs if the snapshot indicates replacements."
    );

    doc
}
