//! Default-model selection over the discovered model set.
//!
//! Selection is pure: the full discovered list, a target provider, and an
//! ordered pattern list (most specific first) produce one model ID or
//! nothing. The categories and pattern lists are a fixed built-in table,
//! not derived from data.

use crate::error::{Error, Result};
use crate::types::{ModelInfo, SelectionTable};

/// Per-provider pattern lists for one selection category.
pub struct CategoryRule {
    /// Category name, e.g. "reasoning".
    pub category: &'static str,
    /// `(provider, ordered pattern list)` cells.
    pub providers: &'static [(&'static str, &'static [&'static str])],
}

/// Built-in selection table: one cell per `(category, provider)`.
pub const SELECTION_RULES: &[CategoryRule] = &[
    CategoryRule {
        category: "reasoning",
        providers: &[
            ("openai", &[r"^gpt-5\.2.*thinking", r"^gpt-5\.2", r"^gpt-5"]),
            (
                "anthropic",
                &[
                    r"^claude-opus-4-5-",
                    r"^claude-opus-4\.5-",
                    r"^claude-opus-4-1-",
                    r"^claude-opus-4-",
                ],
            ),
            ("google", &[r"^gemini-3-pro", r"^gemini-3", r"^gemini-2\.5-pro"]),
        ],
    },
    CategoryRule {
        category: "fast",
        providers: &[
            (
                "openai",
                &[r"^gpt-5\.2.*instant", r"^gpt-5.*mini", r"^gpt-4\.1-mini"],
            ),
            (
                "anthropic",
                &[
                    r"^claude-sonnet-4-5-",
                    r"^claude-sonnet-4\.5-",
                    r"^claude-sonnet-4-",
                    r"^claude-3-5-sonnet-",
                ],
            ),
            ("google", &[r"^gemini-3-flash", r"^gemini-2\.5-flash"]),
        ],
    },
    CategoryRule {
        category: "vision",
        providers: &[
            ("openai", &[r"^gpt-5\.2", r"^gpt-4\.1"]),
            (
                "anthropic",
                &[
                    r"^claude-opus-4-5-",
                    r"^claude-opus-4\.5-",
                    r"^claude-opus-4-1-",
                    r"^claude-sonnet-4-5-",
                    r"^claude-sonnet-4\.5-",
                    r"^claude-sonnet-4-",
                ],
            ),
            ("google", &[r"^gemini-3-pro", r"^gemini-2\.5-pro"]),
        ],
    },
];

/// Pick one model ID for a provider from an ordered pattern list.
///
/// The first pattern with at least one match wins; looser patterns after
/// it are never consulted. Among that pattern's matches the
/// lexicographically largest ID is chosen (descending string sort). The
/// string comparison prefers newer date suffixes and larger single-digit
/// version segments but mis-orders multi-digit segments ("10" sorts below
/// "9"); that tie-break is the established contract and is kept as-is.
///
/// Returns `Ok(None)` when no pattern matches any of the provider's
/// models. A pattern that fails to compile is a programming error in the
/// built-in table and surfaces as [`Error::InvalidPattern`].
pub fn pick_best_model(
    models: &[ModelInfo],
    provider: &str,
    patterns: &[&str],
) -> Result<Option<String>> {
    let provider_ids: Vec<&str> = models
        .iter()
        .filter(|m| m.provider == provider)
        .map(|m| m.model_id.as_str())
        .collect();

    for pattern in patterns {
        let regex = regex::Regex::new(pattern).map_err(|source| Error::InvalidPattern {
            pattern: (*pattern).to_string(),
            source,
        })?;
        let mut matches: Vec<&str> = provider_ids
            .iter()
            .copied()
            .filter(|id| regex.is_match(id))
            .collect();
        if !matches.is_empty() {
            matches.sort_unstable_by(|a, b| b.cmp(a));
            return Ok(Some(matches[0].to_string()));
        }
    }

    Ok(None)
}

/// Run the built-in selection table over the discovered model set.
pub fn select_default_models(models: &[ModelInfo]) -> Result<SelectionTable> {
    let mut table = SelectionTable::new();
    for rule in SELECTION_RULES {
        let mut row = std::collections::BTreeMap::new();
        for (provider, patterns) in rule.providers {
            row.insert(
                (*provider).to_string(),
                pick_best_model(models, provider, patterns)?,
            );
        }
        table.insert(rule.category.to_string(), row);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ModelType;

    fn model(provider: &str, id: &str) -> ModelInfo {
        ModelInfo {
            provider: provider.to_string(),
            model_id: id.to_string(),
            display_name: None,
            release_date: None,
            is_preview: false,
            is_deprecated: false,
            model_type: ModelType::Chat,
        }
    }

    #[test]
    fn first_matching_pattern_wins_over_looser_ones() {
        let models = vec![
            model("anthropic", "claude-opus-4-5-20251101"),
            model("anthropic", "claude-opus-4-1-20250805"),
        ];
        let picked = pick_best_model(
            &models,
            "anthropic",
            &["^claude-opus-4-5-", "^claude-opus-4-1-"],
        )
        .unwrap();
        assert_eq!(picked.as_deref(), Some("claude-opus-4-5-20251101"));
    }

    #[test]
    fn largest_id_wins_within_winning_pattern() {
        let models = vec![
            model("anthropic", "claude-opus-4-5-20250101"),
            model("anthropic", "claude-opus-4-5-20251101"),
        ];
        let picked = pick_best_model(&models, "anthropic", &["^claude-opus-4-5-"]).unwrap();
        assert_eq!(picked.as_deref(), Some("claude-opus-4-5-20251101"));
    }

    #[test]
    fn lexicographic_tie_break_misorders_multi_digit_segments() {
        // Known limitation kept on purpose: "9" sorts above "10".
        let models = vec![model("openai", "gpt-m-9"), model("openai", "gpt-m-10")];
        let picked = pick_best_model(&models, "openai", &["^gpt-m-"]).unwrap();
        assert_eq!(picked.as_deref(), Some("gpt-m-9"));
    }

    #[test]
    fn no_match_yields_none() {
        let models = vec![model("openai", "gpt-4o")];
        let picked = pick_best_model(&models, "openai", &["^gpt-5"]).unwrap();
        assert!(picked.is_none());
    }

    #[test]
    fn other_providers_are_filtered_out() {
        let models = vec![model("google", "gpt-5-impostor")];
        let picked = pick_best_model(&models, "openai", &["^gpt-5"]).unwrap();
        assert!(picked.is_none());
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let err = pick_best_model(&[], "openai", &["("]).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
    }

    #[test]
    fn built_in_table_compiles_and_covers_all_cells() {
        let table = select_default_models(&[]).unwrap();
        assert_eq!(table.len(), 3);
        for category in ["reasoning", "fast", "vision"] {
            let row = &table[category];
            assert_eq!(row.len(), 3);
            assert!(row.values().all(Option::is_none));
        }
    }

    #[test]
    fn selection_fills_cells_from_discovered_models() {
        let models = vec![
            model("anthropic", "claude-opus-4-5-20251101"),
            model("anthropic", "claude-sonnet-4-5-20250929"),
            model("google", "gemini-2.5-pro"),
            model("google", "gemini-2.5-flash"),
        ];
        let table = select_default_models(&models).unwrap();
        assert_eq!(
            table["reasoning"]["anthropic"].as_deref(),
            Some("claude-opus-4-5-20251101")
        );
        assert_eq!(
            table["fast"]["anthropic"].as_deref(),
            Some("claude-sonnet-4-5-20250929")
        );
        assert_eq!(table["reasoning"]["google"].as_deref(), Some("gemini-2.5-pro"));
        assert_eq!(table["fast"]["google"].as_deref(), Some("gemini-2.5-flash"));
        assert!(table["reasoning"]["openai"].is_none());
    }
}
