//! Run configuration for the snapshot assembler.
//!
//! Credentials and the package watch-list are resolved once by the caller
//! and injected at construction; the engine never reads the environment
//! mid-run. [`Credentials::from_env`] is the conventional resolver for
//! CLI and test use.

use serde::{Deserialize, Serialize};

/// Default OpenAI API base URL.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Package ecosystems tracked by the version fetcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    Npm,
    Pypi,
}

/// API credentials per provider. A `None` means the provider is simply
/// not queried; it is never an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Credentials {
    pub openai: Option<String>,
    pub anthropic: Option<String>,
    pub google: Option<String>,
}

impl Credentials {
    /// Resolve credentials from the conventional environment variables.
    ///
    /// Google accepts either `GEMINI_API_KEY` or `GOOGLE_API_KEY`, the
    /// former winning when both are set.
    pub fn from_env() -> Self {
        Self {
            openai: std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            anthropic: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            google: std::env::var("GEMINI_API_KEY")
                .ok()
                .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
                .filter(|k| !k.is_empty()),
        }
    }

    /// Whether no provider has a credential configured.
    pub fn is_empty(&self) -> bool {
        self.openai.is_none() && self.anthropic.is_none() && self.google.is_none()
    }
}

/// Fixed watch-list of packages whose latest versions are tracked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchList {
    pub npm: Vec<String>,
    pub pypi: Vec<String>,
}

impl Default for WatchList {
    fn default() -> Self {
        let to_owned = |names: &[&str]| names.iter().map(|n| n.to_string()).collect();
        Self {
            npm: to_owned(&[
                "next",
                "react",
                "react-dom",
                "openai",
                "@anthropic-ai/sdk",
                "@google/genai",
                "typescript",
                "zod",
                "tailwindcss",
            ]),
            pypi: to_owned(&[
                "openai",
                "anthropic",
                "google-genai",
                "litellm",
                "fastapi",
                "pydantic",
                "httpx",
            ]),
        }
    }
}

/// Configuration for one assembly run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreflightConfig {
    /// Provider credentials, resolved once before the run.
    pub credentials: Credentials,
    /// Override for the OpenAI base URL; `None` uses the public endpoint.
    pub openai_base_url: Option<String>,
    /// Packages whose latest versions are fetched.
    pub watch_list: WatchList,
}

impl PreflightConfig {
    /// Effective OpenAI base URL with any trailing slash removed.
    pub fn openai_base_url(&self) -> String {
        self.openai_base_url
            .as_deref()
            .unwrap_or(DEFAULT_OPENAI_BASE_URL)
            .trim_end_matches('/')
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_watch_list_matches_tracked_packages() {
        let list = WatchList::default();
        assert_eq!(list.npm.len(), 9);
        assert_eq!(list.pypi.len(), 7);
        assert!(list.npm.contains(&"@anthropic-ai/sdk".to_string()));
        assert!(list.pypi.contains(&"litellm".to_string()));
    }

    #[test]
    fn openai_base_url_strips_trailing_slash() {
        let config = PreflightConfig {
            openai_base_url: Some("https://proxy.example.com/".to_string()),
            ..Default::default()
        };
        assert_eq!(config.openai_base_url(), "https://proxy.example.com");
    }

    #[test]
    fn openai_base_url_defaults_to_public_endpoint() {
        let config = PreflightConfig::default();
        assert_eq!(config.openai_base_url(), DEFAULT_OPENAI_BASE_URL);
    }

    #[test]
    fn empty_credentials_report_empty() {
        assert!(Credentials::default().is_empty());
        let creds = Credentials {
            anthropic: Some("sk-ant-test".to_string()),
            ..Default::default()
        };
        assert!(!creds.is_empty());
    }
}
