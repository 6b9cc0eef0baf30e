//! Registry version fetcher for npm and PyPI.
//!
//! Each watched package gets exactly one lookup. Failures are isolated per
//! package: a lookup that errors, returns a non-success status, or lacks
//! the version field is logged and omitted from the result map. The batch
//! itself never aborts.

use std::collections::BTreeMap;

use futures_util::future::join_all;
use serde::Deserialize;
use tracing::debug;

use crate::config::Ecosystem;

/// npm registry base URL.
const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// PyPI JSON API base URL.
const PYPI_REGISTRY_URL: &str = "https://pypi.org/pypi";

/// Registry endpoints, overridable in tests.
#[derive(Debug, Clone)]
struct RegistryEndpoints {
    npm: String,
    pypi: String,
}

impl Default for RegistryEndpoints {
    fn default() -> Self {
        Self {
            npm: NPM_REGISTRY_URL.to_string(),
            pypi: PYPI_REGISTRY_URL.to_string(),
        }
    }
}

/// Relevant slice of an npm registry package document.
#[derive(Debug, Deserialize)]
struct NpmPackageDoc {
    #[serde(rename = "dist-tags")]
    dist_tags: Option<NpmDistTags>,
}

#[derive(Debug, Deserialize)]
struct NpmDistTags {
    latest: Option<String>,
}

/// Relevant slice of a PyPI package document.
#[derive(Debug, Deserialize)]
struct PypiPackageDoc {
    info: Option<PypiInfo>,
}

#[derive(Debug, Deserialize)]
struct PypiInfo {
    version: Option<String>,
}

/// Fetch the latest version of one npm package.
async fn npm_latest(client: &reqwest::Client, base: &str, package: &str) -> Option<String> {
    let url = format!("{base}/{package}");
    let response = client.get(&url).send().await.ok()?;
    if !response.status().is_success() {
        return None;
    }
    let doc: NpmPackageDoc = response.json().await.ok()?;
    doc.dist_tags?.latest.filter(|v| !v.is_empty())
}

/// Fetch the latest version of one PyPI package.
async fn pypi_latest(client: &reqwest::Client, base: &str, package: &str) -> Option<String> {
    let url = format!("{base}/{package}/json");
    let response = client.get(&url).send().await.ok()?;
    if !response.status().is_success() {
        return None;
    }
    let doc: PypiPackageDoc = response.json().await.ok()?;
    doc.info?.version.filter(|v| !v.is_empty())
}

async fn latest_versions_from(
    client: &reqwest::Client,
    endpoints: &RegistryEndpoints,
    packages: &[(String, Ecosystem)],
) -> BTreeMap<String, String> {
    let lookups = packages.iter().map(|(name, ecosystem)| async move {
        let version = match ecosystem {
            Ecosystem::Npm => npm_latest(client, &endpoints.npm, name).await,
            Ecosystem::Pypi => pypi_latest(client, &endpoints.pypi, name).await,
        };
        if version.is_none() {
            debug!(package = %name, ecosystem = ?ecosystem, "version lookup failed, omitting");
        }
        (name.clone(), version)
    });

    join_all(lookups)
        .await
        .into_iter()
        .filter_map(|(name, version)| version.map(|v| (name, v)))
        .collect()
}

/// Fetch latest versions for a batch of `(package, ecosystem)` pairs.
///
/// All lookups run concurrently. The returned map contains an entry only
/// for packages whose lookup succeeded; there are never placeholder
/// values.
pub async fn latest_versions(
    client: &reqwest::Client,
    packages: &[(String, Ecosystem)],
) -> BTreeMap<String, String> {
    latest_versions_from(client, &RegistryEndpoints::default(), packages).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn npm_doc_parses_dist_tags() {
        let doc: NpmPackageDoc =
            serde_json::from_str(r#"{"dist-tags":{"latest":"19.0.0"},"name":"react"}"#).unwrap();
        assert_eq!(doc.dist_tags.unwrap().latest.as_deref(), Some("19.0.0"));
    }

    #[test]
    fn npm_doc_tolerates_missing_dist_tags() {
        let doc: NpmPackageDoc = serde_json::from_str(r#"{"name":"react"}"#).unwrap();
        assert!(doc.dist_tags.is_none());
    }

    #[test]
    fn pypi_doc_parses_info_version() {
        let doc: PypiPackageDoc =
            serde_json::from_str(r#"{"info":{"version":"2.9.1","name":"pydantic"}}"#).unwrap();
        assert_eq!(doc.info.unwrap().version.as_deref(), Some("2.9.1"));
    }

    #[test]
    fn pypi_doc_tolerates_missing_info() {
        let doc: PypiPackageDoc = serde_json::from_str(r#"{}"#).unwrap();
        assert!(doc.info.is_none());
    }

    #[tokio::test]
    async fn failed_lookups_are_omitted_not_nulled() {
        // Unreachable local endpoints: every lookup fails, so the map must
        // contain no keys at all rather than null placeholders.
        let client = reqwest::Client::new();
        let endpoints = RegistryEndpoints {
            npm: "http://127.0.0.1:1".to_string(),
            pypi: "http://127.0.0.1:1".to_string(),
        };
        let packages = vec![
            ("react".to_string(), Ecosystem::Npm),
            ("pydantic".to_string(), Ecosystem::Pypi),
        ];
        let versions = latest_versions_from(&client, &endpoints, &packages).await;
        assert!(versions.is_empty());
    }
}
