//! Package metadata as published by the registry.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::requirements::Version;

/// Registry metadata for one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    /// Project name as published.
    pub name: String,
    /// Latest published version.
    pub latest_version: String,
    /// One-line summary.
    pub summary: Option<String>,
    pub author: Option<String>,
    pub author_email: Option<String>,
    pub homepage: Option<String>,
    /// Download counts per release, keyed by version string.
    pub release_downloads: BTreeMap<String, u64>,
}

impl PackageInfo {
    /// Number of published releases.
    pub fn release_count(&self) -> usize {
        self.release_downloads.len()
    }

    /// Downloads summed over every release.
    pub fn total_downloads(&self) -> u64 {
        self.release_downloads.values().sum()
    }

    /// The highest release by loose version ordering, with its downloads.
    pub fn latest_release(&self) -> Option<(&str, u64)> {
        self.release_downloads
            .iter()
            .max_by(|(a, _), (b, _)| Version::parse(a).cmp(&Version::parse(b)))
            .map(|(version, downloads)| (version.as_str(), *downloads))
    }
}

/// The JSON document served at `/pypi/<name>/json`.
#[derive(Debug, Deserialize)]
struct PypiDocument {
    info: PypiInfo,
    #[serde(default)]
    releases: BTreeMap<String, Vec<PypiFile>>,
}

#[derive(Debug, Deserialize)]
struct PypiInfo {
    name: String,
    version: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    author_email: Option<String>,
    #[serde(default)]
    home_page: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PypiFile {
    #[serde(default)]
    downloads: Option<i64>,
}

/// Decode a registry JSON document.
pub(crate) fn decode(json: &str) -> serde_json::Result<PackageInfo> {
    let doc: PypiDocument = serde_json::from_str(json)?;
    let release_downloads = doc
        .releases
        .into_iter()
        .map(|(version, files)| {
            // The registry reports -1 when it no longer tracks downloads.
            let downloads = files
                .iter()
                .filter_map(|f| f.downloads)
                .filter(|&d| d > 0)
                .map(|d| d as u64)
                .sum();
            (version, downloads)
        })
        .collect();

    Ok(PackageInfo {
        name: doc.info.name,
        latest_version: doc.info.version,
        summary: known(doc.info.summary),
        author: known(doc.info.author),
        author_email: known(doc.info.author_email),
        homepage: known(doc.info.home_page),
        release_downloads,
    })
}

fn known(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != "UNKNOWN")
}
