//! HTTP client for a PyPI-compatible JSON API.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::debug;

use super::package_info::{self, PackageInfo};
use super::{RegistryClient, RegistryError};
use crate::requirements::parser::is_valid_name;

/// Default registry host.
pub const DEFAULT_REGISTRY_URL: &str = "https://pypi.org";

/// Fetches package metadata from `<base>/pypi/<name>/json`.
pub struct PypiClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl PypiClient {
    /// Create a client for `base_url` with the default 30-second timeout.
    pub fn new(base_url: &str) -> Result<Self, RegistryError> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Create a client for `base_url` with a custom timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .user_agent(concat!("reqz/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| RegistryError::Transport {
                name: String::new(),
                message: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The JSON endpoint for a package.
    pub fn package_url(&self, name: &str) -> String {
        format!("{}/pypi/{}/json", self.base_url, name)
    }
}

impl RegistryClient for PypiClient {
    fn fetch_package_info(&self, name: &str) -> Result<PackageInfo, RegistryError> {
        if !is_valid_name(name) {
            debug!("Not a package name, skipping lookup: {:?}", name);
            return Err(RegistryError::NotFound {
                name: name.to_string(),
            });
        }
        let url = self.package_url(name);
        debug!("Fetching package info: {}", url);

        let transport = |message: String| RegistryError::Transport {
            name: name.to_string(),
            message,
        };

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| transport(format!("unable to connect to {}: {}", url, e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound {
                name: name.to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(transport(format!("HTTP {} fetching {}", response.status(), url)));
        }

        let body = response.text().map_err(|e| RegistryError::Decode {
            name: name.to_string(),
            message: format!("unable to read data from {}: {}", url, e),
        })?;

        package_info::decode(&body).map_err(|e| RegistryError::Decode {
            name: name.to_string(),
            message: format!("unable to decode JSON data from {}: {}", url, e),
        })
    }
}
