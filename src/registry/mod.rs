//! Remote package registry access.
//!
//! The [`RegistryClient`] trait is the seam between the satisfaction engine
//! and the network; [`PypiClient`] implements it over HTTP. Lookups are
//! blocking and made one at a time, and nothing is cached between runs.
//!
//! # Example
//!
//! ```no_run
//! use reqz::registry::{PypiClient, RegistryClient, DEFAULT_REGISTRY_URL};
//!
//! let client = PypiClient::new(DEFAULT_REGISTRY_URL).unwrap();
//! let info = client.fetch_package_info("docopt").unwrap();
//! println!("{} {}", info.name, info.latest_version);
//! ```

pub mod package_info;
pub mod pypi;

pub use package_info::PackageInfo;
pub use pypi::{PypiClient, DEFAULT_REGISTRY_URL};

use thiserror::Error;

/// Errors from a registry lookup. Each concerns a single package.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry has no such package.
    #[error("No info for package: {name}")]
    NotFound { name: String },

    /// The registry could not be reached or answered with an error status.
    #[error("Failed to get registry info for: {name}\n{message}")]
    Transport { name: String, message: String },

    /// The registry answered with something that is not package metadata.
    #[error("Failed to decode registry info for: {name}\n{message}")]
    Decode { name: String, message: String },
}

/// A source of published package metadata.
pub trait RegistryClient {
    /// Fetch metadata for `name`.
    fn fetch_package_info(&self, name: &str) -> Result<PackageInfo, RegistryError>;
}
