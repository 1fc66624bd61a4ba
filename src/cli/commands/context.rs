//! Shared command context.
//!
//! A [`CommandContext`] carries the global options every command needs, plus
//! the package and registry sources. Both sources can be swapped out, which is
//! how command tests run without pip or the network.

use std::path::{Path, PathBuf};

use crate::cli::args::Cli;
use crate::error::Result;
use crate::packages::{InstalledPackages, PackageSource, PipSource};
use crate::registry::{PypiClient, RegistryClient, DEFAULT_REGISTRY_URL};
use crate::requirements::{RequirementCollection, SatisfactionPolicy};
use crate::ui::ReqzTheme;

/// Global options and data sources for one run.
pub struct CommandContext {
    file: PathBuf,
    policy: SatisfactionPolicy,
    local_only: bool,
    theme: ReqzTheme,
    packages: Box<dyn PackageSource>,
    registry_url: String,
    registry: Option<Box<dyn RegistryClient>>,
}

impl CommandContext {
    /// Context for `file` with default sources and a plain theme.
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            policy: SatisfactionPolicy::default(),
            local_only: false,
            theme: ReqzTheme::plain(),
            packages: Box::new(PipSource::default()),
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            registry: None,
        }
    }

    /// Context from parsed command-line options.
    pub fn from_cli(cli: &Cli) -> Self {
        let policy = if cli.strict {
            SatisfactionPolicy::AllOf
        } else {
            SatisfactionPolicy::AnyOf
        };
        Self::new(&cli.file)
            .with_policy(policy)
            .with_local_only(cli.local_only)
            .with_theme(ReqzTheme::for_output())
            .with_package_source(Box::new(PipSource::new(cli.python.clone())))
            .with_registry_url(&cli.registry_url)
    }

    pub fn with_policy(mut self, policy: SatisfactionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_local_only(mut self, local_only: bool) -> Self {
        self.local_only = local_only;
        self
    }

    pub fn with_theme(mut self, theme: ReqzTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Use `source` to list installed packages.
    pub fn with_package_source(mut self, source: Box<dyn PackageSource>) -> Self {
        self.packages = source;
        self
    }

    /// Talk to the registry at `url`.
    pub fn with_registry_url(mut self, url: &str) -> Self {
        self.registry_url = url.to_string();
        self
    }

    /// Use `client` for registry lookups instead of building an HTTP client.
    pub fn with_registry(mut self, client: Box<dyn RegistryClient>) -> Self {
        self.registry = Some(client);
        self
    }

    /// The requirements file path.
    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn policy(&self) -> SatisfactionPolicy {
        self.policy
    }

    pub fn theme(&self) -> &ReqzTheme {
        &self.theme
    }

    pub fn registry_url(&self) -> &str {
        &self.registry_url
    }

    /// Read and parse the requirements file.
    pub fn load_requirements(&self) -> Result<RequirementCollection> {
        RequirementCollection::from_file(&self.file)
    }

    /// Take the installed package snapshot.
    pub fn installed_packages(&self) -> Result<InstalledPackages> {
        InstalledPackages::load(self.packages.as_ref(), self.local_only)
    }

    /// Run `f` with a registry client, building the HTTP client on first use.
    pub fn with_registry_client<T>(&self, f: impl FnOnce(&dyn RegistryClient) -> T) -> Result<T> {
        match &self.registry {
            Some(client) => Ok(f(client.as_ref())),
            None => {
                let client = PypiClient::new(&self.registry_url)?;
                Ok(f(&client))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults() {
        let ctx = CommandContext::new("requirements.txt");
        assert_eq!(ctx.file(), Path::new("requirements.txt"));
        assert_eq!(ctx.policy(), SatisfactionPolicy::AnyOf);
        assert_eq!(ctx.registry_url(), DEFAULT_REGISTRY_URL);
    }

    #[test]
    fn strict_flag_selects_all_of() {
        let cli = Cli::try_parse_from(["reqz", "--strict", "-f", "dev.txt"]).unwrap();
        let ctx = CommandContext::from_cli(&cli);
        assert_eq!(ctx.policy(), SatisfactionPolicy::AllOf);
        assert_eq!(ctx.file(), Path::new("dev.txt"));
    }

    #[test]
    fn registry_url_from_cli() {
        let cli =
            Cli::try_parse_from(["reqz", "--registry-url", "http://localhost:8080"]).unwrap();
        let ctx = CommandContext::from_cli(&cli);
        assert_eq!(ctx.registry_url(), "http://localhost:8080");
    }

    #[test]
    fn missing_file_is_reported() {
        let ctx = CommandContext::new("/nonexistent/requirements.txt");
        let err = ctx.load_requirements().unwrap_err();
        assert!(err.to_string().contains("Requirements file not found"));
    }
}
