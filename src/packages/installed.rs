//! Installed package snapshot.
//!
//! The snapshot is taken once per run from a [`PackageSource`] and then only
//! read. Lookups are by lowercased name.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;
use tracing::debug;

use crate::error::{ReqzError, Result};
use crate::requirements::Version;

/// A package present in the local environment.
#[derive(Debug, Clone)]
pub struct InstalledPackage {
    /// Project name as reported by the package manager.
    pub name: String,
    /// Installed version.
    pub version: Version,
    /// Directory the package is installed into.
    pub location: PathBuf,
}

impl InstalledPackage {
    pub fn new(name: &str, version: &str, location: impl Into<PathBuf>) -> Self {
        Self {
            name: name.to_string(),
            version: Version::parse(version),
            location: location.into(),
        }
    }

    /// Location for display; empty when pip did not report one.
    pub fn location(&self) -> &Path {
        &self.location
    }
}

/// Something that can list installed packages.
pub trait PackageSource {
    /// List installed packages. With `local_only`, packages visible from a
    /// virtualenv's global site-packages are left out.
    fn list_installed(&self, local_only: bool) -> Result<Vec<InstalledPackage>>;
}

/// Immutable view of the installed packages for one run.
#[derive(Debug, Clone, Default)]
pub struct InstalledPackages {
    packages: HashMap<String, InstalledPackage>,
}

impl InstalledPackages {
    /// Query `source` once and build the snapshot.
    pub fn load(source: &dyn PackageSource, local_only: bool) -> Result<Self> {
        debug!("Loading package list...");
        let snapshot: Self = source.list_installed(local_only)?.into_iter().collect();
        debug!("Packages loaded: {}", snapshot.len());
        Ok(snapshot)
    }

    /// Look up a package, ignoring case.
    pub fn get(&self, name: &str) -> Option<&InstalledPackage> {
        self.packages.get(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Packages ordered by lowercased name.
    pub fn sorted_by_name(&self) -> Vec<&InstalledPackage> {
        let mut keys: Vec<&String> = self.packages.keys().collect();
        keys.sort();
        keys.into_iter().map(|k| &self.packages[k]).collect()
    }

    /// Packages ordered by location, then by name.
    pub fn sorted_by_location(&self) -> Vec<&InstalledPackage> {
        let mut packages = self.sorted_by_name();
        packages.sort_by(|a, b| a.location.cmp(&b.location));
        packages
    }
}

impl FromIterator<InstalledPackage> for InstalledPackages {
    fn from_iter<T: IntoIterator<Item = InstalledPackage>>(iter: T) -> Self {
        Self {
            packages: iter
                .into_iter()
                .map(|p| (p.name.to_lowercase(), p))
                .collect(),
        }
    }
}

/// Lists packages by asking pip.
#[derive(Debug, Clone)]
pub struct PipSource {
    python: String,
}

/// One entry of `pip list --format=json --verbose`.
#[derive(Debug, Deserialize)]
struct PipListEntry {
    name: String,
    version: String,
    #[serde(default)]
    location: Option<PathBuf>,
}

impl PipSource {
    /// Use `python` (an executable name or path) to run `-m pip`.
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
        }
    }

    pub fn python(&self) -> &str {
        &self.python
    }

    fn args(local_only: bool) -> Vec<&'static str> {
        let mut args = vec![
            "-m",
            "pip",
            "list",
            "--format=json",
            "--verbose",
            "--disable-pip-version-check",
        ];
        if local_only {
            args.push("--local");
        }
        args
    }
}

impl Default for PipSource {
    fn default() -> Self {
        Self::new("python3")
    }
}

impl PackageSource for PipSource {
    fn list_installed(&self, local_only: bool) -> Result<Vec<InstalledPackage>> {
        let args = Self::args(local_only);
        debug!("Running {} {}", self.python, args.join(" "));
        let output = Command::new(&self.python)
            .args(&args)
            .output()
            .map_err(|e| ReqzError::PackageQuery {
                message: format!("failed to run {}: {}", self.python, e),
            })?;

        if !output.status.success() {
            return Err(ReqzError::PackageQuery {
                message: format!(
                    "{} exited with {}: {}",
                    self.python,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        parse_pip_list(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parse `pip list --format=json` output.
pub fn parse_pip_list(json: &str) -> Result<Vec<InstalledPackage>> {
    let entries: Vec<PipListEntry> =
        serde_json::from_str(json).map_err(|e| ReqzError::PackageQuery {
            message: format!("unreadable pip output: {}", e),
        })?;
    Ok(entries
        .into_iter()
        .map(|entry| InstalledPackage {
            version: Version::parse(&entry.version),
            location: entry.location.unwrap_or_default(),
            name: entry.name,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource(Vec<InstalledPackage>);

    impl PackageSource for FixedSource {
        fn list_installed(&self, local_only: bool) -> Result<Vec<InstalledPackage>> {
            if local_only {
                Ok(self.0.iter().take(1).cloned().collect())
            } else {
                Ok(self.0.clone())
            }
        }
    }

    fn source() -> FixedSource {
        FixedSource(vec![
            InstalledPackage::new("Docopt", "0.6.2", "/venv/site-packages"),
            InstalledPackage::new("six", "1.16.0", "/usr/lib/python3/dist-packages"),
            InstalledPackage::new("attrs", "23.1.0", "/venv/site-packages"),
        ])
    }

    #[test]
    fn lookup_ignores_case() {
        let snapshot = InstalledPackages::load(&source(), false).unwrap();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.get("docopt").unwrap().name, "Docopt");
        assert_eq!(snapshot.get("DOCOPT").unwrap().version.as_str(), "0.6.2");
        assert!(snapshot.get("missing").is_none());
    }

    #[test]
    fn local_only_is_passed_to_source() {
        let snapshot = InstalledPackages::load(&source(), true).unwrap();
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn sorted_by_name() {
        let snapshot = InstalledPackages::load(&source(), false).unwrap();
        let names: Vec<&str> = snapshot
            .sorted_by_name()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["attrs", "Docopt", "six"]);
    }

    #[test]
    fn sorted_by_location_keeps_name_order() {
        let snapshot = InstalledPackages::load(&source(), false).unwrap();
        let names: Vec<&str> = snapshot
            .sorted_by_location()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["six", "attrs", "Docopt"]);
    }

    #[test]
    fn parses_pip_json() {
        let json = r#"[
            {"name": "docopt", "version": "0.6.2", "location": "/venv/lib", "installer": "pip"},
            {"name": "six", "version": "1.16.0"}
        ]"#;
        let packages = parse_pip_list(json).unwrap();
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].location(), Path::new("/venv/lib"));
        assert_eq!(packages[1].location(), Path::new(""));
        assert_eq!(packages[1].version.release(), &[1, 16]);
    }

    #[test]
    fn bad_pip_json_is_package_query_error() {
        let err = parse_pip_list("not json").unwrap_err();
        assert!(matches!(err, ReqzError::PackageQuery { .. }));
    }

    #[test]
    fn pip_args_include_local_flag() {
        assert!(PipSource::args(true).contains(&"--local"));
        assert!(!PipSource::args(false).contains(&"--local"));
        assert_eq!(PipSource::default().python(), "python3");
    }

    #[test]
    fn missing_interpreter_is_package_query_error() {
        let source = PipSource::new("definitely-not-a-python-binary-xyz");
        let err = source.list_installed(false).unwrap_err();
        assert!(matches!(err, ReqzError::PackageQuery { .. }));
    }
}
