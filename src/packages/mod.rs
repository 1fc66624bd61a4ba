//! The locally installed package set.
//!
//! - [`installed`] - Snapshot of installed packages and the pip-backed source

pub mod installed;

pub use installed::{parse_pip_list, InstalledPackage, InstalledPackages, PackageSource, PipSource};
