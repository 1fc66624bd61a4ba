//! reqz - Check and maintain pip requirements files.
//!
//! reqz parses requirements files, checks each entry against the installed
//! packages (and optionally the registry's latest release), and edits the
//! file safely: every rewrite takes a backup first and replaces the file
//! atomically.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`packages`] - The installed package snapshot
//! - [`registry`] - Registry metadata lookups
//! - [`requirements`] - Requirement parsing, collections and satisfaction checks
//! - [`storage`] - Backup-then-replace file writing
//! - [`ui`] - Terminal output and prompts
//!
//! # Example
//!
//! ```
//! use reqz::packages::{InstalledPackage, InstalledPackages};
//! use reqz::requirements::{RequirementCollection, SatisfactionEngine};
//!
//! let requirements = RequirementCollection::parse("docopt >= 0.6\nsix\n").unwrap();
//! let installed: InstalledPackages = vec![
//!     InstalledPackage::new("docopt", "0.6.2", ""),
//!     InstalledPackage::new("six", "1.16.0", ""),
//! ]
//! .into_iter()
//! .collect();
//!
//! let engine = SatisfactionEngine::new(&installed);
//! let statuses = engine.check_all(&requirements);
//! assert!(statuses[0].satisfied());
//! // A bare name has no spec that could hold.
//! assert!(statuses[1].is_error());
//! ```

pub mod cli;
pub mod error;
pub mod packages;
pub mod registry;
pub mod requirements;
pub mod storage;
pub mod ui;

pub use error::{ReqzError, Result};
