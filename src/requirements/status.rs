//! Requirement status types.
//!
//! Each check produces a [`Status`] describing whether the installed package
//! (and optionally the registry's latest release) meets a requirement.
//! Statuses are built per request and never persisted.

use std::path::PathBuf;

use super::Requirement;

/// How a satisfied requirement was met.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// The version appears literally as an inclusive bound (`==`, `>=`, `<=`).
    Exact,
    /// The version satisfies the specs without being one of the bounds.
    Loose,
}

/// The result of checking one version against a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Satisfaction {
    /// The specs are met.
    Satisfied(MatchKind),
    /// Installed, but the specs are not met.
    Unsatisfied,
    /// No installed package carries the requirement's name.
    NotInstalled,
    /// Local path requirements have no name to look up.
    Untracked,
}

impl Satisfaction {
    /// Whether the specs are met.
    pub fn is_satisfied(&self) -> bool {
        matches!(self, Satisfaction::Satisfied(_))
    }

    /// Whether this outcome counts as an error for check-style reporting.
    pub fn is_error(&self) -> bool {
        matches!(self, Satisfaction::Unsatisfied | Satisfaction::NotInstalled)
    }

    /// One-character marker: blank for exact, `-` for loose, `!` for errors.
    pub fn marker(&self) -> &'static str {
        match self {
            Satisfaction::Satisfied(MatchKind::Exact) | Satisfaction::Untracked => " ",
            Satisfaction::Satisfied(MatchKind::Loose) => "-",
            Satisfaction::Unsatisfied | Satisfaction::NotInstalled => "!",
        }
    }
}

/// The registry's latest release, classified against the requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestStatus {
    /// Latest published version.
    pub version: String,
    /// How that version relates to the requirement's specs.
    pub satisfaction: Satisfaction,
}

/// The status of one requirement.
#[derive(Debug, Clone)]
pub struct Status {
    /// The requirement that was checked.
    pub requirement: Requirement,
    /// Installed version string, when installed.
    pub installed_version: Option<String>,
    /// Install location, when installed and known.
    pub location: Option<PathBuf>,
    /// Outcome for the installed version.
    pub satisfaction: Satisfaction,
    pub(crate) latest: Option<LatestStatus>,
}

impl Status {
    /// Whether the installed version meets the requirement.
    pub fn satisfied(&self) -> bool {
        self.satisfaction.is_satisfied()
    }

    /// Whether this requirement should be reported as an error.
    pub fn is_error(&self) -> bool {
        self.satisfaction.is_error()
    }

    /// The registry classification, once fetched.
    pub fn latest(&self) -> Option<&LatestStatus> {
        self.latest.as_ref()
    }
}
