//! Satisfaction checking.
//!
//! The [`SatisfactionEngine`] classifies requirements against an installed
//! package snapshot, and on request against the registry's latest release.

use tracing::debug;

use crate::packages::InstalledPackages;
use crate::registry::{RegistryClient, RegistryError};

use super::status::{LatestStatus, MatchKind, Satisfaction, Status};
use super::version::satisfies;
use super::Requirement;

/// How a requirement with several specs is judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SatisfactionPolicy {
    /// Satisfied when at least one spec holds. `>= 1.0, <= 2.0` accepts 3.0.
    #[default]
    AnyOf,
    /// Satisfied only when every spec holds.
    AllOf,
}

/// Checks requirements against installed packages.
pub struct SatisfactionEngine<'a> {
    installed: &'a InstalledPackages,
    policy: SatisfactionPolicy,
}

impl<'a> SatisfactionEngine<'a> {
    /// Create an engine using the default any-of policy.
    pub fn new(installed: &'a InstalledPackages) -> Self {
        Self {
            installed,
            policy: SatisfactionPolicy::default(),
        }
    }

    /// Use `policy` for multi-spec requirements.
    pub fn with_policy(mut self, policy: SatisfactionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> SatisfactionPolicy {
        self.policy
    }

    /// Classify `version` against `requirement`'s specs.
    ///
    /// Under [`SatisfactionPolicy::AnyOf`] a requirement without specs is
    /// never met; under [`SatisfactionPolicy::AllOf`] it always is.
    pub fn classify(&self, requirement: &Requirement, version: &str) -> Satisfaction {
        let specs = requirement.specs();
        let holds = |spec: &super::Spec| satisfies(version, spec.op, &spec.version);
        let met = match self.policy {
            SatisfactionPolicy::AnyOf => specs.iter().any(holds),
            SatisfactionPolicy::AllOf => specs.iter().all(holds),
        };
        if !met {
            return Satisfaction::Unsatisfied;
        }
        let exact = specs
            .iter()
            .any(|spec| spec.op.is_inclusive() && spec.version == version);
        Satisfaction::Satisfied(if exact {
            MatchKind::Exact
        } else {
            MatchKind::Loose
        })
    }

    /// Status of one requirement against the installed snapshot.
    pub fn status(&self, requirement: &Requirement) -> Status {
        let mut status = Status {
            requirement: requirement.clone(),
            installed_version: None,
            location: None,
            satisfaction: Satisfaction::Untracked,
            latest: None,
        };
        if !requirement.has_name_identity() {
            return status;
        }

        match self.installed.get(requirement.name()) {
            None => status.satisfaction = Satisfaction::NotInstalled,
            Some(package) => {
                let version = package.version.as_str();
                status.satisfaction = self.classify(requirement, version);
                status.installed_version = Some(version.to_string());
                if !package.location().as_os_str().is_empty() {
                    status.location = Some(package.location.clone());
                }
            }
        }
        debug!(
            "{}: installed {:?}, {:?}",
            requirement.name(),
            status.installed_version,
            status.satisfaction
        );
        status
    }

    /// Statuses for every requirement, in order.
    pub fn check_all<'r, I>(&self, requirements: I) -> Vec<Status>
    where
        I: IntoIterator<Item = &'r Requirement>,
    {
        requirements.into_iter().map(|r| self.status(r)).collect()
    }

    /// Fetch the registry's latest release for `status` and classify it.
    ///
    /// The result is kept on the status, so repeated calls do not refetch.
    pub fn check_latest<'s>(
        &self,
        status: &'s mut Status,
        registry: &dyn RegistryClient,
    ) -> Result<&'s LatestStatus, RegistryError> {
        let latest = match status.latest.take() {
            Some(latest) => latest,
            None => {
                let requirement = &status.requirement;
                if !requirement.has_name_identity() {
                    return Err(RegistryError::NotFound {
                        name: requirement.to_string(),
                    });
                }
                let info = registry.fetch_package_info(requirement.name())?;
                LatestStatus {
                    satisfaction: self.classify(requirement, &info.latest_version),
                    version: info.latest_version,
                }
            }
        };
        Ok(status.latest.insert(latest))
    }
}

/// Number of statuses flagged as errors.
pub fn error_count(statuses: &[Status]) -> usize {
    statuses.iter().filter(|s| s.is_error()).count()
}
