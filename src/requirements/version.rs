//! Loose version comparison.
//!
//! Versions are reduced to a tuple of numeric release segments. Anything
//! after the first non-numeric character (`rc1`, `.dev0`, `+local`, ...) is
//! dropped, so `1.0rc1` orders equal to `1.0`. This is deliberately lossy and
//! is not PEP 440 or semver precedence.

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

use super::Operator;

/// A version normalized for comparison, keeping its original text.
#[derive(Debug, Clone)]
pub struct Version {
    release: Vec<u64>,
    original: String,
}

impl Version {
    /// Normalize a version string. Never fails: unparsable input is the empty
    /// release, which orders below everything else.
    pub fn parse(version: &str) -> Self {
        let mut release = Vec::new();
        for segment in version.trim().trim_start_matches(['v', 'V']).split('.') {
            let digits: &str = segment
                .find(|c: char| !c.is_ascii_digit())
                .map_or(segment, |end| &segment[..end]);
            if digits.is_empty() {
                break;
            }
            release.push(digits.parse::<u64>().unwrap_or(u64::MAX));
            if digits.len() != segment.len() {
                // Pre-release or local suffix; the rest is ignored.
                break;
            }
        }
        // Trailing zeroes are not significant: 1.0 == 1.0.0
        match release.iter().rposition(|&n| n != 0) {
            Some(last) => release.truncate(last + 1),
            None => release.clear(),
        }
        Self {
            release,
            original: version.to_string(),
        }
    }

    /// The version string as it was given.
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// Numeric release segments with trailing zeroes removed.
    pub fn release(&self) -> &[u64] {
        &self.release
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.release == other.release
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.release.cmp(&other.release)
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

/// Whether `candidate` satisfies `op required`.
pub fn satisfies(candidate: &str, op: Operator, required: &str) -> bool {
    let candidate = Version::parse(candidate);
    let required = Version::parse(required);
    match op {
        Operator::Eq => candidate == required,
        Operator::Ge => candidate >= required,
        Operator::Le => candidate <= required,
        Operator::Gt => candidate > required,
        Operator::Lt => candidate < required,
    }
}

/// Like [`satisfies`], but takes the operator as text.
///
/// Unknown operators compare as `>=`.
pub fn satisfies_symbol(candidate: &str, op: &str, required: &str) -> bool {
    let op = Operator::from_symbol(op).unwrap_or(Operator::Ge);
    satisfies(candidate, op, required)
}
