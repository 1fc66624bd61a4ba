//! An ordered list of requirements, as read from a requirements file.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use regex::RegexBuilder;
use tracing::debug;

use crate::error::{ReqzError, Result};
use crate::storage::SafeWriter;

use super::Requirement;

/// What [`RequirementCollection::add_or_replace`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The requirement was appended.
    Added,
    /// An entry with the same identity was replaced in place.
    Replaced,
}

/// A name that occurs more than once, with how many extra times it occurs.
#[derive(Debug, Clone)]
pub struct Duplicate {
    /// The first entry carrying the name.
    pub requirement: Requirement,
    /// Occurrences beyond the first.
    pub count: usize,
}

/// Requirements in file order.
///
/// Entries sharing a name may coexist (files can contain them, and
/// [`duplicates`](Self::duplicates) reports them); [`add_or_replace`](Self::add_or_replace)
/// never creates new ones.
#[derive(Debug, Clone, Default)]
pub struct RequirementCollection {
    requirements: Vec<Requirement>,
}

impl RequirementCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse requirements file content. Blank lines and `#` comments are
    /// skipped; the first malformed line fails the whole parse.
    pub fn parse(content: &str) -> std::result::Result<Self, (usize, crate::error::ParseError)> {
        let mut requirements = Vec::new();
        for (index, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let requirement = Requirement::parse(line).map_err(|err| (index + 1, err))?;
            requirements.push(requirement);
        }
        Ok(Self { requirements })
    }

    /// Read and parse a requirements file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| ReqzError::from_file_error(e, path, "Failed to read file"))?;
        let collection =
            Self::parse(&content).map_err(|(line_number, source)| ReqzError::ParseInFile {
                path: path.to_path_buf(),
                line_number,
                source,
            })?;
        debug!(
            "Loaded {} requirements from {}",
            collection.len(),
            path.display()
        );
        Ok(collection)
    }

    /// Write the collection, sorted by name, through a [`SafeWriter`].
    pub fn write(&self, path: &Path) -> Result<()> {
        debug!("Writing sorted file: {}", path.display());
        SafeWriter::new(path).write(&self.to_file_content())
    }

    /// File content for this collection: sorted, one per line, trailing newline.
    pub fn to_file_content(&self) -> String {
        let mut content = String::new();
        for requirement in self.sorted_by_name() {
            content.push_str(&requirement.to_string());
            content.push('\n');
        }
        content
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Requirement> {
        self.requirements.iter()
    }

    /// Append without any duplicate checks.
    pub fn push(&mut self, requirement: Requirement) {
        self.requirements.push(requirement);
    }

    /// Parse `line` and add it, replacing an existing entry for the same
    /// package when its specs differ.
    pub fn add_or_replace(&mut self, line: &str) -> Result<AddOutcome> {
        let requirement = Requirement::parse(line)?;
        self.add_or_replace_requirement(requirement)
    }

    /// Add a parsed requirement; see [`add_or_replace`](Self::add_or_replace).
    pub fn add_or_replace_requirement(&mut self, requirement: Requirement) -> Result<AddOutcome> {
        let identity = requirement.identity();
        let existing = self
            .requirements
            .iter()
            .position(|r| r.identity() == identity);

        match existing {
            Some(index) if self.requirements[index] == requirement => {
                Err(ReqzError::DuplicateConflict {
                    requirement: self.requirements[index].to_string(),
                })
            }
            Some(index) => {
                debug!("Replacing requirement: {}", self.requirements[index]);
                self.requirements[index] = requirement;
                Ok(AddOutcome::Replaced)
            }
            None => {
                self.requirements.push(requirement);
                Ok(AddOutcome::Added)
            }
        }
    }

    /// Names occurring more than once, in order of first occurrence.
    ///
    /// Names are compared exactly as stored. Local paths have no name and
    /// are never reported.
    pub fn duplicates(&self) -> Vec<Duplicate> {
        let mut duplicates: Vec<Duplicate> = Vec::new();
        for (index, requirement) in self.requirements.iter().enumerate() {
            if !requirement.has_name_identity() {
                continue;
            }
            let first = self.requirements[..index]
                .iter()
                .position(|r| r.has_name_identity() && r.name == requirement.name);
            let Some(first) = first else {
                continue;
            };
            let first = &self.requirements[first];
            match duplicates
                .iter_mut()
                .find(|d| d.requirement.name == first.name)
            {
                Some(duplicate) => duplicate.count += 1,
                None => duplicates.push(Duplicate {
                    requirement: first.clone(),
                    count: 1,
                }),
            }
        }
        duplicates
    }

    /// First requirement with exactly this name.
    pub fn find_by_name(&self, name: &str) -> Option<&Requirement> {
        self.requirements.iter().find(|r| r.name == name)
    }

    /// Requirements whose canonical form matches `pattern`.
    ///
    /// The pattern is compiled up front, so an invalid pattern fails before
    /// anything is yielded.
    pub fn search<'a>(
        &'a self,
        pattern: &str,
        ignore_case: bool,
    ) -> Result<impl Iterator<Item = &'a Requirement> + 'a> {
        self.search_matching(pattern, ignore_case, false)
    }

    /// Like [`search`](Self::search), optionally yielding the entries that do
    /// *not* match instead.
    pub fn search_matching<'a>(
        &'a self,
        pattern: &str,
        ignore_case: bool,
        invert: bool,
    ) -> Result<impl Iterator<Item = &'a Requirement> + 'a> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(ignore_case)
            .build()
            .map_err(|source| ReqzError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(self
            .requirements
            .iter()
            .filter(move |r| regex.is_match(&r.to_string()) != invert))
    }

    /// Requirements sorted by name, then specs. Stable.
    pub fn sorted_by_name(&self) -> Vec<&Requirement> {
        let mut sorted: Vec<&Requirement> = self.requirements.iter().collect();
        sorted.sort_by(|a, b| compare_by_name(a, b));
        sorted
    }

    /// Distinct requirement names in sorted order, for registry lookups.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .requirements
            .iter()
            .filter(|r| r.has_name_identity())
            .map(Requirement::name)
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

fn compare_by_name(a: &Requirement, b: &Requirement) -> Ordering {
    a.name.cmp(&b.name).then_with(|| a.specs.cmp(&b.specs))
}

impl<'a> IntoIterator for &'a RequirementCollection {
    type Item = &'a Requirement;
    type IntoIter = std::slice::Iter<'a, Requirement>;

    fn into_iter(self) -> Self::IntoIter {
        self.requirements.iter()
    }
}

impl FromIterator<Requirement> for RequirementCollection {
    fn from_iter<T: IntoIterator<Item = Requirement>>(iter: T) -> Self {
        Self {
            requirements: iter.into_iter().collect(),
        }
    }
}
