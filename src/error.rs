//! Error types for reqz operations.
//!
//! This module defines [`ReqzError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Per-entry failures (`Parse`, `DuplicateConflict`, `InvalidPattern`,
//!   `Registry`) are recoverable and only abort the operation that raised them
//! - Anything touching the requirements file itself (`FileNotFound`,
//!   `PermissionDenied`, `BackupFailed`, `WriteFailed`) is fatal
//! - Use `anyhow::Error` (via `ReqzError::Other`) for unexpected errors

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::registry::RegistryError;

/// A requirement line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid requirement spec: {line} ({reason})")]
pub struct ParseError {
    /// The offending line, as given.
    pub line: String,
    /// Why the line was rejected.
    pub reason: String,
}

impl ParseError {
    pub(crate) fn new(line: &str, reason: impl Into<String>) -> Self {
        Self {
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}

/// Core error type for reqz operations.
#[derive(Debug, Error)]
pub enum ReqzError {
    /// A requirement line is malformed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A malformed line inside a requirements file.
    #[error("{path}:{line_number}: {source}")]
    ParseInFile {
        path: PathBuf,
        line_number: usize,
        source: ParseError,
    },

    /// The requirement is already present with identical specs.
    #[error("Already a requirement: {requirement}")]
    DuplicateConflict { requirement: String },

    /// Search pattern is not a valid regular expression.
    #[error("Invalid regex pattern: {pattern}\n{source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    /// Requirements file does not exist.
    #[error("Requirements file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Requirements file cannot be read or written with current permissions.
    #[error("Invalid permissions for file: {path}")]
    PermissionDenied { path: PathBuf },

    /// Any other failure reading or creating a file.
    #[error("{action}: {path}\n{source}")]
    FileAccess {
        action: String,
        path: PathBuf,
        source: io::Error,
    },

    /// Copying the target to its backup failed; the target was not touched.
    #[error("Failed to backup: {path}\n{source}")]
    BackupFailed { path: PathBuf, source: io::Error },

    /// Writing the target failed after the backup was taken.
    #[error("Failed to write file: {path}\n{source}{}", backup_hint(.backup))]
    WriteFailed {
        path: PathBuf,
        backup: Option<PathBuf>,
        source: io::Error,
    },

    /// The installed-package query failed.
    #[error("Unable to retrieve packages with pip: {message}")]
    PackageQuery { message: String },

    /// A registry lookup failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn backup_hint(backup: &Option<PathBuf>) -> String {
    match backup {
        Some(path) => format!("\nA backup file was saved: {}", path.display()),
        None => "\nNo backup was saved!".to_string(),
    }
}

impl ReqzError {
    /// Classify an IO error raised while working on `path`.
    pub fn from_file_error(err: io::Error, path: &Path, action: &str) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::FileNotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => Self::FileAccess {
                action: action.to_string(),
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

/// Result type alias for reqz operations.
pub type Result<T> = std::result::Result<T, ReqzError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_displays_line() {
        let err = ParseError::new("docopt ~= 1.0", "unknown operator");
        let msg = err.to_string();
        assert!(msg.contains("docopt ~= 1.0"));
        assert!(msg.contains("unknown operator"));
    }

    #[test]
    fn parse_in_file_displays_location() {
        let err = ReqzError::ParseInFile {
            path: PathBuf::from("requirements.txt"),
            line_number: 3,
            source: ParseError::new("???", "no package name"),
        };
        assert!(err.to_string().starts_with("requirements.txt:3:"));
    }

    #[test]
    fn duplicate_conflict_displays_requirement() {
        let err = ReqzError::DuplicateConflict {
            requirement: "six >= 1.0".into(),
        };
        assert_eq!(err.to_string(), "Already a requirement: six >= 1.0");
    }

    #[test]
    fn not_found_maps_to_file_not_found() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err = ReqzError::from_file_error(io_err, Path::new("reqs.txt"), "Failed to read");
        assert!(matches!(err, ReqzError::FileNotFound { .. }));
        assert_eq!(err.to_string(), "Requirements file not found: reqs.txt");
    }

    #[test]
    fn permission_maps_to_permission_denied() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        let err = ReqzError::from_file_error(io_err, Path::new("reqs.txt"), "Failed to read");
        assert!(matches!(err, ReqzError::PermissionDenied { .. }));
    }

    #[test]
    fn other_io_maps_to_file_access_with_action() {
        let io_err = io::Error::other("disk on fire");
        let err = ReqzError::from_file_error(io_err, Path::new("reqs.txt"), "Failed to read");
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to read: reqs.txt"));
        assert!(msg.contains("disk on fire"));
    }

    #[test]
    fn write_failed_reports_backup_path() {
        let err = ReqzError::WriteFailed {
            path: PathBuf::from("reqs.txt"),
            backup: Some(PathBuf::from("reqs.txt.bak")),
            source: io::Error::other("short write"),
        };
        assert!(err.to_string().contains("A backup file was saved: reqs.txt.bak"));
    }

    #[test]
    fn write_failed_without_backup_says_so() {
        let err = ReqzError::WriteFailed {
            path: PathBuf::from("reqs.txt"),
            backup: None,
            source: io::Error::other("short write"),
        };
        assert!(err.to_string().contains("No backup was saved!"));
    }

    #[test]
    fn parse_error_converts_with_question_mark() {
        fn load() -> Result<()> {
            Err(ParseError::new("docopt ~= 1.0", "unknown operator"))?
        }
        let err = load().unwrap_err();
        assert!(matches!(err, ReqzError::Parse(_)));
        assert!(err.to_string().contains("docopt ~= 1.0"));
    }
}
