//! Backup-on-write file replacement.
//!
//! A [`SafeWriter`] copies the target to `<target>.bak`, writes the new
//! content to `<target>.tmp`, and renames it over the target. The backup is
//! removed once the rename succeeds. If anything fails after the backup was
//! taken, the backup is left in place and its path is reported in the error;
//! nothing is rolled back automatically.
//!
//! A symlinked target is written through: the backup, temp file and rename
//! all happen next to the file the link points at, and the link is kept.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{ReqzError, Result};

/// Where a [`SafeWriter`] is in its write cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteState {
    /// Nothing has been done, or the target did not exist so no backup was needed.
    NoBackup,
    /// The target was copied to `backup`.
    BackedUp { backup: PathBuf },
    /// The new content is in place; the backup (if any) still exists.
    Written { backup: Option<PathBuf> },
    /// The new content is in place and the backup is gone.
    Committed,
    /// The write failed. The target is unchanged and `backup`, if any, remains.
    Failed { backup: Option<PathBuf> },
}

/// Replaces a file's content, keeping a backup until the write succeeds.
#[derive(Debug)]
pub struct SafeWriter {
    target: PathBuf,
    state: WriteState,
}

impl SafeWriter {
    /// Create a writer for `target`.
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            state: WriteState::NoBackup,
        }
    }

    /// The file being written.
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// `<target>.bak`, next to the resolved target.
    pub fn backup_path(&self) -> PathBuf {
        sibling_with_suffix(&self.resolved_target(), ".bak")
    }

    fn temp_path(&self) -> PathBuf {
        sibling_with_suffix(&self.resolved_target(), ".tmp")
    }

    /// The file a symlinked target points at, or the target itself.
    fn resolved_target(&self) -> PathBuf {
        let is_link = fs::symlink_metadata(&self.target)
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false);
        if !is_link {
            return self.target.clone();
        }
        match fs::canonicalize(&self.target) {
            Ok(path) => path,
            Err(e) => {
                warn!("Cannot resolve link {}: {}", self.target.display(), e);
                self.target.clone()
            }
        }
    }

    /// Current state.
    pub fn state(&self) -> &WriteState {
        &self.state
    }

    /// Replace the target's content with `content`.
    pub fn write(&mut self, content: &str) -> Result<()> {
        self.write_with(|out| out.write_all(content.as_bytes()))
    }

    /// Replace the target's content with whatever `fill` writes.
    ///
    /// An error from `fill` is treated exactly like a failed disk write.
    pub fn write_with<F>(&mut self, fill: F) -> Result<()>
    where
        F: FnOnce(&mut dyn Write) -> io::Result<()>,
    {
        let backup = self.take_backup()?;

        if let Err(source) = self.replace_target(fill) {
            let temp = self.temp_path();
            if temp.exists() {
                fs::remove_file(&temp).ok();
            }
            match &backup {
                Some(path) => warn!("A backup file was saved: {}", path.display()),
                None => warn!("No backup was saved!"),
            }
            self.state = WriteState::Failed {
                backup: backup.clone(),
            };
            return Err(ReqzError::WriteFailed {
                path: self.target.clone(),
                backup,
                source,
            });
        }
        self.state = WriteState::Written {
            backup: backup.clone(),
        };

        if let Some(path) = backup {
            debug!("Removing backup file: {}", path.display());
            if let Err(e) = fs::remove_file(&path) {
                // The new content is already in place; only the backup lingers.
                warn!("Failed to remove backup file {}: {}", path.display(), e);
                return Ok(());
            }
        }
        self.state = WriteState::Committed;
        Ok(())
    }

    fn take_backup(&mut self) -> Result<Option<PathBuf>> {
        if !self.target.exists() {
            debug!("No existing file to back up: {}", self.target.display());
            return Ok(None);
        }
        let backup = self.backup_path();
        debug!("Creating backup file: {}", backup.display());
        fs::copy(&self.target, &backup).map_err(|source| ReqzError::BackupFailed {
            path: self.target.clone(),
            source,
        })?;
        self.state = WriteState::BackedUp {
            backup: backup.clone(),
        };
        Ok(Some(backup))
    }

    fn replace_target<F>(&self, fill: F) -> io::Result<()>
    where
        F: FnOnce(&mut dyn Write) -> io::Result<()>,
    {
        let target = self.resolved_target();
        let temp = self.temp_path();
        debug!("Opening file for write: {}", temp.display());
        let mut out = BufWriter::new(File::create(&temp)?);
        fill(&mut out)?;
        let file = out.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        drop(file);

        if let Ok(metadata) = fs::metadata(&target) {
            fs::set_permissions(&temp, metadata.permissions())?;
        }
        fs::rename(&temp, &target)
    }
}

fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
