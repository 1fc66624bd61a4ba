//! Persistence of requirements files.
//!
//! - [`writer`] - Backup-on-write replacement of a file's content

pub mod writer;

pub use writer::{SafeWriter, WriteState};
