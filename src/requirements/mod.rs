//! Requirements: parsing, collections, and satisfaction checking.
//!
//! # Modules
//!
//! - [`version`] - Loose version parsing and comparison
//! - [`requirement`] - The requirement value type and its operators
//! - [`parser`] - Requirement line grammar
//! - [`collection`] - Ordered requirement lists backed by a file
//! - [`status`] - Per-requirement check results
//! - [`checker`] - The satisfaction engine

pub mod checker;
pub mod collection;
pub mod parser;
pub mod requirement;
pub mod status;
pub mod version;

pub use checker::{error_count, SatisfactionEngine, SatisfactionPolicy};
pub use collection::{AddOutcome, Duplicate, RequirementCollection};
pub use requirement::{Operator, Requirement, RequirementKind, Spec};
pub use status::{LatestStatus, MatchKind, Satisfaction, Status};
pub use version::Version;
