//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. All of them share one
//! [`CommandContext`] holding the global options and data sources.

pub mod add;
pub mod check;
pub mod context;
pub mod dispatcher;
pub mod display;
pub mod duplicates;
pub mod info;
pub mod list;
pub mod packages;
pub mod search;
pub mod sort;

pub use context::CommandContext;
pub use dispatcher::{Command, CommandDispatcher, CommandResult};
