//! Command-line interface for reqz.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{AddArgs, CheckArgs, Cli, Commands, InfoArgs, PackagesArgs, SearchArgs};
pub use commands::{Command, CommandContext, CommandDispatcher, CommandResult};
