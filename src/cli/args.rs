//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::registry::DEFAULT_REGISTRY_URL;

/// reqz - Check and maintain requirements files.
#[derive(Debug, Parser)]
#[command(name = "reqz")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Requirements file to use
    #[arg(
        short,
        long,
        global = true,
        env = "REQZ_FILE",
        default_value = "requirements.txt"
    )]
    pub file: PathBuf,

    /// Base URL of the package registry
    #[arg(long, global = true, env = "REQZ_REGISTRY_URL", default_value = DEFAULT_REGISTRY_URL)]
    pub registry_url: String,

    /// Python interpreter used to list installed packages
    #[arg(long, global = true, env = "REQZ_PYTHON", default_value = "python3")]
    pub python: String,

    /// Ignore globally installed packages when inside a virtualenv
    #[arg(long, global = true)]
    pub local_only: bool,

    /// Require every version spec to hold, not just one of them
    #[arg(long, global = true)]
    pub strict: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check requirements against installed packages (default)
    Check(CheckArgs),

    /// Add or replace requirement lines
    Add(AddArgs),

    /// List requirements that appear more than once
    Duplicates,

    /// List requirements sorted by name
    List,

    /// List installed packages
    Packages(PackagesArgs),

    /// Search requirement lines with a regex
    Search(SearchArgs),

    /// Sort the requirements file by name
    Sort,

    /// Show registry info for packages
    Info(InfoArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Only show requirements that are not satisfied
    #[arg(short, long)]
    pub errors: bool,

    /// Print requirement lines instead of status lines
    #[arg(short = 'r', long)]
    pub spec_only: bool,

    /// Also check the latest release from the registry
    #[arg(short, long)]
    pub latest: bool,

    /// Show where each package is installed
    #[arg(long)]
    pub location: bool,
}

/// Arguments for the `add` command.
#[derive(Debug, Clone, clap::Args)]
pub struct AddArgs {
    /// Requirement lines, e.g. "docopt >= 0.6.2"
    #[arg(required = true)]
    pub lines: Vec<String>,
}

/// Arguments for the `packages` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct PackagesArgs {
    /// Sort by install location
    #[arg(long)]
    pub location: bool,
}

/// Arguments for the `search` command.
#[derive(Debug, Clone, clap::Args)]
pub struct SearchArgs {
    /// Regex matched against each canonical requirement line
    pub pattern: String,

    /// Match case-insensitively
    #[arg(short, long)]
    pub ignore_case: bool,

    /// Show lines that do not match
    #[arg(long)]
    pub invert: bool,
}

/// Arguments for the `info` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InfoArgs {
    /// Packages to look up; defaults to every name in the requirements file
    pub packages: Vec<String>,
}
