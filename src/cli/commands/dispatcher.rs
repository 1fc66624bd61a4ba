//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{CheckArgs, Commands};
use crate::error::Result;
use crate::ui::UserInterface;

use super::context::CommandContext;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Success when `count` is zero, otherwise a failure exiting with `count`.
    pub fn from_count(count: usize) -> Self {
        if count == 0 {
            Self::success()
        } else {
            Self::failure(i32::try_from(count).unwrap_or(i32::MAX))
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: CommandContext,
}

impl CommandDispatcher {
    /// Create a new dispatcher over `context`.
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }

    /// Get the shared command context.
    pub fn context(&self) -> &CommandContext {
        &self.context
    }

    /// Dispatch and execute a command.
    ///
    /// With no subcommand, requirements are checked with default options.
    pub fn dispatch(
        &self,
        command: Option<&Commands>,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let ctx = &self.context;
        match command {
            Some(Commands::Check(args)) => {
                super::check::CheckCommand::new(ctx, args.clone()).execute(ui)
            }
            Some(Commands::Add(args)) => super::add::AddCommand::new(ctx, args.clone()).execute(ui),
            Some(Commands::Duplicates) => super::duplicates::DuplicatesCommand::new(ctx).execute(ui),
            Some(Commands::List) => super::list::ListCommand::new(ctx).execute(ui),
            Some(Commands::Packages(args)) => {
                super::packages::PackagesCommand::new(ctx, args.clone()).execute(ui)
            }
            Some(Commands::Search(args)) => {
                super::search::SearchCommand::new(ctx, args.clone()).execute(ui)
            }
            Some(Commands::Sort) => super::sort::SortCommand::new(ctx).execute(ui),
            Some(Commands::Info(args)) => {
                super::info::InfoCommand::new(ctx, args.clone()).execute(ui)
            }
            None => super::check::CheckCommand::new(ctx, CheckArgs::default()).execute(ui),
        }
    }
}
