//! Search command implementation.
//!
//! The `reqz search` command prints requirement lines matching a regex.
//! Exits 0 when anything matched.

use crate::cli::args::SearchArgs;
use crate::error::{ReqzError, Result};
use crate::ui::{pluralize, UserInterface};

use super::context::CommandContext;
use super::dispatcher::{Command, CommandResult};

/// The search command implementation.
pub struct SearchCommand<'a> {
    context: &'a CommandContext,
    args: SearchArgs,
}

impl<'a> SearchCommand<'a> {
    /// Create a new search command.
    pub fn new(context: &'a CommandContext, args: SearchArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &SearchArgs {
        &self.args
    }
}

impl Command for SearchCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let requirements = self.context.load_requirements()?;
        let matches = match requirements.search_matching(
            &self.args.pattern,
            self.args.ignore_case,
            self.args.invert,
        ) {
            Ok(matches) => matches,
            Err(e @ ReqzError::InvalidPattern { .. }) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(1));
            }
            Err(e) => return Err(e),
        };

        let mut found = 0;
        for requirement in matches {
            ui.message(&requirement.to_string());
            found += 1;
        }
        ui.message(&format!(
            "Found {} {}.",
            found,
            pluralize(found, "entry", "entries")
        ));

        if found > 0 {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}
