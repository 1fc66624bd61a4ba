//! Duplicates command implementation.

use crate::error::Result;
use crate::ui::{pluralize, UserInterface};

use super::context::CommandContext;
use super::dispatcher::{Command, CommandResult};
use super::display::duplicate_line;

/// Lists names that appear more than once. Exits with the total number of
/// extra entries.
pub struct DuplicatesCommand<'a> {
    context: &'a CommandContext,
}

impl<'a> DuplicatesCommand<'a> {
    pub fn new(context: &'a CommandContext) -> Self {
        Self { context }
    }
}

impl Command for DuplicatesCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let duplicates = self.context.load_requirements()?.duplicates();
        if duplicates.is_empty() {
            ui.message("No duplicate requirements found.");
            return Ok(CommandResult::success());
        }

        ui.message(&format!(
            "Found {} {} with duplicate entries:",
            duplicates.len(),
            pluralize(duplicates.len(), "requirement", "requirements")
        ));
        let theme = self.context.theme();
        for duplicate in &duplicates {
            ui.message(&duplicate_line(duplicate, theme));
        }

        Ok(CommandResult::from_count(
            duplicates.iter().map(|d| d.count).sum(),
        ))
    }
}
