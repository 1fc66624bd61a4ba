//! List command implementation.
//!
//! The `reqz list` command prints every requirement sorted by name.

use crate::error::Result;
use crate::ui::UserInterface;

use super::context::CommandContext;
use super::dispatcher::{Command, CommandResult};
use super::display::aligned_requirement;

/// The list command implementation.
pub struct ListCommand<'a> {
    context: &'a CommandContext,
}

impl<'a> ListCommand<'a> {
    /// Create a new list command.
    pub fn new(context: &'a CommandContext) -> Self {
        Self { context }
    }
}

impl Command for ListCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let requirements = self.context.load_requirements()?;
        let theme = self.context.theme();
        for requirement in requirements.sorted_by_name() {
            ui.message(&aligned_requirement(requirement, theme));
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn lists_sorted_without_touching_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("requirements.txt");
        let content = "six\n# comment\ndocopt >= 0.6.2\n-e ./local\n";
        fs::write(&path, content).unwrap();

        let ctx = CommandContext::new(&path);
        let mut ui = MockUI::new();
        let result = ListCommand::new(&ctx).execute(&mut ui).unwrap();

        assert!(result.success);
        assert_eq!(
            ui.messages(),
            [
                "-e ./local".to_string(),
                format!("{:<30} >= 0.6.2", "docopt"),
                "six".to_string(),
            ]
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn empty_file_lists_nothing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("requirements.txt");
        fs::write(&path, "").unwrap();

        let ctx = CommandContext::new(&path);
        let mut ui = MockUI::new();
        assert!(ListCommand::new(&ctx).execute(&mut ui).unwrap().success);
        assert!(ui.messages().is_empty());
    }
}
