//! Sort command implementation.

use crate::error::Result;
use crate::ui::UserInterface;

use super::context::CommandContext;
use super::dispatcher::{Command, CommandResult};

/// Rewrites the requirements file sorted by name.
pub struct SortCommand<'a> {
    context: &'a CommandContext,
}

impl<'a> SortCommand<'a> {
    pub fn new(context: &'a CommandContext) -> Self {
        Self { context }
    }
}

impl Command for SortCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let path = self.context.file();
        self.context.load_requirements()?.write(path)?;
        ui.success(&format!("Sorted requirements file: {}", path.display()));
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
    fn sorts_and_drops_comments() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("requirements.txt");
        fs::write(&path, "six\n\n# web\nflask>=2\ndocopt\n").unwrap();

        let ctx = CommandContext::new(&path);
        let mut ui = MockUI::new();
        let result = SortCommand::new(&ctx).execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_success("Sorted requirements file"));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "docopt\nflask >= 2\nsix\n"
        );
    }

    #[test]
    fn parse_error_leaves_file_alone() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("requirements.txt");
        fs::write(&path, "six\nnot a requirement\n").unwrap();

        let ctx = CommandContext::new(&path);
        let mut ui = MockUI::new();
        assert!(SortCommand::new(&ctx).execute(&mut ui).is_err());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "six\nnot a requirement\n"
        );
    }
}
