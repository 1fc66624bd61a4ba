//! Add command implementation.
//!
//! The `reqz add` command adds requirement lines to the file, replacing any
//! entry for the same package. Nothing is written unless every line is valid.

use std::fs;

use tracing::debug;

use crate::cli::args::AddArgs;
use crate::error::{ReqzError, Result};
use crate::requirements::{AddOutcome, Requirement};
use crate::ui::{Prompt, UserInterface};

use super::context::CommandContext;
use super::dispatcher::{Command, CommandResult};

/// The add command implementation.
pub struct AddCommand<'a> {
    context: &'a CommandContext,
    args: AddArgs,
}

impl<'a> AddCommand<'a> {
    /// Create a new add command.
    pub fn new(context: &'a CommandContext, args: AddArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &AddArgs {
        &self.args
    }

    /// Make sure the requirements file exists, offering to create it.
    ///
    /// Returns `false` when the user declines.
    fn ensure_file_exists(&self, ui: &mut dyn UserInterface) -> Result<bool> {
        let path = self.context.file();
        if path.is_file() {
            debug!("File exists: {}", path.display());
            return Ok(true);
        }

        ui.message(&format!("This file doesn't exist yet: {}", path.display()));
        let prompt = Prompt::new("create_file", "Would you like to create it?", false);
        if !ui.confirm(&prompt)? {
            ui.message("User cancelled.");
            return Ok(false);
        }

        fs::write(path, "")
            .map_err(|e| ReqzError::from_file_error(e, path, "Error creating file"))?;
        debug!("Created an empty {}", path.display());
        Ok(true)
    }
}

impl Command for AddCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if !self.ensure_file_exists(ui)? {
            return Ok(CommandResult::failure(1));
        }

        let mut requirements = self.context.load_requirements()?;
        let mut messages = Vec::with_capacity(self.args.lines.len());
        for line in &self.args.lines {
            let requirement = match Requirement::parse(line) {
                Ok(requirement) => requirement,
                Err(e) => {
                    ui.error(&e.to_string());
                    return Ok(CommandResult::failure(1));
                }
            };
            let shown = requirement.to_string();
            match requirements.add_or_replace_requirement(requirement) {
                Ok(AddOutcome::Added) => messages.push(format!("Added requirement: {}", shown)),
                Ok(AddOutcome::Replaced) => {
                    messages.push(format!("Replaced requirement with: {}", shown))
                }
                Err(e @ ReqzError::DuplicateConflict { .. }) => {
                    ui.error(&e.to_string());
                    return Ok(CommandResult::failure(1));
                }
                Err(e) => return Err(e),
            }
        }

        requirements.write(self.context.file())?;
        for message in &messages {
            ui.success(message);
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn setup(content: Option<&str>) -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("requirements.txt");
        if let Some(content) = content {
            fs::write(&path, content).unwrap();
        }
        (temp, path)
    }

    fn add(lines: &[&str]) -> AddArgs {
        AddArgs {
            lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }

    #[test]
    fn adds_and_sorts() {
        let (_temp, path) = setup(Some("six\n"));
        let ctx = CommandContext::new(&path);
        let mut ui = MockUI::new();

        let result = AddCommand::new(&ctx, add(&["docopt>=0.6.2"]))
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui.has_success("Added requirement: docopt >= 0.6.2"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "docopt >= 0.6.2\nsix\n");
        assert!(!path.with_file_name("requirements.txt.bak").exists());
    }

    #[test]
    fn replaces_existing_entry() {
        let (_temp, path) = setup(Some("docopt >= 0.6.0\n"));
        let ctx = CommandContext::new(&path);
        let mut ui = MockUI::new();

        AddCommand::new(&ctx, add(&["docopt >= 0.6.2"]))
            .execute(&mut ui)
            .unwrap();

        assert!(ui.has_success("Replaced requirement with: docopt >= 0.6.2"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "docopt >= 0.6.2\n");
    }

    #[test]
    fn identical_entry_is_rejected_without_writing() {
        let original = "docopt >= 0.6.2\nsix\n";
        let (_temp, path) = setup(Some(original));
        let ctx = CommandContext::new(&path);
        let mut ui = MockUI::new();

        let result = AddCommand::new(&ctx, add(&["pytest", "docopt>=0.6.2"]))
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("Already a requirement: docopt >= 0.6.2"));
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn invalid_line_aborts_before_writing() {
        let original = "six\n";
        let (_temp, path) = setup(Some(original));
        let ctx = CommandContext::new(&path);
        let mut ui = MockUI::new();

        let result = AddCommand::new(&ctx, add(&["docopt", "bad ~= 1"]))
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("bad ~= 1"));
        assert!(ui.successes().is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn creates_missing_file_when_confirmed() {
        let (_temp, path) = setup(None);
        let ctx = CommandContext::new(&path);
        let mut ui = MockUI::new();
        ui.set_prompt_response("create_file", true);

        let result = AddCommand::new(&ctx, add(&["six"])).execute(&mut ui).unwrap();

        assert!(result.success);
        assert_eq!(ui.prompts_shown(), ["create_file"]);
        assert_eq!(fs::read_to_string(&path).unwrap(), "six\n");
    }

    #[test]
    fn declined_creation_is_cancelled() {
        let (_temp, path) = setup(None);
        let ctx = CommandContext::new(&path);
        let mut ui = MockUI::new();
        ui.set_prompt_response("create_file", false);

        let result = AddCommand::new(&ctx, add(&["six"])).execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_message("User cancelled."));
        assert!(!path.exists());
    }

    #[test]
    fn non_interactive_does_not_create() {
        let (_temp, path) = setup(None);
        let ctx = CommandContext::new(&path);
        let mut ui = MockUI::new();
        ui.set_interactive(false);

        let result = AddCommand::new(&ctx, add(&["six"])).execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(!path.exists());
    }

    #[test]
    fn several_lines_in_one_go() {
        let (_temp, path) = setup(Some(""));
        let ctx = CommandContext::new(&path);
        let mut ui = MockUI::new();

        AddCommand::new(&ctx, add(&["six", "attrs[tests] >= 20"]))
            .execute(&mut ui)
            .unwrap();

        assert_eq!(ui.successes().len(), 2);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "attrs[tests] >= 20\nsix\n"
        );
    }
}
