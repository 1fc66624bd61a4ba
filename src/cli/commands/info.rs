//! Info command implementation.
//!
//! The `reqz info` command shows registry metadata for the named packages,
//! or for every requirement in the file when none are named.

use crate::cli::args::InfoArgs;
use crate::error::Result;
use crate::registry::RegistryClient;
use crate::ui::UserInterface;

use super::context::CommandContext;
use super::dispatcher::{Command, CommandResult};
use super::display::package_info_lines;

/// The info command implementation.
pub struct InfoCommand<'a> {
    context: &'a CommandContext,
    args: InfoArgs,
}

impl<'a> InfoCommand<'a> {
    /// Create a new info command.
    pub fn new(context: &'a CommandContext, args: InfoArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &InfoArgs {
        &self.args
    }

    /// Show each package in turn. Returns the number of failed lookups.
    fn show_all(
        &self,
        ui: &mut dyn UserInterface,
        registry: &dyn RegistryClient,
        names: &[String],
    ) -> usize {
        let theme = self.context.theme();
        let mut failures = 0;
        for name in names {
            match registry.fetch_package_info(name) {
                Ok(info) => {
                    ui.message("");
                    for line in package_info_lines(&info, theme) {
                        ui.message(&line);
                    }
                }
                Err(e) => {
                    ui.error(&e.to_string());
                    failures += 1;
                }
            }
        }
        failures
    }
}

impl Command for InfoCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let names: Vec<String> = if self.args.packages.is_empty() {
            self.context
                .load_requirements()?
                .names()
                .into_iter()
                .map(str::to_string)
                .collect()
        } else {
            self.args.packages.clone()
        };

        let failures = self
            .context
            .with_registry_client(|registry| self.show_all(ui, registry, &names))?;
        Ok(CommandResult::from_count(failures))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{PackageInfo, RegistryError};
    use crate::ui::MockUI;
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::TempDir;

    struct FakeRegistry;

    impl RegistryClient for FakeRegistry {
        fn fetch_package_info(&self, name: &str) -> std::result::Result<PackageInfo, RegistryError> {
            match name {
                "docopt" | "six" => Ok(PackageInfo {
                    name: name.to_string(),
                    latest_version: "1.0".to_string(),
                    summary: Some(format!("About {}", name)),
                    author: None,
                    author_email: None,
                    homepage: None,
                    release_downloads: BTreeMap::from([("1.0".to_string(), 4)]),
                }),
                _ => Err(RegistryError::NotFound {
                    name: name.to_string(),
                }),
            }
        }
    }

    fn context(path: &std::path::Path) -> CommandContext {
        CommandContext::new(path).with_registry(Box::new(FakeRegistry))
    }

    #[test]
    fn named_packages() {
        let ctx = context(std::path::Path::new("/nonexistent"));
        let args = InfoArgs {
            packages: vec!["docopt".into()],
        };
        let mut ui = MockUI::new();
        let result = InfoCommand::new(&ctx, args).execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("About docopt"));
        assert!(ui.has_message("Latest: 1.0 (4 dls, 4 for all versions)"));
    }

    #[test]
    fn failures_are_counted_and_reported() {
        let ctx = context(std::path::Path::new("/nonexistent"));
        let args = InfoArgs {
            packages: vec!["ghost".into(), "six".into(), "phantom".into()],
        };
        let mut ui = MockUI::new();
        let result = InfoCommand::new(&ctx, args).execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 2);
        assert!(ui.has_error("No info for package: ghost"));
        assert!(ui.has_message("About six"));
    }

    #[test]
    fn defaults_to_requirement_names() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("requirements.txt");
        fs::write(&path, "six\ndocopt >= 0.6\nsix < 2\n-e ./local\n").unwrap();

        let ctx = context(&path);
        let mut ui = MockUI::new();
        let result = InfoCommand::new(&ctx, InfoArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        let headers: Vec<&String> = ui
            .messages()
            .iter()
            .filter(|m| m.starts_with("docopt") || m.starts_with("six"))
            .collect();
        assert_eq!(headers.len(), 2);
        assert!(headers[0].starts_with("docopt"));
    }
}
