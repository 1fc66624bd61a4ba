//! Check command implementation.
//!
//! The `reqz check` command (also the default) prints a status line per
//! requirement and exits with the number of unsatisfied ones.

use crate::cli::args::CheckArgs;
use crate::error::Result;
use crate::registry::RegistryClient;
use crate::requirements::{error_count, SatisfactionEngine, Status};
use crate::ui::UserInterface;

use super::context::CommandContext;
use super::dispatcher::{Command, CommandResult};
use super::display::{aligned_requirement, latest_suffix, status_line};

/// The check command implementation.
pub struct CheckCommand<'a> {
    context: &'a CommandContext,
    args: CheckArgs,
}

impl<'a> CheckCommand<'a> {
    /// Create a new check command.
    pub fn new(context: &'a CommandContext, args: CheckArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &CheckArgs {
        &self.args
    }

    /// Print the selected statuses. Returns the number of failed registry
    /// lookups.
    fn report(
        &self,
        ui: &mut dyn UserInterface,
        engine: &SatisfactionEngine<'_>,
        statuses: &mut [Status],
        registry: Option<&dyn RegistryClient>,
    ) -> usize {
        let theme = self.context.theme();
        let mut lookup_failures = 0;

        for status in statuses.iter_mut() {
            if self.args.errors && !status.is_error() {
                continue;
            }
            if self.args.spec_only {
                ui.message(&aligned_requirement(&status.requirement, theme));
                continue;
            }

            let mut line = status_line(status, theme);
            if let Some(registry) = registry.filter(|_| status.requirement.has_name_identity()) {
                match engine.check_latest(status, registry) {
                    Ok(latest) => {
                        line.push(' ');
                        line.push_str(&latest_suffix(latest, theme));
                    }
                    Err(e) => {
                        ui.error(&e.to_string());
                        lookup_failures += 1;
                    }
                }
            }
            if self.args.location {
                let location = status
                    .location
                    .as_ref()
                    .map(|l| l.display().to_string())
                    .unwrap_or_else(|| "Not Installed".to_string());
                line.push(' ');
                line.push_str(&theme.location.apply_to(location).to_string());
            }
            ui.message(line.trim_end());
        }

        lookup_failures
    }
}

impl Command for CheckCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let requirements = self.context.load_requirements()?;
        if requirements.is_empty() {
            ui.message("Requirements file is empty.");
            return Ok(CommandResult::failure(1));
        }

        let installed = self.context.installed_packages()?;
        let engine = SatisfactionEngine::new(&installed).with_policy(self.context.policy());
        let mut statuses = engine.check_all(&requirements);
        let errors = error_count(&statuses);

        let lookup_failures = if self.args.latest {
            self.context.with_registry_client(|registry| {
                self.report(ui, &engine, &mut statuses, Some(registry))
            })?
        } else {
            self.report(ui, &engine, &mut statuses, None)
        };

        Ok(CommandResult::from_count(errors + lookup_failures))
    }
}
