//! Packages command implementation.
//!
//! The `reqz packages` command lists every installed package, by name or
//! by install location.

use crate::cli::args::PackagesArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::context::CommandContext;
use super::dispatcher::{Command, CommandResult};
use super::display::package_line;

/// The packages command implementation.
pub struct PackagesCommand<'a> {
    context: &'a CommandContext,
    args: PackagesArgs,
}

impl<'a> PackagesCommand<'a> {
    /// Create a new packages command.
    pub fn new(context: &'a CommandContext, args: PackagesArgs) -> Self {
        Self { context, args }
    }
}

impl Command for PackagesCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let installed = self.context.installed_packages()?;
        let packages = if self.args.location {
            installed.sorted_by_location()
        } else {
            installed.sorted_by_name()
        };

        let theme = self.context.theme();
        for package in packages {
            ui.message(&package_line(package, theme));
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReqzError;
    use crate::packages::{InstalledPackage, PackageSource};
    use crate::ui::MockUI;

    struct FixedPackages;

    impl PackageSource for FixedPackages {
        fn list_installed(&self, _local_only: bool) -> Result<Vec<InstalledPackage>> {
            Ok(vec![
                InstalledPackage::new("six", "1.16.0", "/a"),
                InstalledPackage::new("Docopt", "0.6.2", "/b"),
                InstalledPackage::new("attrs", "23.1.0", "/b"),
            ])
        }
    }

    struct BrokenPip;

    impl PackageSource for BrokenPip {
        fn list_installed(&self, _local_only: bool) -> Result<Vec<InstalledPackage>> {
            Err(ReqzError::PackageQuery {
                message: "no pip".into(),
            })
        }
    }

    fn names(ui: &MockUI) -> Vec<String> {
        ui.messages()
            .iter()
            .map(|m| m.split_whitespace().next().unwrap().to_string())
            .collect()
    }

    #[test]
    fn sorted_by_name() {
        let ctx = CommandContext::new("unused").with_package_source(Box::new(FixedPackages));
        let mut ui = MockUI::new();
        let result = PackagesCommand::new(&ctx, PackagesArgs::default())
            .execute(&mut ui)
            .unwrap();
        assert!(result.success);
        assert_eq!(names(&ui), ["attrs", "Docopt", "six"]);
    }

    #[test]
    fn sorted_by_location_keeps_name_order() {
        let ctx = CommandContext::new("unused").with_package_source(Box::new(FixedPackages));
        let mut ui = MockUI::new();
        PackagesCommand::new(&ctx, PackagesArgs { location: true })
            .execute(&mut ui)
            .unwrap();
        assert_eq!(names(&ui), ["six", "attrs", "Docopt"]);
    }

    #[test]
    fn query_failure_propagates() {
        let ctx = CommandContext::new("unused").with_package_source(Box::new(BrokenPip));
        let mut ui = MockUI::new();
        let err = PackagesCommand::new(&ctx, PackagesArgs::default())
            .execute(&mut ui)
            .unwrap_err();
        assert!(err.to_string().contains("Unable to retrieve packages with pip"));
    }
}
