//! New command implementation.
//!
//! The `fnkit new <DIR> --template <NAME>` command creates a project:
//! probe the host, write the template, then run its post-clone action.

use crate::availability::{AvailabilityChecker, Operation};
use crate::cli::args::NewArgs;
use crate::error::{FnkitError, Result};
use crate::scaffold::{materialize, run_post_clone, ScaffoldOptions};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult, EXIT_UNKNOWN_TEMPLATE};

/// The new command implementation.
pub struct NewCommand {
    context: CommandContext,
    args: NewArgs,
}

impl NewCommand {
    /// Create a new `new` command.
    pub fn new(context: CommandContext, args: NewArgs) -> Self {
        Self { context, args }
    }
}

impl Command for NewCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let registry = self.context.registry()?;
        let (template, _) = match registry.resolve(&self.args.template) {
            Ok(found) => found,
            Err(e @ FnkitError::UnknownTemplate { .. }) => {
                ui.error(&e.to_string());
                ui.show_hint("Run 'fnkit list' to see available templates");
                return Ok(CommandResult::failure(EXIT_UNKNOWN_TEMPLATE));
            }
            Err(e) => return Err(e),
        };

        let mut available = true;
        if !self.args.skip_check {
            let op = Operation::with_timeout(self.context.timeout(self.args.timeout));
            available = AvailabilityChecker::new().is_available(template, &op);
            if !available {
                ui.warning(&format!(
                    "Template '{}' may not work on this machine (a dependency check failed)",
                    self.args.template
                ));
            }
        }

        let options = ScaffoldOptions {
            force: self.args.force,
        };
        let written = materialize(template, &self.args.dir, &options)?;
        if ui.output_mode().shows_details() {
            for path in &written {
                ui.message(&format!("  {}", path.display()));
            }
        }
        ui.success(&format!(
            "Created {} from template '{}'",
            self.args.dir.display(),
            self.args.template
        ));

        match &template.post_clone {
            Some(action) if !self.args.skip_post_clone => {
                if !available {
                    ui.warning(&format!("Skipping 'make {}': dependency check failed", action));
                    ui.show_hint(&format!(
                        "Install the missing tools, then run 'make {}' in {}",
                        action,
                        self.args.dir.display()
                    ));
                } else {
                    ui.message(&format!("Running 'make {}'", action));
                    run_post_clone(action, &self.args.dir)?;
                    ui.success(&format!("'make {}' finished", action));
                }
            }
            _ => {}
        }

        ui.show_hint(&format!("cd {}", self.args.dir.display()));
        Ok(CommandResult::success())
    }
}
