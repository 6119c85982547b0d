//! Export command implementation.
//!
//! The `fnkit export <NAME>` command writes a template as a descriptor, ready
//! to be edited and dropped into the override directory.

use crate::cli::args::ExportArgs;
use crate::error::{FnkitError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult, EXIT_UNKNOWN_TEMPLATE};

/// The export command implementation.
pub struct ExportCommand {
    context: CommandContext,
    args: ExportArgs,
}

impl ExportCommand {
    /// Create a new export command.
    pub fn new(context: CommandContext, args: ExportArgs) -> Self {
        Self { context, args }
    }
}

impl Command for ExportCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let registry = self.context.registry()?;
        let template = match registry.resolve(&self.args.name) {
            Ok((template, _)) => template,
            Err(e @ FnkitError::UnknownTemplate { .. }) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(EXIT_UNKNOWN_TEMPLATE));
            }
            Err(e) => return Err(e),
        };

        match &self.args.output {
            Some(path) => {
                template.save_as(path)?;
                ui.success(&format!(
                    "Wrote '{}' to {}",
                    self.args.name,
                    path.display()
                ));
            }
            None => ui.data(&template.to_descriptor()?),
        }
        Ok(CommandResult::success())
    }
}
