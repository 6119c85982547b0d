//! Show command implementation.
//!
//! The `fnkit show <NAME>` command prints one template in detail.

use crate::cli::args::ShowArgs;
use crate::error::{FnkitError, Result};
use crate::manifest::go_duration::format_duration;
use crate::registry::{builtin, Template, TemplateSource};
use crate::ui::{FnkitTheme, UserInterface};

use super::dispatcher::{Command, CommandContext, CommandResult, EXIT_UNKNOWN_TEMPLATE};

/// The show command implementation.
pub struct ShowCommand {
    context: CommandContext,
    args: ShowArgs,
}

impl ShowCommand {
    /// Create a new show command.
    pub fn new(context: CommandContext, args: ShowArgs) -> Self {
        Self { context, args }
    }

    fn render(&self, template: &Template, source: TemplateSource, ui: &mut dyn UserInterface) {
        let theme = FnkitTheme::detect();
        let key = |label: &str| theme.key.apply_to(format!("{:<12}", label)).to_string();
        let manifest = &template.manifest;

        ui.show_header(&self.args.name);
        if !template.description.is_empty() {
            ui.message(&format!("  {}", theme.dim.apply_to(&template.description)));
        }
        if source == TemplateSource::Directory && builtin::has_template(&self.args.name) {
            ui.message(&format!("  {}{} (replaces built-in)", key("Source:"), source));
        } else {
            ui.message(&format!("  {}{}", key("Source:"), source));
        }
        if !manifest.run.is_empty() {
            ui.message(&format!("  {}{}", key("Run:"), manifest.run.join(" ")));
        }
        if !manifest.time_limit.is_zero() {
            ui.message(&format!(
                "  {}{}",
                key("Time limit:"),
                format_duration(manifest.time_limit)
            ));
        }
        if manifest.maximum_payload > 0 {
            ui.message(&format!(
                "  {}{} bytes",
                key("Max payload:"),
                manifest.maximum_payload
            ));
        }
        if let Some(action) = &template.post_clone {
            ui.message(&format!("  {}make {}", key("Post-clone:"), action));
        }

        if template.check.is_empty() {
            ui.message(&format!("  {}none", key("Checks:")));
        } else {
            ui.message(&format!("  {}", key("Checks:")));
            for probe in &template.check {
                ui.message(&format!("    {}", probe.join(" ")));
            }
        }

        ui.message(&format!("  {}", key("Files:")));
        for (path, content) in &template.files {
            ui.message(&format!(
                "    {} {}",
                path,
                theme.dim.apply_to(format!("({} bytes)", content.len()))
            ));
        }
    }
}

impl Command for ShowCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let registry = self.context.registry()?;
        let (template, source) = match registry.resolve(&self.args.name) {
            Ok(found) => found,
            Err(e @ FnkitError::UnknownTemplate { .. }) => {
                ui.error(&e.to_string());
                ui.show_hint("Run 'fnkit list' to see available templates");
                return Ok(CommandResult::failure(EXIT_UNKNOWN_TEMPLATE));
            }
            Err(e) => return Err(e),
        };

        if self.args.json {
            ui.data(&template.to_descriptor()?);
        } else {
            self.render(template, source, ui);
        }
        Ok(CommandResult::success())
    }
}
