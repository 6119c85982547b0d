//! List command implementation.
//!
//! The `fnkit list` command lists every template in the merged registry.

use serde::Serialize;

use crate::availability;
use crate::cli::args::ListArgs;
use crate::error::{FnkitError, Result};
use crate::registry::{Registry, TemplateSource};
use crate::ui::{FnkitTheme, Table, UserInterface};

use super::dispatcher::{Command, CommandContext, CommandResult};

/// One row of `fnkit list`.
#[derive(Debug, Clone, Serialize)]
pub struct ListEntry {
    pub name: String,
    pub source: TemplateSource,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

/// The list command implementation.
pub struct ListCommand {
    context: CommandContext,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(context: CommandContext, args: ListArgs) -> Self {
        Self { context, args }
    }

    /// Collect the rows, probing the host when `--check` is set.
    pub fn entries(&self, registry: &Registry) -> Vec<ListEntry> {
        let availability = self.args.check.then(|| {
            availability::check_all(registry, self.context.timeout(self.args.timeout))
        });

        registry
            .names()
            .into_iter()
            .filter_map(|name| {
                let (template, source) = registry.resolve(name).ok()?;
                Some(ListEntry {
                    name: name.to_string(),
                    source,
                    description: template.description.clone(),
                    available: availability
                        .as_ref()
                        .map(|results| results.get(name).copied().unwrap_or(false)),
                })
            })
            .collect()
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let registry = self.context.registry()?;
        let entries = self.entries(&registry);

        if self.args.json {
            let json = serde_json::to_string_pretty(&entries)
                .map_err(|e| FnkitError::Other(e.into()))?;
            ui.data(&json);
            return Ok(CommandResult::success());
        }

        let theme = FnkitTheme::detect();
        let mut headers = vec!["NAME", "SOURCE", "DESCRIPTION"];
        if self.args.check {
            headers.insert(1, "AVAILABLE");
        }
        let mut table = Table::new(&headers);
        for entry in &entries {
            let mut row = vec![
                theme.highlight.apply_to(&entry.name).to_string(),
                entry.source.to_string(),
                theme.dim.apply_to(&entry.description).to_string(),
            ];
            if let Some(available) = entry.available {
                row.insert(1, theme.format_availability(available));
            }
            table.add_row(row);
        }

        ui.show_header("Templates");
        for line in table.render() {
            ui.message(&line);
        }
        if let Some(dir) = &self.context.templates_dir {
            if ui.output_mode().shows_details() {
                ui.message(&format!("Overrides: {}", dir.display()));
            }
        }

        Ok(CommandResult::success())
    }
}
