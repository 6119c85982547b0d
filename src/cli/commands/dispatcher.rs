//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandContext`] with the settings every command shares
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::args::{Cli, Commands};
use crate::config::Settings;
use crate::error::Result;
use crate::registry::Registry;
use crate::ui::UserInterface;

/// Exit code for a template name that is not in the registry.
pub const EXIT_UNKNOWN_TEMPLATE: i32 = 2;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Where templates come from and how long probes may take.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Override directory; `None` means the embedded catalog alone.
    pub templates_dir: Option<PathBuf>,

    /// Default time budget for one template's probes.
    pub probe_timeout: Duration,
}

impl CommandContext {
    /// Resolve the context from the `--templates-dir` flag and user settings.
    pub fn new(templates_dir: Option<PathBuf>, settings: &Settings) -> Self {
        Self {
            templates_dir: templates_dir.or_else(|| settings.resolved_templates_dir()),
            probe_timeout: settings.probe_timeout(),
        }
    }

    /// Build the merged registry.
    pub fn registry(&self) -> Result<Registry> {
        match &self.templates_dir {
            Some(dir) => Registry::load(dir),
            None => Registry::builtin_only(),
        }
    }

    /// Per-command timeout override in seconds, else the configured default.
    pub fn timeout(&self, secs: Option<u64>) -> Duration {
        secs.map(Duration::from_secs).unwrap_or(self.probe_timeout)
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: CommandContext,
}

impl CommandDispatcher {
    /// Create a new dispatcher sharing `context` with every command.
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }

    /// Override directory in use, if any.
    pub fn templates_dir(&self) -> Option<&Path> {
        self.context.templates_dir.as_deref()
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::List(args) => {
                let cmd = super::list::ListCommand::new(self.context.clone(), args.clone());
                cmd.execute(ui)
            }
            Commands::Show(args) => {
                let cmd = super::show::ShowCommand::new(self.context.clone(), args.clone());
                cmd.execute(ui)
            }
            Commands::New(args) => {
                let cmd = super::new::NewCommand::new(self.context.clone(), args.clone());
                cmd.execute(ui)
            }
            Commands::Export(args) => {
                let cmd = super::export::ExportCommand::new(self.context.clone(), args.clone());
                cmd.execute(ui)
            }
            Commands::Completions(args) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
        }
    }
}
