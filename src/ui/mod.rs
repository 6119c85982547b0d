//! Terminal output for fnkit commands.
//!
//! This module provides:
//! - [`UserInterface`] trait so commands can be tested without a terminal
//! - [`TerminalUI`] writing styled output to stdout/stderr
//! - [`MockUI`] capturing everything for assertions
//!
//! # Example
//!
//! ```
//! use fnkit::ui::{create_ui, OutputMode, UserInterface};
//!
//! let mut ui = create_ui(OutputMode::Quiet);
//! ui.show_header("Templates");
//! ui.success("Project created");
//! ```

pub mod mock;
pub mod output;
pub mod table;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use table::Table;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, FnkitTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message. Shown in every mode.
    fn error(&mut self, msg: &str);

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show a follow-up hint (e.g. the next command to run).
    fn show_hint(&mut self, hint: &str);

    /// Write machine-readable output (JSON, descriptors). Shown in every mode.
    fn data(&mut self, text: &str);
}
