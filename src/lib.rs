//! fnkit - Starter templates for serverless function projects.
//!
//! fnkit keeps a catalog of starter templates (Python, Node JS, PHP, Nim)
//! compiled into the binary, lets a directory of JSON descriptors override or
//! extend it, checks whether the host has the tools a template needs, and
//! writes a chosen template out as a new project.
//!
//! # Modules
//!
//! - [`availability`] - Host probes with cancellation and deadlines
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - User settings
//! - [`error`] - Error types and result aliases
//! - [`manifest`] - The function manifest written into every project
//! - [`registry`] - Template catalog: embedded kits, overrides, merging
//! - [`scaffold`] - Writing a template to disk and running its build action
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use fnkit::availability::{is_available, Operation};
//! use fnkit::registry::list_templates;
//! use std::time::Duration;
//! use tempfile::TempDir;
//!
//! let overrides = TempDir::new().unwrap();
//! let registry = list_templates(overrides.path()).unwrap();
//!
//! let php = registry.get("PHP").unwrap();
//! let op = Operation::with_timeout(Duration::from_secs(5));
//! println!("PHP usable here: {}", is_available(php, &op));
//! ```

pub mod availability;
pub mod cli;
pub mod config;
pub mod error;
pub mod manifest;
pub mod registry;
pub mod scaffold;
pub mod ui;

pub use error::{FnkitError, Result};
