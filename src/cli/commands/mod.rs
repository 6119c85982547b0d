//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations and hands each one the shared
//! [`CommandContext`].

pub mod completions;
pub mod dispatcher;
pub mod export;
pub mod list;
pub mod new;
pub mod show;

pub use dispatcher::{
    Command, CommandContext, CommandDispatcher, CommandResult, EXIT_UNKNOWN_TEMPLATE,
};
