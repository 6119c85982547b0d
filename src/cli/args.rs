//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// fnkit - Scaffold serverless function projects from templates.
#[derive(Debug, Parser)]
#[command(name = "fnkit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory of override template descriptors (<name>.json)
    #[arg(long, global = true, env = "FNKIT_TEMPLATES_DIR", value_name = "DIR")]
    pub templates_dir: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List available templates
    List(ListArgs),

    /// Show one template in detail
    Show(ShowArgs),

    /// Create a new function project from a template
    New(NewArgs),

    /// Write a template as a descriptor file
    Export(ExportArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Probe the host and report which templates can run here
    #[arg(long)]
    pub check: bool,

    /// Seconds allowed for each template's probes
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `show` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ShowArgs {
    /// Template name
    pub name: String,

    /// Output the full template as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `new` command.
#[derive(Debug, Clone, clap::Args)]
pub struct NewArgs {
    /// Directory to create the project in
    pub dir: PathBuf,

    /// Template name
    #[arg(short, long)]
    pub template: String,

    /// Do not run the template's post-clone action
    #[arg(long)]
    pub skip_post_clone: bool,

    /// Write into a non-empty directory
    #[arg(short, long)]
    pub force: bool,

    /// Do not probe the host before creating the project
    #[arg(long)]
    pub skip_check: bool,

    /// Seconds allowed for the template's probes
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

/// Arguments for the `export` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ExportArgs {
    /// Template name
    pub name: String,

    /// File to write (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
