//! Error types for fnkit operations.
//!
//! This module defines [`FnkitError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Asset errors mean the binary was packaged wrong and abort catalog construction
//! - Template directory and descriptor errors carry the offending path
//! - A missing dependency on the host is not an error (see [`crate::availability`])
//! - Use `anyhow::Error` (via `FnkitError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for fnkit operations.
#[derive(Debug, Error)]
pub enum FnkitError {
    /// A compiled-in asset root does not exist.
    #[error("Embedded asset root not found: {root}")]
    AssetMissing { root: String },

    /// A compiled-in asset could not be used as template content.
    #[error("Embedded asset {path} is unusable: {message}")]
    AssetInvalid { path: String, message: String },

    /// The template override directory or one of its entries could not be read.
    #[error("Failed to read templates at {path}: {source}")]
    TemplateDirError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A template descriptor file could not be decoded.
    #[error("Failed to parse template at {path}: {message}")]
    TemplateParseError { path: PathBuf, message: String },

    /// A template descriptor decoded fine but describes an unusable template.
    #[error("Invalid template at {path}: {message}")]
    TemplateInvalid { path: PathBuf, message: String },

    /// Referenced template does not exist in the registry.
    #[error("Unknown template: {name}")]
    UnknownTemplate { name: String },

    /// Scaffolding target already has content.
    #[error("Directory is not empty: {path} (use --force to write into it)")]
    ProjectNotEmpty { path: PathBuf },

    /// External command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// Failed to parse the user settings file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for fnkit operations.
pub type Result<T> = std::result::Result<T, FnkitError>;
