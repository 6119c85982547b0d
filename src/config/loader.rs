//! Settings file discovery and loading.
//!
//! Settings live in `~/.fnkit/config.yml`. A missing file means defaults.

use crate::error::{FnkitError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Default time budget for one template's availability probes.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;

/// User settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory of override templates; `~/.fnkit/templates` when unset
    pub templates_dir: Option<PathBuf>,

    /// Seconds allowed for each template's availability probes
    pub probe_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            templates_dir: None,
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Load settings from the user's config file, if any.
    pub fn load() -> Result<Self> {
        match user_config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load settings from `path`; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|e| FnkitError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// The override directory to scan, falling back to `~/.fnkit/templates`.
    ///
    /// `None` only when no directory is configured and the home directory
    /// cannot be determined.
    pub fn resolved_templates_dir(&self) -> Option<PathBuf> {
        self.templates_dir.clone().or_else(default_templates_dir)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

/// `~/.fnkit`
pub fn fnkit_home() -> Option<PathBuf> {
    Some(dirs::home_dir()?.join(".fnkit"))
}

/// `~/.fnkit/config.yml`
pub fn user_config_path() -> Option<PathBuf> {
    Some(fnkit_home()?.join("config.yml"))
}

/// `~/.fnkit/templates`
pub fn default_templates_dir() -> Option<PathBuf> {
    Some(fnkit_home()?.join("templates"))
}
