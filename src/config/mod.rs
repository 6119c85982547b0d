//! User settings for fnkit.
//!
//! Settings are read from `~/.fnkit/config.yml`:
//!
//! ```yaml
//! templates_dir: /srv/fn-templates
//! probe_timeout_secs: 5
//! ```
//!
//! Both keys are optional. The `--templates-dir` flag (or
//! `FNKIT_TEMPLATES_DIR`) takes precedence over `templates_dir`.
//!
//! # Example
//!
//! ```
//! use fnkit::config::Settings;
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("config.yml");
//! fs::write(&path, "probe_timeout_secs: 3").unwrap();
//!
//! let settings = Settings::load_from(&path).unwrap();
//! assert_eq!(settings.probe_timeout_secs, 3);
//! ```

pub mod loader;

pub use loader::{
    default_templates_dir, fnkit_home, user_config_path, Settings, DEFAULT_PROBE_TIMEOUT_SECS,
};
