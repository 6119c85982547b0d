//! Template overrides loaded from a directory of descriptor files.
//!
//! Every `<name>.json` directly inside the directory is one template named
//! `<name>`. Subdirectories and other files are ignored.

use crate::error::{FnkitError, Result};
use crate::registry::template::Template;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// File suffix of template descriptors.
pub const DESCRIPTOR_SUFFIX: &str = ".json";

/// Load every template descriptor in `dir`.
///
/// A directory that does not exist yields an empty map. Any unreadable entry
/// or undecodable descriptor fails the whole scan.
pub fn load_dir(dir: &Path) -> Result<HashMap<String, Template>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(dir = %dir.display(), "template directory absent");
            return Ok(HashMap::new());
        }
        Err(e) => {
            return Err(FnkitError::TemplateDirError {
                path: dir.to_path_buf(),
                source: e,
            })
        }
    };

    let mut templates = HashMap::new();
    for entry in entries {
        let entry = entry.map_err(|e| FnkitError::TemplateDirError {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();

        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        let Some(name) = file_name.strip_suffix(DESCRIPTOR_SUFFIX) else {
            continue;
        };
        if path.is_dir() {
            continue;
        }

        let template = Template::from_path(&path)?;
        debug!(name, path = %path.display(), "loaded template override");
        templates.insert(name.to_string(), template);
    }

    Ok(templates)
}
