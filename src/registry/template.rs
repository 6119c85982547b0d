//! Template schema definitions.
//!
//! A template is a named starter kit: the manifest copied into the new
//! project, the starter files, the probes deciding whether the host can run
//! it, and an optional build action to run after the files are written.

use crate::error::{FnkitError, Result};
use crate::manifest::Manifest;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Component, Path};

/// A starter kit for a new function project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Template {
    /// Short human-readable description
    pub description: String,

    /// Manifest copied into the new project
    pub manifest: Manifest,

    /// Build action (make target) invoked after the files are written
    #[serde(
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub post_clone: Option<String>,

    /// Availability probes, one command line per probe
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub check: Vec<Vec<String>>,

    /// Starter files keyed by relative path; content is written verbatim
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub files: BTreeMap<String, String>,
}

fn empty_as_none<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

impl Template {
    /// Read and decode a template descriptor file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| FnkitError::TemplateDirError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let template: Template =
            serde_json::from_str(&content).map_err(|e| FnkitError::TemplateParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        template.validate_files().map_err(|message| FnkitError::TemplateInvalid {
            path: path.to_path_buf(),
            message,
        })?;
        Ok(template)
    }

    /// Render the template as a descriptor file body.
    pub fn to_descriptor(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| FnkitError::Other(e.into()))
    }

    /// Write the template as a descriptor file.
    pub fn save_as(&self, path: &Path) -> Result<()> {
        let mut content = self.to_descriptor()?;
        content.push('\n');
        fs::write(path, content)?;
        Ok(())
    }

    /// Check that every file key is a plain relative path.
    pub fn validate_files(&self) -> std::result::Result<(), String> {
        for key in self.files.keys() {
            if !is_plain_relative(key) {
                return Err(format!(
                    "file path '{}' must be relative, without '.' or '..' segments",
                    key
                ));
            }
        }
        Ok(())
    }

    /// Whether the template declares no availability probes.
    pub fn always_available(&self) -> bool {
        self.check.is_empty()
    }
}

fn is_plain_relative(key: &str) -> bool {
    if key.is_empty() || key.starts_with('/') || key.starts_with('\\') {
        return false;
    }
    if key
        .split(['/', '\\'])
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return false;
    }
    Path::new(key)
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
}

/// Where a registry entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateSource {
    /// Compiled into the binary
    Builtin,
    /// Loaded from the override directory
    Directory,
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateSource::Builtin => write!(f, "builtin"),
            TemplateSource::Directory => write!(f, "directory"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn descriptor_with_only_description_parses() {
        let t: Template = serde_json::from_str(r#"{"description": "bare"}"#).unwrap();
        assert_eq!(t.description, "bare");
        assert!(t.check.is_empty());
        assert!(t.files.is_empty());
        assert!(t.post_clone.is_none());
    }

    #[test]
    fn empty_post_clone_means_no_action() {
        let t: Template = serde_json::from_str(r#"{"post_clone": ""}"#).unwrap();
        assert!(t.post_clone.is_none());
    }

    #[test]
    fn post_clone_is_kept() {
        let t: Template = serde_json::from_str(r#"{"post_clone": "install"}"#).unwrap();
        assert_eq!(t.post_clone.as_deref(), Some("install"));
    }

    #[test]
    fn serialization_omits_empty_optionals() {
        let t = Template {
            description: "x".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&t).unwrap();
        assert!(json.get("post_clone").is_none());
        assert!(json.get("check").is_none());
        assert!(json.get("files").is_none());
    }

    #[test]
    fn plain_relative_keys() {
        assert!(is_plain_relative("app.py"));
        assert!(is_plain_relative("src/lambda.nim"));
        assert!(is_plain_relative(".cgiignore"));
        assert!(!is_plain_relative(""));
        assert!(!is_plain_relative("/etc/passwd"));
        assert!(!is_plain_relative("./app.py"));
        assert!(!is_plain_relative("../escape"));
        assert!(!is_plain_relative("src//main"));
        assert!(!is_plain_relative("src/../../x"));
        assert!(!is_plain_relative("src/./x"));
    }

    #[test]
    fn from_path_rejects_escaping_file_keys() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.json");
        fs::write(&path, r#"{"files": {"../outside": "boom"}}"#).unwrap();

        let err = Template::from_path(&path).unwrap_err();
        assert!(matches!(err, FnkitError::TemplateInvalid { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn from_path_reports_parse_errors_with_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Template::from_path(&path).unwrap_err();
        assert!(matches!(err, FnkitError::TemplateParseError { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn template_source_display() {
        assert_eq!(TemplateSource::Builtin.to_string(), "builtin");
        assert_eq!(TemplateSource::Directory.to_string(), "directory");
    }
}
