//! Merging built-in templates with directory overrides.
//!
//! The registry is rebuilt on every listing call and never mutated
//! afterwards. An override with the same name as a built-in template
//! replaces it wholesale; fields are never blended.

use crate::error::{FnkitError, Result};
use crate::registry::assets::{AssetProvider, EmbeddedAssets};
use crate::registry::builtin;
use crate::registry::local;
use crate::registry::template::{Template, TemplateSource};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Name-keyed catalog of every usable template.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    templates: HashMap<String, Template>,
    sources: HashMap<String, TemplateSource>,
}

/// Build the merged catalog using the embedded asset tree.
pub fn list_templates(override_dir: &Path) -> Result<Registry> {
    Registry::load(override_dir)
}

impl Registry {
    /// Build the merged catalog using the embedded asset tree.
    pub fn load(override_dir: &Path) -> Result<Self> {
        Self::load_with(&EmbeddedAssets::new(), override_dir)
    }

    /// Build the merged catalog from a custom asset tree.
    pub fn load_with(assets: &dyn AssetProvider, override_dir: &Path) -> Result<Self> {
        let builtin = builtin::load_templates(assets)?;
        let overrides = local::load_dir(override_dir)?;
        Ok(Self::merge(builtin, overrides))
    }

    /// The embedded catalog alone, for when no override directory is known.
    pub fn builtin_only() -> Result<Self> {
        Ok(Self::merge(builtin::load_embedded()?, HashMap::new()))
    }

    /// Merge two catalogs; entries of `overrides` win by name.
    pub fn merge(
        builtin: HashMap<String, Template>,
        overrides: HashMap<String, Template>,
    ) -> Self {
        let mut sources: HashMap<String, TemplateSource> = builtin
            .keys()
            .map(|name| (name.clone(), TemplateSource::Builtin))
            .collect();
        let mut templates = builtin;

        for (name, template) in overrides {
            if templates.contains_key(&name) {
                debug!(name = %name, "override replaces built-in template");
            }
            sources.insert(name.clone(), TemplateSource::Directory);
            templates.insert(name, template);
        }

        Self { templates, sources }
    }

    /// Look up a template by name.
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Look up a template by name, failing if it is unknown.
    pub fn resolve(&self, name: &str) -> Result<(&Template, TemplateSource)> {
        match (self.templates.get(name), self.sources.get(name)) {
            (Some(template), Some(source)) => Ok((template, *source)),
            _ => Err(FnkitError::UnknownTemplate {
                name: name.to_string(),
            }),
        }
    }

    /// Check if a template exists.
    pub fn has(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Where a template came from.
    pub fn source(&self, name: &str) -> Option<TemplateSource> {
        self.sources.get(name).copied()
    }

    /// All template names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Iterate over entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Template)> {
        self.templates.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// The underlying name → template map.
    pub fn templates(&self) -> &HashMap<String, Template> {
        &self.templates
    }
}
