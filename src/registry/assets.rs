//! Read-only access to starter file trees.
//!
//! Larger starter kits keep their files as real files under `assets/`, which
//! is embedded into the binary at compile time. Catalog construction only
//! talks to the [`AssetProvider`] trait, so tests can hand it an in-memory
//! tree instead.

use crate::error::{FnkitError, Result};
use include_dir::{include_dir, Dir};
use std::collections::BTreeMap;
use tracing::warn;

/// Embedded starter assets.
static ASSETS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets");

/// Read-only tree of starter files.
///
/// Paths use `/` separators and are relative to the provider's root.
pub trait AssetProvider {
    /// Read the raw bytes of one file.
    fn read_file(&self, path: &str) -> Option<&[u8]>;

    /// List every file below `root`, recursively, directories excluded.
    ///
    /// Returns `None` if `root` does not exist. An empty `root` lists the
    /// whole tree.
    fn list_tree(&self, root: &str) -> Option<Vec<String>>;
}

/// The asset tree compiled into the binary.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedAssets {
    dir: &'static Dir<'static>,
}

impl EmbeddedAssets {
    pub fn new() -> Self {
        Self { dir: &ASSETS_DIR }
    }
}

impl Default for EmbeddedAssets {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetProvider for EmbeddedAssets {
    fn read_file(&self, path: &str) -> Option<&[u8]> {
        self.dir.get_file(path).map(|f| f.contents())
    }

    fn list_tree(&self, root: &str) -> Option<Vec<String>> {
        let dir = if root.is_empty() {
            self.dir
        } else {
            self.dir.get_dir(root)?
        };
        let mut files = Vec::new();
        collect_files(dir, &mut files);
        Some(files)
    }
}

fn collect_files(dir: &Dir<'_>, out: &mut Vec<String>) {
    for file in dir.files() {
        out.push(file.path().to_string_lossy().replace('\\', "/"));
    }
    for sub in dir.dirs() {
        collect_files(sub, out);
    }
}

/// An in-memory asset tree.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, builder style.
    pub fn with_file(mut self, path: &str, content: impl Into<Vec<u8>>) -> Self {
        self.insert(path, content);
        self
    }

    /// Add or replace a file.
    pub fn insert(&mut self, path: &str, content: impl Into<Vec<u8>>) {
        self.files
            .insert(path.trim_start_matches('/').to_string(), content.into());
    }
}

impl AssetProvider for MemoryAssets {
    fn read_file(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(|c| c.as_slice())
    }

    fn list_tree(&self, root: &str) -> Option<Vec<String>> {
        if root.is_empty() {
            return Some(self.files.keys().cloned().collect());
        }
        let prefix = format!("{}/", root);
        let files: Vec<String> = self
            .files
            .keys()
            .filter(|p| p.starts_with(&prefix))
            .cloned()
            .collect();
        // Directories exist only through the files they contain.
        if files.is_empty() {
            None
        } else {
            Some(files)
        }
    }
}

/// Collect every file below `root` as a path → content map.
///
/// Keys are relative to `root` with leading `/` and `.` characters removed.
/// A missing root or a file that is not UTF-8 text is a packaging defect and
/// is reported as an error so catalog construction aborts.
pub fn extract(provider: &dyn AssetProvider, root: &str) -> Result<BTreeMap<String, String>> {
    let root = root.trim_matches('/');
    let paths = provider
        .list_tree(root)
        .ok_or_else(|| FnkitError::AssetMissing {
            root: root.to_string(),
        })?;

    let mut files = BTreeMap::new();
    for path in paths {
        let bytes = provider
            .read_file(&path)
            .ok_or_else(|| FnkitError::AssetInvalid {
                path: path.clone(),
                message: "listed but not readable".to_string(),
            })?;
        let content = std::str::from_utf8(bytes).map_err(|e| FnkitError::AssetInvalid {
            path: path.clone(),
            message: e.to_string(),
        })?;

        let relative = path.strip_prefix(root).unwrap_or(&path);
        let key = relative.trim_start_matches(['/', '.']);
        if key.is_empty() {
            return Err(FnkitError::AssetInvalid {
                path: path.clone(),
                message: "file name is empty once normalized".to_string(),
            });
        }
        if files.insert(key.to_string(), content.to_string()).is_some() {
            warn!(path = %path, key = %key, "asset path collides after normalization");
        }
    }
    Ok(files)
}
