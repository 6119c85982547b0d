//! Template registry for fnkit.
//!
//! This module builds the catalog of starter templates from two sources:
//! - Built-in templates (compiled into the binary)
//! - Override templates (`<name>.json` descriptors in a directory)
//!
//! # Resolution
//!
//! The catalog is rebuilt on every call. An override whose name matches a
//! built-in template replaces it entirely.
//!
//! # Example
//!
//! ```
//! use fnkit::registry::list_templates;
//! use std::path::Path;
//!
//! // A directory that does not exist simply means "no overrides"
//! let registry = list_templates(Path::new("/nonexistent/fnkit-templates")).unwrap();
//!
//! if let Some(template) = registry.get("Python") {
//!     println!("Python: {}", template.description);
//! }
//! ```

pub mod assets;
pub mod builtin;
pub mod local;
pub mod resolver;
pub mod template;

// Re-exports
pub use assets::{extract, AssetProvider, EmbeddedAssets, MemoryAssets};
pub use builtin::{KitFiles, StarterKit, STARTER_KITS};
pub use local::load_dir;
pub use resolver::{list_templates, Registry};
pub use template::{Template, TemplateSource};
