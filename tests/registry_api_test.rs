//! Integration tests for the registry public API.

use fnkit::availability::{is_available, Operation};
use fnkit::registry::{builtin, list_templates, load_dir, Registry, Template, TemplateSource};
use fnkit::FnkitError;
use std::fs;
use tempfile::TempDir;

#[test]
fn nonexistent_override_dir_gives_embedded_catalog() {
    let temp = TempDir::new().unwrap();
    let registry = list_templates(&temp.path().join("missing")).unwrap();

    assert_eq!(registry.templates(), &builtin::load_embedded().unwrap());
    assert_eq!(registry.names(), vec!["Nim", "Node JS", "PHP", "Python"]);
}

#[test]
fn python_override_without_checks_is_always_available() {
    let temp = TempDir::new().unwrap();
    let embedded = list_templates(&temp.path().join("none")).unwrap();
    assert!(embedded.get("Python").unwrap().check.iter().any(|probe| probe
        .iter()
        .any(|arg| arg == "python3")));

    fs::write(
        temp.path().join("Python.json"),
        r#"{
  "description": "Python without host requirements",
  "manifest": {"name": "py", "run": ["python3", "app.py"]},
  "check": [],
  "files": {"app.py": "print('ok')\n"}
}"#,
    )
    .unwrap();

    let registry = list_templates(temp.path()).unwrap();
    let (python, source) = registry.resolve("Python").unwrap();

    assert_eq!(source, TemplateSource::Directory);
    assert!(python.check.is_empty());
    assert_eq!(python.files.len(), 1);

    let op = Operation::new();
    op.cancel();
    assert!(is_available(python, &op));
}

#[test]
fn descriptor_round_trip_through_directory() {
    let temp = TempDir::new().unwrap();
    let registry = list_templates(&temp.path().join("none")).unwrap();

    for name in registry.names() {
        let template = registry.get(name).unwrap();
        template.save_as(&temp.path().join(format!("{name}.json"))).unwrap();
    }

    let loaded = load_dir(temp.path()).unwrap();
    assert_eq!(&loaded, registry.templates());
}

#[test]
fn embedded_asset_keys_are_plain() {
    let python = builtin::load_embedded().unwrap().remove("Python").unwrap();
    assert!(!python.files.is_empty());
    for key in python.files.keys() {
        assert!(!key.starts_with('/'), "{key}");
        assert!(!key.starts_with('.'), "{key}");
    }
    assert_eq!(
        python.files["app.py"],
        include_str!("../assets/python/app.py")
    );
}

#[test]
fn broken_override_fails_listing_with_path() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("Nim.json"), "{\"check\": 5}").unwrap();

    let err = list_templates(temp.path()).unwrap_err();
    assert!(matches!(err, FnkitError::TemplateParseError { .. }));
    assert!(err.to_string().contains("Nim.json"));
}

#[test]
fn registry_merge_is_public() {
    let mut overrides = std::collections::HashMap::new();
    overrides.insert("Solo".to_string(), Template::default());

    let registry = Registry::merge(Default::default(), overrides);
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.source("Solo"), Some(TemplateSource::Directory));
}
