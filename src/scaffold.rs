//! Writing a template out as a new function project.

use crate::error::{FnkitError, Result};
use crate::manifest::MANIFEST_FILE;
use crate::registry::Template;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Options for [`materialize`].
#[derive(Debug, Clone, Default)]
pub struct ScaffoldOptions {
    /// Write into a directory that already has content.
    pub force: bool,
}

/// Write `template` into `target`, creating the directory if needed.
///
/// Writes every starter file plus the manifest. Returns the written paths in
/// the order they were written.
pub fn materialize(
    template: &Template,
    target: &Path,
    options: &ScaffoldOptions,
) -> Result<Vec<PathBuf>> {
    if target.exists() && !options.force && !is_empty_dir(target)? {
        return Err(FnkitError::ProjectNotEmpty {
            path: target.to_path_buf(),
        });
    }
    fs::create_dir_all(target)?;

    let mut written = Vec::with_capacity(template.files.len() + 1);
    for (key, content) in &template.files {
        let path = target.join(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        debug!(path = %path.display(), "wrote starter file");
        written.push(path);
    }

    let manifest_path = target.join(MANIFEST_FILE);
    template.manifest.save_as(&manifest_path)?;
    written.push(manifest_path);

    info!(target = %target.display(), files = written.len(), "project created");
    Ok(written)
}

fn is_empty_dir(path: &Path) -> Result<bool> {
    if !path.is_dir() {
        return Ok(false);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Run the template's build action (`make <action>`) inside `dir`.
///
/// Output goes straight to the terminal. A non-zero exit is an error.
pub fn run_post_clone(action: &str, dir: &Path) -> Result<()> {
    let command = format!("make {}", action);
    debug!(command = %command, dir = %dir.display(), "running post-clone action");

    let status = Command::new("make")
        .arg(action)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    if status.success() {
        Ok(())
    } else {
        Err(FnkitError::CommandFailed {
            command,
            code: status.code(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Manifest;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn template() -> Template {
        let mut files = BTreeMap::new();
        files.insert("app.py".to_string(), "print('hi')\n".to_string());
        files.insert("src/lib/util.py".to_string(), "X = 1\n".to_string());
        Template {
            description: "test".into(),
            manifest: Manifest {
                name: "hello".into(),
                run: vec!["python3".into(), "app.py".into()],
                ..Default::default()
            },
            files,
            ..Default::default()
        }
    }

    #[test]
    fn writes_files_and_manifest() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("hello");

        let written = materialize(&template(), &target, &ScaffoldOptions::default()).unwrap();

        assert_eq!(written.len(), 3);
        assert_eq!(
            fs::read_to_string(target.join("app.py")).unwrap(),
            "print('hi')\n"
        );
        assert!(target.join("src/lib/util.py").exists());
        let manifest = Manifest::from_path(&target.join(MANIFEST_FILE)).unwrap();
        assert_eq!(manifest.name, "hello");
        assert_eq!(manifest.run, vec!["python3", "app.py"]);
    }

    #[test]
    fn empty_existing_directory_is_fine() {
        let temp = TempDir::new().unwrap();
        materialize(&template(), temp.path(), &ScaffoldOptions::default()).unwrap();
        assert!(temp.path().join("app.py").exists());
    }

    #[test]
    fn refuses_non_empty_directory() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("existing.txt"), "keep").unwrap();

        let err = materialize(&template(), temp.path(), &ScaffoldOptions::default()).unwrap_err();
        assert!(matches!(err, FnkitError::ProjectNotEmpty { .. }));
        assert!(!temp.path().join("app.py").exists());
    }

    #[test]
    fn force_writes_into_non_empty_directory() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("existing.txt"), "keep").unwrap();

        materialize(&template(), temp.path(), &ScaffoldOptions { force: true }).unwrap();
        assert!(temp.path().join("app.py").exists());
        assert!(temp.path().join("existing.txt").exists());
    }

    #[test]
    fn target_that_is_a_file_is_refused() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("file");
        fs::write(&target, "x").unwrap();

        let err = materialize(&template(), &target, &ScaffoldOptions::default()).unwrap_err();
        assert!(matches!(err, FnkitError::ProjectNotEmpty { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn post_clone_runs_make_target() {
        if Command::new("make").arg("--version").output().is_err() {
            return;
        }
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("Makefile"),
            "install:\n\ttouch installed\n",
        )
        .unwrap();

        run_post_clone("install", temp.path()).unwrap();
        assert!(temp.path().join("installed").exists());
    }

    #[cfg(unix)]
    #[test]
    fn post_clone_failure_is_command_failed() {
        if Command::new("make").arg("--version").output().is_err() {
            return;
        }
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Makefile"), "install:\n\tfalse\n").unwrap();

        let err = run_post_clone("install", temp.path()).unwrap_err();
        match err {
            FnkitError::CommandFailed { command, code } => {
                assert_eq!(command, "make install");
                assert_ne!(code, Some(0));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
