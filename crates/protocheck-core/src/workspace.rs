use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ProtocheckError;

/// Directory under the repository root that holds installed third-party
/// tools.
pub const THIRD_PARTY_DIR: &str = "third_party";

/// Pinned prototool release installed by `protocheck install`.
pub const PROTOTOOL_VERSION: &str = "1.10.0";

/// Name of the opaque lint-configuration file at the repository root.
pub const CONFIG_FILE: &str = "prototool_config.json";

/// Versioned directory the prototool binary is installed into.
pub fn prototool_dir(root: &Path) -> PathBuf {
    root.join(THIRD_PARTY_DIR)
        .join(format!("prototool-{PROTOTOOL_VERSION}"))
}

/// Full path of the installed prototool binary.
pub fn prototool_path(root: &Path) -> PathBuf {
    prototool_dir(root).join("prototool")
}

/// A validated repository workspace.
///
/// Construction via [`Workspace::init`] replaces the ambient startup checks
/// of earlier tooling: every precondition failure is a typed error the
/// caller reports once before exiting.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub root: PathBuf,
    pub linter_path: PathBuf,
    pub config_path: PathBuf,
}

/// Walk upward from `start_dir` until a directory containing `.git` is
/// found and return it as the repository root.
pub fn discover_root(start_dir: &Path) -> Result<PathBuf, ProtocheckError> {
    let mut current = start_dir.canonicalize()?;

    loop {
        if current.join(".git").exists() {
            return Ok(current);
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => break,
        }
    }

    Err(ProtocheckError::RepoNotFound(start_dir.to_path_buf()))
}

impl Workspace {
    /// Validate the fatal preconditions at `root` and resolve tool paths.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocheckError::LinterNotInstalled`] when the prototool
    /// binary is missing and [`ProtocheckError::ConfigNotFound`] when the
    /// lint-configuration file is missing.
    pub fn init(root: &Path) -> Result<Self, ProtocheckError> {
        let root = root.canonicalize()?;

        let linter_path = prototool_path(&root);
        if !linter_path.is_file() {
            return Err(ProtocheckError::LinterNotInstalled(linter_path));
        }

        let config_path = root.join(CONFIG_FILE);
        if !config_path.is_file() {
            return Err(ProtocheckError::ConfigNotFound(config_path));
        }

        Ok(Self {
            root,
            linter_path,
            config_path,
        })
    }

    /// Read the lint configuration as an opaque text blob.
    ///
    /// The content is passed to the external linter unmodified; no
    /// structure is interpreted here.
    pub fn load_lint_config(&self) -> Result<String, ProtocheckError> {
        Ok(fs::read_to_string(&self.config_path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_workspace(tmp: &TempDir) -> PathBuf {
        let root = tmp.path();
        std::fs::create_dir(root.join(".git")).unwrap();
        std::fs::create_dir_all(prototool_dir(root)).unwrap();
        std::fs::write(prototool_path(root), "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::write(root.join(CONFIG_FILE), "{\"lint\":{}}").unwrap();
        root.to_path_buf()
    }

    #[test]
    fn discover_from_root() {
        let tmp = TempDir::new().unwrap();
        let root = setup_workspace(&tmp);
        let found = discover_root(&root).unwrap();
        assert_eq!(found, root.canonicalize().unwrap());
    }

    #[test]
    fn discover_from_subdirectory() {
        let tmp = TempDir::new().unwrap();
        let root = setup_workspace(&tmp);
        let sub = root.join("protos").join("nested");
        std::fs::create_dir_all(&sub).unwrap();

        let found = discover_root(&sub).unwrap();
        assert_eq!(found, root.canonicalize().unwrap());
    }

    #[test]
    fn discover_without_repo_fails() {
        let tmp = TempDir::new().unwrap();
        let result = discover_root(tmp.path());
        assert!(matches!(result, Err(ProtocheckError::RepoNotFound(_))));
    }

    #[test]
    fn init_requires_linter() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), "{}").unwrap();
        let result = Workspace::init(tmp.path());
        assert!(matches!(
            result,
            Err(ProtocheckError::LinterNotInstalled(_))
        ));
    }

    #[test]
    fn init_requires_config() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(prototool_dir(tmp.path())).unwrap();
        std::fs::write(prototool_path(tmp.path()), "").unwrap();
        let result = Workspace::init(tmp.path());
        assert!(matches!(result, Err(ProtocheckError::ConfigNotFound(_))));
    }

    #[test]
    fn init_loads_config_blob() {
        let tmp = TempDir::new().unwrap();
        let root = setup_workspace(&tmp);
        let ws = Workspace::init(&root).unwrap();
        assert_eq!(ws.load_lint_config().unwrap(), "{\"lint\":{}}");
    }
}
