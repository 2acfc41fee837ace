//! File selection for a check run.
//!
//! Exactly one of three modes applies: changed files from version control
//! (the default), a directory or single file under `--path`, or an explicit
//! `--files` list. The selected set is filtered against [`EXCLUDED_PATHS`]
//! once and then feeds every check stage, so all stages report against the
//! same inputs.

use std::path::{Path, PathBuf};
use std::process::Command;

use glob::Pattern;
use walkdir::WalkDir;

use crate::error::ProtocheckError;
use crate::workspace::Workspace;

/// Glob patterns removed from consideration before any check runs.
pub const EXCLUDED_PATHS: [&str; 3] = ["third_party/*", ".git/*", ".github/*"];

/// Which files a run should check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Files reported modified-or-added-or-copied by git, staged or not.
    Changed,
    /// A single file, or every file beneath a directory.
    Path(PathBuf),
    /// An explicit list; every entry must exist.
    Files(Vec<PathBuf>),
}

/// Resolve a selection into the list of files to check, relative to the
/// workspace root, with exclusion patterns applied.
///
/// # Errors
///
/// Path mode fails with [`ProtocheckError::PathNotFound`] for a nonexistent
/// path. Files mode fails with [`ProtocheckError::MissingFiles`] listing
/// every missing entry; no partial list is ever returned.
pub fn select_files(
    workspace: &Workspace,
    selection: &Selection,
) -> Result<Vec<PathBuf>, ProtocheckError> {
    let files = match selection {
        Selection::Changed => changed_files(&workspace.root)?,
        Selection::Path(path) => {
            let abs = resolve(&workspace.root, path);
            if !abs.exists() {
                return Err(ProtocheckError::PathNotFound(abs));
            }
            if abs.is_file() {
                vec![relativize(&workspace.root, &abs)]
            } else {
                collect_dir(&workspace.root, &abs)?
            }
        }
        Selection::Files(entries) => {
            let mut missing = Vec::new();
            for entry in entries {
                if !resolve(&workspace.root, entry).is_file() {
                    missing.push(entry.clone());
                }
            }
            if !missing.is_empty() {
                return Err(ProtocheckError::MissingFiles(missing));
            }
            entries.clone()
        }
    };

    Ok(apply_exclusions(files))
}

/// List files git reports as added, copied, or modified — both unstaged
/// and staged. A file appearing in both lists is returned once.
pub fn changed_files(root: &Path) -> Result<Vec<PathBuf>, ProtocheckError> {
    let mut files = git_diff_names(root, false)?;
    files.extend(git_diff_names(root, true)?);
    files.sort();
    files.dedup();
    Ok(files)
}

fn git_diff_names(root: &Path, staged: bool) -> Result<Vec<PathBuf>, ProtocheckError> {
    let mut cmd = Command::new("git");
    cmd.arg("diff");
    if staged {
        cmd.arg("--cached");
    }
    cmd.args(["--name-only", "--diff-filter=ACM"]);

    let output = cmd
        .current_dir(root)
        .output()
        .map_err(|e| ProtocheckError::Git(e.to_string()))?;

    if !output.status.success() {
        return Err(ProtocheckError::Git("git diff failed".into()));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect())
}

fn collect_dir(root: &Path, dir: &Path) -> Result<Vec<PathBuf>, ProtocheckError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() {
            files.push(relativize(root, entry.path()));
        }
    }
    Ok(files)
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

fn relativize(root: &Path, path: &Path) -> PathBuf {
    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    canonical
        .strip_prefix(root)
        .map(Path::to_path_buf)
        .unwrap_or(canonical)
}

fn apply_exclusions(files: Vec<PathBuf>) -> Vec<PathBuf> {
    let patterns: Vec<Pattern> = EXCLUDED_PATHS
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .collect();

    files
        .into_iter()
        .filter(|file| {
            let text = file.to_string_lossy();
            !patterns.iter().any(|pattern| pattern.matches(&text))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::{prototool_dir, prototool_path, CONFIG_FILE};
    use tempfile::TempDir;

    fn setup_workspace(tmp: &TempDir) -> Workspace {
        let root = tmp.path();
        std::fs::create_dir(root.join(".git")).unwrap();
        std::fs::create_dir_all(prototool_dir(root)).unwrap();
        std::fs::write(prototool_path(root), "").unwrap();
        std::fs::write(root.join(CONFIG_FILE), "{}").unwrap();
        Workspace::init(root).unwrap()
    }

    fn git(root: &Path, args: &[&str]) {
        Command::new("git")
            .args(args)
            .current_dir(root)
            .output()
            .expect("git failed");
    }

    #[test]
    fn path_mode_single_file() {
        let tmp = TempDir::new().unwrap();
        let ws = setup_workspace(&tmp);
        std::fs::write(ws.root.join("a.proto"), "syntax\n").unwrap();

        let files = select_files(&ws, &Selection::Path(PathBuf::from("a.proto"))).unwrap();
        assert_eq!(files, vec![PathBuf::from("a.proto")]);
    }

    #[test]
    fn path_mode_recurses_directories() {
        let tmp = TempDir::new().unwrap();
        let ws = setup_workspace(&tmp);
        std::fs::create_dir_all(ws.root.join("protos/nested")).unwrap();
        std::fs::write(ws.root.join("protos/a.proto"), "a\n").unwrap();
        std::fs::write(ws.root.join("protos/nested/b.proto"), "b\n").unwrap();

        let files = select_files(&ws, &Selection::Path(PathBuf::from("protos"))).unwrap();
        assert_eq!(
            files,
            vec![
                PathBuf::from("protos/a.proto"),
                PathBuf::from("protos/nested/b.proto"),
            ]
        );
    }

    #[test]
    fn path_mode_nonexistent_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let ws = setup_workspace(&tmp);

        let result = select_files(&ws, &Selection::Path(PathBuf::from("missing")));
        assert!(matches!(result, Err(ProtocheckError::PathNotFound(_))));
    }

    #[test]
    fn files_mode_lists_every_missing_entry() {
        let tmp = TempDir::new().unwrap();
        let ws = setup_workspace(&tmp);
        std::fs::write(ws.root.join("exists.proto"), "x\n").unwrap();

        let selection = Selection::Files(vec![
            PathBuf::from("exists.proto"),
            PathBuf::from("gone1.proto"),
            PathBuf::from("gone2.proto"),
        ]);
        match select_files(&ws, &selection) {
            Err(ProtocheckError::MissingFiles(missing)) => {
                assert_eq!(
                    missing,
                    vec![PathBuf::from("gone1.proto"), PathBuf::from("gone2.proto")]
                );
            }
            other => panic!("expected MissingFiles, got {other:?}"),
        }
    }

    #[test]
    fn files_mode_keeps_given_order() {
        let tmp = TempDir::new().unwrap();
        let ws = setup_workspace(&tmp);
        std::fs::write(ws.root.join("b.proto"), "b\n").unwrap();
        std::fs::write(ws.root.join("a.proto"), "a\n").unwrap();

        let selection =
            Selection::Files(vec![PathBuf::from("b.proto"), PathBuf::from("a.proto")]);
        let files = select_files(&ws, &selection).unwrap();
        assert_eq!(files, vec![PathBuf::from("b.proto"), PathBuf::from("a.proto")]);
    }

    #[test]
    fn exclusion_patterns_are_applied() {
        let tmp = TempDir::new().unwrap();
        let ws = setup_workspace(&tmp);
        std::fs::create_dir_all(ws.root.join(".github/workflows")).unwrap();
        std::fs::write(ws.root.join(".github/workflows/ci.yml"), "x\n").unwrap();
        std::fs::write(ws.root.join("kept.proto"), "x\n").unwrap();

        let files = select_files(&ws, &Selection::Path(PathBuf::from("."))).unwrap();
        assert!(files.contains(&PathBuf::from("kept.proto")));
        assert!(files.iter().all(|f| !f.starts_with("third_party")));
        assert!(files.iter().all(|f| !f.starts_with(".git")));
        assert!(files.iter().all(|f| !f.starts_with(".github")));
    }

    #[test]
    fn changed_files_deduplicates_staged_and_unstaged() {
        let tmp = TempDir::new().unwrap();
        let ws = setup_workspace(&tmp);
        git(&ws.root, &["init"]);

        std::fs::write(ws.root.join("a.proto"), "one\n").unwrap();
        git(&ws.root, &["add", "a.proto"]);
        // Modify after staging so the file shows up in both diff lists
        std::fs::write(ws.root.join("a.proto"), "two\n").unwrap();

        let files = changed_files(&ws.root).unwrap();
        assert_eq!(files, vec![PathBuf::from("a.proto")]);
    }

    #[test]
    fn changed_files_sees_staged_additions() {
        let tmp = TempDir::new().unwrap();
        let ws = setup_workspace(&tmp);
        git(&ws.root, &["init"]);

        std::fs::write(ws.root.join("new.proto"), "x\n").unwrap();
        git(&ws.root, &["add", "new.proto"]);

        let files = changed_files(&ws.root).unwrap();
        assert_eq!(files, vec![PathBuf::from("new.proto")]);
    }
}
