use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocheckError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("No repository found above {0} (expected a .git directory)")]
    RepoNotFound(PathBuf),

    #[error("Linter not installed at {0}. Run 'protocheck install' first")]
    LinterNotInstalled(PathBuf),

    #[error("Could not locate config file {0}")]
    ConfigNotFound(PathBuf),

    #[error("Could not locate file or directory {0}")]
    PathNotFound(PathBuf),

    #[error("The following file(s) do not exist: {}", join_paths(.0))]
    MissingFiles(Vec<PathBuf>),

    #[error("Failed to run git: {0}")]
    Git(String),

    #[error("{0}")]
    Other(String),
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
