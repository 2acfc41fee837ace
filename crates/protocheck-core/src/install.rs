//! One-time installer for the prototool binary.
//!
//! Downloads the pinned release into `third_party/prototool-<version>/`
//! and marks it executable. Skips entirely when the versioned directory
//! already exists.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ProtocheckError;
use crate::workspace::{prototool_dir, prototool_path, PROTOTOOL_VERSION};

/// Release URL for the pinned prototool version.
pub fn prototool_url() -> String {
    format!(
        "https://github.com/uber/prototool/releases/download/v{PROTOTOOL_VERSION}/prototool-Linux-x86_64"
    )
}

/// What the installer did.
#[derive(Debug)]
pub enum InstallOutcome {
    /// The versioned directory already existed; nothing was touched.
    AlreadyInstalled(PathBuf),
    /// The binary was downloaded and made executable.
    Installed(PathBuf),
}

/// Install prototool under `<root>/third_party` unless already present.
///
/// # Errors
///
/// Fails on directory creation, download, or permission errors. Files
/// already on disk are never removed on failure.
pub fn install_prototool(root: &Path) -> Result<InstallOutcome, ProtocheckError> {
    let dir = prototool_dir(root);
    let target = prototool_path(root);

    if dir.exists() {
        return Ok(InstallOutcome::AlreadyInstalled(target));
    }

    fs::create_dir_all(&dir)?;
    download_file(&prototool_url(), &target)?;
    make_executable(&target)?;

    Ok(InstallOutcome::Installed(target))
}

fn download_file(url: &str, target: &Path) -> Result<(), ProtocheckError> {
    println!("Downloading {} to {} ...", url, target.display());

    let response = reqwest::blocking::get(url)?;
    if !response.status().is_success() {
        return Err(ProtocheckError::Other(format!(
            "Download failed: HTTP {} for {url}",
            response.status()
        )));
    }

    let bytes = response.bytes()?;
    fs::write(target, &bytes)?;

    println!("Download of {} succeeded.", target.display());
    Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<(), ProtocheckError> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<(), ProtocheckError> {
    Ok(())
}
