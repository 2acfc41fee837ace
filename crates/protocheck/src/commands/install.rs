//! CLI handler for `protocheck install`.

use protocheck_core::install::{install_prototool, InstallOutcome};

use crate::commands::resolve_root;
use crate::output::Reporter;

/// Install the prototool binary into the repository's third_party tree.
pub fn run_install(root_override: Option<&str>, reporter: &mut Reporter) -> bool {
    let root = match resolve_root(root_override, reporter) {
        Some(r) => r,
        None => return false,
    };

    reporter.section("Installing prototool");

    match install_prototool(&root) {
        Ok(InstallOutcome::AlreadyInstalled(path)) => {
            reporter.info(&format!(
                "prototool already installed at {}",
                path.display()
            ));
            true
        }
        Ok(InstallOutcome::Installed(path)) => {
            reporter.success(&format!("prototool installed at {}", path.display()));
            true
        }
        Err(e) => {
            reporter.error(&format!("Failed to install prototool: {e}"));
            false
        }
    }
}
