//! CLI handler for `protocheck check`.

use std::path::PathBuf;

use protocheck_core::pipeline::run_pre_commit;
use protocheck_core::select::Selection;
use protocheck_core::workspace::Workspace;

use crate::commands::resolve_root;
use crate::output::Reporter;

/// Run the full pre-commit pipeline over the requested selection.
///
/// Returns `false` on fatal preconditions, selection failures, or any
/// stage reporting FAILED.
pub fn run_check(
    path: Option<&str>,
    files: &[String],
    root_override: Option<&str>,
    reporter: &mut Reporter,
) -> bool {
    let root = match resolve_root(root_override, reporter) {
        Some(r) => r,
        None => return false,
    };

    let workspace = match Workspace::init(&root) {
        Ok(w) => w,
        Err(e) => {
            reporter.error(&format!("{e}"));
            return false;
        }
    };

    let selection = if let Some(path) = path {
        Selection::Path(PathBuf::from(path))
    } else if !files.is_empty() {
        Selection::Files(files.iter().map(PathBuf::from).collect())
    } else {
        Selection::Changed
    };

    reporter.section("Pre-commit checks");

    let report = match run_pre_commit(&workspace, &selection) {
        Ok(r) => r,
        Err(e) => {
            reporter.error(&format!("{e}"));
            return false;
        }
    };

    for summary in &report.summaries {
        reporter.summary(summary);
    }

    !report.has_failures()
}
