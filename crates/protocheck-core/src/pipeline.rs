//! Pre-commit pipeline: one file selection feeding the newline check and
//! the proto-lint stage, aggregated into a single pass/fail report.

use crate::error::ProtocheckError;
use crate::lint;
use crate::newline;
use crate::select::{self, Selection};
use crate::summary::StageSummary;
use crate::workspace::Workspace;

/// Result of a full check run. Summaries appear in aggregate order:
/// proto lint first, then the newline check.
#[derive(Debug)]
pub struct RunReport {
    pub summaries: Vec<StageSummary>,
}

impl RunReport {
    pub fn has_failures(&self) -> bool {
        self.summaries.iter().any(StageSummary::is_failed)
    }
}

/// Select files once, then run every check stage over the identical set.
///
/// The newline check runs first, synchronously; the proto-lint stage runs
/// on its bounded worker afterwards. Per-file diagnostics print as they
/// are found; the returned summaries are printed once by the caller.
///
/// # Errors
///
/// Fails fatally on selection errors (nonexistent path, missing explicit
/// files, git failure) and on an unreadable lint-configuration file; no
/// stage runs in that case.
pub fn run_pre_commit(
    workspace: &Workspace,
    selection: &Selection,
) -> Result<RunReport, ProtocheckError> {
    let config = workspace.load_lint_config()?;
    let files = select::select_files(workspace, selection)?;

    println!("Starting newline-at-EOF checks");
    println!("----------------------------------------");
    let newline_report = newline::check_newline_at_eof(&workspace.root, &files);
    if newline_report.files_checked == 0 {
        println!("There are no files to be checked.");
    } else {
        println!(
            "{} files checked, {} errors found",
            newline_report.files_checked, newline_report.error_count
        );
    }

    println!();
    println!("Starting Proto linting");
    println!("----------------------------------------");
    let lint_summary = lint::run_lint_stage(workspace, &files, config);

    Ok(RunReport {
        summaries: vec![lint_summary, newline_report.summary],
    })
}
