//! Proto lint stage: drives the external prototool binary over the
//! selected `.proto` files.
//!
//! Linting runs on a dedicated worker thread feeding a one-shot channel;
//! the controller waits up to [`LINT_TIMEOUT`] and never blocks past it.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crate::summary::StageSummary;
use crate::workspace::Workspace;

/// Upper bound on the whole proto-lint stage.
pub const LINT_TIMEOUT: Duration = Duration::from_secs(600);

/// Filter a file set down to `.proto` files, preserving order.
pub fn proto_files(files: &[PathBuf]) -> Vec<PathBuf> {
    files
        .iter()
        .filter(|f| f.extension().is_some_and(|ext| ext == "proto"))
        .cloned()
        .collect()
}

/// Lint `files` sequentially with the external binary at `linter`.
///
/// Each invocation is `<linter> lint <file> --config-data <config>`, run
/// from `root`. A non-zero exit prints the captured output and marks the
/// stage failed without stopping the loop.
pub fn lint_proto_files(
    root: &Path,
    linter: &Path,
    files: &[PathBuf],
    config: &str,
) -> StageSummary {
    if files.is_empty() {
        println!("There are no Proto files to lint.");
        return StageSummary::success("There are no Proto files to lint");
    }

    println!("Linting {} Proto files", files.len());
    let start = Instant::now();
    let mut errors_exist = false;

    for file in files {
        println!("Linting {}", file.display());
        let output = Command::new(linter)
            .arg("lint")
            .arg(file)
            .arg("--config-data")
            .arg(config)
            .current_dir(root)
            .output();

        match output {
            Ok(output) if output.status.success() => {}
            Ok(output) => {
                print!("{}", String::from_utf8_lossy(&output.stdout));
                print!("{}", String::from_utf8_lossy(&output.stderr));
                errors_exist = true;
            }
            Err(e) => {
                println!("Failed to run linter on {}: {e}", file.display());
                errors_exist = true;
            }
        }
    }

    println!("Proto linting finished.");

    if errors_exist {
        StageSummary::failed("Proto linting failed")
    } else {
        StageSummary::success(format!(
            "{} Proto files linted ({:.1} secs)",
            files.len(),
            start.elapsed().as_secs_f64()
        ))
    }
}

/// Run the proto-lint stage on a worker thread, bounded by [`LINT_TIMEOUT`].
///
/// A timeout or a worker that dies before reporting both produce an
/// explicit FAILED summary; the controller never waits past the deadline.
pub fn run_lint_stage(workspace: &Workspace, files: &[PathBuf], config: String) -> StageSummary {
    run_lint_stage_with_timeout(workspace, files, config, LINT_TIMEOUT)
}

fn run_lint_stage_with_timeout(
    workspace: &Workspace,
    files: &[PathBuf],
    config: String,
    timeout: Duration,
) -> StageSummary {
    let to_lint = proto_files(files);
    let root = workspace.root.clone();
    let linter = workspace.linter_path.clone();

    let (tx, rx) = mpsc::channel();
    let worker = thread::spawn(move || {
        let summary = lint_proto_files(&root, &linter, &to_lint, &config);
        let _ = tx.send(summary);
    });

    match rx.recv_timeout(timeout) {
        Ok(summary) => {
            let _ = worker.join();
            summary
        }
        Err(mpsc::RecvTimeoutError::Timeout) => {
            // Leave the worker detached; joining here could block forever.
            StageSummary::failed(format!(
                "Proto linting timed out after {} secs",
                timeout.as_secs()
            ))
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            let _ = worker.join();
            StageSummary::failed("Proto lint worker exited without a result")
        }
    }
}
