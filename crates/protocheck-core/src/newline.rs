//! End-of-file newline convention check.
//!
//! Every selected file must end with exactly one trailing newline byte:
//! no missing newline, no trailing blank line. One-byte files are always
//! flagged; empty files pass.

use std::fs;
use std::path::{Path, PathBuf};

use crate::summary::StageSummary;

/// Outcome of the newline stage, with counters the CLI prints separately
/// from the summary line.
#[derive(Debug)]
pub struct NewlineReport {
    pub files_checked: usize,
    pub error_count: usize,
    pub summary: StageSummary,
}

enum EofStatus {
    Ok,
    OnlyOneChar,
    BadTrailer,
}

/// Check every file in `files` (paths relative to `root`), printing a
/// diagnostic per violating file as it is found.
pub fn check_newline_at_eof(root: &Path, files: &[PathBuf]) -> NewlineReport {
    let mut files_checked = 0;
    let mut error_count = 0;

    for file in files {
        let abs = if file.is_absolute() {
            file.clone()
        } else {
            root.join(file)
        };
        files_checked += 1;

        let bytes = match fs::read(&abs) {
            Ok(b) => b,
            Err(e) => {
                println!("{} --> Error: could not read file: {e}", file.display());
                error_count += 1;
                continue;
            }
        };

        match eof_status(&bytes) {
            EofStatus::Ok => {}
            EofStatus::OnlyOneChar => {
                println!("{} --> Error: Only one character in file", file.display());
                error_count += 1;
            }
            EofStatus::BadTrailer => {
                println!(
                    "{} --> Please ensure that this file ends with exactly one newline char.",
                    file.display()
                );
                error_count += 1;
            }
        }
    }

    let summary = if error_count > 0 {
        StageSummary::failed("Newline character checks failed")
    } else {
        StageSummary::success("Newline character checks passed")
    };

    NewlineReport {
        files_checked,
        error_count,
        summary,
    }
}

fn eof_status(bytes: &[u8]) -> EofStatus {
    match bytes.len() {
        0 => EofStatus::Ok,
        1 => EofStatus::OnlyOneChar,
        n => {
            if bytes[n - 1] == b'\n' && bytes[n - 2] != b'\n' {
                EofStatus::Ok
            } else {
                EofStatus::BadTrailer
            }
        }
    }
}
