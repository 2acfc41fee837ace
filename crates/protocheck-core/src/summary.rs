//! Stage summaries: the tagged SUCCESS/FAILED line each check stage
//! produces exactly once per run.

use std::fmt;

/// Aggregate result of a check stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failed,
}

/// A tagged, human-readable summary line produced by a stage.
///
/// The overall exit code is decided by [`StageSummary::is_failed`], not by
/// string matching on the rendered line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSummary {
    pub outcome: Outcome,
    pub detail: String,
}

impl StageSummary {
    pub fn success(detail: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Success,
            detail: detail.into(),
        }
    }

    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Failed,
            detail: detail.into(),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.outcome == Outcome::Failed
    }

    /// The tag prefix rendered in front of the detail text.
    pub fn tag(&self) -> &'static str {
        match self.outcome {
            Outcome::Success => "SUCCESS",
            Outcome::Failed => "FAILED",
        }
    }
}

impl fmt::Display for StageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}   {}", self.tag(), self.detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_renders_tag_and_detail() {
        let s = StageSummary::success("3 Proto files linted (0.2 secs)");
        assert_eq!(s.to_string(), "SUCCESS   3 Proto files linted (0.2 secs)");
        assert!(!s.is_failed());
    }

    #[test]
    fn failed_renders_tag_and_detail() {
        let s = StageSummary::failed("Proto linting failed");
        assert_eq!(s.to_string(), "FAILED   Proto linting failed");
        assert!(s.is_failed());
    }
}
