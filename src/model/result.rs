use super::{Position, Violation};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScanStatus {
    /// No violations; the submission may proceed.
    Pass,
    /// One or more policy violations.
    Fail,
    /// The source could not be parsed at all. No rules were evaluated.
    Invalid,
}

/// A terminal parse-level failure: syntax error, missing token, or the
/// traversal depth guard tripping on pathological nesting.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ParseFailure {
    pub message: String,
    pub position: Position,
}

/// The self-contained outcome of one scan call. Violations are ordered by
/// span start, which for well-formed input is textual order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScanResult {
    pub status: ScanStatus,
    pub violations: Vec<Violation>,
    pub parse_failure: Option<ParseFailure>,
}

impl ScanResult {
    /// Build a result from collected violations, pinning the reporting order
    /// to span start. Traversal order already matches textual order for the
    /// grammar we use, but the sort makes the guarantee explicit.
    pub fn from_violations(mut violations: Vec<Violation>) -> Self {
        violations.sort_by_key(|v| v.span.start);
        let status = if violations.is_empty() {
            ScanStatus::Pass
        } else {
            ScanStatus::Fail
        };
        Self {
            status,
            violations,
            parse_failure: None,
        }
    }

    pub fn invalid(failure: ParseFailure) -> Self {
        Self {
            status: ScanStatus::Invalid,
            violations: Vec::new(),
            parse_failure: Some(failure),
        }
    }

    pub fn passed(&self) -> bool {
        self.status == ScanStatus::Pass
    }
}
