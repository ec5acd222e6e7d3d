mod result;
mod violation;

pub use result::{ParseFailure, ScanResult, ScanStatus};
pub use violation::{Position, RuleId, Span, Violation};
