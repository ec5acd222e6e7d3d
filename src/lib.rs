pub mod allowlist;
pub mod api;
pub mod cli;
pub mod commands;
pub mod engine;
pub mod model;
pub mod parser;
pub mod report;
pub mod style;

pub use allowlist::AllowList;
pub use api::{FileScan, ScanError, scan, scan_file, scan_source};
pub use cli::Cli;
pub use commands::cmd_scan;
pub use model::{ParseFailure, Position, RuleId, ScanResult, ScanStatus, Span, Violation};
pub use parser::{Dialect, SourceUnit};
pub use report::render;
