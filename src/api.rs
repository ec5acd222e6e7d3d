//! Library API for embedding the scanner in a submission pipeline.
//!
//! Unlike the CLI command, which prints a report and returns an exit code,
//! these functions return a self-contained [`ScanResult`] the caller can act
//! on. A scan is a pure function of `(source, allowlist)`: no process-wide
//! state, safe to call from many threads at once.
//!
//! # Example
//!
//! ```
//! use sandscan::{AllowList, scan};
//!
//! let allowlist: AllowList = ["fs"].into_iter().collect();
//! let result = scan("import fs from 'fs'; eval('x');", &allowlist);
//! assert!(!result.passed());
//! ```

use crate::allowlist::AllowList;
use crate::engine;
use crate::model::{ParseFailure, Position, ScanResult};
use crate::parser::{self, Dialect, ParseError, SourceUnit};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that abort a file scan before any analysis happens.
///
/// A broken allow-list is deliberately not in here: it degrades to an empty
/// allow-list with a warning instead of failing the scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Could not read file '{}': {source}", path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Scan source text against an allow-list, parsing as TypeScript (a superset
/// of JavaScript, so plain JS submissions parse too).
pub fn scan(source_text: &str, allowlist: &AllowList) -> ScanResult {
    let source = SourceUnit::new(source_text);
    scan_source(&source, allowlist, Dialect::TypeScript)
}

/// Scan an already-built [`SourceUnit`] with an explicit dialect.
pub fn scan_source(source: &SourceUnit, allowlist: &AllowList, dialect: Dialect) -> ScanResult {
    let tree = match parser::parse(source, dialect) {
        Ok(tree) => tree,
        Err(ParseError::Syntax { message, position }) => {
            return ScanResult::invalid(ParseFailure { message, position });
        }
        Err(err @ ParseError::NoTree) => {
            return ScanResult::invalid(ParseFailure {
                message: err.to_string(),
                position: Position { line: 1, column: 0 },
            });
        }
    };

    match engine::run_rules(tree.root_node(), source, allowlist) {
        Ok(violations) => ScanResult::from_violations(violations),
        // Pathological nesting fails closed: invalid input, not a crash.
        Err(depth) => ScanResult::invalid(ParseFailure {
            message: depth.to_string(),
            position: depth.position,
        }),
    }
}

/// Everything the CLI needs after scanning a file from disk.
pub struct FileScan {
    pub result: ScanResult,
    pub source: SourceUnit,
    pub allowlist: AllowList,
    /// Non-fatal loader warnings, e.g. a missing or malformed allow-list.
    pub warnings: Vec<String>,
}

/// Read and scan a file. Only an unreadable source file is fatal; allow-list
/// problems degrade to deny-all with a warning.
pub fn scan_file(path: &Path, allowlist_path: &Path) -> Result<FileScan, ScanError> {
    let text = std::fs::read_to_string(path).map_err(|source| ScanError::UnreadableFile {
        path: path.to_path_buf(),
        source,
    })?;

    let mut warnings = Vec::new();
    let allowlist = AllowList::load(allowlist_path).unwrap_or_else(|err| {
        warnings.push(format!(
            "Could not read '{}'. No imports will be allowed. ({err})",
            allowlist_path.display()
        ));
        AllowList::default()
    });

    let source = SourceUnit::new(text);
    let result = scan_source(&source, &allowlist, Dialect::from_path(path));

    Ok(FileScan {
        result,
        source,
        allowlist,
        warnings,
    })
}
