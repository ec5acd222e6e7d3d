//! Renders a [`ScanResult`] as an annotated source excerpt report.
//!
//! Color is presentation only: the result itself is already fixed by the time
//! rendering happens, and `colored` honors `NO_COLOR`/non-TTY output.

use crate::model::{ScanResult, ScanStatus, Span, Violation};
use crate::parser::SourceUnit;
use colored::Colorize;
use std::fmt::Write;

/// Render the full report for one scan: verdict, one annotated block per
/// violation, and the closing instruction line.
pub fn render(result: &ScanResult, source: &SourceUnit, display_path: &str) -> String {
    let mut out = String::new();

    if let Some(failure) = &result.parse_failure {
        let _ = writeln!(
            out,
            "\n{}",
            "Your submission failed due to a syntax error...".red()
        );
        let _ = writeln!(
            out,
            "{}",
            format!(
                "Error: {} at (Line: {}, Column: {})",
                failure.message, failure.position.line, failure.position.column
            )
            .white()
        );
        return out;
    }

    if result.status == ScanStatus::Pass {
        let _ = writeln!(out, "\n{}", "✅ Your submission passed...".white());
        return out;
    }

    let _ = writeln!(
        out,
        "\n{}",
        format!(
            "Your submission failed with {} error(s)...",
            result.violations.len()
        )
        .red()
    );

    for violation in &result.violations {
        render_violation(&mut out, violation, source, display_path);
    }

    let _ = writeln!(
        out,
        "\n{}",
        "Please fix the issues listed above to continue with your submission.".red()
    );

    out
}

fn render_violation(out: &mut String, violation: &Violation, source: &SourceUnit, path: &str) {
    let span = violation.span;
    let _ = writeln!(
        out,
        "\n{} '{}' at ({}) in {}:",
        violation.reason.white(),
        violation.name.yellow(),
        format!("{}:{}", span.start.line, span.start.column).yellow(),
        path.cyan()
    );

    for line_number in span.start.line..=span.end.line {
        let Some(line) = source.line(line_number) else {
            continue;
        };

        let gutter = format!("{} | ", line_number);
        let _ = writeln!(
            out,
            "{}{}{}",
            line_number.to_string().yellow(),
            " | ".white(),
            line
        );
        let _ = writeln!(
            out,
            "{}{}",
            " ".repeat(gutter.len()),
            underline(span, line_number, line.len()).red()
        );
    }
}

/// Caret-and-tilde underline for one source line touched by `span`.
///
/// Single-line spans cover `[start_col, end_col)`. Across lines, the first
/// line is underlined from `start_col` to its end, interior lines in full,
/// and the last line from column 0 through `end_col`.
fn underline(span: Span, line_number: usize, line_len: usize) -> String {
    let start_col = span.start.column;
    let end_col = span.end.column;

    if span.start.line == span.end.line {
        format!(
            "{}^{}",
            " ".repeat(start_col),
            "~".repeat(end_col.saturating_sub(start_col + 1))
        )
    } else if line_number == span.start.line {
        format!(
            "{}^{}",
            " ".repeat(start_col),
            "~".repeat(line_len.saturating_sub(start_col))
        )
    } else if line_number == span.end.line {
        format!("^{}", "~".repeat(end_col.saturating_sub(1)))
    } else {
        format!("^{}", "~".repeat(line_len.saturating_sub(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Position;

    fn span(start: (usize, usize), end: (usize, usize)) -> Span {
        Span {
            start: Position {
                line: start.0,
                column: start.1,
            },
            end: Position {
                line: end.0,
                column: end.1,
            },
        }
    }

    #[test]
    fn single_line_underline_covers_start_to_end_exclusive() {
        // Columns 4..10 -> caret at 4, five tildes.
        assert_eq!(underline(span((1, 4), (1, 10)), 1, 20), "    ^~~~~~");
    }

    #[test]
    fn zero_width_span_still_gets_a_caret() {
        assert_eq!(underline(span((1, 3), (1, 3)), 1, 10), "   ^");
    }

    #[test]
    fn multi_line_underline_shapes() {
        let s = span((1, 6), (3, 4));
        // First line: from start column to line end.
        assert_eq!(underline(s, 1, 10), "      ^~~~~");
        // Interior line: fully underlined.
        assert_eq!(underline(s, 2, 8), "^~~~~~~");
        // Last line: column 0 through end column.
        assert_eq!(underline(s, 3, 12), "^~~~");
    }

    #[test]
    fn report_skips_lines_past_end_of_file() {
        let source = SourceUnit::new("require('fs');");
        let violation = Violation::disallowed_require("fs", span((1, 0), (4, 2)));
        let result = ScanResult::from_violations(vec![violation]);

        colored::control::set_override(false);
        let report = render(&result, &source, "submission.ts");
        assert!(report.contains("require('fs')"));
        assert!(report.contains("1 | require('fs');"));
        assert!(!report.contains("4 |"));
    }

    #[test]
    fn pass_report_is_a_single_line() {
        colored::control::set_override(false);
        let result = ScanResult::from_violations(Vec::new());
        let report = render(&result, &SourceUnit::new(""), "clean.ts");
        assert!(report.contains("Your submission passed"));
    }
}
