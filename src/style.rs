//! Terminal styling utilities for consistent CLI output

use colored::Colorize;

/// Print an error message to stderr
pub fn error(msg: &str) {
    eprintln!("{} {}", "error:".red().bold(), msg);
}

/// Print a warning message to stderr
pub fn warning(msg: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), msg);
}

/// Print a scan header line
pub fn header(msg: &str) {
    println!("{}", msg.white());
}

/// Format a path for display
pub fn path(p: &std::path::Path) -> String {
    p.display().to_string().cyan().to_string()
}

/// Format the allowed-imports preamble line
pub fn allowed_imports(specifiers: &[String]) -> String {
    format!(
        "{} {}",
        "Allowed imports:".white(),
        format!("[{}]", specifiers.join(", ")).yellow()
    )
}
