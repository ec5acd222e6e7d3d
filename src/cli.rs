use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sandscan")]
#[command(about = "Scan JavaScript/TypeScript submissions for sandbox policy violations")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// File to scan
    /// Used when no subcommand is specified for backward compatibility
    pub file: Option<PathBuf>,

    /// Allow-list document (JSON object with an "allowed" array)
    #[arg(long, default_value = "allowed.json")]
    pub allowlist: PathBuf,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Scan a file and report policy violations (default behavior)
    Scan(ScanArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct ScanArgs {
    /// File to scan
    pub file: PathBuf,

    /// Allow-list document (JSON object with an "allowed" array)
    #[arg(long, default_value = "allowed.json")]
    pub allowlist: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Colorized annotated source excerpts
    #[default]
    Text,
    /// The ScanResult as JSON, for pipeline consumption
    Json,
}
