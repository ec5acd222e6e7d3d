use clap::Parser;
use sandscan::cli::{Cli, Command, OutputFormat, ScanArgs};
use sandscan::{cmd_scan, style};

fn main() {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Some(Command::Scan(args)) => cmd_scan(args),
        None => {
            // Backward compatibility: treat a bare path as the scan command
            match cli.file {
                Some(file) => cmd_scan(ScanArgs {
                    file,
                    allowlist: cli.allowlist,
                    format: OutputFormat::Text,
                    output: None,
                }),
                None => {
                    style::error("Please provide a file path to check.");
                    2
                }
            }
        }
    };

    std::process::exit(exit_code);
}
