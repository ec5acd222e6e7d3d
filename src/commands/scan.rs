use crate::api::{self, FileScan};
use crate::cli::{OutputFormat, ScanArgs};
use crate::model::ScanStatus;
use crate::{report, style};

/// Run one scan and map the result to a process exit code:
/// 0 = pass, 1 = violations or parse failure, 2 = unreadable input.
pub fn cmd_scan(args: ScanArgs) -> i32 {
    let file_scan = match api::scan_file(&args.file, &args.allowlist) {
        Ok(scan) => scan,
        Err(err) => {
            style::error(&err.to_string());
            return 2;
        }
    };

    for warning in &file_scan.warnings {
        style::warning(warning);
    }

    let rendered = match args.format {
        OutputFormat::Text => {
            style::header(&format!("🔍 Checking {}...", style::path(&args.file)));
            style::header(&style::allowed_imports(file_scan.allowlist.specifiers()));
            report::render(
                &file_scan.result,
                &file_scan.source,
                &args.file.display().to_string(),
            )
        }
        OutputFormat::Json => match serde_json::to_string_pretty(&file_scan.result) {
            Ok(json) => json + "\n",
            Err(err) => {
                style::error(&format!("Failed to serialize result: {}", err));
                return 1;
            }
        },
    };

    match &args.output {
        Some(path) => {
            if let Err(err) = std::fs::write(path, &rendered) {
                style::error(&format!("Could not write output file: {}", err));
                return 1;
            }
        }
        None => print!("{}", rendered),
    }

    exit_code(&file_scan)
}

fn exit_code(file_scan: &FileScan) -> i32 {
    match file_scan.result.status {
        ScanStatus::Pass => 0,
        ScanStatus::Fail | ScanStatus::Invalid => 1,
    }
}
