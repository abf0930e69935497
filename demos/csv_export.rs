//! CSV Export Example
//!
//! Demonstrates how to decode a Voltcraft data file and export its readings to
//! a semicolon-delimited CSV file, plus the plain-text summary report.
//!
//! Data records found before the first header block are rejected. Pass a
//! start time as the third argument ("now" or "YYYY-MM-DD HH:MM") to date them.

use std::path::Path;
use voltcraft_parser::{
    export_to_csv, export_to_report, format_duration, parse_timestamp, parse_voltcraft_file,
    ExportOptions, ParseOptions,
};

fn main() -> anyhow::Result<()> {
    // Get input file from command line or show usage
    let input_file = std::env::args().nth(1).unwrap_or_else(|| {
        println!("Usage: csv_export <data file> [output_dir] [headerless start]");
        println!("Example: csv_export A0810702 ./output");
        println!("\nNote: the logger names its data files like A0810702 (no extension).");
        std::process::exit(1);
    });

    // Get optional output directory from command line
    let output_dir = std::env::args().nth(2);

    let headerless_start = match std::env::args().nth(3) {
        Some(value) if value.eq_ignore_ascii_case("now") => {
            Some(chrono::Local::now().naive_local())
        }
        Some(value) => Some(
            parse_timestamp(&value)
                .ok_or_else(|| anyhow::anyhow!("invalid start time '{value}'"))?,
        ),
        None => None,
    };

    // CSV and report, no JSON
    let export_opts = ExportOptions {
        csv: true,
        report: true,
        json: false,
        output_dir,
        force_export: false,
    };

    println!("Parsing: {}", input_file);
    let log = parse_voltcraft_file(Path::new(&input_file), &ParseOptions { headerless_start })?;

    println!("\nLog Information:");
    println!("  Recording sessions: {}", log.stats.header_blocks);
    println!("  Data records: {}", log.stats.data_records);
    if let (Some(first), Some(last)) = (log.first_timestamp(), log.last_timestamp()) {
        println!("  First sample: {}", first);
        println!("  Last sample: {}", last);
    }
    println!(
        "  Blackouts: {} ({})",
        log.blackouts.len(),
        format_duration(log.total_blackout_duration())
    );
    if log.stats.trailing_bytes > 0 {
        println!(
            "  Ignored {} bytes after the end marker",
            log.stats.trailing_bytes
        );
    }

    println!("\nExporting...");
    if let Some(csv_path) = export_to_csv(&log, Path::new(&input_file), &export_opts)? {
        println!("✓ CSV: {}", csv_path.display());
    }
    if let Some(report_path) = export_to_report(&log, Path::new(&input_file), &export_opts)? {
        println!("✓ Report: {}", report_path.display());
    }

    Ok(())
}
