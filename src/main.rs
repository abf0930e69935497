//! CLI binary for the Voltcraft data file parser

use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDateTime, Timelike};
use clap::{Arg, ArgAction, Command};
use glob::glob;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use voltcraft_parser::{
    export_to_csv, export_to_report, format_duration, parse_timestamp, parse_voltcraft_file,
    should_skip_export, ExportOptions, ParseOptions, VoltcraftLog,
};

fn build_command() -> Command {
    let command = Command::new("Voltcraft Parser")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Decode Voltcraft Energy-Logger data files. Exports readings to CSV and a summary report.")
        .arg(
            Arg::new("files")
                .help("Data files or directories to decode. Directories are scanned (not recursively) for regular files. Supports globbing.")
                .required(false)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output and detailed parsing information")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .help("Directory for output files (default: same as input file)")
                .value_name("DIR"),
        )
        .arg(
            Arg::new("no-report")
                .long("no-report")
                .help("Do not write the .report.txt summary (CSV is always written)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("force-export")
                .long("force-export")
                .help("Export files even when they contain no data records")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("headerless-start")
                .long("headerless-start")
                .help("Start time for data records found before the first header block: 'now' or 'YYYY-MM-DD HH:MM' (default: reject such files)")
                .value_name("TIME"),
        );

    #[cfg(feature = "json")]
    let command = command.arg(
        Arg::new("json")
            .long("json")
            .help("Also export the decoded log as JSON")
            .action(ArgAction::SetTrue),
    );

    command
}

fn init_tracing(debug: bool) {
    let default_directive = if debug {
        "voltcraft_parser=debug"
    } else {
        "voltcraft_parser=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_headerless_start(value: &str) -> Result<NaiveDateTime> {
    if value.eq_ignore_ascii_case("now") {
        let now = chrono::Local::now().naive_local();
        return now
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .ok_or_else(|| anyhow!("cannot truncate current time to minutes"));
    }
    parse_timestamp(value).ok_or_else(|| {
        anyhow!("invalid --headerless-start '{value}', expected 'now' or 'YYYY-MM-DD HH:MM'")
    })
}

/// Expand globs and directories into a sorted list of candidate files
fn expand_input_paths(patterns: &[&String]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for pattern in patterns {
        let paths: Vec<PathBuf> = if pattern.contains('*') || pattern.contains('?') {
            match glob(pattern) {
                Ok(entries) => {
                    let mut matched = Vec::new();
                    for entry in entries {
                        match entry {
                            Ok(path) => matched.push(path),
                            Err(e) => eprintln!("Error reading glob match for '{pattern}': {e}"),
                        }
                    }
                    debug!("glob pattern '{pattern}' matched {} paths", matched.len());
                    matched
                }
                Err(e) => {
                    eprintln!("Invalid glob pattern '{pattern}': {e}");
                    continue;
                }
            }
        } else {
            vec![PathBuf::from(pattern.as_str())]
        };

        for path in paths {
            if path.is_dir() {
                match std::fs::read_dir(&path) {
                    Ok(entries) => {
                        let mut in_dir: Vec<PathBuf> = entries
                            .filter_map(|entry| entry.ok().map(|e| e.path()))
                            .filter(|p| p.is_file())
                            .filter(|p| !is_export_output(p))
                            .collect();
                        in_dir.sort();
                        files.extend(in_dir);
                    }
                    Err(e) => eprintln!("Warning: Cannot read directory {path:?}: {e}"),
                }
            } else if path.exists() {
                files.push(path);
            } else {
                eprintln!("Warning: File does not exist: {path:?}");
            }
        }
    }

    files
}

/// Files this tool writes itself, skipped when scanning directories
fn is_export_output(path: &Path) -> bool {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    name.ends_with(".csv") || name.ends_with(".report.txt") || name.ends_with(".json")
}

fn process_file(
    path: &Path,
    parse_options: &ParseOptions,
    export_options: &ExportOptions,
) -> Result<()> {
    let log = parse_voltcraft_file(path, parse_options)
        .with_context(|| format!("Failed to decode {}", path.display()))?;

    println!(
        "  {} readings in {} session(s), {} blackout(s) totalling {}",
        log.readings.len(),
        log.stats.header_blocks,
        log.blackouts.len(),
        format_duration(log.total_blackout_duration())
    );

    let (skip, reason) = should_skip_export(&log, export_options.force_export);
    if skip {
        warn!(path = %path.display(), "skipping export: {reason}");
        println!("  Skipping export: {reason}");
        return Ok(());
    }

    if let Some(csv_path) = export_to_csv(&log, path, export_options)? {
        println!("Exported readings to: {}", csv_path.display());
    }
    if let Some(report_path) = export_to_report(&log, path, export_options)? {
        println!("Exported report to: {}", report_path.display());
    }
    export_json(&log, path, export_options)?;

    Ok(())
}

#[cfg(feature = "json")]
fn export_json(log: &VoltcraftLog, path: &Path, export_options: &ExportOptions) -> Result<()> {
    if let Some(json_path) = voltcraft_parser::export_to_json(log, path, export_options)? {
        println!("Exported JSON to: {}", json_path.display());
    }
    Ok(())
}

#[cfg(not(feature = "json"))]
fn export_json(_log: &VoltcraftLog, _path: &Path, _export_options: &ExportOptions) -> Result<()> {
    Ok(())
}

fn main() -> Result<()> {
    let matches = build_command().get_matches();

    let debug = matches.get_flag("debug");
    init_tracing(debug);
    debug!(
        git_sha = option_env!("VERGEN_GIT_SHA").unwrap_or("unknown"),
        git_commit_date = option_env!("VERGEN_GIT_COMMIT_DATE").unwrap_or("unknown"),
        "{} {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    // Check if no files were provided and show help
    let file_patterns: Vec<&String> = match matches.get_many::<String>("files") {
        Some(files) => files.collect(),
        None => {
            build_command().print_help()?;
            println!();
            return Ok(());
        }
    };

    let headerless_start = matches
        .get_one::<String>("headerless-start")
        .map(|value| parse_headerless_start(value))
        .transpose()?;
    let parse_options = ParseOptions { headerless_start };

    #[cfg(feature = "json")]
    let export_json = matches.get_flag("json");
    #[cfg(not(feature = "json"))]
    let export_json = false;

    let export_options = ExportOptions {
        csv: true, // CSV export is always enabled for the CLI binary
        report: !matches.get_flag("no-report"),
        json: export_json,
        output_dir: matches.get_one::<String>("output-dir").cloned(),
        force_export: matches.get_flag("force-export"),
    };

    debug!("input patterns: {file_patterns:?}");
    let input_files = expand_input_paths(&file_patterns);
    if input_files.is_empty() {
        eprintln!("Error: No input files found.");
        eprintln!("Input patterns were: {file_patterns:?}");
        std::process::exit(1);
    }

    let mut processed_files = 0;
    for (index, path) in input_files.iter().enumerate() {
        if index > 0 {
            println!();
        }

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown");
        println!("Processing: {filename}");

        match process_file(path, &parse_options, &export_options) {
            Ok(()) => processed_files += 1,
            Err(e) => {
                eprintln!("Error processing {filename}: {e:#}");
                eprintln!("Continuing with next file...");
            }
        }
    }

    if processed_files == 0 {
        eprintln!(
            "Error: No files were successfully processed out of {} files found.",
            input_files.len()
        );
        eprintln!("This could be due to:");
        eprintln!("  - Files not being Voltcraft data files");
        eprintln!("  - Truncated files without an end marker");
        eprintln!(
            "  - Data records before the first header (use --headerless-start now to date them from the current time)"
        );
        eprintln!("Use --debug flag for more detailed error information.");
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        build_command().debug_assert();
    }

    #[test]
    fn test_parse_headerless_start() {
        let ts = parse_headerless_start("2014-06-21 09:30").unwrap();
        assert_eq!(ts.to_string(), "2014-06-21 09:30:00");

        let now = parse_headerless_start("NOW").unwrap();
        assert_eq!(now.second(), 0);

        assert!(parse_headerless_start("yesterday").is_err());
    }

    #[test]
    fn test_is_export_output() {
        assert!(is_export_output(Path::new("A0810702.csv")));
        assert!(is_export_output(Path::new("out/A0810702.report.txt")));
        assert!(!is_export_output(Path::new("A0810702")));
        assert!(!is_export_output(Path::new("A0810702.BIN")));
    }
}
