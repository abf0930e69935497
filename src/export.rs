//! Export functionality for decoded data files
//!
//! Writes a parsed [`VoltcraftLog`] out as a semicolon-delimited CSV file, a
//! plain-text summary report and, with the `json` feature, a JSON document.

use crate::error::Result;
use crate::report::write_report;
use crate::types::VoltcraftLog;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CSV_DELIMITER: u8 = b';';
pub const CSV_HEADER: [&str; 4] = ["Timestamp", "Voltage (V)", "Current (A)", "Power (kW)"];

/// Export options for controlling output formats
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub csv: bool,
    pub report: bool,
    pub json: bool,
    pub output_dir: Option<String>,
    pub force_export: bool,
}

/// Compute output paths for all export kinds
///
/// Returns (csv_path, report_path, json_path). Files land in
/// `export_options.output_dir`, or next to the input file.
pub fn compute_export_paths(
    input_path: &Path,
    export_options: &ExportOptions,
) -> (PathBuf, PathBuf, PathBuf) {
    let base_name = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("voltcraft");

    let output_dir = match export_options.output_dir {
        Some(ref dir) => PathBuf::from(dir),
        None => input_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    (
        output_dir.join(format!("{base_name}.csv")),
        output_dir.join(format!("{base_name}.report.txt")),
        output_dir.join(format!("{base_name}.json")),
    )
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            std::fs::create_dir_all(dir)?;
            debug!(dir = %dir.display(), "created output directory");
        }
    }
    Ok(())
}

/// Write readings as CSV rows to any writer
#[cfg(feature = "csv")]
pub fn write_csv<W: Write>(log: &VoltcraftLog, writer: W) -> Result<()> {
    use crate::conversion::format_csv_timestamp;

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(CSV_DELIMITER)
        .from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for r in &log.readings {
        wtr.write_record([
            format_csv_timestamp(&r.timestamp),
            format!("{:.1}", r.voltage),
            format!("{:.3}", r.current),
            format!("{:.3}", r.power),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Export readings to `<stem>.csv`
///
/// Returns the written path, or `None` when CSV export is disabled.
#[cfg(feature = "csv")]
pub fn export_to_csv(
    log: &VoltcraftLog,
    input_path: &Path,
    export_options: &ExportOptions,
) -> Result<Option<PathBuf>> {
    if !export_options.csv {
        return Ok(None);
    }

    let (csv_path, _, _) = compute_export_paths(input_path, export_options);
    ensure_parent_dir(&csv_path)?;

    let file = File::create(&csv_path)?;
    write_csv(log, BufWriter::new(file))?;

    debug!(
        path = %csv_path.display(),
        rows = log.readings.len(),
        "exported CSV"
    );
    Ok(Some(csv_path))
}

/// Export the summary report to `<stem>.report.txt`
///
/// Returns the written path, or `None` when report export is disabled.
pub fn export_to_report(
    log: &VoltcraftLog,
    input_path: &Path,
    export_options: &ExportOptions,
) -> Result<Option<PathBuf>> {
    if !export_options.report {
        return Ok(None);
    }

    let (_, report_path, _) = compute_export_paths(input_path, export_options);
    ensure_parent_dir(&report_path)?;

    let source_name = input_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");
    let generated_at = chrono::Local::now().naive_local();

    let mut writer = BufWriter::new(File::create(&report_path)?);
    write_report(&mut writer, log, source_name, generated_at)?;
    writer.flush()?;

    debug!(path = %report_path.display(), "exported report");
    Ok(Some(report_path))
}

/// Export the whole log as pretty-printed JSON to `<stem>.json`
///
/// Returns the written path, or `None` when JSON export is disabled.
#[cfg(feature = "json")]
pub fn export_to_json(
    log: &VoltcraftLog,
    input_path: &Path,
    export_options: &ExportOptions,
) -> Result<Option<PathBuf>> {
    if !export_options.json {
        return Ok(None);
    }

    let (_, _, json_path) = compute_export_paths(input_path, export_options);
    ensure_parent_dir(&json_path)?;

    let mut writer = BufWriter::new(File::create(&json_path)?);
    serde_json::to_writer_pretty(&mut writer, log)?;
    writer.flush()?;

    debug!(path = %json_path.display(), "exported JSON");
    Ok(Some(json_path))
}
