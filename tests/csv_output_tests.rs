#![cfg(feature = "cli")]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Integration tests for the CLI's CSV and report output
/// These run the built binary against synthetic data files

fn header(month: u8, day: u8, year: u8, hour: u8, minute: u8) -> Vec<u8> {
    vec![0xE0, 0xC5, 0xEA, month, day, year, hour, minute]
}

fn record(volts_tenths: u16, milliamps: u16, pf_hundredths: u8) -> Vec<u8> {
    let mut out = volts_tenths.to_be_bytes().to_vec();
    out.extend_from_slice(&milliamps.to_be_bytes());
    out.push(pf_hundredths);
    out
}

const END: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];

/// Two sessions on 2014-06-21: 09:30-09:34 and 10:00-10:02
fn write_fixture(dir: &Path, name: &str) -> PathBuf {
    let mut data = header(6, 21, 14, 9, 30);
    for i in 0..5u16 {
        data.extend(record(2300 + i, 435, 95));
    }
    data.extend(header(6, 21, 14, 10, 0));
    for _ in 0..3 {
        data.extend(record(2290, 0, 0));
    }
    data.extend(END);

    let path = dir.join(name);
    fs::write(&path, data).expect("Failed to write fixture");
    path
}

fn run_parser(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_voltcraft_parser"))
        .args(args)
        .output()
        .expect("Failed to run voltcraft_parser")
}

#[test]
fn test_csv_field_count_consistency() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_fixture(temp_dir.path(), "A0810702");
    let output_dir = temp_dir.path().join("out");

    let output = run_parser(&[
        "--output-dir",
        output_dir.to_str().unwrap(),
        input.to_str().unwrap(),
    ]);
    assert!(
        output.status.success(),
        "Parser failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let csv_content =
        fs::read_to_string(output_dir.join("A0810702.csv")).expect("Failed to read generated CSV");
    let lines: Vec<&str> = csv_content.lines().collect();

    assert_eq!(lines[0], "Timestamp;Voltage (V);Current (A);Power (kW)");
    assert_eq!(lines.len(), 1 + 8, "one row per data record");

    let header_fields = lines[0].split(';').count();
    for (i, line) in lines.iter().enumerate().skip(1) {
        assert_eq!(
            line.split(';').count(),
            header_fields,
            "Row {} has a different field count: {}",
            i + 1,
            line
        );
    }
}

#[test]
fn test_csv_values_and_timestamps() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_fixture(temp_dir.path(), "A0810702");

    let output = run_parser(&[input.to_str().unwrap()]);
    assert!(output.status.success());

    // default output directory is the input's directory
    let csv_content = fs::read_to_string(temp_dir.path().join("A0810702.csv")).unwrap();
    let lines: Vec<&str> = csv_content.lines().collect();

    assert_eq!(lines[1], "2014-06-21 09:30:00;230.0;0.435;0.095");
    assert_eq!(lines[5], "2014-06-21 09:34:00;230.4;0.435;0.095");
    assert_eq!(lines[6], "2014-06-21 10:00:00;229.0;0.000;0.000");
    assert_eq!(lines[8], "2014-06-21 10:02:00;229.0;0.000;0.000");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Processing: A0810702"));
    assert!(stdout.contains("8 readings in 2 session(s), 1 blackout(s)"));
}

#[test]
fn test_report_written_unless_disabled() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_fixture(temp_dir.path(), "A0810702");

    let output = run_parser(&[input.to_str().unwrap()]);
    assert!(output.status.success());
    let report = fs::read_to_string(temp_dir.path().join("A0810702.report.txt")).unwrap();
    assert!(report.contains("Recording sessions: 2"));
    assert!(report.contains("Blackouts: 1 (total 00d 00h 26m)"));
    assert!(report.contains("[2014-06-21 09:34] no samples for 00d 00h 26m"));

    let other_dir = temp_dir.path().join("no_report");
    let output = run_parser(&[
        "--no-report",
        "--output-dir",
        other_dir.to_str().unwrap(),
        input.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert!(other_dir.join("A0810702.csv").exists());
    assert!(!other_dir.join("A0810702.report.txt").exists());
}

#[test]
fn test_truncated_file_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut data = header(6, 21, 14, 9, 30);
    data.extend(record(2300, 435, 95));
    data.extend([0x08, 0xFC, 0x01]);
    let input = temp_dir.path().join("A0000001");
    fs::write(&input, data).unwrap();

    let output = run_parser(&[input.to_str().unwrap()]);
    assert!(!output.status.success(), "truncated file must not succeed");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error processing A0000001"), "{stderr}");
    assert!(stderr.contains("Format error"), "{stderr}");
    assert!(!temp_dir.path().join("A0000001.csv").exists());
}

#[test]
fn test_one_bad_file_does_not_stop_the_rest() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let good = write_fixture(temp_dir.path(), "A0000002");
    let bad = temp_dir.path().join("A0000001");
    fs::write(&bad, [0x08, 0xFC]).unwrap();

    let output = run_parser(&[bad.to_str().unwrap(), good.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(temp_dir.path().join("A0000002.csv").exists());
}

#[test]
fn test_directory_input() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_fixture(temp_dir.path(), "A0000001");
    write_fixture(temp_dir.path(), "A0000002");
    let output_dir = temp_dir.path().join("out");

    let output = run_parser(&[
        "--output-dir",
        output_dir.to_str().unwrap(),
        temp_dir.path().to_str().unwrap(),
    ]);
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(output_dir.join("A0000001.csv").exists());
    assert!(output_dir.join("A0000002.csv").exists());
}

#[test]
fn test_headerless_start_option() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut data = record(2300, 435, 95);
    data.extend(END);
    let input = temp_dir.path().join("A0000003");
    fs::write(&input, data).unwrap();

    let rejected = run_parser(&[input.to_str().unwrap()]);
    assert!(!rejected.status.success());
    let stderr = String::from_utf8_lossy(&rejected.stderr);
    assert!(stderr.contains("precedes any header block"), "{stderr}");
    assert!(stderr.contains("--headerless-start now"), "{stderr}");

    let now_dir = temp_dir.path().join("now");
    let dated_now = run_parser(&[
        "--headerless-start",
        "now",
        "--output-dir",
        now_dir.to_str().unwrap(),
        input.to_str().unwrap(),
    ]);
    assert!(dated_now.status.success());
    assert!(now_dir.join("A0000003.csv").exists());

    let accepted = run_parser(&[
        "--headerless-start",
        "2014-06-20 12:00",
        input.to_str().unwrap(),
    ]);
    assert!(accepted.status.success());
    let csv_content = fs::read_to_string(temp_dir.path().join("A0000003.csv")).unwrap();
    assert!(csv_content.contains("2014-06-20 12:00:00;230.0;0.435;0.095"));
}

#[test]
fn test_empty_log_skipped_unless_forced() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut data = header(6, 21, 14, 9, 30);
    data.extend(END);
    let input = temp_dir.path().join("A0000004");
    fs::write(&input, data).unwrap();

    let output = run_parser(&[input.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Skipping export"));
    assert!(!temp_dir.path().join("A0000004.csv").exists());

    let output = run_parser(&["--force-export", input.to_str().unwrap()]);
    assert!(output.status.success());
    let csv_content = fs::read_to_string(temp_dir.path().join("A0000004.csv")).unwrap();
    assert_eq!(csv_content.lines().count(), 1, "header row only");
}

#[test]
fn test_no_arguments_prints_help() {
    let output = run_parser(&[]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage"));
}
