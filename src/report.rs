//! Human-readable summary report

use crate::conversion::{
    format_duration, format_duration_hours, format_duration_minutes, format_report_timestamp,
};
use crate::statistics::{compute_statistics, daily_history, history_label, HISTORY_DAYS};
use crate::types::VoltcraftLog;
use chrono::NaiveDateTime;
use std::io::{self, Write};

/// Write the summary report for `log` to `writer`
///
/// `source_name` identifies the data file in the title block and
/// `generated_at` is printed in the footer.
pub fn write_report<W: Write>(
    writer: &mut W,
    log: &VoltcraftLog,
    source_name: &str,
    generated_at: NaiveDateTime,
) -> io::Result<()> {
    writeln!(
        writer,
        "{} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )?;
    writeln!(writer, "Source file: {source_name}")?;
    writeln!(writer)?;

    write_overview(writer, log)?;

    let history = daily_history(&log.readings, HISTORY_DAYS);
    let stats = compute_statistics(&log.readings);

    let total_energy = stats.as_ref().map(|s| s.total_energy_kwh).unwrap_or(0.0);
    writeln!(writer, "Total power consumed: {total_energy:.3} kWh")?;
    writeln!(writer, "History:")?;
    for (back, day) in history.iter().enumerate() {
        writeln!(writer, "{:>15}: {:.3} kWh", history_label(back), day.energy_kwh)?;
    }
    writeln!(writer)?;

    writeln!(
        writer,
        "Total recorded time: {}",
        format_duration_minutes(log.recorded_minutes())
    )?;
    writeln!(writer, "History:")?;
    for (back, day) in history.iter().enumerate() {
        writeln!(
            writer,
            "{:>15}: {}",
            history_label(back),
            format_duration_hours(day.recorded_minutes)
        )?;
    }
    writeln!(writer)?;

    let consuming = stats.as_ref().map(|s| s.consuming_minutes).unwrap_or(0);
    writeln!(
        writer,
        "Total time with power consumption: {}",
        format_duration_minutes(consuming)
    )?;
    writeln!(writer, "History:")?;
    for (back, day) in history.iter().enumerate() {
        writeln!(
            writer,
            "{:>15}: {}",
            history_label(back),
            format_duration_hours(day.consuming_minutes)
        )?;
    }
    writeln!(writer)?;

    write_blackouts(writer, log)?;

    writeln!(writer, "Parameter history:")?;
    for r in &log.readings {
        writeln!(
            writer,
            "[{}] U={:.1}V I={:.3}A cosPHI={:.2} P={:.3}kW",
            format_report_timestamp(&r.timestamp),
            r.voltage,
            r.current,
            r.power_factor,
            r.power
        )?;
    }
    writeln!(writer)?;

    writeln!(writer, "Statistics:")?;
    match stats {
        Some(stats) => {
            writeln!(writer, "Minimum voltage: {:.1}V", stats.min_voltage)?;
            writeln!(writer, "Maximum voltage: {:.1}V", stats.max_voltage)?;
            writeln!(
                writer,
                "Maximum power: {:.3}kW at {}",
                stats.max_power,
                format_report_timestamp(&stats.max_power_at)
            )?;
            writeln!(writer, "Average power: {:.3}kW", stats.average_power)?;
        }
        None => writeln!(writer, "No data records")?,
    }
    writeln!(writer)?;

    writeln!(
        writer,
        "File generated on: {}",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    )?;
    Ok(())
}

fn write_overview<W: Write>(writer: &mut W, log: &VoltcraftLog) -> io::Result<()> {
    let describe = |ts: Option<NaiveDateTime>| {
        ts.map(|t| format_report_timestamp(&t))
            .unwrap_or_else(|| "-".to_string())
    };
    writeln!(writer, "First sample: {}", describe(log.first_timestamp()))?;
    writeln!(writer, "Last sample: {}", describe(log.last_timestamp()))?;
    writeln!(writer, "Recording sessions: {}", log.stats.header_blocks)?;
    writeln!(writer, "Data records: {}", log.stats.data_records)?;
    writeln!(writer)
}

fn write_blackouts<W: Write>(writer: &mut W, log: &VoltcraftLog) -> io::Result<()> {
    writeln!(
        writer,
        "Blackouts: {} (total {})",
        log.blackouts.len(),
        format_duration(log.total_blackout_duration())
    )?;
    for blackout in &log.blackouts {
        writeln!(
            writer,
            "[{}] no samples for {}",
            format_report_timestamp(&blackout.start),
            format_duration(blackout.duration)
        )?;
    }
    writeln!(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BlackoutInterval, ParseStats, Reading};
    use chrono::{Duration, NaiveDate};

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2014, 6, 21)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn render(log: &VoltcraftLog) -> String {
        let mut out = Vec::new();
        write_report(&mut out, log, "A0810702", at(12, 0)).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_report_sections() {
        let log = VoltcraftLog {
            stats: ParseStats {
                header_blocks: 2,
                data_records: 3,
                ..ParseStats::default()
            },
            readings: vec![
                Reading::new(at(10, 0), 230.0, 3.0, 1.0),
                Reading::new(at(10, 1), 228.5, 0.0, 0.0),
                Reading::new(at(10, 5), 231.0, 1.0, 0.5),
            ],
            blackouts: vec![BlackoutInterval {
                start: at(10, 1),
                duration: Duration::minutes(4),
            }],
        };
        let report = render(&log);

        assert!(report.contains("Source file: A0810702"));
        assert!(report.contains("First sample: 2014-06-21 10:00"));
        assert!(report.contains("Last sample: 2014-06-21 10:05"));
        assert!(report.contains("Recording sessions: 2"));
        assert!(report.contains("Total recorded time: 00d 00h 03m"));
        assert!(report.contains("Total time with power consumption: 00d 00h 02m"));
        assert!(report.contains("          Today: 00h 03m"));
        assert!(report.contains("      Yesterday: 00h 00m"));
        assert!(report.contains("     9 days ago: 00h 00m"));
        assert!(report.contains("Blackouts: 1 (total 00d 00h 04m)"));
        assert!(report.contains("[2014-06-21 10:01] no samples for 00d 00h 04m"));
        assert!(report.contains("[2014-06-21 10:00] U=230.0V I=3.000A cosPHI=1.00 P=0.690kW"));
        assert!(report.contains("Minimum voltage: 228.5V"));
        assert!(report.contains("Maximum voltage: 231.0V"));
        assert!(report.contains("Maximum power: 0.690kW at 2014-06-21 10:00"));
        assert!(report.trim_end().ends_with("File generated on: 2014-06-21 12:00:00"));
    }

    #[test]
    fn test_report_for_empty_log() {
        let log = VoltcraftLog {
            stats: ParseStats::default(),
            readings: Vec::new(),
            blackouts: Vec::new(),
        };
        let report = render(&log);
        assert!(report.contains("First sample: -"));
        assert!(report.contains("Total power consumed: 0.000 kWh"));
        assert!(report.contains("Blackouts: 0 (total 00d 00h 00m)"));
        assert!(report.contains("No data records"));
    }
}
