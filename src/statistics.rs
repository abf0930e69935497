//! Summary statistics over decoded readings

use crate::types::Reading;
use chrono::{Days, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

/// Number of days covered by the report's history tables
pub const HISTORY_DAYS: usize = 10;

/// Extremes and totals over a set of readings
#[derive(Debug, Clone, PartialEq)]
pub struct DataStatistics {
    pub min_voltage: f64,
    pub max_voltage: f64,
    pub max_power: f64,
    pub max_power_at: NaiveDateTime,
    /// Mean active power in kW
    pub average_power: f64,
    pub total_energy_kwh: f64,
    pub recorded_minutes: i64,
    /// Minutes during which the load drew active power
    pub consuming_minutes: i64,
}

/// Compute statistics, or `None` when there are no readings
pub fn compute_statistics(readings: &[Reading]) -> Option<DataStatistics> {
    let first = readings.first()?;

    let mut stats = DataStatistics {
        min_voltage: first.voltage,
        max_voltage: first.voltage,
        max_power: first.power,
        max_power_at: first.timestamp,
        average_power: 0.0,
        total_energy_kwh: 0.0,
        recorded_minutes: 0,
        consuming_minutes: 0,
    };

    let mut power_sum = 0.0;
    for reading in readings {
        stats.min_voltage = stats.min_voltage.min(reading.voltage);
        stats.max_voltage = stats.max_voltage.max(reading.voltage);
        if reading.power > stats.max_power {
            stats.max_power = reading.power;
            stats.max_power_at = reading.timestamp;
        }
        power_sum += reading.power;
        stats.total_energy_kwh += reading.energy_kwh();
        stats.recorded_minutes += 1;
        if reading.is_consuming() {
            stats.consuming_minutes += 1;
        }
    }
    stats.average_power = power_sum / readings.len() as f64;

    Some(stats)
}

/// Totals for one calendar day
#[derive(Debug, Clone, PartialEq)]
pub struct DailyUsage {
    pub date: NaiveDate,
    pub energy_kwh: f64,
    pub recorded_minutes: i64,
    pub consuming_minutes: i64,
}

impl DailyUsage {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            energy_kwh: 0.0,
            recorded_minutes: 0,
            consuming_minutes: 0,
        }
    }
}

/// Per-day totals for the `days` days ending on the date of the last reading
///
/// Index 0 is that last day ("today"), index 1 the day before and so on.
/// Days without samples are present with zero totals.
pub fn daily_history(readings: &[Reading], days: usize) -> Vec<DailyUsage> {
    let Some(today) = readings.last().map(|r| r.timestamp.date()) else {
        return Vec::new();
    };

    let mut per_day: BTreeMap<NaiveDate, DailyUsage> = BTreeMap::new();
    for reading in readings {
        let date = reading.timestamp.date();
        let entry = per_day
            .entry(date)
            .or_insert_with(|| DailyUsage::empty(date));
        entry.energy_kwh += reading.energy_kwh();
        entry.recorded_minutes += 1;
        if reading.is_consuming() {
            entry.consuming_minutes += 1;
        }
    }

    (0..days as u64)
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .map(|date| {
            per_day
                .remove(&date)
                .unwrap_or_else(|| DailyUsage::empty(date))
        })
        .collect()
}

/// Label used for a history row: "Today", "Yesterday", "N days ago"
pub fn history_label(days_back: usize) -> String {
    match days_back {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        n => format!("{n} days ago"),
    }
}
