use crate::types::{BlackoutInterval, Reading};
use chrono::{Duration, NaiveDateTime};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Counters collected by the decoder over one complete scan
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParseStats {
    pub header_blocks: usize,
    pub data_records: usize,
    pub total_bytes: usize,
    /// Byte offset of the end marker
    pub end_marker_offset: usize,
    /// Bytes following the end marker, ignored by the decoder
    pub trailing_bytes: usize,
}

/// Complete decoded contents of one data file
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VoltcraftLog {
    pub stats: ParseStats,
    pub readings: Vec<Reading>,
    pub blackouts: Vec<BlackoutInterval>,
}

impl VoltcraftLog {
    pub fn first_timestamp(&self) -> Option<NaiveDateTime> {
        self.readings.first().map(|r| r.timestamp)
    }

    pub fn last_timestamp(&self) -> Option<NaiveDateTime> {
        self.readings.last().map(|r| r.timestamp)
    }

    /// Wall-clock span from the first to the last sample
    pub fn span(&self) -> Duration {
        match (self.first_timestamp(), self.last_timestamp()) {
            (Some(first), Some(last)) => last - first,
            _ => Duration::zero(),
        }
    }

    /// Minutes actually covered by samples (one per reading)
    pub fn recorded_minutes(&self) -> i64 {
        self.readings.len() as i64
    }

    pub fn has_blackouts(&self) -> bool {
        !self.blackouts.is_empty()
    }

    /// Sum of all blackout durations
    pub fn total_blackout_duration(&self) -> Duration {
        self.blackouts
            .iter()
            .fold(Duration::zero(), |acc, b| acc + b.duration)
    }
}
