use chrono::{Duration, NaiveDateTime};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One decoded data record: a minute sample of the mains parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reading {
    pub timestamp: NaiveDateTime,
    /// Volts
    pub voltage: f64,
    /// Amperes
    pub current: f64,
    /// cos(phi), nominally 0..=1 but passed through unchecked
    pub power_factor: f64,
    /// Active power in kW
    pub power: f64,
    /// Apparent power in kVA
    pub apparent_power: f64,
}

impl Reading {
    /// Build a reading from its measured values, deriving active and apparent power
    pub fn new(timestamp: NaiveDateTime, voltage: f64, current: f64, power_factor: f64) -> Self {
        Self {
            timestamp,
            voltage,
            current,
            power_factor,
            power: voltage * current * power_factor / 1000.0,
            apparent_power: voltage * current / 1000.0,
        }
    }

    /// Energy represented by this one-minute sample, in kWh
    pub fn energy_kwh(&self) -> f64 {
        self.power / 60.0
    }

    /// Whether the load drew any active power during this sample
    pub fn is_consuming(&self) -> bool {
        self.power > 0.0
    }
}

/// A period with no recorded samples, inferred from a timestamp discontinuity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlackoutInterval {
    /// Timestamp of the last sample before the gap
    pub start: NaiveDateTime,
    #[cfg_attr(feature = "serde", serde(with = "duration_minutes"))]
    pub duration: Duration,
}

impl BlackoutInterval {
    /// Timestamp of the first sample after the gap, `None` past the calendar's range
    pub fn end(&self) -> Option<NaiveDateTime> {
        self.start.checked_add_signed(self.duration)
    }
}

// Timestamps have minute resolution, so whole minutes are lossless.
#[cfg(feature = "serde")]
mod duration_minutes {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(duration.num_minutes())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let minutes = i64::deserialize(deserializer)?;
        Ok(Duration::minutes(minutes))
    }
}
