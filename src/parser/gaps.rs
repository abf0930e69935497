//! Blackout detection over a reading sequence
//!
//! The logger samples once a minute while powered, so any step larger than
//! that between two consecutive readings is a period without mains power.

use crate::error::{Result, VoltcraftError};
use crate::types::{BlackoutInterval, Reading};
use chrono::{Duration, NaiveDateTime};

/// Nominal time between two samples
pub const SAMPLE_INTERVAL_MINUTES: i64 = 1;

/// Lazy adapter yielding one blackout per oversized gap between neighbours
pub struct Blackouts<I> {
    readings: I,
    previous: Option<NaiveDateTime>,
    finished: bool,
}

impl<I> Blackouts<I>
where
    I: Iterator<Item = Result<Reading>>,
{
    pub fn new(readings: I) -> Self {
        Self {
            readings,
            previous: None,
            finished: false,
        }
    }
}

fn check_pair(previous: NaiveDateTime, current: NaiveDateTime) -> Result<Option<BlackoutInterval>> {
    let delta = current - previous;
    if delta < Duration::zero() {
        return Err(VoltcraftError::format(format!(
            "timestamps go backwards from {previous} to {current}; the file is probably corrupted"
        )));
    }
    if delta > Duration::minutes(SAMPLE_INTERVAL_MINUTES) {
        return Ok(Some(BlackoutInterval {
            start: previous,
            duration: delta,
        }));
    }
    Ok(None)
}

impl<I> Iterator for Blackouts<I>
where
    I: Iterator<Item = Result<Reading>>,
{
    type Item = Result<BlackoutInterval>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            let reading = match self.readings.next() {
                Some(Ok(reading)) => reading,
                Some(Err(err)) => {
                    self.finished = true;
                    return Some(Err(err));
                }
                None => {
                    self.finished = true;
                    return None;
                }
            };

            let Some(previous) = self.previous.replace(reading.timestamp) else {
                continue;
            };
            match check_pair(previous, reading.timestamp) {
                Ok(Some(blackout)) => return Some(Ok(blackout)),
                Ok(None) => continue,
                Err(err) => {
                    self.finished = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

impl<I> std::iter::FusedIterator for Blackouts<I> where I: Iterator<Item = Result<Reading>> {}

/// Detect blackouts in a sequence of decoded readings
///
/// Works directly on the decoder output, or on already collected readings via
/// `readings.iter().copied().map(Ok)`.
pub fn detect_blackouts<R>(readings: R) -> Blackouts<R::IntoIter>
where
    R: IntoIterator<Item = Result<Reading>>,
{
    Blackouts::new(readings.into_iter())
}
