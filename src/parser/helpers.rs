//! Field decoding helpers for the Voltcraft data format
//!
//! Every multi-byte field is stored most significant byte first. Reading the
//! bytes as a run of hexadecimal digit pairs and parsing that run as a single
//! number gives the field value, which is the same as a big-endian unsigned
//! integer of the field's width.

use crate::error::{Result, VoltcraftError};
use crate::types::Reading;
use chrono::{NaiveDate, NaiveDateTime};

/// Offset added to the one-byte year stored in header blocks
pub const YEAR_BASE: i32 = 2000;

/// Decode a field of up to 8 bytes as a big-endian unsigned integer
pub fn decode_field(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte))
}

/// Decode the 5 date bytes following a header marker:
/// month, day, year since 2000, hour, minute
///
/// `offset` is only used to locate the block in error messages.
pub fn decode_header_timestamp(bytes: &[u8], offset: usize) -> Result<NaiveDateTime> {
    let &[month, day, year, hour, minute] = bytes else {
        return Err(VoltcraftError::format(format!(
            "header block at offset {offset} has {} date bytes, expected 5",
            bytes.len()
        )));
    };

    let year = YEAR_BASE + i32::from(year);
    NaiveDate::from_ymd_opt(year, u32::from(month), u32::from(day))
        .and_then(|date| date.and_hms_opt(u32::from(hour), u32::from(minute), 0))
        .ok_or_else(|| {
            VoltcraftError::format(format!(
                "header block at offset {offset} holds an invalid start time: \
                 {year:04}-{month:02}-{day:02} {hour:02}:{minute:02}"
            ))
        })
}

/// Decode a 5-byte data record taken at `timestamp`
///
/// Voltage is stored in tenths of a volt, current in milliamperes and the
/// power factor in hundredths. Values are not range checked.
pub fn decode_data_record(bytes: &[u8; 5], timestamp: NaiveDateTime) -> Reading {
    let voltage = decode_field(&bytes[0..2]) as f64 / 10.0;
    let current = decode_field(&bytes[2..4]) as f64 / 1000.0;
    let power_factor = decode_field(&bytes[4..5]) as f64 / 100.0;
    Reading::new(timestamp, voltage, current, power_factor)
}
