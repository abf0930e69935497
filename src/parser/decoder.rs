//! Byte-level state machine turning a data file into readings
//!
//! The file is a flat run of three kinds of blocks, checked in this order at
//! every position: a header block (marker + start time), the end marker, or a
//! 5-byte data record. Records are one minute apart, counted from the start
//! time of the most recent header block.

use crate::error::{Result, VoltcraftError};
use crate::parser::helpers::{decode_data_record, decode_header_timestamp};
use crate::parser::stream::DataStream;
use crate::types::{ParseStats, Reading};
use chrono::{Duration, NaiveDateTime};

/// `E0 C5 EA`
pub const HEADER_MARKER: u64 = 14_730_730;
pub const HEADER_MARKER_LEN: usize = 3;
/// Month, day, year, hour, minute
pub const HEADER_DATE_LEN: usize = 5;
/// `FF FF FF FF`
pub const END_MARKER: u64 = 4_294_967_295;
pub const END_MARKER_LEN: usize = 4;
pub const DATA_RECORD_LEN: usize = 5;

/// Options affecting how a data file is decoded
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Baseline for data records found before any header block.
    /// When `None` such records are rejected as a format error.
    pub headerless_start: Option<NaiveDateTime>,
}

/// Lazy decoder over one data file
///
/// Yields one reading per data record. The first error ends the sequence.
pub struct Readings<'a> {
    stream: DataStream<'a>,
    options: ParseOptions,
    baseline: Option<NaiveDateTime>,
    minute_offset: i64,
    stats: ParseStats,
    finished: bool,
    complete: bool,
}

impl<'a> Readings<'a> {
    pub fn new(data: &'a [u8], options: ParseOptions) -> Self {
        Self {
            stream: DataStream::new(data),
            options,
            baseline: None,
            minute_offset: 0,
            stats: ParseStats {
                total_bytes: data.len(),
                ..ParseStats::default()
            },
            finished: false,
            complete: false,
        }
    }

    /// Counters gathered so far
    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    /// True once the end marker has been reached
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Consume the decoder, returning its counters
    pub fn into_stats(self) -> ParseStats {
        self.stats
    }

    fn read_header(&mut self) -> Result<()> {
        let block_offset = self.stream.pos;
        self.stream.skip(HEADER_MARKER_LEN)?;
        let date = self.stream.read_bytes(HEADER_DATE_LEN).map_err(|_| {
            VoltcraftError::format(format!(
                "header block at offset {block_offset} is truncated: {} date bytes remaining, expected {HEADER_DATE_LEN}",
                self.stream.remaining()
            ))
        })?;
        self.baseline = Some(decode_header_timestamp(date, block_offset)?);
        self.minute_offset = 0;
        self.stats.header_blocks += 1;
        Ok(())
    }

    fn finish_at_end_marker(&mut self) -> Result<()> {
        self.stats.end_marker_offset = self.stream.pos;
        self.stream.skip(END_MARKER_LEN)?;
        self.stats.trailing_bytes = self.stream.remaining();
        self.complete = true;
        Ok(())
    }

    fn read_record(&mut self) -> Result<Reading> {
        let record_offset = self.stream.pos;
        if self.stream.remaining() == 0 {
            return Err(VoltcraftError::format(format!(
                "data ends at offset {record_offset} without an end marker"
            )));
        }
        let bytes = self
            .stream
            .read_array::<DATA_RECORD_LEN>()
            .map_err(|_| {
                VoltcraftError::format(format!(
                    "truncated data record at offset {record_offset}: {} of {DATA_RECORD_LEN} bytes present, no end marker",
                    self.stream.remaining()
                ))
            })?;

        let baseline = self
            .baseline
            .or(self.options.headerless_start)
            .ok_or_else(|| {
                VoltcraftError::format(format!(
                    "data record at offset {record_offset} precedes any header block"
                ))
            })?;

        let timestamp = baseline
            .checked_add_signed(Duration::minutes(self.minute_offset))
            .ok_or_else(|| {
                VoltcraftError::format(format!(
                    "timestamp overflow at offset {record_offset}: {baseline} + {} min",
                    self.minute_offset
                ))
            })?;
        self.minute_offset += 1;
        self.stats.data_records += 1;
        Ok(decode_data_record(&bytes, timestamp))
    }

    /// Advance to the next data record, handling any header blocks on the way.
    /// Returns `None` at the end marker.
    fn step(&mut self) -> Result<Option<Reading>> {
        loop {
            if self.stream.peek_matches(HEADER_MARKER_LEN, HEADER_MARKER) {
                self.read_header()?;
                continue;
            }

            if self.stream.peek_matches(END_MARKER_LEN, END_MARKER) {
                self.finish_at_end_marker()?;
                return Ok(None);
            }

            return self.read_record().map(Some);
        }
    }
}

impl Iterator for Readings<'_> {
    type Item = Result<Reading>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.step() {
            Ok(Some(reading)) => Some(Ok(reading)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

impl std::iter::FusedIterator for Readings<'_> {}
