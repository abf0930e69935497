use crate::error::{Result, VoltcraftError};
use crate::parser::decoder::{ParseOptions, Readings};
use crate::parser::gaps::detect_blackouts;
use crate::types::VoltcraftLog;
use std::path::Path;
use tracing::debug;

/// Lazily decode readings from an in-memory data file
///
/// Use this when the readings are consumed as a stream; see
/// [`parse_voltcraft_bytes`] for a fully assembled log.
pub fn read_readings(data: &[u8], options: ParseOptions) -> Readings<'_> {
    Readings::new(data, options)
}

/// Read and decode a data file
///
/// The whole file is loaded before decoding starts.
pub fn parse_voltcraft_file(file_path: &Path, options: &ParseOptions) -> Result<VoltcraftLog> {
    let file_data = std::fs::read(file_path).map_err(|source| VoltcraftError::FileAccess {
        path: file_path.to_path_buf(),
        source,
    })?;

    debug!(
        path = %file_path.display(),
        bytes = file_data.len(),
        "read data file"
    );

    let log = parse_voltcraft_bytes(&file_data, options)?;

    debug!(
        path = %file_path.display(),
        headers = log.stats.header_blocks,
        readings = log.readings.len(),
        blackouts = log.blackouts.len(),
        "decoded data file"
    );

    Ok(log)
}

/// Decode a data file already held in memory
pub fn parse_voltcraft_bytes(data: &[u8], options: &ParseOptions) -> Result<VoltcraftLog> {
    let mut decoder = read_readings(data, options.clone());
    let readings = decoder.by_ref().collect::<Result<Vec<_>>>()?;
    let stats = decoder.into_stats();

    let blackouts = detect_blackouts(readings.iter().copied().map(Ok)).collect::<Result<Vec<_>>>()?;

    Ok(VoltcraftLog {
        stats,
        readings,
        blackouts,
    })
}
