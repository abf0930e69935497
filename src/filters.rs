//! Export filtering for logs with nothing worth writing out
//!
//! A data file that only holds header blocks (the logger was plugged in and
//! removed again) decodes cleanly but produces empty exports. The CLI skips
//! those unless `--force-export` is given.

use crate::types::VoltcraftLog;

/// Determines if a log should be skipped for export
///
/// # Returns
/// Tuple of (should_skip, reason_description)
pub fn should_skip_export(log: &VoltcraftLog, force_export: bool) -> (bool, String) {
    if force_export {
        return (false, String::new());
    }

    if log.readings.is_empty() {
        return (
            true,
            format!(
                "no data records ({} header block(s), {} bytes)",
                log.stats.header_blocks, log.stats.total_bytes
            ),
        );
    }

    (false, String::new())
}
