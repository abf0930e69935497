//! Voltcraft Energy-Logger data file parser
//!
//! A Rust library for decoding the binary data files written by the Voltcraft
//! Energy-Logger 4000 family of mains power loggers into minute readings of
//! voltage, current and power factor, with blackout detection and CSV/report
//! export.
//!
//! # Features
//!
//! - **`csv`** (default): Enable CSV export functionality
//! - **`cli`** (default): Build the command-line interface binary
//! - **`json`**: Enable JSON export of the decoded log
//! - **`serde`**: Enable serialization/deserialization of types
//!
//! # Quick Start
//!
//! Parse a data file and look at the readings:
//! ```rust,no_run
//! use voltcraft_parser::{parse_voltcraft_file, ParseOptions};
//! use std::path::Path;
//!
//! let log = parse_voltcraft_file(Path::new("A0810702"), &ParseOptions::default()).unwrap();
//! println!("Decoded {} readings", log.readings.len());
//! for blackout in &log.blackouts {
//!     println!("No power from {} for {} min", blackout.start, blackout.duration.num_minutes());
//! }
//! ```
//!
//! Stream readings without collecting them:
//! ```rust
//! use voltcraft_parser::{read_readings, ParseOptions};
//!
//! let data = [0xE0, 0xC5, 0xEA, 6, 21, 14, 9, 30, 0x08, 0xFC, 0x01, 0xB3, 0x5F, 0xFF, 0xFF, 0xFF, 0xFF];
//! for reading in read_readings(&data, ParseOptions::default()) {
//!     let reading = reading.unwrap();
//!     println!("{} {:.1} V {:.3} kW", reading.timestamp, reading.voltage, reading.power);
//! }
//! ```
//!
//! # Public API
//!
//! ## Parsing Functions
//! - [`parse_voltcraft_file`] - Read and decode a data file
//! - [`parse_voltcraft_bytes`] - Decode a data file held in memory
//! - [`read_readings`] - Lazy decoder over an in-memory file
//! - [`detect_blackouts`] - Lazy blackout detection over a reading sequence
//!
//! ## Data Types
//! - [`VoltcraftLog`] - Decoded readings, blackouts and parse counters
//! - [`Reading`] - One minute sample
//! - [`BlackoutInterval`] - Inferred period without mains power
//! - [`ParseOptions`] / [`ExportOptions`] - Decoder and export configuration
//!
//! ## Export Functions
//! - `export_to_csv` - Semicolon-delimited CSV (feature `csv`)
//! - [`export_to_report`] - Plain-text summary report
//! - `export_to_json` - JSON document (feature `json`)
//! - [`compute_export_paths`] - Output path computation

pub mod conversion;
pub mod error;
pub mod export;
pub mod filters;
pub mod parser;
pub mod report;
pub mod statistics;
pub mod types;

// Re-export everything from modules for convenience
#[allow(ambiguous_glob_reexports)]
pub use conversion::*;
#[allow(ambiguous_glob_reexports)]
pub use error::*;
#[allow(ambiguous_glob_reexports)]
pub use export::*;
#[allow(ambiguous_glob_reexports)]
pub use filters::*;
#[allow(ambiguous_glob_reexports)]
pub use parser::*;
#[allow(ambiguous_glob_reexports)]
pub use report::*;
#[allow(ambiguous_glob_reexports)]
pub use statistics::*;
#[allow(ambiguous_glob_reexports)]
pub use types::*;
