//! Waveform catalog data model.
//!
//! This crate holds the plain data types shared by the extraction crates:
//!
//! - [`header`]: the header contract a reader hands to the extractor
//! - [`rows`]: one struct per output table, serialized in column order
//! - [`signal`]: physiological signal categories
//! - [`timestamp`]: the `YYYY-MM-DD HH:MM:SS` timestamp format used in every table
//!
//! No I/O happens here; discovery and header reading live in `wfc-ingest`,
//! derivations in `wfc-transform` and CSV writing in `wfc-output`.

pub mod header;
pub mod rows;
pub mod signal;
pub mod timestamp;

pub use header::{SegmentEntry, SignalSpec, WaveformHeader};
pub use rows::{NumericsRow, RecordRow, SegmentRow, SignalRow, TableRow};
pub use signal::SignalType;
pub use timestamp::{TIMESTAMP_FORMAT, format_timestamp};

/// A record found by the corpus scanner.
///
/// The scanner yields these in group, subject, record order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedRecord {
    /// Path of the record directory relative to the data root, `/`-separated.
    pub relative_path: String,
    /// Record name (also the record directory name and header stem).
    pub record_name: String,
    /// Subject id parsed from the `p<digits>` subject directory.
    pub subject_id: u64,
}
