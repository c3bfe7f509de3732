//! Waveform corpus ingestion.
//!
//! This crate provides everything that touches the input tree:
//!
//! - **Record Discovery**: walk the group / subject / record hierarchy
//! - **Header Reading**: the [`HeaderReader`] seam plus a WFDB `.hea` implementation
//! - **Numerics Loading**: read the gzip-compressed `<record>n.csv.gz` tables
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use wfc_ingest::{HeaderReader, WfdbHeaderReader, scan_corpus};
//!
//! let root = Path::new("/data/mimic4wdb/0.1.0/waves");
//! let records = scan_corpus(root)?;
//!
//! let reader = WfdbHeaderReader;
//! for record in &records {
//!     let dir = root.join(&record.relative_path);
//!     let header = reader.read_header(&dir, &record.record_name)?;
//! }
//! ```

mod discovery;
mod error;
mod header;
mod numerics;

// === Error Types ===
pub use error::{IngestError, Result};

// === Record Discovery ===
pub use discovery::{HEADER_EXTENSION, header_path, scan_corpus};

// === Header Reading ===
pub use header::{HeaderReader, WfdbHeaderReader, parse_header};

// === Numerics Loading ===
pub use numerics::{NumericsTable, numerics_path, read_numerics};
