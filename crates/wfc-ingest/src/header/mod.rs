//! Header reading.
//!
//! Extraction code talks to headers only through [`HeaderReader`], so tests
//! can hand it in-memory fixtures instead of files.

mod parse;

use std::path::Path;

use wfc_model::WaveformHeader;

use crate::discovery::header_path;
use crate::error::{IngestError, Result};

pub use parse::parse_header;

/// Source of record and segment headers.
pub trait HeaderReader {
    /// Reads the header named `name` located in `dir`.
    ///
    /// `name` is a record or segment name without extension.
    fn read_header(&self, dir: &Path, name: &str) -> Result<WaveformHeader>;
}

/// Reads WFDB `.hea` text headers from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct WfdbHeaderReader;

impl HeaderReader for WfdbHeaderReader {
    fn read_header(&self, dir: &Path, name: &str) -> Result<WaveformHeader> {
        let path = header_path(dir, name);
        let content =
            std::fs::read_to_string(&path).map_err(|e| IngestError::open(path.clone(), e))?;
        parse_header(&content, &path)
    }
}
