//! Loading of gzip-compressed numerics tables.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Cell values read as missing.
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A numerics table with free-form column names.
///
/// The first column is the tick counter; the rest are record-specific
/// measurements. Missing cells are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericsTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl NumericsTable {
    /// Returns the number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Returns the numerics path `<dir>/<record_name>n.csv.gz`.
pub fn numerics_path(record_dir: &Path, record_name: &str) -> PathBuf {
    record_dir.join(format!("{record_name}n.csv.gz"))
}

/// Reads a numerics table.
///
/// Returns `Ok(None)` when the file does not exist; numerics are optional
/// per record.
pub fn read_numerics(path: &Path) -> Result<Option<NumericsTable>> {
    if !path.is_file() {
        return Ok(None);
    }

    let file = File::open(path).map_err(|e| IngestError::open(path.to_path_buf(), e))?;
    let decoder = GzDecoder::new(BufReader::new(file));

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(decoder);

    let numerics_err = |source: csv::Error| IngestError::NumericsRead {
        path: path.to_path_buf(),
        source,
    };

    let columns: Vec<String> = reader
        .headers()
        .map_err(numerics_err)?
        .iter()
        .map(|h| h.strip_prefix('\u{feff}').unwrap_or(h).to_string())
        .collect();

    if columns.is_empty() || columns.iter().all(String::is_empty) {
        return Err(IngestError::EmptyNumerics {
            path: path.to_path_buf(),
        });
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(numerics_err)?;
        let mut row: Vec<Option<String>> = record.iter().map(cell_value).collect();
        row.resize(columns.len(), None);
        rows.push(row);
    }

    debug!(
        path = %path.display(),
        columns = columns.len(),
        rows = rows.len(),
        "loaded numerics"
    );

    Ok(Some(NumericsTable { columns, rows }))
}

fn cell_value(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if MISSING_MARKERS.contains(&trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}
