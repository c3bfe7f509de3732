//! Table writers.

use std::fs::{self, File};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use wfc_model::{NumericsRow, RecordRow, SegmentRow, SignalRow, TableRow};

use crate::error::{OutputError, Result};

/// Rows written to one table file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCount {
    /// Default file name of the table (e.g. `waveform_records.csv`).
    pub table: &'static str,
    pub path: PathBuf,
    pub rows: usize,
}

/// Ensure a parent directory exists for a file path.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| OutputError::CreateDir {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}

/// Append-only writer for one table.
///
/// The header row is written on creation, so a table with no rows still
/// has its header.
pub struct TableWriter<T: TableRow> {
    path: PathBuf,
    writer: csv::Writer<File>,
    rows: usize,
    _row: PhantomData<fn(&T)>,
}

impl<T: TableRow> TableWriter<T> {
    /// Creates (or truncates) the table file at `path` and writes its header.
    pub fn create(path: &Path) -> Result<Self> {
        ensure_parent_dir(path)?;

        let csv_err = |source: csv::Error| OutputError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)
            .map_err(csv_err)?;
        writer.write_record(T::COLUMNS).map_err(csv_err)?;

        debug!(path = %path.display(), "opened table");

        Ok(Self {
            path: path.to_path_buf(),
            writer,
            rows: 0,
            _row: PhantomData,
        })
    }

    /// Appends one row.
    pub fn write(&mut self, row: &T) -> Result<()> {
        self.writer.serialize(row).map_err(|e| OutputError::Csv {
            path: self.path.clone(),
            source: e,
        })?;
        self.rows += 1;
        Ok(())
    }

    /// Appends rows in order.
    pub fn write_all<'a, I>(&mut self, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        for row in rows {
            self.write(row)?;
        }
        Ok(())
    }

    /// Number of data rows written so far.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flushes and closes the file.
    pub fn finish(mut self) -> Result<TableCount> {
        self.writer.flush().map_err(|e| OutputError::Flush {
            path: self.path.clone(),
            source: e,
        })?;
        info!(path = %self.path.display(), rows = self.rows, "wrote table");
        Ok(TableCount {
            table: T::FILE_NAME,
            path: self.path,
            rows: self.rows,
        })
    }
}

/// Writers for all catalog tables of one extraction run.
pub struct CatalogWriter {
    records: TableWriter<RecordRow>,
    segments: TableWriter<SegmentRow>,
    signals: TableWriter<SignalRow>,
    numerics: Option<TableWriter<NumericsRow>>,
}

impl CatalogWriter {
    /// Creates the table files in `output_dir`.
    ///
    /// The numerics table is only created when `include_numerics` is set.
    pub fn create(output_dir: &Path, include_numerics: bool) -> Result<Self> {
        fs::create_dir_all(output_dir).map_err(|e| OutputError::CreateDir {
            path: output_dir.to_path_buf(),
            source: e,
        })?;

        let numerics = if include_numerics {
            Some(TableWriter::create(&output_dir.join(NumericsRow::FILE_NAME))?)
        } else {
            None
        };

        Ok(Self {
            records: TableWriter::create(&output_dir.join(RecordRow::FILE_NAME))?,
            segments: TableWriter::create(&output_dir.join(SegmentRow::FILE_NAME))?,
            signals: TableWriter::create(&output_dir.join(SignalRow::FILE_NAME))?,
            numerics,
        })
    }

    pub fn write_record(&mut self, row: &RecordRow) -> Result<()> {
        self.records.write(row)
    }

    pub fn write_segments(&mut self, rows: &[SegmentRow]) -> Result<()> {
        self.segments.write_all(rows)
    }

    pub fn write_signals(&mut self, rows: &[SignalRow]) -> Result<()> {
        self.signals.write_all(rows)
    }

    /// Appends numerics rows; a no-op when numerics are disabled.
    pub fn write_numerics(&mut self, rows: &[NumericsRow]) -> Result<()> {
        match self.numerics.as_mut() {
            Some(writer) => writer.write_all(rows),
            None => Ok(()),
        }
    }

    /// Flushes and closes every table, returning row counts in table order.
    pub fn finish(self) -> Result<Vec<TableCount>> {
        let mut counts = vec![
            self.records.finish()?,
            self.segments.finish()?,
            self.signals.finish()?,
        ];
        if let Some(numerics) = self.numerics {
            counts.push(numerics.finish()?);
        }
        Ok(counts)
    }
}
