//! Per-record extraction pipeline.
//!
//! A record is turned into a [`RecordBatch`] in full before anything is
//! written, so a record whose header cannot be read leaves no rows in any
//! table. Segment and numerics failures only drop their own rows.

use std::path::Path;

use anyhow::{Context, Result, bail};
use indicatif::ProgressBar;
use tracing::{debug, error, info, info_span, trace, warn};
use wfc_ingest::{HEADER_EXTENSION, HeaderReader, numerics_path, read_numerics, scan_corpus};
use wfc_model::{NumericsRow, RecordRow, ScannedRecord, SegmentRow, SignalRow, WaveformHeader};
use wfc_output::{CatalogWriter, TableWriter};
use wfc_transform::{
    NumericsLayout, classify_signal, is_layout_segment, record_end, resolve_identity,
    segment_duration, segment_start,
};

/// Options for an extraction run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    /// Do not open numerics files.
    pub skip_numerics: bool,
}

/// Every row derived from one record.
#[derive(Debug, Clone)]
pub struct RecordBatch {
    pub record: RecordRow,
    pub segments: Vec<SegmentRow>,
    pub signals: Vec<SignalRow>,
    pub numerics: Vec<NumericsRow>,
    /// Segment and numerics failures, already logged.
    pub warnings: Vec<String>,
    pub segments_failed: usize,
    pub numerics_failed: bool,
}

/// Counters and messages collected over a run.
#[derive(Debug, Default)]
pub struct ExtractStats {
    pub records_written: usize,
    pub records_failed: usize,
    pub segments_failed: usize,
    pub numerics_failed: usize,
    /// One line per skipped record.
    pub errors: Vec<String>,
    /// One line per skipped segment or numerics file.
    pub warnings: Vec<String>,
}

impl ExtractStats {
    fn absorb(&mut self, batch: RecordBatch) {
        self.records_written += 1;
        self.segments_failed += batch.segments_failed;
        if batch.numerics_failed {
            self.numerics_failed += 1;
        }
        self.warnings.extend(batch.warnings);
    }

    fn record_failed(&mut self, record_id: &str, error: &anyhow::Error) {
        error!(record_id, "skipping record: {error:#}");
        self.records_failed += 1;
        self.errors.push(format!("{record_id}: {error:#}"));
    }
}

/// Scans the data root.
///
/// # Errors
///
/// Fails when the root is not a directory, cannot be scanned, or holds no
/// records.
pub fn discover_records(data_dir: &Path) -> Result<Vec<ScannedRecord>> {
    if !data_dir.is_dir() {
        bail!("data directory not found: {}", data_dir.display());
    }
    info!(data_dir = %data_dir.display(), "scanning for records");
    let records = scan_corpus(data_dir)
        .with_context(|| format!("scan data directory {}", data_dir.display()))?;
    if records.is_empty() {
        bail!("no records found under {}", data_dir.display());
    }
    info!(records = records.len(), "found records");
    Ok(records)
}

/// Builds the records table row from a scanned record and its header.
pub fn build_record_row(scanned: &ScannedRecord, header: &WaveformHeader) -> RecordRow {
    let identity = resolve_identity(&header.comments, scanned.subject_id);
    RecordRow {
        record_id: scanned.record_name.clone(),
        subject_id: identity.subject_id,
        hadm_id: identity.hadm_id,
        start_datetime: header.base_datetime,
        end_datetime: record_end(header),
        record_duration_sec: header.sig_len,
        file_path: scanned.relative_path.clone(),
        header_file: format!("{}.{HEADER_EXTENSION}", scanned.record_name),
        base_counter_freq: header.fs,
        num_segments: header.segments.as_ref().map_or(0, Vec::len),
    }
}

/// Builds the segment row for entry `index` of the record's segment list.
pub fn build_segment_row(
    record_id: &str,
    record: &WaveformHeader,
    index: usize,
    name: &str,
    segment: &WaveformHeader,
) -> SegmentRow {
    SegmentRow {
        record_id: record_id.to_string(),
        segment_name: name.to_string(),
        segment_num: index,
        segment_start_time: segment_start(record, index),
        segment_duration_sec: segment_duration(segment),
        segment_header_file: format!("{name}.{HEADER_EXTENSION}"),
        segment_data_file: segment
            .signals
            .iter()
            .any(|signal| signal.file_name.is_some())
            .then(|| format!("{name}.dat")),
        sampling_frequency: segment.fs,
        num_signals: segment.n_sig,
    }
}

/// Builds one signal row per declared signal of a segment.
pub fn build_signal_rows(
    record_id: &str,
    segment_num: usize,
    segment: &WaveformHeader,
) -> Vec<SignalRow> {
    (0..segment.n_sig)
        .filter_map(|index| {
            let Some(spec) = segment.signals.get(index) else {
                trace!(record_id, segment_num, index, "signal not described");
                return None;
            };
            let name = spec.name.clone().unwrap_or_default();
            Some(SignalRow {
                record_id: record_id.to_string(),
                segment_num,
                signal_type: classify_signal(&name),
                signal_name: name,
                signal_index: index,
                signal_units: spec.units.clone(),
                signal_gain: spec.adc_gain,
                signal_baseline: spec.baseline,
                signal_adc_resolution: spec.adc_res,
                signal_description: None,
            })
        })
        .collect()
}

/// Reads and maps the record's numerics file.
///
/// A record without a numerics file yields no rows. Any unreadable file or
/// row fails the whole file.
pub fn extract_numerics(
    record_dir: &Path,
    record_id: &str,
    header: &WaveformHeader,
) -> Result<Vec<NumericsRow>> {
    let path = numerics_path(record_dir, record_id);
    let Some(table) = read_numerics(&path)? else {
        trace!(record_id, "no numerics file");
        return Ok(Vec::new());
    };

    let layout = NumericsLayout::new(&table.columns);
    table
        .rows
        .iter()
        .enumerate()
        .map(|(index, cells)| {
            layout.map_row(record_id, index, cells, header.base_datetime, header.fs)
        })
        .collect::<wfc_transform::Result<Vec<_>>>()
        .with_context(|| format!("invalid numerics file {}", path.display()))
}

/// Derives every row of one record.
///
/// # Errors
///
/// Returns an error when the record header cannot be read. Segment and
/// numerics failures are logged and recorded on the batch instead.
pub fn process_record<R: HeaderReader + ?Sized>(
    reader: &R,
    data_dir: &Path,
    scanned: &ScannedRecord,
    options: ExtractOptions,
) -> Result<RecordBatch> {
    let record_dir = data_dir.join(&scanned.relative_path);
    let header = reader
        .read_header(&record_dir, &scanned.record_name)
        .with_context(|| format!("failed to read header of record {}", scanned.record_name))?;

    let record = build_record_row(scanned, &header);
    debug!(
        record_id = %record.record_id,
        subject_id = record.subject_id,
        hadm_id = ?record.hadm_id,
        segments = record.num_segments,
        "read record header"
    );

    let mut batch = RecordBatch {
        record,
        segments: Vec::new(),
        signals: Vec::new(),
        numerics: Vec::new(),
        warnings: Vec::new(),
        segments_failed: 0,
        numerics_failed: false,
    };

    extract_segments(reader, &record_dir, &header, &mut batch);

    if !options.skip_numerics {
        let record_id = batch.record.record_id.clone();
        match extract_numerics(&record_dir, &record_id, &header) {
            Ok(rows) => batch.numerics = rows,
            Err(e) => {
                warn!(record_id = %record_id, "skipping numerics: {e:#}");
                batch.warnings.push(format!("{record_id}: numerics skipped: {e:#}"));
                batch.numerics_failed = true;
            }
        }
    }

    Ok(batch)
}

fn extract_segments<R: HeaderReader + ?Sized>(
    reader: &R,
    record_dir: &Path,
    header: &WaveformHeader,
    batch: &mut RecordBatch,
) {
    let Some(segments) = header.segments.as_deref() else {
        return;
    };
    let record_id = batch.record.record_id.clone();

    for (index, entry) in segments.iter().enumerate() {
        if is_layout_segment(&entry.name) {
            trace!(record_id = %record_id, segment = %entry.name, index, "skipping layout segment");
            continue;
        }
        match reader.read_header(record_dir, &entry.name) {
            Ok(segment) => {
                batch
                    .signals
                    .extend(build_signal_rows(&record_id, index, &segment));
                batch.segments.push(build_segment_row(
                    &record_id,
                    header,
                    index,
                    &entry.name,
                    &segment,
                ));
            }
            Err(e) => {
                warn!(record_id = %record_id, segment = %entry.name, "skipping segment: {e}");
                batch
                    .warnings
                    .push(format!("{record_id}/{}: segment skipped: {e}", entry.name));
                batch.segments_failed += 1;
            }
        }
    }
}

fn write_batch(writer: &mut CatalogWriter, batch: &RecordBatch) -> Result<()> {
    writer
        .write_record(&batch.record)
        .context("failed to write records table")?;
    writer
        .write_segments(&batch.segments)
        .context("failed to write segments table")?;
    writer
        .write_signals(&batch.signals)
        .context("failed to write signals table")?;
    writer
        .write_numerics(&batch.numerics)
        .context("failed to write numerics table")?;
    Ok(())
}

/// Extracts every record into the catalog tables.
///
/// Records are processed in the given order, one at a time.
///
/// # Errors
///
/// Only output failures end the run; record failures are counted in the
/// returned stats.
pub fn run_extraction<R: HeaderReader + ?Sized>(
    reader: &R,
    data_dir: &Path,
    records: &[ScannedRecord],
    writer: &mut CatalogWriter,
    options: ExtractOptions,
    progress: &ProgressBar,
) -> Result<ExtractStats> {
    let mut stats = ExtractStats::default();
    for scanned in records {
        let span = info_span!("record", record_id = %scanned.record_name);
        let _guard = span.enter();
        progress.set_message(scanned.record_name.clone());

        match process_record(reader, data_dir, scanned, options) {
            Ok(batch) => {
                write_batch(writer, &batch)?;
                stats.absorb(batch);
            }
            Err(e) => stats.record_failed(&scanned.record_name, &e),
        }
        progress.inc(1);
    }
    Ok(stats)
}

/// Rewrites only the records table.
///
/// Segment headers and numerics files are never opened.
///
/// # Errors
///
/// Only output failures end the run.
pub fn run_records_update<R: HeaderReader + ?Sized>(
    reader: &R,
    data_dir: &Path,
    records: &[ScannedRecord],
    writer: &mut TableWriter<RecordRow>,
    progress: &ProgressBar,
) -> Result<ExtractStats> {
    let mut stats = ExtractStats::default();
    for scanned in records {
        let span = info_span!("record", record_id = %scanned.record_name);
        let _guard = span.enter();
        progress.set_message(scanned.record_name.clone());

        let record_dir = data_dir.join(&scanned.relative_path);
        let header = reader
            .read_header(&record_dir, &scanned.record_name)
            .with_context(|| {
                format!("failed to read header of record {}", scanned.record_name)
            });
        match header {
            Ok(header) => {
                let row = build_record_row(scanned, &header);
                writer
                    .write(&row)
                    .context("failed to write records table")?;
                stats.records_written += 1;
            }
            Err(e) => stats.record_failed(&scanned.record_name, &e),
        }
        progress.inc(1);
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use wfc_model::{SegmentEntry, SignalSpec, SignalType};

    fn scanned() -> ScannedRecord {
        ScannedRecord {
            relative_path: "p100/p10000032/81739927".to_string(),
            record_name: "81739927".to_string(),
            subject_id: 10000032,
        }
    }

    fn record_header() -> WaveformHeader {
        WaveformHeader {
            comments: vec![
                "subject_id 10000099".to_string(),
                "hadm_id 20000001".to_string(),
            ],
            base_datetime: NaiveDate::from_ymd_opt(2023, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0),
            sig_len: Some(3600),
            fs: Some(1.0),
            segments: Some(vec![
                SegmentEntry::new("81739927_layout", Some(0)),
                SegmentEntry::new("81739927_0001", Some(1800)),
                SegmentEntry::new("81739927_0002", Some(1800)),
            ]),
            ..WaveformHeader::default()
        }
    }

    fn segment_header() -> WaveformHeader {
        WaveformHeader {
            sig_len: Some(1800),
            fs: Some(1.0),
            n_sig: 2,
            signals: vec![
                SignalSpec {
                    file_name: Some("81739927_0001e.dat".to_string()),
                    name: Some("II".to_string()),
                    units: Some("mV".to_string()),
                    adc_gain: Some(200.0),
                    baseline: Some(0),
                    adc_res: Some(12),
                },
                SignalSpec {
                    file_name: Some("81739927_0001e.dat".to_string()),
                    name: Some("Pleth".to_string()),
                    units: Some("NU".to_string()),
                    adc_gain: Some(4096.0),
                    baseline: Some(2048),
                    adc_res: Some(12),
                },
            ],
            ..WaveformHeader::default()
        }
    }

    #[test]
    fn record_row_uses_header_identity_and_timing() {
        let row = build_record_row(&scanned(), &record_header());
        assert_eq!(row.subject_id, 10000099);
        assert_eq!(row.hadm_id.as_deref(), Some("20000001"));
        assert_eq!(
            row.end_datetime,
            NaiveDate::from_ymd_opt(2023, 1, 1)
                .unwrap()
                .and_hms_opt(1, 0, 0)
        );
        assert_eq!(row.header_file, "81739927.hea");
        assert_eq!(row.num_segments, 3);
        assert_eq!(row.record_duration_sec, Some(3600));
    }

    #[test]
    fn record_row_without_segments() {
        let header = WaveformHeader {
            fs: Some(62.5),
            ..WaveformHeader::default()
        };
        let row = build_record_row(&scanned(), &header);
        assert_eq!(row.subject_id, 10000032);
        assert_eq!(row.num_segments, 0);
        assert_eq!(row.start_datetime, None);
        assert_eq!(row.end_datetime, None);
    }

    #[test]
    fn segment_row_offsets_from_earlier_segments() {
        let row = build_segment_row(
            "81739927",
            &record_header(),
            2,
            "81739927_0002",
            &segment_header(),
        );
        assert_eq!(row.segment_num, 2);
        assert_eq!(
            row.segment_start_time,
            NaiveDate::from_ymd_opt(2023, 1, 1)
                .unwrap()
                .and_hms_opt(0, 30, 0)
        );
        assert_eq!(row.segment_duration_sec, Some(1800.0));
        assert_eq!(row.segment_header_file, "81739927_0002.hea");
        assert_eq!(row.segment_data_file.as_deref(), Some("81739927_0002.dat"));
        assert_eq!(row.num_signals, 2);
    }

    #[test]
    fn segment_without_signal_files_has_no_data_file() {
        let segment = WaveformHeader {
            fs: Some(62.5),
            ..WaveformHeader::default()
        };
        let row =
            build_segment_row("81739927", &record_header(), 1, "81739927_0001", &segment);
        assert_eq!(row.segment_data_file, None);
        assert_eq!(row.segment_duration_sec, None);
    }

    #[test]
    fn segment_data_file_requires_a_named_signal_file() {
        let mut segment = segment_header();
        for signal in &mut segment.signals {
            signal.file_name = None;
        }
        let row =
            build_segment_row("81739927", &record_header(), 1, "81739927_0001", &segment);
        assert_eq!(row.segment_data_file, None);
        assert_eq!(row.num_signals, 2);
    }

    #[test]
    fn signal_rows_are_classified_in_order() {
        let rows = build_signal_rows("81739927", 1, &segment_header());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].signal_index, 0);
        assert_eq!(rows[0].signal_type, SignalType::Ecg);
        assert_eq!(rows[1].signal_name, "Pleth");
        assert_eq!(rows[1].signal_type, SignalType::Plethysmogram);
        assert_eq!(rows[1].signal_baseline, Some(2048));
        assert!(rows.iter().all(|row| row.signal_description.is_none()));
    }

    #[test]
    fn undescribed_signals_are_left_out() {
        let mut segment = segment_header();
        segment.n_sig = 3;
        assert_eq!(build_signal_rows("81739927", 1, &segment).len(), 2);
    }
}
