//! Header contract between a header reader and the extractor.
//!
//! Every attribute is optional. An absent attribute means "unknown" and must
//! never be treated as an error by the extraction code.

use chrono::NaiveDateTime;

/// Parsed record or segment header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaveformHeader {
    /// Free-text comment lines in file order.
    pub comments: Vec<String>,
    /// Base date and time; present only when both were given.
    pub base_datetime: Option<NaiveDateTime>,
    /// Signal length in samples.
    pub sig_len: Option<u64>,
    /// Sampling frequency in Hz.
    pub fs: Option<f64>,
    /// Segment list of a multi-segment record, in header order.
    pub segments: Option<Vec<SegmentEntry>>,
    /// Number of signals declared on the record line.
    pub n_sig: usize,
    /// Signal specifications indexed by signal position.
    pub signals: Vec<SignalSpec>,
}

impl WaveformHeader {
    /// Returns the base frequency when it is usable as a divisor.
    pub fn positive_fs(&self) -> Option<f64> {
        self.fs.filter(|fs| fs.is_finite() && *fs > 0.0)
    }
}

/// One entry of a multi-segment record's segment list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentEntry {
    /// Segment name (`~` marks a gap).
    pub name: String,
    /// Segment length in samples at the record's base frequency.
    pub sample_len: Option<u64>,
}

impl SegmentEntry {
    pub fn new(name: impl Into<String>, sample_len: Option<u64>) -> Self {
        Self {
            name: name.into(),
            sample_len,
        }
    }
}

/// Per-signal attributes from a single-segment header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalSpec {
    /// Name of the file holding the samples.
    pub file_name: Option<String>,
    /// Signal name (the header's description field).
    pub name: Option<String>,
    pub units: Option<String>,
    pub adc_gain: Option<f64>,
    pub baseline: Option<i64>,
    pub adc_res: Option<i64>,
}
