//! Output rows, one struct per table.
//!
//! Field order is column order: rows are serialized positionally and the
//! header row comes from [`TableRow::COLUMNS`].

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::signal::SignalType;
use crate::timestamp::serialize_optional;

/// A row type bound to one output table.
pub trait TableRow: Serialize {
    /// Default file name of the table.
    const FILE_NAME: &'static str;
    /// Header row, in serialization order.
    const COLUMNS: &'static [&'static str];
}

/// One row of `waveform_records.csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordRow {
    pub record_id: String,
    pub subject_id: u64,
    pub hadm_id: Option<String>,
    #[serde(serialize_with = "serialize_optional")]
    pub start_datetime: Option<NaiveDateTime>,
    #[serde(serialize_with = "serialize_optional")]
    pub end_datetime: Option<NaiveDateTime>,
    /// Record length in samples at the base frequency.
    pub record_duration_sec: Option<u64>,
    pub file_path: String,
    pub header_file: String,
    pub base_counter_freq: Option<f64>,
    pub num_segments: usize,
}

impl TableRow for RecordRow {
    const FILE_NAME: &'static str = "waveform_records.csv";
    const COLUMNS: &'static [&'static str] = &[
        "record_id",
        "subject_id",
        "hadm_id",
        "start_datetime",
        "end_datetime",
        "record_duration_sec",
        "file_path",
        "header_file",
        "base_counter_freq",
        "num_segments",
    ];
}

/// One row of `waveform_segments.csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentRow {
    pub record_id: String,
    pub segment_name: String,
    /// Position in the record's unfiltered segment list.
    pub segment_num: usize,
    #[serde(serialize_with = "serialize_optional")]
    pub segment_start_time: Option<NaiveDateTime>,
    pub segment_duration_sec: Option<f64>,
    pub segment_header_file: String,
    pub segment_data_file: Option<String>,
    pub sampling_frequency: Option<f64>,
    pub num_signals: usize,
}

impl TableRow for SegmentRow {
    const FILE_NAME: &'static str = "waveform_segments.csv";
    const COLUMNS: &'static [&'static str] = &[
        "record_id",
        "segment_name",
        "segment_num",
        "segment_start_time",
        "segment_duration_sec",
        "segment_header_file",
        "segment_data_file",
        "sampling_frequency",
        "num_signals",
    ];
}

/// One row of `waveform_signals.csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalRow {
    pub record_id: String,
    pub segment_num: usize,
    pub signal_name: String,
    pub signal_index: usize,
    pub signal_units: Option<String>,
    pub signal_gain: Option<f64>,
    pub signal_baseline: Option<i64>,
    pub signal_adc_resolution: Option<i64>,
    pub signal_description: Option<String>,
    pub signal_type: SignalType,
}

impl TableRow for SignalRow {
    const FILE_NAME: &'static str = "waveform_signals.csv";
    const COLUMNS: &'static [&'static str] = &[
        "record_id",
        "segment_num",
        "signal_name",
        "signal_index",
        "signal_units",
        "signal_gain",
        "signal_baseline",
        "signal_adc_resolution",
        "signal_description",
        "signal_type",
    ];
}

/// One row of `waveform_numerics.csv`.
///
/// Vital-sign slots stay empty unless a source column was classified into
/// them. The generic measurement slot holds the first unclassified column.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NumericsRow {
    pub record_id: String,
    #[serde(serialize_with = "serialize_optional")]
    pub measurement_time: Option<NaiveDateTime>,
    pub counter_ticks: i64,
    pub heart_rate: Option<i64>,
    pub resp_rate: Option<i64>,
    pub spo2: Option<i64>,
    pub nibp_systolic: Option<i64>,
    pub nibp_diastolic: Option<i64>,
    pub nibp_mean: Option<i64>,
    pub abp_systolic: Option<i64>,
    pub abp_diastolic: Option<i64>,
    pub abp_mean: Option<i64>,
    pub cvp: Option<f64>,
    pub etco2: Option<f64>,
    pub temperature: Option<f64>,
    pub measurement_name: Option<String>,
    pub measurement_value: Option<f64>,
    pub measurement_unit: Option<String>,
}

impl TableRow for NumericsRow {
    const FILE_NAME: &'static str = "waveform_numerics.csv";
    const COLUMNS: &'static [&'static str] = &[
        "record_id",
        "measurement_time",
        "counter_ticks",
        "heart_rate",
        "resp_rate",
        "spo2",
        "nibp_systolic",
        "nibp_diastolic",
        "nibp_mean",
        "abp_systolic",
        "abp_diastolic",
        "abp_mean",
        "cvp",
        "etco2",
        "temperature",
        "measurement_name",
        "measurement_value",
        "measurement_unit",
    ];
}
