//! Timestamp and duration derivations.
//!
//! Every function returns `None` when an input is missing or the arithmetic
//! cannot be done (non-positive frequency, overflow).

use chrono::{NaiveDateTime, TimeDelta};
use wfc_model::{SegmentEntry, WaveformHeader};

/// Adds `samples / freq` seconds to `base`, rounded to the microsecond.
pub fn offset_by_samples(base: NaiveDateTime, samples: f64, freq: f64) -> Option<NaiveDateTime> {
    if !freq.is_finite() || freq <= 0.0 || !samples.is_finite() {
        return None;
    }

    let micros = (samples / freq * 1_000_000.0).round();
    if micros.abs() >= i64::MAX as f64 {
        return None;
    }

    base.checked_add_signed(TimeDelta::microseconds(micros as i64))
}

/// Record end: base time plus signal length over base frequency.
pub fn record_end(header: &WaveformHeader) -> Option<NaiveDateTime> {
    let base = header.base_datetime?;
    let sig_len = header.sig_len?;
    let fs = header.positive_fs()?;
    offset_by_samples(base, sig_len as f64, fs)
}

/// Sum of the sample lengths of all segments before `index`.
///
/// Skipped layout segments count toward the offset. Returns `None` if any
/// earlier length is unknown or `index` is out of range.
pub fn segment_offset_samples(segments: &[SegmentEntry], index: usize) -> Option<u64> {
    segments
        .get(..index)?
        .iter()
        .try_fold(0u64, |acc, segment| acc.checked_add(segment.sample_len?))
}

/// Start of the segment at `index` of `record`'s segment list.
pub fn segment_start(record: &WaveformHeader, index: usize) -> Option<NaiveDateTime> {
    let base = record.base_datetime?;
    let fs = record.positive_fs()?;
    let offset = segment_offset_samples(record.segments.as_deref()?, index)?;
    offset_by_samples(base, offset as f64, fs)
}

/// Segment duration in seconds from the segment's own header.
pub fn segment_duration(segment: &WaveformHeader) -> Option<f64> {
    let sig_len = segment.sig_len?;
    let fs = segment.positive_fs()?;
    Some(sig_len as f64 / fs)
}

/// Timestamp of a numerics tick counter value.
pub fn tick_timestamp(
    base: Option<NaiveDateTime>,
    ticks: i64,
    freq: Option<f64>,
) -> Option<NaiveDateTime> {
    offset_by_samples(base?, ticks as f64, freq?)
}
