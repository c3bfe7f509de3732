//! WFDB header text parsing.
//!
//! Record line:
//! `name[/n_seg] n_sig [fs[/counter_freq[(base_counter)]] [sig_len [base_time [base_date]]]]`
//!
//! A multi-segment record is followed by `n_seg` lines of `seg_name seg_len`.
//! A single-segment record is followed by `n_sig` signal lines:
//! `file format adc_gain[(baseline)][/units] adc_res adc_zero init checksum block_size description`.
//! Lines starting with `#` are comments.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use wfc_model::{SegmentEntry, SignalSpec, WaveformHeader};

use crate::error::{IngestError, Result};

/// Gain used when a signal line omits it or gives zero.
const DEFAULT_GAIN: f64 = 200.0;

/// Units used when a signal line omits them.
const DEFAULT_UNITS: &str = "mV";

/// Parses header text. `path` is only used for error reporting.
pub fn parse_header(content: &str, path: &Path) -> Result<WaveformHeader> {
    let mut comments = Vec::new();
    let mut body = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(comment) = line.strip_prefix('#') {
            comments.push(comment.trim_start().to_string());
            continue;
        }
        body.push((idx + 1, line));
    }

    let mut lines = body.into_iter();
    let Some((line_no, record_line)) = lines.next() else {
        return Err(IngestError::EmptyHeader {
            path: path.to_path_buf(),
        });
    };

    let malformed = |line: usize, reason: String| IngestError::MalformedHeader {
        path: path.to_path_buf(),
        line,
        reason,
    };

    let record = parse_record_line(record_line).map_err(|reason| malformed(line_no, reason))?;
    let mut last_line = line_no;

    let mut header = WaveformHeader {
        comments,
        base_datetime: match (record.base_date, record.base_time) {
            (Some(date), Some(time)) => Some(NaiveDateTime::new(date, time)),
            _ => None,
        },
        sig_len: record.sig_len,
        fs: record.fs,
        segments: None,
        n_sig: record.n_sig,
        signals: Vec::new(),
    };

    if let Some(n_seg) = record.n_seg {
        let mut segments = Vec::with_capacity(n_seg);
        for _ in 0..n_seg {
            let Some((line_no, line)) = lines.next() else {
                return Err(malformed(
                    last_line + 1,
                    format!("expected {n_seg} segment lines, found {}", segments.len()),
                ));
            };
            last_line = line_no;
            segments.push(parse_segment_line(line).map_err(|reason| malformed(line_no, reason))?);
        }
        header.segments = Some(segments);
    } else {
        for _ in 0..record.n_sig {
            let Some((line_no, line)) = lines.next() else {
                return Err(malformed(
                    last_line + 1,
                    format!(
                        "expected {} signal lines, found {}",
                        record.n_sig,
                        header.signals.len()
                    ),
                ));
            };
            last_line = line_no;
            header
                .signals
                .push(parse_signal_line(line).map_err(|reason| malformed(line_no, reason))?);
        }
    }

    Ok(header)
}

#[derive(Debug, Default)]
struct RecordLine {
    n_seg: Option<usize>,
    n_sig: usize,
    fs: Option<f64>,
    sig_len: Option<u64>,
    base_time: Option<NaiveTime>,
    base_date: Option<NaiveDate>,
}

fn parse_record_line(line: &str) -> std::result::Result<RecordLine, String> {
    let mut fields = line.split_whitespace();
    let mut record = RecordLine::default();

    let name = fields.next().ok_or("missing record name")?;
    if let Some((_, n_seg)) = name.split_once('/') {
        record.n_seg = Some(parse_field(n_seg, "segment count")?);
    }

    let n_sig = fields.next().ok_or("missing signal count")?;
    record.n_sig = parse_field(n_sig, "signal count")?;

    if let Some(freq) = fields.next() {
        // Counter frequency and base counter are not used
        let fs = freq.split('/').next().unwrap_or(freq);
        record.fs = Some(parse_field(fs, "sampling frequency")?);
    }

    if let Some(sig_len) = fields.next() {
        record.sig_len = Some(parse_field(sig_len, "signal length")?);
    }

    if let Some(time) = fields.next() {
        record.base_time = Some(parse_base_time(time)?);
    }

    if let Some(date) = fields.next() {
        record.base_date = Some(
            NaiveDate::parse_from_str(date, "%d/%m/%Y")
                .map_err(|e| format!("invalid base date '{date}': {e}"))?,
        );
    }

    Ok(record)
}

/// Parses `HH:MM:SS[.frac]` or `MM:SS[.frac]`.
fn parse_base_time(value: &str) -> std::result::Result<NaiveTime, String> {
    let normalized = if value.matches(':').count() == 1 {
        format!("00:{value}")
    } else {
        value.to_string()
    };
    NaiveTime::parse_from_str(&normalized, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(&normalized, "%H:%M:%S"))
        .map_err(|e| format!("invalid base time '{value}': {e}"))
}

fn parse_segment_line(line: &str) -> std::result::Result<SegmentEntry, String> {
    let mut fields = line.split_whitespace();
    let name = fields.next().ok_or("missing segment name")?;
    let sample_len = fields
        .next()
        .map(|len| parse_field(len, "segment length"))
        .transpose()?;
    Ok(SegmentEntry::new(name, sample_len))
}

fn parse_signal_line(line: &str) -> std::result::Result<SignalSpec, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();

    let file_name = fields.first().map(|f| (*f).to_string());
    let adc_res = fields
        .get(3)
        .map(|v| parse_field::<i64>(v, "ADC resolution"))
        .transpose()?;
    let adc_zero = fields
        .get(4)
        .map(|v| parse_field::<i64>(v, "ADC zero"))
        .transpose()?;

    let (adc_gain, baseline, units) = match fields.get(2) {
        Some(spec) => parse_gain_spec(spec)?,
        None => (None, None, None),
    };

    let name = fields.get(8..).map(|rest| rest.join(" ")).filter(|s| !s.is_empty());

    Ok(SignalSpec {
        file_name,
        name,
        units: Some(units.unwrap_or_else(|| DEFAULT_UNITS.to_string())),
        adc_gain: Some(adc_gain.filter(|g| *g != 0.0).unwrap_or(DEFAULT_GAIN)),
        baseline: Some(baseline.or(adc_zero).unwrap_or(0)),
        adc_res,
    })
}

/// Parses `gain[(baseline)][/units]`.
fn parse_gain_spec(
    spec: &str,
) -> std::result::Result<(Option<f64>, Option<i64>, Option<String>), String> {
    let (gain_part, units) = match spec.split_once('/') {
        Some((gain, units)) => (gain, Some(units.to_string())),
        None => (spec, None),
    };

    let (gain, baseline) = match gain_part.split_once('(') {
        Some((gain, rest)) => {
            let baseline = rest.strip_suffix(')').ok_or("unterminated baseline")?;
            (gain, Some(parse_field::<i64>(baseline, "baseline")?))
        }
        None => (gain_part, None),
    };

    let gain = if gain.is_empty() {
        None
    } else {
        Some(parse_field::<f64>(gain, "ADC gain")?)
    };

    Ok((gain, baseline, units))
}

fn parse_field<T: std::str::FromStr>(value: &str, what: &str) -> std::result::Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("invalid {what} '{value}'"))
}
