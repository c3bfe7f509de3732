//! Mapping of free-form numerics columns onto the fixed numerics schema.

use chrono::NaiveDateTime;
use tracing::trace;
use wfc_model::NumericsRow;

use crate::error::{Result, TransformError};
use crate::numeric::parse_numeric;
use crate::timing::tick_timestamp;

/// Blood pressure component named by a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressureComponent {
    Systolic,
    Diastolic,
    Mean,
}

/// Destination slot of a numerics column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Spo2,
    HeartRate,
    RespRate,
    Nibp(PressureComponent),
    Abp(PressureComponent),
    Cvp,
    Etco2,
    Temperature,
    /// Pressure family column with no recognized component; dropped.
    Ignored,
    /// Candidate for the generic measurement slot.
    Generic,
}

/// Classifies a column name. Rules are checked in order, first match wins.
pub fn classify_column(name: &str) -> ColumnKind {
    let lower = name.to_lowercase();

    if lower.contains("spo2") || lower.contains("sp02") {
        ColumnKind::Spo2
    } else if lower.contains("hr") && lower.contains("heart") {
        ColumnKind::HeartRate
    } else if lower.contains("rr") && lower.contains("resp") {
        ColumnKind::RespRate
    } else if lower.contains("nibp") {
        pressure_component(&lower).map_or(ColumnKind::Ignored, ColumnKind::Nibp)
    } else if lower.contains("abp") {
        pressure_component(&lower).map_or(ColumnKind::Ignored, ColumnKind::Abp)
    } else if lower.contains("cvp") {
        ColumnKind::Cvp
    } else if lower.contains("etco2") {
        ColumnKind::Etco2
    } else if lower.contains("temp") {
        ColumnKind::Temperature
    } else {
        ColumnKind::Generic
    }
}

fn pressure_component(lower: &str) -> Option<PressureComponent> {
    if lower.contains("sys") {
        Some(PressureComponent::Systolic)
    } else if lower.contains("dias") {
        Some(PressureComponent::Diastolic)
    } else if lower.contains("mean") {
        Some(PressureComponent::Mean)
    } else {
        None
    }
}

/// Column classification for one numerics table.
///
/// The first column is the tick counter; the others are classified once and
/// reused for every row.
#[derive(Debug, Clone)]
pub struct NumericsLayout {
    columns: Vec<(String, ColumnKind)>,
}

impl NumericsLayout {
    /// Builds the layout from the table's header, tick column included.
    pub fn new<S: AsRef<str>>(columns: &[S]) -> Self {
        let columns = columns
            .iter()
            .skip(1)
            .map(|name| {
                let name = name.as_ref();
                (name.to_string(), classify_column(name))
            })
            .collect();
        Self { columns }
    }

    /// Maps one table row.
    ///
    /// Missing and non-numeric cells leave their slot empty. Only the first
    /// generic column with a value fills the generic measurement slot.
    /// `row_index` is used in errors only.
    pub fn map_row(
        &self,
        record_id: &str,
        row_index: usize,
        cells: &[Option<String>],
        base: Option<NaiveDateTime>,
        base_freq: Option<f64>,
    ) -> Result<NumericsRow> {
        let ticks = match cells.first() {
            Some(Some(value)) => parse_numeric(value)
                .map(|v| v.trunc() as i64)
                .ok_or_else(|| TransformError::InvalidTicks {
                    row: row_index,
                    value: value.clone(),
                })?,
            _ => return Err(TransformError::MissingTicks { row: row_index }),
        };

        let mut row = NumericsRow {
            record_id: record_id.to_string(),
            measurement_time: tick_timestamp(base, ticks, base_freq),
            counter_ticks: ticks,
            ..NumericsRow::default()
        };

        for ((name, kind), cell) in self.columns.iter().zip(cells.iter().skip(1)) {
            let Some(value) = cell.as_deref().and_then(parse_numeric) else {
                continue;
            };
            let int = value.trunc() as i64;

            match kind {
                ColumnKind::Spo2 => row.spo2 = Some(int),
                ColumnKind::HeartRate => row.heart_rate = Some(int),
                ColumnKind::RespRate => row.resp_rate = Some(int),
                ColumnKind::Nibp(PressureComponent::Systolic) => row.nibp_systolic = Some(int),
                ColumnKind::Nibp(PressureComponent::Diastolic) => row.nibp_diastolic = Some(int),
                ColumnKind::Nibp(PressureComponent::Mean) => row.nibp_mean = Some(int),
                ColumnKind::Abp(PressureComponent::Systolic) => row.abp_systolic = Some(int),
                ColumnKind::Abp(PressureComponent::Diastolic) => row.abp_diastolic = Some(int),
                ColumnKind::Abp(PressureComponent::Mean) => row.abp_mean = Some(int),
                ColumnKind::Cvp => row.cvp = Some(value),
                ColumnKind::Etco2 => row.etco2 = Some(value),
                ColumnKind::Temperature => row.temperature = Some(value),
                ColumnKind::Ignored => {}
                ColumnKind::Generic => {
                    if row.measurement_name.is_none() {
                        row.measurement_name = Some(name.clone());
                        row.measurement_value = Some(value);
                    } else {
                        trace!(record_id, column = %name, "dropping extra unclassified column");
                    }
                }
            }
        }

        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use wfc_model::format_timestamp;

    fn cells(values: &[&str]) -> Vec<Option<String>> {
        values
            .iter()
            .map(|v| (!v.is_empty()).then(|| (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_classify_column_rules() {
        assert_eq!(classify_column("SpO2"), ColumnKind::Spo2);
        assert_eq!(classify_column("SP02 %"), ColumnKind::Spo2);
        assert_eq!(classify_column("HR heart rate"), ColumnKind::HeartRate);
        assert_eq!(classify_column("RR resp"), ColumnKind::RespRate);
        assert_eq!(
            classify_column("NBPs NIBP sys"),
            ColumnKind::Nibp(PressureComponent::Systolic)
        );
        assert_eq!(
            classify_column("ABP Dias"),
            ColumnKind::Abp(PressureComponent::Diastolic)
        );
        assert_eq!(
            classify_column("abp mean"),
            ColumnKind::Abp(PressureComponent::Mean)
        );
        assert_eq!(classify_column("NIBP pulse"), ColumnKind::Ignored);
        assert_eq!(classify_column("CVP"), ColumnKind::Cvp);
        assert_eq!(classify_column("etCO2"), ColumnKind::Etco2);
        assert_eq!(classify_column("Temp"), ColumnKind::Temperature);
        assert_eq!(classify_column("Perf"), ColumnKind::Generic);
    }

    #[test]
    fn test_hr_alone_is_generic() {
        // Heart rate needs both "hr" and "heart"
        assert_eq!(classify_column("HR"), ColumnKind::Generic);
        assert_eq!(classify_column("Heart"), ColumnKind::Generic);
    }

    #[test]
    fn test_map_row_hr_spo2_unknown() {
        let layout = NumericsLayout::new(&["time", "HR", "SpO2", "UnknownMetric"]);
        let row = layout
            .map_row("r1", 0, &cells(&["100", "72", "97.6", "3.5"]), None, None)
            .unwrap();

        assert_eq!(row.counter_ticks, 100);
        assert_eq!(row.heart_rate, None);
        assert_eq!(row.spo2, Some(97));
        // HR is the first unclassified column, UnknownMetric is dropped
        assert_eq!(row.measurement_name.as_deref(), Some("HR"));
        assert_eq!(row.measurement_value, Some(72.0));
        assert_eq!(row.measurement_unit, None);
    }

    #[test]
    fn test_map_row_generic_slot_skips_missing() {
        let layout = NumericsLayout::new(&["time", "Perf", "Other"]);
        let row = layout
            .map_row("r1", 0, &cells(&["5", "", "1.25"]), None, None)
            .unwrap();
        assert_eq!(row.measurement_name.as_deref(), Some("Other"));
        assert_eq!(row.measurement_value, Some(1.25));
    }

    #[test]
    fn test_map_row_float_and_int_slots() {
        let layout = NumericsLayout::new(&[
            "ticks",
            "Heart Rate (HR)",
            "Resp Rate RR",
            "NIBP Mean",
            "CVP",
            "Temp",
            "etCO2",
        ]);
        let row = layout
            .map_row(
                "r1",
                0,
                &cells(&["10", "80.9", "16", "85", "7.5", "36.6", "bad"]),
                None,
                None,
            )
            .unwrap();

        assert_eq!(row.heart_rate, Some(80));
        assert_eq!(row.resp_rate, Some(16));
        assert_eq!(row.nibp_mean, Some(85));
        assert_eq!(row.cvp, Some(7.5));
        assert_eq!(row.temperature, Some(36.6));
        // Non-numeric value leaves the slot empty
        assert_eq!(row.etco2, None);
        assert_eq!(row.measurement_name, None);
    }

    #[test]
    fn test_map_row_timestamp() {
        let base = NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let layout = NumericsLayout::new(&["time", "SpO2"]);
        let row = layout
            .map_row("r1", 0, &cells(&["125", "99"]), Some(base), Some(62.5))
            .unwrap();
        assert_eq!(
            format_timestamp(&row.measurement_time.unwrap()),
            "2023-01-01 00:00:02"
        );
    }

    #[test]
    fn test_map_row_tick_errors() {
        let layout = NumericsLayout::new(&["time", "SpO2"]);
        assert_eq!(
            layout.map_row("r1", 3, &cells(&["", "99"]), None, None),
            Err(TransformError::MissingTicks { row: 3 })
        );
        assert_eq!(
            layout.map_row("r1", 4, &cells(&["soon", "99"]), None, None),
            Err(TransformError::InvalidTicks {
                row: 4,
                value: "soon".to_string()
            })
        );
    }
}
