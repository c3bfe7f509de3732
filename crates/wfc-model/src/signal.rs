//! Physiological signal categories.

use std::fmt;

use serde::Serialize;

/// Category assigned to a signal from its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SignalType {
    #[serde(rename = "ECG")]
    Ecg,
    Pressure,
    Plethysmogram,
    Respiration,
    Capnography,
    Other,
}

impl SignalType {
    /// Returns the label written to the signals table.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalType::Ecg => "ECG",
            SignalType::Pressure => "Pressure",
            SignalType::Plethysmogram => "Plethysmogram",
            SignalType::Respiration => "Respiration",
            SignalType::Capnography => "Capnography",
            SignalType::Other => "Other",
        }
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
