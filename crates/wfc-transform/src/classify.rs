//! Signal classification by label.

use wfc_model::SignalType;

/// ECG lead names, matched by equality or prefix.
const ECG_LEADS: &[&str] = &[
    "I", "II", "III", "AVR", "AVL", "AVF", "V", "V1", "V2", "V3", "V4", "V5", "V6", "MCL", "AI",
    "AS", "ES",
];

/// Pressure channel codes, matched as substrings.
const PRESSURE_CODES: &[&str] = &[
    "ABP", "ART", "AO", "BAP", "CVP", "FAP", "ICP", "IC1", "IC2", "LAP", "PAP", "RAP", "UAP",
    "UVP",
];

/// Bare pressure channel codes. These only match a whole label token, otherwise
/// every label containing a `P` (PLETH, RESP) would be a pressure.
const BARE_PRESSURE_CODES: &[&str] = &["P", "P1", "P2", "P4"];

/// Classifies a signal label. Rules are checked in order, first match wins.
pub fn classify_signal(label: &str) -> SignalType {
    let upper = label.to_uppercase();

    if ECG_LEADS
        .iter()
        .any(|lead| upper == *lead || upper.starts_with(lead))
    {
        SignalType::Ecg
    } else if is_pressure(&upper) {
        SignalType::Pressure
    } else if upper.contains("PLETH") {
        SignalType::Plethysmogram
    } else if upper.contains("RESP") {
        SignalType::Respiration
    } else if upper.contains("CO2") {
        SignalType::Capnography
    } else {
        SignalType::Other
    }
}

fn is_pressure(upper: &str) -> bool {
    PRESSURE_CODES.iter().any(|code| upper.contains(code))
        || upper
            .split(|c: char| !c.is_ascii_alphanumeric())
            .any(|token| BARE_PRESSURE_CODES.contains(&token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_categories() {
        assert_eq!(classify_signal("II"), SignalType::Ecg);
        assert_eq!(classify_signal("ABP"), SignalType::Pressure);
        assert_eq!(classify_signal("PLETH"), SignalType::Plethysmogram);
        assert_eq!(classify_signal("RESP"), SignalType::Respiration);
        assert_eq!(classify_signal("CO2"), SignalType::Capnography);
        assert_eq!(classify_signal("XYZ"), SignalType::Other);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify_signal("aVR"), SignalType::Ecg);
        assert_eq!(classify_signal("Pleth"), SignalType::Plethysmogram);
        assert_eq!(classify_signal("Resp"), SignalType::Respiration);
    }

    #[test]
    fn test_ecg_prefix_wins_over_pressure() {
        // "I" is a lead, so anything starting with I is ECG
        assert_eq!(classify_signal("ICP"), SignalType::Ecg);
        assert_eq!(classify_signal("VENT"), SignalType::Ecg);
    }

    #[test]
    fn test_pressure_codes() {
        assert_eq!(classify_signal("CPAP"), SignalType::Pressure);
        assert_eq!(classify_signal("CVP"), SignalType::Pressure);
        assert_eq!(classify_signal("LAP"), SignalType::Pressure);
        assert_eq!(classify_signal("P"), SignalType::Pressure);
        assert_eq!(classify_signal("P2"), SignalType::Pressure);
        assert_eq!(classify_signal("Cuff P1"), SignalType::Pressure);
    }

    #[test]
    fn test_labels_with_embedded_p_are_not_pressure() {
        assert_eq!(classify_signal("PAWP"), SignalType::Other);
        assert_eq!(classify_signal("CPP"), SignalType::Other);
        assert_eq!(classify_signal("Pulse"), SignalType::Other);
        assert_eq!(classify_signal("SpO2"), SignalType::Other);
        assert_eq!(classify_signal("P3"), SignalType::Other);
    }

    #[test]
    fn test_later_rules() {
        assert_eq!(classify_signal("etCO2"), SignalType::Capnography);
        assert_eq!(classify_signal("Resp Imp"), SignalType::Respiration);
        assert_eq!(classify_signal("Temp"), SignalType::Other);
    }
}
