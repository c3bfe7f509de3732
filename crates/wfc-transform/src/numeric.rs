//! Numeric cell parsing.

/// Parse a cell value to a finite `f64`.
///
/// Handles surrounding whitespace and scientific notation. Returns `None` for
/// empty, non-numeric, NaN and infinite values.
pub fn parse_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return None;
    }

    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
