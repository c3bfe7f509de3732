//! Segment list helpers.

/// Name of a gap entry in a multi-segment record.
const GAP_SEGMENT: &str = "~";

/// Returns true for layout and placeholder segments, which get no rows.
///
/// These are the `~` gap marker, names containing `_layout`, and names
/// ending in `_0000`.
pub fn is_layout_segment(name: &str) -> bool {
    name == GAP_SEGMENT || name.contains("_layout") || name.ends_with("_0000")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_segments() {
        assert!(is_layout_segment("~"));
        assert!(is_layout_segment("81739927_layout"));
        assert!(is_layout_segment("rec_0000"));
        assert!(!is_layout_segment("81739927_0001"));
        assert!(!is_layout_segment("seg1"));
    }
}
