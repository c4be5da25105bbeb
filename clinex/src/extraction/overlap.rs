//! Half-open range overlap check used for person suppression.

/// Check whether `[s1, e1)` and `[s2, e2)` overlap.
///
/// Ranges that only touch at a boundary do not overlap. Callers are expected to
/// pass well-formed ranges (`s < e`).
pub fn spans_overlap(s1: usize, e1: usize, s2: usize, e2: usize) -> bool {
    s1 < e2 && e1 > s2
}

/// Check whether `range` overlaps any of `others`.
pub fn overlaps_any(range: (usize, usize), others: &[(usize, usize)]) -> bool {
    others
        .iter()
        .any(|&(start, end)| spans_overlap(range.0, range.1, start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disjoint_ranges() {
        // "Smith" vs "Smithadol" in "Dr. Smith prescribed Smithadol 10mg"
        assert!(!spans_overlap(4, 9, 21, 30));
        assert!(!spans_overlap(21, 30, 4, 9));
    }

    #[test]
    fn test_touching_ranges_do_not_overlap() {
        assert!(!spans_overlap(0, 5, 5, 10));
        assert!(!spans_overlap(5, 10, 0, 5));
    }

    #[test]
    fn test_partial_and_nested_overlap() {
        assert!(spans_overlap(0, 6, 5, 10));
        assert!(spans_overlap(2, 4, 0, 10));
        assert!(spans_overlap(0, 10, 2, 4));
        assert!(spans_overlap(3, 7, 3, 7));
    }

    #[test]
    fn test_overlaps_any() {
        let claimed = vec![(0, 3), (10, 15)];
        assert!(overlaps_any((12, 20), &claimed));
        assert!(!overlaps_any((3, 10), &claimed));
        assert!(!overlaps_any((3, 10), &[]));
    }
}
