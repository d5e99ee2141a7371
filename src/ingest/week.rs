//! Week label ordering.
//!
//! Week labels arrive verbatim from the source header, so the same table
//! can carry "8" in one export and "Week 8" in another. Ordinal
//! extraction and the label ordering that falls back to lexicographic
//! comparison both live here so that every sorting site agrees.

use std::cmp::Ordering;

/// Extract the numeric ordinal embedded in a week label, if any.
///
/// The first run of ASCII digits wins: "Week 12" -> 12, "12" -> 12.
/// Labels without digits (or with a run too large for u32) yield None.
pub fn week_ordinal(label: &str) -> Option<u32> {
    let digits: String = label
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Order two week labels: by numeric ordinal when both carry one,
/// lexicographic otherwise. Equal ordinals fall back to the label text so
/// the ordering stays total.
pub fn compare_week_labels(a: &str, b: &str) -> Ordering {
    match (week_ordinal(a), week_ordinal(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        _ => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_from_bare_number() {
        assert_eq!(week_ordinal("12"), Some(12));
    }

    #[test]
    fn ordinal_from_prefixed_label() {
        assert_eq!(week_ordinal("Week 12"), Some(12));
        assert_eq!(week_ordinal("Week12"), Some(12));
    }

    #[test]
    fn ordinal_takes_first_digit_run() {
        assert_eq!(week_ordinal("W2 FY25"), Some(2));
    }

    #[test]
    fn no_digits_means_no_ordinal() {
        assert_eq!(week_ordinal("Total"), None);
        assert_eq!(week_ordinal(""), None);
    }

    #[test]
    fn numeric_ordering_beats_lexicographic() {
        // Lexicographically "10" < "2"; the ordinal ordering fixes that.
        assert_eq!(compare_week_labels("10", "2"), Ordering::Greater);
        assert_eq!(compare_week_labels("Week 10", "Week 2"), Ordering::Greater);
    }

    #[test]
    fn labels_without_ordinals_sort_lexicographically() {
        assert_eq!(compare_week_labels("Apr", "Mar"), Ordering::Less);
        assert_eq!(compare_week_labels("Total", "10"), Ordering::Greater);
    }
}
