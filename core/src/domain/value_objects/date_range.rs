//! Half-open calendar date periods and the period merge used for
//! availability calendars.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A half-open date period `[start_date, end_date)`.
///
/// The start is inclusive and the end is exclusive, so two stays that share
/// a turnover day (one checking out the morning the other checks in) do not
/// overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePeriod {
    /// First occupied night (inclusive)
    pub start_date: NaiveDate,

    /// Check-out day (exclusive)
    pub end_date: NaiveDate,
}

impl DatePeriod {
    /// Creates a period, rejecting empty or inverted ranges (`end <= start`).
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Option<Self> {
        if end_date <= start_date {
            return None;
        }
        Some(Self {
            start_date,
            end_date,
        })
    }

    /// Half-open overlap test: `[a, b)` and `[c, d)` overlap iff `a < d && c < b`.
    pub fn overlaps(&self, other: &DatePeriod) -> bool {
        self.start_date < other.end_date && other.start_date < self.end_date
    }

    /// Whether this period covers the given night.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date < self.end_date
    }

    /// Number of nights spanned by this period.
    pub fn nights(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

/// Merges an unordered collection of periods into the minimal sorted set of
/// non-overlapping periods covering the same dates.
///
/// Adjacent periods (one ending exactly where the next starts) are coalesced,
/// which is what a calendar wants to display. Empty input yields empty output.
pub fn merge_periods(mut periods: Vec<DatePeriod>) -> Vec<DatePeriod> {
    if periods.is_empty() {
        return Vec::new();
    }

    // Stable sort keeps the accumulated interval first on equal starts.
    periods.sort_by_key(|p| p.start_date);

    let mut merged: Vec<DatePeriod> = Vec::with_capacity(periods.len());
    for period in periods {
        match merged.last_mut() {
            Some(last) if period.start_date <= last.end_date => {
                if period.end_date > last.end_date {
                    last.end_date = period.end_date;
                }
            }
            _ => merged.push(period),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn period(start: u32, end: u32) -> DatePeriod {
        DatePeriod::new(date(2026, 1, start), date(2026, 1, end)).unwrap()
    }

    #[test]
    fn test_rejects_inverted_and_empty_ranges() {
        assert!(DatePeriod::new(date(2026, 1, 5), date(2026, 1, 5)).is_none());
        assert!(DatePeriod::new(date(2026, 1, 5), date(2026, 1, 1)).is_none());
        assert!(DatePeriod::new(date(2026, 1, 1), date(2026, 1, 5)).is_some());
    }

    #[test]
    fn test_half_open_overlap() {
        let a = period(1, 5);
        assert!(a.overlaps(&period(4, 6)));
        assert!(a.overlaps(&period(2, 3)));
        // Touching at the boundary is not an overlap
        assert!(!a.overlaps(&period(5, 6)));
        assert!(!a.overlaps(&period(6, 8)));
    }

    #[test]
    fn test_nights() {
        assert_eq!(period(1, 4).nights(), 3);
        assert_eq!(period(1, 2).nights(), 1);
    }

    #[test]
    fn test_merge_empty() {
        assert!(merge_periods(Vec::new()).is_empty());
    }

    #[test]
    fn test_merge_overlapping() {
        let merged = merge_periods(vec![period(1, 5), period(3, 7), period(10, 12)]);
        assert_eq!(merged, vec![period(1, 7), period(10, 12)]);
    }

    #[test]
    fn test_merge_is_order_independent() {
        let forward = merge_periods(vec![period(1, 5), period(3, 7), period(10, 12)]);
        let reversed = merge_periods(vec![period(10, 12), period(3, 7), period(1, 5)]);
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_merge_coalesces_adjacent() {
        let merged = merge_periods(vec![period(1, 5), period(5, 9)]);
        assert_eq!(merged, vec![period(1, 9)]);
    }

    #[test]
    fn test_merge_contained_period_absorbed() {
        let merged = merge_periods(vec![period(1, 10), period(3, 4)]);
        assert_eq!(merged, vec![period(1, 10)]);
    }

    #[test]
    fn test_merge_result_sorted_and_disjoint() {
        let merged = merge_periods(vec![
            period(20, 22),
            period(1, 3),
            period(2, 6),
            period(8, 9),
        ]);
        for pair in merged.windows(2) {
            assert!(pair[0].end_date < pair[1].start_date);
        }
        assert_eq!(merged, vec![period(1, 6), period(8, 9), period(20, 22)]);
    }
}
