//! View events and the time windows they are aggregated over.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::api::CarId;

/// Default analytics look-back, in days.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Longest accepted window, counted in calendar days between its first and
/// last day. Bounds the size of the zero-filled daily series.
pub const MAX_WINDOW_DAYS: i64 = 3660;

/// One observation of a catalog vehicle being displayed.
///
/// `car_id` is a plain reference: nothing prevents it from outliving the car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewEvent {
    pub car_id: CarId,
    pub timestamp: DateTime<Utc>,
}

impl ViewEvent {
    pub fn new(car_id: CarId, timestamp: DateTime<Utc>) -> Self {
        Self { car_id, timestamp }
    }
}

/// Closed time interval `[start, end]` used to filter view events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl AggregationWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// `[now - days, now]`.
    pub fn last_days(days: i64, now: DateTime<Utc>) -> Self {
        Self {
            start: now - Duration::days(days),
            end: now,
        }
    }

    /// Fill in missing bounds: `start` defaults to `now - default_days` and
    /// `end` to `now`, independently of each other.
    pub fn resolve(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
        default_days: i64,
    ) -> Self {
        Self {
            start: start.unwrap_or_else(|| now - Duration::days(default_days)),
            end: end.unwrap_or(now),
        }
    }

    /// Both bounds are inclusive.
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// Calendar days from the first to the last day of the window, zero for
    /// an inverted window.
    pub fn span_days(&self) -> i64 {
        if self.is_inverted() {
            return 0;
        }
        (self.end.date_naive() - self.start.date_naive()).num_days()
    }

    /// Every UTC calendar day touched by the window, ascending.
    ///
    /// An inverted window has no days, even when both bounds fall on the
    /// same calendar day.
    pub fn days(&self) -> Vec<NaiveDate> {
        if self.is_inverted() {
            return Vec::new();
        }
        let last = self.end.date_naive();
        self.start
            .date_naive()
            .iter_days()
            .take_while(|day| *day <= last)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_last_30_days_spans_31_calendar_days() {
        let now = at(2024, 3, 15, 14, 30);
        let window = AggregationWindow::last_days(DEFAULT_WINDOW_DAYS, now);
        let days = window.days();
        assert_eq!(days.len(), 31);
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2024, 2, 14).unwrap());
        assert_eq!(days[30], NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn test_resolve_defaults_each_bound_independently() {
        let now = at(2024, 3, 15, 0, 0);
        let explicit_start = at(2024, 3, 1, 0, 0);

        let window = AggregationWindow::resolve(Some(explicit_start), None, now, 30);
        assert_eq!(window.start, explicit_start);
        assert_eq!(window.end, now);

        let window = AggregationWindow::resolve(None, None, now, 30);
        assert_eq!(window, AggregationWindow::last_days(30, now));
    }

    #[test]
    fn test_span_days() {
        let window = AggregationWindow::new(at(2024, 1, 1, 23, 0), at(2024, 1, 3, 1, 0));
        assert_eq!(window.span_days(), 2);
        assert_eq!(window.days().len(), 3);

        let inverted = AggregationWindow::new(at(2024, 1, 3, 0, 0), at(2024, 1, 1, 0, 0));
        assert_eq!(inverted.span_days(), 0);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let window = AggregationWindow::new(at(2024, 1, 1, 0, 0), at(2024, 1, 2, 0, 0));
        assert!(window.contains(window.start));
        assert!(window.contains(window.end));
        assert!(!window.contains(at(2024, 1, 2, 0, 1)));
    }

    #[test]
    fn test_inverted_window_has_no_days() {
        let window = AggregationWindow::new(at(2024, 1, 2, 10, 0), at(2024, 1, 2, 9, 0));
        assert!(window.is_inverted());
        assert!(window.days().is_empty());
    }

    #[test]
    fn test_single_day_window() {
        let window = AggregationWindow::new(at(2024, 1, 2, 0, 0), at(2024, 1, 2, 23, 59));
        assert_eq!(window.days().len(), 1);
    }
}
