//! The visible calendar window.
//!
//! The widget shows one or more consecutive months. A [`DateWindow`] is the
//! inclusive span of days from the first visible day to the last one.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// An inclusive span of calendar days, `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    /// First visible day.
    pub start: NaiveDate,
    /// Last visible day.
    pub end: NaiveDate,
}

impl DateWindow {
    /// Creates a new window.
    ///
    /// # Panics
    ///
    /// Panics if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        assert!(start <= end, "DateWindow start must be <= end");
        Self { start, end }
    }

    /// Creates a window, returning `None` if `start` is after `end`.
    pub fn try_new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Creates the window for `months` visible months starting at the first
    /// day of `year`/`month0`.
    ///
    /// `month0` is zero-based (January is 0). Returns `None` for an invalid
    /// month, zero months or a window past the supported date range.
    pub fn from_month(year: i32, month0: u32, months: u32) -> Option<Self> {
        if months == 0 {
            return None;
        }
        let start = NaiveDate::from_ymd_opt(year, month0.checked_add(1)?, 1)?;
        let end = start.checked_add_months(Months::new(months))?.pred_opt()?;
        Some(Self { start, end })
    }

    /// Returns `true` if the date falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns the number of days in the window.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Iterates over every day of the window.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn single_month() {
        let window = DateWindow::from_month(2024, 1, 1).unwrap();
        assert_eq!(window.start, date(2024, 2, 1));
        assert_eq!(window.end, date(2024, 2, 29));
        assert_eq!(window.num_days(), 29);
    }

    #[test]
    fn several_months_cross_year_end() {
        let window = DateWindow::from_month(2024, 11, 2).unwrap();
        assert_eq!(window.start, date(2024, 12, 1));
        assert_eq!(window.end, date(2025, 1, 31));
    }

    #[test]
    fn invalid_inputs() {
        assert!(DateWindow::from_month(2024, 12, 1).is_none());
        assert!(DateWindow::from_month(2024, 0, 0).is_none());
        assert!(DateWindow::try_new(date(2024, 2, 1), date(2024, 1, 1)).is_none());
    }

    #[test]
    #[should_panic(expected = "start must be <= end")]
    fn reversed_window_panics() {
        DateWindow::new(date(2024, 2, 1), date(2024, 1, 1));
    }

    #[test]
    fn contains_is_inclusive() {
        let window = DateWindow::new(date(2024, 2, 1), date(2024, 2, 29));
        assert!(window.contains(date(2024, 2, 1)));
        assert!(window.contains(date(2024, 2, 29)));
        assert!(!window.contains(date(2024, 1, 31)));
        assert!(!window.contains(date(2024, 3, 1)));
    }

    #[test]
    fn days_iterates_inclusively() {
        let window = DateWindow::new(date(2024, 2, 27), date(2024, 3, 1));
        let days: Vec<_> = window.days().collect();
        assert_eq!(
            days,
            vec![
                date(2024, 2, 27),
                date(2024, 2, 28),
                date(2024, 2, 29),
                date(2024, 3, 1)
            ]
        );
    }
}
