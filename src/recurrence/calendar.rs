//! Pure calendar helpers shared by the stepper and the month expander.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::RecurrenceError;

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Builds a date with the day clamped to the last valid day of the month.
pub(crate) fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let day = day.min(days_in_month(year, month)).max(1);
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Inclusive range covering one calendar month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MonthWindow {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl MonthWindow {
    pub fn new(year: i32, month: u32) -> Result<Self, RecurrenceError> {
        let invalid = || RecurrenceError::InvalidMonth { year, month };
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let last = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))
            .ok_or_else(invalid)?;
        Ok(Self { first, last })
    }

    pub fn containing(date: NaiveDate) -> Self {
        let first = date.with_day(1).unwrap_or(date);
        let last = date
            .with_day(days_in_month(date.year(), date.month()))
            .unwrap_or(date);
        Self { first, last }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first && date <= self.last
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn len_days(&self) -> u32 {
        self.last.day()
    }

    /// The window for the following calendar month.
    pub fn next(&self) -> Result<Self, RecurrenceError> {
        if self.month() == 12 {
            Self::new(self.year() + 1, 1)
        } else {
            Self::new(self.year(), self.month() + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_lengths_follow_gregorian_rules() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
    }

    #[test]
    fn clamps_day_to_month_end() {
        assert_eq!(
            clamped_date(2023, 2, 31),
            NaiveDate::from_ymd_opt(2023, 2, 28)
        );
        assert_eq!(
            clamped_date(2024, 4, 15),
            NaiveDate::from_ymd_opt(2024, 4, 15)
        );
    }

    #[test]
    fn window_rejects_out_of_range_month() {
        assert_eq!(
            MonthWindow::new(2024, 13),
            Err(RecurrenceError::InvalidMonth {
                year: 2024,
                month: 13
            })
        );
        assert!(MonthWindow::new(2024, 0).is_err());
        assert!(MonthWindow::new(i32::MAX, 1).is_err());
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let window = MonthWindow::new(2024, 2).unwrap();
        assert_eq!(window.first, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(window.last, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert!(window.contains(window.first));
        assert!(window.contains(window.last));
        assert!(!window.contains(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
        assert_eq!(window.len_days(), 29);
    }

    #[test]
    fn next_rolls_over_the_year() {
        let december = MonthWindow::new(2024, 12).unwrap();
        assert_eq!(december.next().unwrap(), MonthWindow::new(2025, 1).unwrap());
    }

    #[test]
    fn containing_matches_new() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 17).unwrap();
        assert_eq!(MonthWindow::containing(date), MonthWindow::new(2024, 6).unwrap());
    }
}
