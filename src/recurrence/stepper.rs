//! Single-step advancement shared by the resolver and the month expander.

use chrono::{Datelike, Days, NaiveDate};

use super::{calendar::clamped_date, Frequency, RecurrenceRule};
use crate::errors::RecurrenceError;

/// Advances `date` by one period of `rule`.
///
/// Month and year arithmetic is calendar-aware: the resulting day never spills
/// into the following month. A `day_of_month` is clamped to the target month's
/// length on every step, after any `month_of_year` overwrite. Weekly rules with
/// a `day_of_week` move forward, never backward, onto that weekday.
///
/// Fails on a rule that does not pass [`RecurrenceRule::validate`] or when the
/// result leaves the range of dates chrono can represent.
pub fn step(date: NaiveDate, rule: &RecurrenceRule) -> Result<NaiveDate, RecurrenceError> {
    rule.validate()?;
    let out_of_range = || RecurrenceError::DateOutOfRange(date);
    let interval = rule.interval();

    match rule.frequency() {
        Frequency::Daily => date
            .checked_add_days(Days::new(u64::from(interval)))
            .ok_or_else(out_of_range),
        Frequency::Weekly => {
            let next = date
                .checked_add_days(Days::new(u64::from(interval) * 7))
                .ok_or_else(out_of_range)?;
            match rule.day_of_week() {
                Some(target) => {
                    // forward only, at most six days
                    let current = next.weekday().num_days_from_sunday();
                    let shift = (target + 7 - current) % 7;
                    next.checked_add_days(Days::new(u64::from(shift))).ok_or_else(out_of_range)
                }
                None => Ok(next),
            }
        }
        Frequency::Monthly => {
            let (year, month) = add_months(date, interval).ok_or_else(out_of_range)?;
            let day = rule.day_of_month().unwrap_or_else(|| date.day());
            clamped_date(year, month, day).ok_or_else(out_of_range)
        }
        Frequency::Yearly => {
            let year = i32::try_from(i64::from(date.year()) + i64::from(interval))
                .map_err(|_| out_of_range())?;
            let month = rule.month_of_year().unwrap_or_else(|| date.month());
            let day = rule.day_of_month().unwrap_or_else(|| date.day());
            clamped_date(year, month, day).ok_or_else(out_of_range)
        }
    }
}

fn add_months(date: NaiveDate, months: u32) -> Option<(i32, u32)> {
    let index = i64::from(date.year()) * 12 + i64::from(date.month0()) + i64::from(months);
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = u32::try_from(index.rem_euclid(12)).ok()? + 1;
    Some((year, month))
}

/// Lazy, unbounded walk over a rule's occurrences, anchor first.
///
/// Yields at most one error, after which the sequence ends.
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    rule: &'a RecurrenceRule,
    next: Option<NaiveDate>,
    failure: Option<RecurrenceError>,
}

impl<'a> Occurrences<'a> {
    pub fn new(rule: &'a RecurrenceRule, anchor: NaiveDate) -> Self {
        Self {
            rule,
            next: Some(anchor),
            failure: None,
        }
    }
}

impl Iterator for Occurrences<'_> {
    type Item = Result<NaiveDate, RecurrenceError>;

    fn next(&mut self) -> Option<Self::Item> {
        let Some(current) = self.next.take() else {
            return self.failure.take().map(Err);
        };
        match step(current, self.rule) {
            Ok(following) => self.next = Some(following),
            Err(err) => self.failure = Some(err),
        }
        Some(Ok(current))
    }
}
