use chrono::NaiveDate;

use super::{calendar::MonthWindow, stepper::step, RecurrenceRule};
use crate::errors::RecurrenceError;

pub const DEFAULT_MAX_EXPANSION_STEPS: usize = 10_000;

/// Collects every occurrence of `rule`, walking from `start`, that lands inside
/// the calendar month `year`-`month`. Occurrences after `end_date` are never
/// emitted.
pub fn expand_occurrences_in_month(
    start: NaiveDate,
    rule: &RecurrenceRule,
    end_date: Option<NaiveDate>,
    year: i32,
    month: u32,
) -> Result<Vec<NaiveDate>, RecurrenceError> {
    expand_occurrences_in_month_with_limit(
        start,
        rule,
        end_date,
        year,
        month,
        DEFAULT_MAX_EXPANSION_STEPS,
    )
}

/// Same as [`expand_occurrences_in_month`] with an explicit step cap.
///
/// Needing more than `max_steps` steps to pass the window yields
/// [`RecurrenceError::NonConvergent`] and no partial output.
pub fn expand_occurrences_in_month_with_limit(
    start: NaiveDate,
    rule: &RecurrenceRule,
    end_date: Option<NaiveDate>,
    year: i32,
    month: u32,
    max_steps: usize,
) -> Result<Vec<NaiveDate>, RecurrenceError> {
    let window = MonthWindow::new(year, month)?;
    rule.validate()?;
    expand_in_window(start, rule, end_date, window, max_steps)
}

pub(crate) fn expand_in_window(
    start: NaiveDate,
    rule: &RecurrenceRule,
    end_date: Option<NaiveDate>,
    window: MonthWindow,
    max_steps: usize,
) -> Result<Vec<NaiveDate>, RecurrenceError> {
    let mut dates = Vec::new();
    let mut current = start;
    let mut steps = 0usize;

    while current <= window.last {
        if end_date.is_some_and(|end| current > end) {
            break;
        }
        if current >= window.first {
            dates.push(current);
        }
        // any further step would leave the window or pass the end date
        if current >= window.last || end_date.is_some_and(|end| current >= end) {
            break;
        }
        if steps >= max_steps {
            tracing::warn!(
                %start,
                rule = %rule.label(),
                steps,
                "recurrence expansion hit the step cap"
            );
            return Err(RecurrenceError::NonConvergent { steps });
        }
        current = match step(current, rule) {
            Ok(next) => next,
            // nothing representable follows
            Err(RecurrenceError::DateOutOfRange(_)) => break,
            Err(err) => return Err(err),
        };
        steps += 1;
    }

    tracing::trace!(
        year = window.year(),
        month = window.month(),
        emitted = dates.len(),
        steps,
        "expanded month window"
    );
    Ok(dates)
}
