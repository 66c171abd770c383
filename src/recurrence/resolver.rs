use chrono::NaiveDate;

use super::{stepper::step, RecurrenceRule};
use crate::errors::RecurrenceError;

/// Returns the first occurrence of `rule`, walking from `start`, that falls
/// strictly after `reference`.
///
/// `start` itself is returned when it already lies after `reference`. The end
/// date of a schedule is not consulted here; see [`is_exhausted`].
pub fn resolve_next_occurrence(
    start: NaiveDate,
    rule: &RecurrenceRule,
    reference: NaiveDate,
) -> Result<NaiveDate, RecurrenceError> {
    rule.validate()?;
    let mut candidate = start;
    let mut steps = 0usize;
    while candidate <= reference {
        candidate = step(candidate, rule)?;
        steps += 1;
    }
    tracing::trace!(%start, %reference, %candidate, steps, "resolved next occurrence");
    Ok(candidate)
}

/// True once `candidate` lies past the schedule's `end_date`.
pub fn is_exhausted(candidate: NaiveDate, end_date: Option<NaiveDate>) -> bool {
    end_date.is_some_and(|end| candidate > end)
}
