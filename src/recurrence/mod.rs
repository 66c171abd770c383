//! Recurrence engine: one shared stepper, a next-occurrence resolver, and a
//! month window expander. Everything here is pure and side-effect free apart
//! from tracing events.

pub mod calendar;
pub mod expander;
pub mod resolver;
pub mod rule;
pub mod stepper;

pub use calendar::{days_in_month, is_leap_year, MonthWindow};
pub use expander::{
    expand_occurrences_in_month, expand_occurrences_in_month_with_limit,
    DEFAULT_MAX_EXPANSION_STEPS,
};
pub use resolver::{is_exhausted, resolve_next_occurrence};
pub use rule::{Frequency, RecurrenceRule, RuleRecord};
pub use stepper::{step, Occurrences};
