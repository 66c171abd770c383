#![doc(test(attr(deny(warnings))))]

//! Finance Recurrence computes the occurrence dates of recurring income and
//! expense schedules: the next occurrence after a reference date, and every
//! occurrence inside a calendar month.
//!
//! ```
//! use chrono::NaiveDate;
//! use finance_recurrence::recurrence::{resolve_next_occurrence, RecurrenceRule};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
//! let rule = RecurrenceRule::monthly().with_day_of_month(31);
//! let today = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
//! let next = resolve_next_occurrence(start, &rule, today).unwrap();
//! assert_eq!(next, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
//! ```

pub mod config;
pub mod errors;
pub mod recurrence;
pub mod schedule;
pub mod time;
pub mod utils;

pub use errors::{ConfigError, RecurrenceError, ScheduleError};

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    init_with_config(&config::Config::default());
}

/// Initializes global tracing using the configured log directive, if any.
pub fn init_with_config(config: &config::Config) {
    let directive = config
        .log_directive
        .as_deref()
        .unwrap_or(utils::DEFAULT_LOG_DIRECTIVE);
    utils::init_tracing(directive);
    tracing::info!("Finance Recurrence tracing initialized.");
}
