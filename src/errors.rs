use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// Failures raised by the recurrence engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecurrenceError {
    #[error("Unknown recurrence frequency: {0}")]
    UnknownFrequency(String),
    #[error("Invalid recurrence rule: {0}")]
    InvalidRule(String),
    #[error("Invalid calendar month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },
    #[error("Date out of supported range after {0}")]
    DateOutOfRange(NaiveDate),
    /// The iteration cap was reached before the month window was exhausted.
    #[error("Recurrence rule produced no convergent schedule within {steps} steps")]
    NonConvergent { steps: usize },
}

/// Failures raised while maintaining recurring schedules or building calendars.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Validation failed for `{field}`: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },
    #[error("Schedule {schedule_id} produced no convergent schedule within {steps} steps")]
    NonConvergent { schedule_id: Uuid, steps: usize },
    #[error(transparent)]
    Recurrence(#[from] RecurrenceError),
}

impl ScheduleError {
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        ScheduleError::Validation {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
    #[error("No configuration directory available on this platform")]
    NoConfigDir,
}
