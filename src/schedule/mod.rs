//! Scheduling and calendar-view collaborators built on the recurrence engine.

pub mod calendar;
pub mod model;
pub mod service;

pub use calendar::{CalendarService, MonthCalendar, MonthTotals};
pub use model::{
    MaterializedTransaction, OccurrenceInstance, RecurringSchedule, RecurringScheduleDraft,
    SchedulePatch, TransactionKind,
};
pub use service::{Advance, ProcessReport, ScheduleFailure, ScheduleService};
