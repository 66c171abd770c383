//! Month view built from recurring schedules without persisting any instance.

use serde::Serialize;

use super::model::{OccurrenceInstance, RecurringSchedule, TransactionKind};
use crate::{
    config::Config,
    errors::{RecurrenceError, ScheduleError},
    recurrence::{expander::expand_in_window, MonthWindow, DEFAULT_MAX_EXPANSION_STEPS},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthTotals {
    pub occurrences: usize,
    pub projected_income: f64,
    pub projected_expense: f64,
    pub net: f64,
}

impl MonthTotals {
    fn from_instances(instances: &[OccurrenceInstance]) -> Self {
        let mut totals = MonthTotals {
            occurrences: instances.len(),
            ..MonthTotals::default()
        };
        for instance in instances {
            match instance.kind {
                TransactionKind::Income => totals.projected_income += instance.amount,
                TransactionKind::Expense => totals.projected_expense += instance.amount,
            }
        }
        totals.net = totals.projected_income - totals.projected_expense;
        totals
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthCalendar {
    pub window: MonthWindow,
    pub instances: Vec<OccurrenceInstance>,
    pub totals: MonthTotals,
}

pub struct CalendarService;

impl CalendarService {
    /// Builds the month with [`DEFAULT_MAX_EXPANSION_STEPS`]. Use
    /// [`CalendarService::month_with_config`] to honour a loaded [`Config`].
    pub fn month(
        schedules: &[RecurringSchedule],
        year: i32,
        month: u32,
    ) -> Result<MonthCalendar, ScheduleError> {
        Self::month_with_limit(schedules, year, month, DEFAULT_MAX_EXPANSION_STEPS)
    }

    pub fn month_with_config(
        schedules: &[RecurringSchedule],
        year: i32,
        month: u32,
        config: &Config,
    ) -> Result<MonthCalendar, ScheduleError> {
        Self::month_with_limit(schedules, year, month, config.max_expansion_steps)
    }

    /// Expands every active schedule into the requested month. Instances are
    /// ordered by date, then by schedule id.
    pub fn month_with_limit(
        schedules: &[RecurringSchedule],
        year: i32,
        month: u32,
        max_steps: usize,
    ) -> Result<MonthCalendar, ScheduleError> {
        let window = MonthWindow::new(year, month)?;
        let mut instances = Vec::new();

        for schedule in schedules.iter().filter(|s| s.active) {
            schedule.recurrence_rule.validate()?;
            let dates = expand_in_window(
                schedule.start_date,
                &schedule.recurrence_rule,
                schedule.end_date,
                window,
                max_steps,
            )
            .map_err(|err| match err {
                RecurrenceError::NonConvergent { steps } => ScheduleError::NonConvergent {
                    schedule_id: schedule.id,
                    steps,
                },
                other => ScheduleError::Recurrence(other),
            })?;
            instances.extend(dates.into_iter().map(|date| OccurrenceInstance {
                source_rule_id: schedule.id,
                date,
                amount: schedule.amount,
                kind: schedule.kind,
                description: Some(schedule.title()),
            }));
        }

        instances.sort_by_key(|instance| (instance.date, instance.source_rule_id));
        let totals = MonthTotals::from_instances(&instances);
        tracing::debug!(year, month, occurrences = totals.occurrences, "built month calendar");

        Ok(MonthCalendar {
            window,
            instances,
            totals,
        })
    }
}
