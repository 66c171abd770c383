//! Maintenance of recurring schedules: creation, updates, and processing of due occurrences.

use chrono::NaiveDate;
use uuid::Uuid;

use super::model::{
    MaterializedTransaction, RecurringSchedule, RecurringScheduleDraft, SchedulePatch,
};
use crate::{
    errors::{RecurrenceError, ScheduleError},
    recurrence::{is_exhausted, resolve_next_occurrence},
    time::Clock,
};

/// Outcome of advancing a schedule's cursor past a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The cursor should move to this date.
    Scheduled(NaiveDate),
    /// The next occurrence would fall after the end date; the schedule is done.
    Exhausted(NaiveDate),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleFailure {
    pub schedule_id: Uuid,
    pub error: RecurrenceError,
}

/// Summary of one [`ScheduleService::process_due`] run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessReport {
    pub created: Vec<MaterializedTransaction>,
    pub deactivated: Vec<Uuid>,
    pub failures: Vec<ScheduleFailure>,
}

impl ProcessReport {
    pub fn processed(&self) -> usize {
        self.created.len()
    }
}

/// Stateless helpers operating on in-memory schedules. Persisting the results is
/// the caller's job.
pub struct ScheduleService;

impl ScheduleService {
    /// Validates the draft and builds an active schedule whose cursor is the first
    /// occurrence after today.
    pub fn create(
        draft: RecurringScheduleDraft,
        clock: &dyn Clock,
    ) -> Result<RecurringSchedule, ScheduleError> {
        draft.validate()?;
        let next_occurrence =
            resolve_next_occurrence(draft.start_date, &draft.recurrence_rule, clock.today())?;
        let schedule = RecurringSchedule {
            id: Uuid::new_v4(),
            amount: draft.amount,
            kind: draft.kind,
            group_id: draft.group_id,
            description: draft.description,
            start_date: draft.start_date,
            end_date: draft.end_date,
            recurrence_rule: draft.recurrence_rule,
            next_occurrence,
            active: true,
            created_at: clock.now(),
        };
        tracing::debug!(schedule_id = %schedule.id, %next_occurrence, "created recurring schedule");
        Ok(schedule)
    }

    /// Applies `patch` and recomputes the cursor from the start date. The schedule
    /// is left untouched when validation fails.
    pub fn update(
        schedule: &mut RecurringSchedule,
        patch: SchedulePatch,
        clock: &dyn Clock,
    ) -> Result<(), ScheduleError> {
        let mut updated = schedule.clone();
        if let Some(amount) = patch.amount {
            updated.amount = amount;
        }
        if let Some(kind) = patch.kind {
            updated.kind = kind;
        }
        if let Some(group_id) = patch.group_id {
            updated.group_id = group_id;
        }
        if let Some(description) = patch.description {
            updated.description = description;
        }
        if let Some(start_date) = patch.start_date {
            updated.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            updated.end_date = end_date;
        }
        if let Some(rule) = patch.recurrence_rule {
            updated.recurrence_rule = rule;
        }
        updated.validate()?;
        updated.next_occurrence =
            resolve_next_occurrence(updated.start_date, &updated.recurrence_rule, clock.today())?;
        tracing::debug!(
            schedule_id = %updated.id,
            next_occurrence = %updated.next_occurrence,
            "updated recurring schedule"
        );
        *schedule = updated;
        Ok(())
    }

    /// Flips the active flag and returns the new state.
    pub fn toggle_active(schedule: &mut RecurringSchedule) -> bool {
        schedule.active = !schedule.active;
        schedule.active
    }

    /// Resolves the occurrence following `reference`, starting from the current
    /// cursor, and reports whether it lies beyond the end date.
    pub fn advance(
        schedule: &RecurringSchedule,
        reference: NaiveDate,
    ) -> Result<Advance, RecurrenceError> {
        let rule = &schedule.recurrence_rule;
        let next = resolve_next_occurrence(schedule.next_occurrence, rule, reference)?;
        if is_exhausted(next, schedule.end_date) {
            Ok(Advance::Exhausted(next))
        } else {
            Ok(Advance::Scheduled(next))
        }
    }

    /// Materialises one transaction for every due schedule, dated at its cursor,
    /// then advances the cursor past today or deactivates the schedule once its
    /// end date is passed. An active schedule whose cursor already lies beyond
    /// its end date is deactivated without posting.
    ///
    /// Schedules whose rule cannot be resolved are left unchanged and listed in
    /// [`ProcessReport::failures`].
    pub fn process_due(schedules: &mut [RecurringSchedule], clock: &dyn Clock) -> ProcessReport {
        let today = clock.today();
        let mut report = ProcessReport::default();

        for schedule in schedules.iter_mut().filter(|s| s.active) {
            let _span =
                tracing::debug_span!("process_schedule", schedule_id = %schedule.id).entered();
            if schedule.is_past_end() {
                tracing::debug!(cursor = %schedule.next_occurrence, "schedule already ended");
                schedule.active = false;
                report.deactivated.push(schedule.id);
                continue;
            }
            if !schedule.is_due(today) {
                continue;
            }
            let advance = match Self::advance(schedule, today) {
                Ok(advance) => advance,
                Err(error) => {
                    tracing::warn!(error = %error, "skipping schedule with unresolvable rule");
                    report.failures.push(ScheduleFailure {
                        schedule_id: schedule.id,
                        error,
                    });
                    continue;
                }
            };

            report.created.push(MaterializedTransaction {
                id: Uuid::new_v4(),
                schedule_id: schedule.id,
                amount: schedule.amount,
                kind: schedule.kind,
                group_id: schedule.group_id,
                description: schedule.description.clone(),
                transaction_date: schedule.next_occurrence,
            });

            match advance {
                Advance::Scheduled(next) => {
                    tracing::debug!(%next, "advanced schedule cursor");
                    schedule.next_occurrence = next;
                }
                Advance::Exhausted(next) => {
                    tracing::debug!(%next, "schedule passed its end date");
                    schedule.active = false;
                    report.deactivated.push(schedule.id);
                }
            }
        }

        tracing::info!(
            created = report.created.len(),
            deactivated = report.deactivated.len(),
            failed = report.failures.len(),
            %today,
            "processed recurring schedules"
        );
        report
    }
}
