//! Recurring schedule records and the values derived from them.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::ScheduleError,
    recurrence::{is_exhausted, RecurrenceRule},
};

pub const MAX_DESCRIPTION_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        };
        f.write_str(label)
    }
}

impl FromStr for TransactionKind {
    type Err = ScheduleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            _ => Err(ScheduleError::validation(
                "type",
                "Type must be either income or expense",
            )),
        }
    }
}

/// Input for creating a recurring schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecurringScheduleDraft {
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub group_id: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub recurrence_rule: RecurrenceRule,
}

impl RecurringScheduleDraft {
    pub fn new(
        amount: f64,
        kind: TransactionKind,
        start_date: NaiveDate,
        recurrence_rule: RecurrenceRule,
    ) -> Self {
        Self {
            amount,
            kind,
            group_id: None,
            description: None,
            start_date,
            end_date: None,
            recurrence_rule,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_group(mut self, group_id: i64) -> Self {
        self.group_id = Some(group_id);
        self
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn validate(&self) -> Result<(), ScheduleError> {
        validate_fields(
            self.amount,
            self.group_id,
            self.description.as_deref(),
            self.start_date,
            self.end_date,
        )?;
        self.recurrence_rule.validate()?;
        Ok(())
    }
}

/// Partial update. `None` leaves a field untouched; `end_date: Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchedulePatch {
    pub amount: Option<f64>,
    pub kind: Option<TransactionKind>,
    pub group_id: Option<Option<i64>>,
    pub description: Option<Option<String>>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<Option<NaiveDate>>,
    pub recurrence_rule: Option<RecurrenceRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecurringSchedule {
    pub id: Uuid,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub group_id: Option<i64>,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub recurrence_rule: RecurrenceRule,
    pub next_occurrence: NaiveDate,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl RecurringSchedule {
    pub fn validate(&self) -> Result<(), ScheduleError> {
        validate_fields(
            self.amount,
            self.group_id,
            self.description.as_deref(),
            self.start_date,
            self.end_date,
        )?;
        self.recurrence_rule.validate()?;
        Ok(())
    }

    /// True when the schedule is active and its cursor is on or before both
    /// `today` and the end date.
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.active && self.next_occurrence <= today && !self.is_past_end()
    }

    /// True when the cursor already lies beyond the end date.
    pub fn is_past_end(&self) -> bool {
        is_exhausted(self.next_occurrence, self.end_date)
    }

    /// Title shown for calendar entries.
    pub fn title(&self) -> String {
        match self.description.as_deref() {
            Some(text) if !text.trim().is_empty() => text.to_string(),
            _ => format!("{} transaction", self.kind),
        }
    }
}

/// A concrete transaction produced when a due schedule is processed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaterializedTransaction {
    pub id: Uuid,
    pub schedule_id: Uuid,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub group_id: Option<i64>,
    pub description: Option<String>,
    pub transaction_date: NaiveDate,
}

/// Ephemeral calendar entry; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OccurrenceInstance {
    pub source_rule_id: Uuid,
    pub date: NaiveDate,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub description: Option<String>,
}

fn validate_fields(
    amount: f64,
    group_id: Option<i64>,
    description: Option<&str>,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
) -> Result<(), ScheduleError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ScheduleError::validation(
            "amount",
            "Amount must be greater than 0",
        ));
    }
    if let Some(group) = group_id {
        if group <= 0 {
            return Err(ScheduleError::validation(
                "groupId",
                "Group ID must be a positive integer",
            ));
        }
    }
    if let Some(text) = description {
        if text.chars().count() > MAX_DESCRIPTION_CHARS {
            return Err(ScheduleError::validation(
                "description",
                format!("Description must be at most {MAX_DESCRIPTION_CHARS} characters"),
            ));
        }
    }
    if let Some(end) = end_date {
        if end < start_date {
            return Err(ScheduleError::validation(
                "endDate",
                "End date must not precede the start date",
            ));
        }
    }
    Ok(())
}
