//! Recurrence rule model and its flat storage record.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::stepper::Occurrences;
use crate::errors::RecurrenceError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
/// Enumerates the supported recurrence cadences.
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    fn unit_label(self) -> &'static str {
        match self {
            Frequency::Daily => "Day",
            Frequency::Weekly => "Week",
            Frequency::Monthly => "Month",
            Frequency::Yearly => "Year",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        };
        f.write_str(label)
    }
}

impl FromStr for Frequency {
    type Err = RecurrenceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            _ => Err(RecurrenceError::UnknownFrequency(value.to_string())),
        }
    }
}

/// Flat record as stored by the persistence layer.
///
/// The frequency is kept as free text so an unrecognised value surfaces as
/// [`RecurrenceError::UnknownFrequency`] instead of a generic decode error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RuleRecord {
    pub frequency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_of_year: Option<u32>,
}

/// A validated recurrence rule. Immutable once built; updates replace it wholesale.
///
/// Fields that have no meaning for the active frequency are retained but ignored
/// when stepping: `day_of_week` only affects weekly rules, `day_of_month` monthly
/// and yearly rules, `month_of_year` yearly rules.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "RuleRecord", into = "RuleRecord")]
pub struct RecurrenceRule {
    frequency: Frequency,
    interval: Option<u32>,
    day_of_week: Option<u32>,
    day_of_month: Option<u32>,
    month_of_year: Option<u32>,
}

impl RecurrenceRule {
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            interval: None,
            day_of_week: None,
            day_of_month: None,
            month_of_year: None,
        }
    }

    pub fn daily() -> Self {
        Self::new(Frequency::Daily)
    }

    pub fn weekly() -> Self {
        Self::new(Frequency::Weekly)
    }

    pub fn monthly() -> Self {
        Self::new(Frequency::Monthly)
    }

    pub fn yearly() -> Self {
        Self::new(Frequency::Yearly)
    }

    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Target weekday, 0 = Sunday through 6 = Saturday.
    pub fn with_day_of_week(mut self, day: u32) -> Self {
        self.day_of_week = Some(day);
        self
    }

    pub fn with_day_of_month(mut self, day: u32) -> Self {
        self.day_of_month = Some(day);
        self
    }

    pub fn with_month_of_year(mut self, month: u32) -> Self {
        self.month_of_year = Some(month);
        self
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Effective step count; an absent interval means 1.
    pub fn interval(&self) -> u32 {
        self.interval.unwrap_or(1)
    }

    pub fn day_of_week(&self) -> Option<u32> {
        self.day_of_week
    }

    pub fn day_of_month(&self) -> Option<u32> {
        self.day_of_month
    }

    pub fn month_of_year(&self) -> Option<u32> {
        self.month_of_year
    }

    /// Checks every field against its permitted range.
    pub fn validate(&self) -> Result<(), RecurrenceError> {
        if self.interval == Some(0) {
            return Err(RecurrenceError::InvalidRule(
                "interval must be at least 1".into(),
            ));
        }
        if let Some(day) = self.day_of_week {
            if day > 6 {
                return Err(RecurrenceError::InvalidRule(format!(
                    "dayOfWeek {day} is outside 0-6"
                )));
            }
        }
        if let Some(day) = self.day_of_month {
            if !(1..=31).contains(&day) {
                return Err(RecurrenceError::InvalidRule(format!(
                    "dayOfMonth {day} is outside 1-31"
                )));
            }
        }
        if let Some(month) = self.month_of_year {
            if !(1..=12).contains(&month) {
                return Err(RecurrenceError::InvalidRule(format!(
                    "monthOfYear {month} is outside 1-12"
                )));
            }
        }
        Ok(())
    }

    /// Lazily walks the occurrence sequence beginning at `anchor`.
    pub fn occurrences(&self, anchor: NaiveDate) -> Occurrences<'_> {
        Occurrences::new(self, anchor)
    }

    pub fn label(&self) -> String {
        match (self.interval(), self.frequency) {
            (1, Frequency::Daily) => "Daily".into(),
            (1, Frequency::Weekly) => "Weekly".into(),
            (1, Frequency::Monthly) => "Monthly".into(),
            (1, Frequency::Yearly) => "Yearly".into(),
            (n, frequency) => format!("Every {} {}s", n, frequency.unit_label()),
        }
    }
}

impl TryFrom<RuleRecord> for RecurrenceRule {
    type Error = RecurrenceError;

    fn try_from(record: RuleRecord) -> Result<Self, Self::Error> {
        let rule = Self {
            frequency: record.frequency.parse()?,
            interval: record.interval,
            day_of_week: record.day_of_week,
            day_of_month: record.day_of_month,
            month_of_year: record.month_of_year,
        };
        rule.validate()?;
        Ok(rule)
    }
}

impl From<RecurrenceRule> for RuleRecord {
    fn from(rule: RecurrenceRule) -> Self {
        Self {
            frequency: rule.frequency.to_string(),
            interval: rule.interval,
            day_of_week: rule.day_of_week,
            day_of_month: rule.day_of_month,
            month_of_year: rule.month_of_year,
        }
    }
}
