//! Reminder domain model.
//!
//! # Responsibility
//! - Define the time-bounded notification record tied to one employee.
//! - Derive display tiers and expiry from timestamps at read time.
//!
//! # Invariants
//! - `category` is stored trimmed and lowercase.
//! - `ends_at` is never earlier than `starts_at`.
//! - `archived_at` is `Some` only for rows read from the archived set.
//! - "Expired" is derived from `ends_at`, never persisted.

use crate::calendar::whole_days_between;
use crate::model::employee::EmployeeId;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Stable identifier of one reminder across active and archived sets.
pub type ReminderId = Uuid;

/// Category tag used by the birthday detection pass.
pub const BIRTHDAY_CATEGORY: &str = "birthday";

/// Days remaining above which a reminder is shown as green.
const GREEN_THRESHOLD_DAYS: i64 = 5;

/// Validation failures for reminder write paths.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReminderValidationError {
    #[error("reminder category must not be blank")]
    BlankCategory,
    #[error("reminder description must not be blank")]
    BlankDescription,
    #[error("reminder ends_at ({ends_at}) is earlier than starts_at ({starts_at})")]
    InvalidRange { starts_at: i64, ends_at: i64 },
}

/// Display tier for reminder cards and the notification bell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderTier {
    /// Birthday reminders, independent of remaining time.
    Informational,
    /// More than five days remain.
    Green,
    /// One to five days remain.
    Yellow,
    /// Due today or already past.
    Red,
}

/// Time-bounded notification about one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub category: String,
    pub description: String,
    /// Epoch milliseconds.
    pub starts_at: i64,
    /// Epoch milliseconds, inclusive.
    pub ends_at: i64,
    pub employee_id: EmployeeId,
    /// Epoch milliseconds when the reminder was moved to the archived set.
    pub archived_at: Option<i64>,
}

impl Reminder {
    /// Creates an active reminder with a generated id.
    pub fn new(
        category: &str,
        description: impl Into<String>,
        employee_id: EmployeeId,
        starts_at: i64,
        ends_at: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            category: normalize_category(category),
            description: description.into(),
            starts_at,
            ends_at,
            employee_id,
            archived_at: None,
        }
    }

    pub fn validate(&self) -> Result<(), ReminderValidationError> {
        if self.category.trim().is_empty() {
            return Err(ReminderValidationError::BlankCategory);
        }
        if self.description.trim().is_empty() {
            return Err(ReminderValidationError::BlankDescription);
        }
        if self.ends_at < self.starts_at {
            return Err(ReminderValidationError::InvalidRange {
                starts_at: self.starts_at,
                ends_at: self.ends_at,
            });
        }
        Ok(())
    }

    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }

    pub fn is_birthday(&self) -> bool {
        self.category == BIRTHDAY_CATEGORY
    }

    /// Returns whether the reminder window closed before `now_ms`.
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        self.ends_at < now_ms
    }

    /// Whole days from `now_ms` until `ends_at`, truncated toward zero.
    pub fn days_remaining(&self, now_ms: i64) -> i64 {
        whole_days_between(now_ms, self.ends_at)
    }

    /// Classifies the reminder for display at `now_ms`.
    pub fn tier(&self, now_ms: i64) -> ReminderTier {
        if self.is_birthday() {
            return ReminderTier::Informational;
        }
        match self.days_remaining(now_ms) {
            days if days > GREEN_THRESHOLD_DAYS => ReminderTier::Green,
            days if days > 0 => ReminderTier::Yellow,
            _ => ReminderTier::Red,
        }
    }
}

/// Normalizes a free-form category tag (trim + lowercase).
pub fn normalize_category(value: &str) -> String {
    value.trim().to_lowercase()
}
