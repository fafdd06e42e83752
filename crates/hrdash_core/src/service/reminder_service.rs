//! Reminder lifecycle use-case service.
//!
//! # Responsibility
//! - Run the once-a-day birthday detection pass with deduplication.
//! - List the active set as of a point in time.
//! - Move reminders to the archived set.
//!
//! # Invariants
//! - At most one active reminder per category, subject and local day is
//!   created by this service (single-writer guarantee only).
//! - A failure for one subject never aborts the detection pass.
//! - Archiving a reminder that is already gone is logged and reported as
//!   `ArchiveOutcome::AlreadyArchived`, not as an error.

use crate::calendar::{day_window, full_years_between, is_anniversary, DAY_MS};
use crate::model::employee::{Employee, EmployeeId, EmployeeListItem};
use crate::model::org::CompanyId;
use crate::model::reminder::{Reminder, ReminderId, BIRTHDAY_CATEGORY};
use crate::repo::reminder_repo::{ActiveReminderFilter, ReminderRepository};
use crate::repo::{RepoError, RepoResult};
use chrono::{DateTime, FixedOffset, NaiveDate};
use log::{debug, error, info, warn};

/// Something a birthday reminder can be about.
pub trait ReminderSubject {
    fn subject_id(&self) -> EmployeeId;
    fn display_name(&self) -> String;
    fn birth_date(&self) -> Option<NaiveDate>;
}

impl ReminderSubject for Employee {
    fn subject_id(&self) -> EmployeeId {
        self.id
    }

    fn display_name(&self) -> String {
        self.full_name()
    }

    fn birth_date(&self) -> Option<NaiveDate> {
        self.details.birth_date
    }
}

impl ReminderSubject for EmployeeListItem {
    fn subject_id(&self) -> EmployeeId {
        self.employee.id
    }

    fn display_name(&self) -> String {
        self.employee.full_name()
    }

    fn birth_date(&self) -> Option<NaiveDate> {
        self.employee.details.birth_date
    }
}

/// Outcome counters of one detection pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectionReport {
    /// Reminders inserted by this pass.
    pub created: Vec<Reminder>,
    /// Subjects whose birthday is today but already had a reminder.
    pub already_present: usize,
    /// Subjects skipped because storage failed for them.
    pub failed: usize,
}

/// Result of an archive request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveOutcome {
    /// The reminder moved to the archived set.
    Archived(Reminder),
    /// Nothing to move; the reminder was archived or removed earlier.
    AlreadyArchived,
}

/// Reminder lifecycle service over a repository implementation.
pub struct ReminderService<R: ReminderRepository> {
    repo: R,
}

impl<R: ReminderRepository> ReminderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates birthday reminders for subjects born on `now`'s local day.
    ///
    /// Safe to call on every page load: a subject that already has an active
    /// birthday reminder starting today is skipped.
    pub fn detect_and_create<S: ReminderSubject>(
        &self,
        subjects: &[S],
        now: &DateTime<FixedOffset>,
    ) -> DetectionReport {
        let today = now.date_naive();
        let window = day_window(now);
        let now_ms = now.timestamp_millis();
        let mut report = DetectionReport::default();

        for subject in subjects {
            let Some(birth_date) = subject.birth_date() else {
                continue;
            };
            if !is_anniversary(birth_date, today) {
                continue;
            }

            let filter = ActiveReminderFilter {
                employee_id: Some(subject.subject_id()),
                category: Some(BIRTHDAY_CATEGORY.to_string()),
                starts_between: Some((window.start_ms, window.next_start_ms)),
                ..ActiveReminderFilter::default()
            };
            match self.repo.find_active(&filter) {
                Ok(existing) if !existing.is_empty() => {
                    debug!(
                        "event=birthday_detect module=reminders status=skipped employee_id={}",
                        subject.subject_id()
                    );
                    report.already_present += 1;
                    continue;
                }
                Ok(_) => {}
                Err(err) => {
                    error!(
                        "event=birthday_detect module=reminders status=error employee_id={} error={}",
                        subject.subject_id(),
                        err
                    );
                    report.failed += 1;
                    continue;
                }
            }

            let age = full_years_between(birth_date, today);
            let reminder = Reminder::new(
                BIRTHDAY_CATEGORY,
                format!("{} turns {age} today!", subject.display_name()),
                subject.subject_id(),
                now_ms,
                window.last_ms(),
            );
            match self.repo.insert_reminder(&reminder) {
                Ok(_) => {
                    info!(
                        "event=birthday_detect module=reminders status=created employee_id={}",
                        subject.subject_id()
                    );
                    report.created.push(reminder);
                }
                Err(err) => {
                    error!(
                        "event=birthday_detect module=reminders status=error employee_id={} error={}",
                        subject.subject_id(),
                        err
                    );
                    report.failed += 1;
                }
            }
        }

        report
    }

    /// Creates a reminder for a non-birthday HR event.
    pub fn create_reminder(
        &self,
        category: &str,
        description: impl Into<String>,
        employee_id: EmployeeId,
        starts_at: i64,
        ends_at: i64,
    ) -> RepoResult<Reminder> {
        let reminder = Reminder::new(category, description, employee_id, starts_at, ends_at);
        self.repo.insert_reminder(&reminder)?;
        Ok(reminder)
    }

    /// Active reminders that ended at most one day before `as_of_ms`,
    /// soonest-ending first.
    pub fn list_active(
        &self,
        as_of_ms: i64,
        company_id: Option<CompanyId>,
    ) -> RepoResult<Vec<Reminder>> {
        self.repo.find_active(&ActiveReminderFilter {
            ends_at_or_after: Some(as_of_ms - DAY_MS),
            company_id,
            ..ActiveReminderFilter::default()
        })
    }

    /// Moves one reminder to the archived set, stamping `archived_at`.
    pub fn archive(&self, id: ReminderId, now_ms: i64) -> RepoResult<ArchiveOutcome> {
        match self.repo.archive_reminder(id, now_ms) {
            Ok(reminder) => {
                info!("event=reminder_archive module=reminders status=ok reminder_id={id}");
                Ok(ArchiveOutcome::Archived(reminder))
            }
            Err(RepoError::NotFound { .. }) => {
                warn!(
                    "event=reminder_archive module=reminders status=noop reminder_id={id} reason=not_active"
                );
                Ok(ArchiveOutcome::AlreadyArchived)
            }
            Err(err) => Err(err),
        }
    }

    pub fn get_reminder(&self, id: ReminderId) -> RepoResult<Option<Reminder>> {
        self.repo.get_reminder(id)
    }

    pub fn list_archived(&self, limit: Option<u32>) -> RepoResult<Vec<Reminder>> {
        self.repo.list_archived(limit)
    }
}
