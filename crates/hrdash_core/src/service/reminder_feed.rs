//! In-memory reminder board kept fresh by periodic polling.
//!
//! # Responsibility
//! - Hold the last fetched active set for one viewer.
//! - Drive fetches through `PollScheduler` so overlapping refreshes never
//!   run concurrently.
//! - Apply archives locally right away.
//!
//! # Invariants
//! - A completed fetch replaces the whole set.
//! - A failed fetch empties the set and leaves a notice; it is never fatal.

use crate::config::CoreConfig;
use crate::model::org::CompanyId;
use crate::model::reminder::{Reminder, ReminderId};
use crate::poll::{PollDecision, PollScheduler};
use crate::repo::reminder_repo::ReminderRepository;
use crate::repo::RepoResult;
use crate::service::reminder_service::{ArchiveOutcome, ReminderService};
use log::{debug, error};

pub const FETCH_FAILED_NOTICE: &str = "Could not load reminders. Retrying shortly.";

#[derive(Debug)]
pub struct ReminderFeed {
    scheduler: PollScheduler,
    company_id: Option<CompanyId>,
    active: Vec<Reminder>,
    notice: Option<String>,
}

impl ReminderFeed {
    pub fn new(interval_ms: i64, company_id: Option<CompanyId>) -> Self {
        Self {
            scheduler: PollScheduler::new(interval_ms),
            company_id,
            active: Vec::new(),
            notice: None,
        }
    }

    /// Feed polling at `[reminders] poll_interval_seconds`.
    pub fn from_config(config: &CoreConfig, company_id: Option<CompanyId>) -> Self {
        Self::new(config.poll_interval_ms(), company_id)
    }

    pub fn poll_interval_ms(&self) -> i64 {
        self.scheduler.interval_ms()
    }

    pub fn active(&self) -> &[Reminder] {
        &self.active
    }

    /// Reminders still showing in the badge counter.
    pub fn unread_count(&self) -> usize {
        self.active.len()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn company_id(&self) -> Option<CompanyId> {
        self.company_id
    }

    /// Switches the company scope and asks for a fresh poll.
    pub fn set_company<R: ReminderRepository>(
        &mut self,
        service: &ReminderService<R>,
        company_id: Option<CompanyId>,
        now_ms: i64,
    ) -> PollDecision {
        self.company_id = company_id;
        self.refresh(service, now_ms)
    }

    /// Starts a poll for a caller that fetches on its own; pair with
    /// `complete`.
    pub fn begin(&mut self, now_ms: i64) -> PollDecision {
        self.scheduler.request(now_ms)
    }

    /// Records the outcome of a fetch started via `begin`. Returns `Start`
    /// when a coalesced request needs a trailing fetch.
    pub fn complete(&mut self, result: RepoResult<Vec<Reminder>>, now_ms: i64) -> PollDecision {
        match result {
            Ok(reminders) => {
                debug!(
                    "event=reminder_poll module=reminders status=ok count={}",
                    reminders.len()
                );
                self.active = reminders;
                self.notice = None;
            }
            Err(err) => {
                error!("event=reminder_poll module=reminders status=error error={err}");
                self.active.clear();
                self.notice = Some(FETCH_FAILED_NOTICE.to_string());
            }
        }
        self.scheduler.finish(now_ms)
    }

    /// Fetches the active set through `service`.
    pub fn fetch<R: ReminderRepository>(
        &self,
        service: &ReminderService<R>,
        now_ms: i64,
    ) -> RepoResult<Vec<Reminder>> {
        service.list_active(now_ms, self.company_id)
    }

    /// Requests a poll and runs it, plus any trailing poll, to completion.
    pub fn refresh<R: ReminderRepository>(
        &mut self,
        service: &ReminderService<R>,
        now_ms: i64,
    ) -> PollDecision {
        let decision = self.begin(now_ms);
        if decision == PollDecision::Start {
            self.run(service, now_ms);
        }
        decision
    }

    /// Timer callback; polls when the interval has elapsed.
    pub fn tick<R: ReminderRepository>(
        &mut self,
        service: &ReminderService<R>,
        now_ms: i64,
    ) -> PollDecision {
        let decision = self.scheduler.tick(now_ms);
        if decision == PollDecision::Start {
            self.run(service, now_ms);
        }
        decision
    }

    /// Archives through `service` and drops the reminder from the local set
    /// whatever the stored state turned out to be.
    pub fn archive<R: ReminderRepository>(
        &mut self,
        service: &ReminderService<R>,
        id: ReminderId,
        now_ms: i64,
    ) -> RepoResult<ArchiveOutcome> {
        let outcome = service.archive(id, now_ms)?;
        self.active.retain(|reminder| reminder.id != id);
        Ok(outcome)
    }

    fn run<R: ReminderRepository>(&mut self, service: &ReminderService<R>, now_ms: i64) {
        loop {
            let result = self.fetch(service, now_ms);
            if self.complete(result, now_ms) != PollDecision::Start {
                break;
            }
        }
    }
}
