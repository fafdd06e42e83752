//! Single-flight poll scheduling.
//!
//! # Invariants
//! - At most one poll is in flight.
//! - Requests made while a poll is in flight collapse into one trailing
//!   poll that starts as soon as the current one finishes.
//! - `tick` starts a poll only when nothing is in flight and the interval
//!   has elapsed since the last start.

/// What the caller should do after talking to the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollDecision {
    /// Run a fetch now and call `finish` when it completes.
    Start,
    /// A fetch is already running; a trailing one was scheduled.
    Coalesced,
    /// Nothing to do.
    Idle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollScheduler {
    interval_ms: i64,
    in_flight: bool,
    pending: bool,
    last_started_at: Option<i64>,
}

impl PollScheduler {
    pub fn new(interval_ms: i64) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            in_flight: false,
            pending: false,
            last_started_at: None,
        }
    }

    pub fn interval_ms(&self) -> i64 {
        self.interval_ms
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Asks for a poll right away.
    pub fn request(&mut self, now_ms: i64) -> PollDecision {
        if self.in_flight {
            self.pending = true;
            return PollDecision::Coalesced;
        }
        self.in_flight = true;
        self.last_started_at = Some(now_ms);
        PollDecision::Start
    }

    pub fn is_due(&self, now_ms: i64) -> bool {
        !self.in_flight
            && self
                .last_started_at
                .map_or(true, |started| now_ms - started >= self.interval_ms)
    }

    /// Timer callback; starts a poll once the interval has elapsed.
    pub fn tick(&mut self, now_ms: i64) -> PollDecision {
        if self.is_due(now_ms) {
            self.request(now_ms)
        } else {
            PollDecision::Idle
        }
    }

    /// Marks the running poll as done. Returns `Start` when a coalesced
    /// request is waiting.
    pub fn finish(&mut self, now_ms: i64) -> PollDecision {
        self.in_flight = false;
        if std::mem::take(&mut self.pending) {
            self.request(now_ms)
        } else {
            PollDecision::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PollDecision, PollScheduler};

    #[test]
    fn first_tick_starts_immediately() {
        let mut scheduler = PollScheduler::new(120_000);
        assert_eq!(scheduler.tick(0), PollDecision::Start);
        assert!(scheduler.is_in_flight());
    }

    #[test]
    fn requests_while_in_flight_collapse_into_one_trailing_poll() {
        let mut scheduler = PollScheduler::new(120_000);
        assert_eq!(scheduler.request(0), PollDecision::Start);
        assert_eq!(scheduler.request(10), PollDecision::Coalesced);
        assert_eq!(scheduler.request(20), PollDecision::Coalesced);

        assert_eq!(scheduler.finish(30), PollDecision::Start);
        assert_eq!(scheduler.finish(40), PollDecision::Idle);
        assert!(!scheduler.is_in_flight());
    }

    #[test]
    fn tick_waits_for_interval_and_skips_while_in_flight() {
        let mut scheduler = PollScheduler::new(120_000);
        assert_eq!(scheduler.tick(0), PollDecision::Start);
        assert_eq!(scheduler.tick(200_000), PollDecision::Idle);
        assert_eq!(scheduler.finish(1_000), PollDecision::Idle);

        assert_eq!(scheduler.tick(119_999), PollDecision::Idle);
        assert_eq!(scheduler.tick(120_000), PollDecision::Start);
    }
}
