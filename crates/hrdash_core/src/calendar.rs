//! Calendar arithmetic shared by reminder detection and classification.
//!
//! All persisted timestamps are epoch milliseconds. "Local day" means the
//! calendar day in the fixed UTC offset carried by the `DateTime` passed in,
//! so callers decide the business timezone once (see `CoreConfig`).

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate};

/// Milliseconds in one calendar day.
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Half-open `[start_ms, next_start_ms)` window covering one local day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start_ms: i64,
    pub next_start_ms: i64,
}

impl DayWindow {
    /// Last representable millisecond of the day (`23:59:59.999`).
    pub fn last_ms(&self) -> i64 {
        self.next_start_ms - 1
    }

    pub fn contains(&self, epoch_ms: i64) -> bool {
        epoch_ms >= self.start_ms && epoch_ms < self.next_start_ms
    }
}

/// Returns the local-day window that contains `now`.
pub fn day_window(now: &DateTime<FixedOffset>) -> DayWindow {
    let offset_ms = i64::from(now.offset().local_minus_utc()) * 1000;
    let local_midnight = now.date_naive().and_time(chrono::NaiveTime::MIN);
    let start_ms = local_midnight.and_utc().timestamp_millis() - offset_ms;
    DayWindow {
        start_ms,
        next_start_ms: start_ms + DAY_MS,
    }
}

/// Date on which a birth date is celebrated in `year`.
///
/// A 29 February birth date rolls over to 1 March in non-leap years.
pub fn anniversary_in_year(birth_date: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, birth_date.month(), birth_date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}

/// Returns whether `today` is the anniversary of `birth_date`.
pub fn is_anniversary(birth_date: NaiveDate, today: NaiveDate) -> bool {
    anniversary_in_year(birth_date, today.year()) == Some(today)
}

/// Whole years elapsed from `birth_date` to `today`; 0 for future dates.
pub fn full_years_between(birth_date: NaiveDate, today: NaiveDate) -> u32 {
    today.years_since(birth_date).unwrap_or(0)
}

/// Whole days from `from_ms` to `to_ms`, truncated toward zero.
pub fn whole_days_between(from_ms: i64, to_ms: i64) -> i64 {
    (to_ms - from_ms) / DAY_MS
}
