//! Weekday unlock schedule.
//!
//! # Responsibility
//! - Map `(start_date, today)` to the number of unlocked articles.
//! - Answer "when does slot N unlock" for status messages.
//!
//! # Invariants
//! - Saturday and Sunday never unlock a slot.
//! - The available count never decreases as `today` advances.
//! - The available count never exceeds the catalog length.
//! - `today < start_date` yields zero, not an error.

use super::clock::Clock;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use log::debug;

const WEEKDAYS_PER_WEEK: u64 = 5;
const DAYS_PER_WEEK: u64 = 7;

/// Returns how many articles are unlocked on `today`.
///
/// Counts Monday..Friday dates in `start_date..=today`, clamped to
/// `article_count`.
pub fn compute_available_count(
    start_date: NaiveDate,
    today: NaiveDate,
    article_count: usize,
) -> usize {
    let elapsed = count_weekdays_inclusive(start_date, today);
    usize::try_from(elapsed).map_or(article_count, |count| count.min(article_count))
}

/// Counts weekdays in the inclusive range `start..=end`.
///
/// Returns 0 when `end < start`.
pub fn count_weekdays_inclusive(start: NaiveDate, end: NaiveDate) -> u64 {
    if end < start {
        return 0;
    }
    let span_days = (end - start).num_days().unsigned_abs() + 1;
    let full_weeks = span_days / DAYS_PER_WEEK;
    let remainder = span_days % DAYS_PER_WEEK;

    // Tail days continue the weekday cycle from `start`.
    let start_offset = u64::from(start.weekday().num_days_from_monday());
    let tail = (0..remainder)
        .filter(|offset| (start_offset + offset) % DAYS_PER_WEEK < WEEKDAYS_PER_WEEK)
        .count() as u64;

    full_weeks * WEEKDAYS_PER_WEEK + tail
}

/// Returns whether `date` falls on Monday..Friday.
pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Returns the first weekday on or after `date`.
pub fn first_weekday_on_or_after(date: NaiveDate) -> Option<NaiveDate> {
    match date.weekday() {
        Weekday::Sat => date.checked_add_days(Days::new(2)),
        Weekday::Sun => date.checked_add_days(Days::new(1)),
        _ => Some(date),
    }
}

/// Returns the first weekday strictly after `date`.
pub fn next_weekday_after(date: NaiveDate) -> Option<NaiveDate> {
    first_weekday_on_or_after(date.succ_opt()?)
}

/// Clock-driven unlock schedule anchored at a fixed start date.
#[derive(Debug, Clone)]
pub struct ScheduleResolver<C: Clock> {
    start_date: NaiveDate,
    clock: C,
}

impl<C: Clock> ScheduleResolver<C> {
    /// Creates a resolver for the given start date and clock.
    pub fn new(start_date: NaiveDate, clock: C) -> Self {
        Self { start_date, clock }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Reads the clock. Called on every availability check.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Returns the unlocked article count for the current clock date.
    pub fn available_count(&self, article_count: usize) -> usize {
        let today = self.today();
        let available = compute_available_count(self.start_date, today, article_count);
        debug!(
            "event=schedule_resolve module=schedule status=ok start={} today={} available={} total={}",
            self.start_date, today, available, article_count
        );
        available
    }

    /// Returns the date on which slot `index` unlocks.
    ///
    /// Slot 0 unlocks on the first weekday on or after the start date.
    /// Returns `None` only on calendar overflow.
    pub fn unlock_date(&self, index: usize) -> Option<NaiveDate> {
        let first = first_weekday_on_or_after(self.start_date)?;
        let index = u64::try_from(index).ok()?;
        let weeks = index / WEEKDAYS_PER_WEEK;
        let mut date = first.checked_add_days(Days::new(weeks.checked_mul(DAYS_PER_WEEK)?))?;
        for _ in 0..index % WEEKDAYS_PER_WEEK {
            date = next_weekday_after(date)?;
        }
        Some(date)
    }

    /// Returns the date the next locked slot unlocks, seen from `today`.
    ///
    /// Before the start date this is the first slot's unlock date.
    pub fn next_unlock_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        if today < self.start_date {
            return self.unlock_date(0);
        }
        next_weekday_after(today)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        compute_available_count, count_weekdays_inclusive, first_weekday_on_or_after,
        next_weekday_after, ScheduleResolver,
    };
    use crate::schedule::clock::FixedClock;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn naive_count(start: NaiveDate, end: NaiveDate) -> u64 {
        start
            .iter_days()
            .take_while(|day| *day <= end)
            .filter(|day| super::is_weekday(*day))
            .count() as u64
    }

    #[test]
    fn week_arithmetic_matches_day_by_day_walk() {
        let start = date(2024, 1, 3);
        for offset in 0..60 {
            let end = start + chrono::Days::new(offset);
            assert_eq!(
                count_weekdays_inclusive(start, end),
                naive_count(start, end),
                "mismatch at {end}"
            );
        }
    }

    #[test]
    fn weekend_start_counts_from_following_monday() {
        let saturday = date(2024, 1, 6);
        assert_eq!(count_weekdays_inclusive(saturday, date(2024, 1, 7)), 0);
        assert_eq!(count_weekdays_inclusive(saturday, date(2024, 1, 8)), 1);
    }

    #[test]
    fn count_is_clamped_to_catalog_length() {
        assert_eq!(compute_available_count(date(2024, 1, 1), date(2025, 1, 1), 97), 97);
        assert_eq!(compute_available_count(date(2024, 1, 1), date(2024, 1, 3), 0), 0);
    }

    #[test]
    fn weekday_helpers_skip_weekends() {
        assert_eq!(first_weekday_on_or_after(date(2024, 1, 6)), Some(date(2024, 1, 8)));
        assert_eq!(first_weekday_on_or_after(date(2024, 1, 9)), Some(date(2024, 1, 9)));
        assert_eq!(next_weekday_after(date(2024, 1, 5)), Some(date(2024, 1, 8)));
        assert_eq!(next_weekday_after(date(2024, 1, 8)), Some(date(2024, 1, 9)));
    }

    #[test]
    fn unlock_date_is_inverse_of_available_count() {
        let resolver = ScheduleResolver::new(date(2024, 1, 1), FixedClock(date(2024, 1, 1)));
        for index in 0..40 {
            let unlock = resolver.unlock_date(index).expect("in calendar range");
            assert_eq!(compute_available_count(date(2024, 1, 1), unlock, 100), index + 1);
        }
        assert_eq!(resolver.unlock_date(5), Some(date(2024, 1, 8)));
    }

    #[test]
    fn next_unlock_before_start_is_first_slot() {
        let resolver = ScheduleResolver::new(date(2024, 1, 6), FixedClock(date(2024, 1, 1)));
        assert_eq!(resolver.next_unlock_date(date(2024, 1, 1)), Some(date(2024, 1, 8)));
        assert_eq!(resolver.next_unlock_date(date(2024, 1, 12)), Some(date(2024, 1, 15)));
    }
}
