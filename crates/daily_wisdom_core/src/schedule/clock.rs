//! Clock sources for schedule evaluation.
//!
//! # Responsibility
//! - Provide "today" as a calendar date without time-of-day.
//! - Allow callers to inject a fixed date for tests and previews.
//!
//! # Invariants
//! - `SystemClock` reads the host clock on every call; nothing is cached.

use chrono::{Local, NaiveDate};

/// Source of the current calendar date.
pub trait Clock {
    /// Returns the current local calendar date.
    fn today(&self) -> NaiveDate;
}

/// Host clock using the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
