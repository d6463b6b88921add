//! Date-based unlock schedule.
//!
//! # Responsibility
//! - Turn the current date into an "available count" of unlocked articles.
//! - Keep the clock an injected dependency so evaluation stays deterministic.
//!
//! # Invariants
//! - Dates are compared at day granularity; time-of-day never matters.
//! - Weekdays are Monday..Friday of the host's local calendar. Holidays are
//!   not modelled.

pub mod clock;
pub mod resolver;
