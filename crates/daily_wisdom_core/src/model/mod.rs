//! Domain model for the daily reader.
//!
//! # Responsibility
//! - Define canonical data structures consumed by scheduling and navigation.
//!
//! # Invariants
//! - An article's position in its catalog is its weekday slot index.

pub mod article;
