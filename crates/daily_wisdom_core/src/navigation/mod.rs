//! Reader navigation between unlocked articles.
//!
//! # See also
//! - crate::schedule for the available count consumed here.

pub mod navigator;
