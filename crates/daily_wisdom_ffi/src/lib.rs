//! Flutter bridge for the daily wisdom reader core.

pub mod api;
