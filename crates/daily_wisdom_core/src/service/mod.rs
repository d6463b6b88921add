//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate catalog, schedule and navigation into use-case level APIs.
//! - Keep UI/FFI layers decoupled from scheduling details.

pub mod reader_service;
