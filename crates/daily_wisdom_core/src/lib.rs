//! Core logic for the daily wisdom reader.
//! One curated article unlocks per weekday; this crate owns the unlock
//! schedule, navigation bounds and content loading.

pub mod catalog;
pub mod config;
pub mod import;
pub mod logging;
pub mod model;
pub mod navigation;
pub mod render;
pub mod schedule;
pub mod service;

pub use catalog::{ArticleCatalog, CatalogError, CatalogResult};
pub use config::{ConfigError, ReaderConfig};
pub use import::{import_directory, import_page, ImportError};
pub use logging::{
    default_log_level, init_logging, init_stderr_logging, logging_status, LogSink, LoggingError,
};
pub use model::article::{Article, ArticleValidationError};
pub use navigation::navigator::{
    NavigationPosition, Navigator, NavigatorConfig, NextBlockedReason, ViewState,
};
pub use render::markdown::{derive_preview, render_markdown_html};
pub use schedule::clock::{Clock, FixedClock, SystemClock};
pub use schedule::resolver::{compute_available_count, ScheduleResolver};
pub use service::reader_service::{
    ReaderError, ReaderResult, ReaderService, ReaderView, ScheduleStatus,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
