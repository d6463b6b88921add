//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose reader use-cases to Dart via FRB as flat response envelopes.
//! - Own process-wide reader bootstrap (config + catalog) behind `OnceLock`.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - View state stays on the Dart side; every call passes the current index.
//! - The host clock is read on every call.

use daily_wisdom_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    NavigationPosition, ReaderConfig, ReaderResult, ReaderService, ReaderView, SystemClock,
};
use log::error;
use std::sync::OnceLock;

static READER: OnceLock<Result<ReaderService<SystemClock>, String>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Reader view envelope for one article position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderViewResponse {
    /// Whether the view could be produced.
    pub ok: bool,
    /// Human-readable diagnostics; empty on success.
    pub message: String,
    pub index: u32,
    pub title: String,
    pub author: String,
    /// Sanitized article HTML.
    pub html: String,
    pub preview: Option<String>,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    /// `schedule` or `end-of-list` when next is refused.
    pub blocked_reason: Option<String>,
    /// Copy to show when next is refused.
    pub blocked_message: Option<String>,
    /// `empty|at_start|mid_range|at_end_of_unlocked|at_end_of_list`.
    pub position: String,
    pub available_count: u32,
    pub total_count: u32,
    pub developer_mode: bool,
    /// `YYYY-MM-DD` unlock date under the real schedule.
    pub unlock_date: Option<String>,
    /// `YYYY-MM-DD` the next locked article unlocks; set with `blocked_reason=schedule`.
    pub next_unlock_date: Option<String>,
}

impl ReaderViewResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            index: 0,
            title: String::new(),
            author: String::new(),
            html: String::new(),
            preview: None,
            can_go_previous: false,
            can_go_next: false,
            blocked_reason: None,
            blocked_message: None,
            position: NavigationPosition::Empty.as_str().to_string(),
            available_count: 0,
            total_count: 0,
            developer_mode: false,
            unlock_date: None,
            next_unlock_date: None,
        }
    }
}

/// Schedule status envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderStatusResponse {
    pub ok: bool,
    pub message: String,
    pub today: String,
    pub start_date: String,
    pub available_count: u32,
    pub total_count: u32,
    /// `None` once every article is unlocked.
    pub next_unlock_date: Option<String>,
    pub developer_mode: bool,
}

/// Opens the reader at the newest unlocked article.
///
/// # FFI contract
/// - Sync call; first call loads configuration and catalog.
/// - Never panics; failures are reported with `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn reader_open() -> ReaderViewResponse {
    with_reader("reader_open", |reader| reader.open())
}

/// Returns the view at `index`, clamped into the reachable range.
#[flutter_rust_bridge::frb(sync)]
pub fn reader_view(index: u32) -> ReaderViewResponse {
    with_reader("reader_view", |reader| reader.view(to_index(index)))
}

/// Moves forward from `index`; a refused move returns the same article with
/// `blocked_reason` set.
#[flutter_rust_bridge::frb(sync)]
pub fn reader_next(index: u32) -> ReaderViewResponse {
    with_reader("reader_next", |reader| reader.next(to_index(index)))
}

/// Moves back from `index`; at the first article the same view is returned.
#[flutter_rust_bridge::frb(sync)]
pub fn reader_previous(index: u32) -> ReaderViewResponse {
    with_reader("reader_previous", |reader| reader.previous(to_index(index)))
}

/// Reports the schedule snapshot for today.
#[flutter_rust_bridge::frb(sync)]
pub fn reader_status() -> ReaderStatusResponse {
    match reader() {
        Ok(reader) => {
            let status = reader.status();
            ReaderStatusResponse {
                ok: true,
                message: String::new(),
                today: status.today.to_string(),
                start_date: status.start_date.to_string(),
                available_count: to_u32(status.available_count),
                total_count: to_u32(status.total_count),
                next_unlock_date: status.next_unlock_date.map(|date| date.to_string()),
                developer_mode: status.developer_mode,
            }
        }
        Err(err) => ReaderStatusResponse {
            ok: false,
            message: format!("reader_status failed: {err}"),
            today: String::new(),
            start_date: String::new(),
            available_count: 0,
            total_count: 0,
            next_unlock_date: None,
            developer_mode: false,
        },
    }
}

fn reader() -> Result<&'static ReaderService<SystemClock>, &'static str> {
    READER
        .get_or_init(|| {
            let config = ReaderConfig::from_env().map_err(|err| err.to_string())?;
            ReaderService::from_config(&config, SystemClock).map_err(|err| {
                error!(
                    "event=reader_init module=ffi status=error error={}",
                    err
                );
                err.to_string()
            })
        })
        .as_ref()
        .map_err(String::as_str)
}

fn with_reader(
    op: &str,
    f: impl FnOnce(&ReaderService<SystemClock>) -> ReaderResult<ReaderView>,
) -> ReaderViewResponse {
    let reader = match reader() {
        Ok(reader) => reader,
        Err(err) => return ReaderViewResponse::failure(format!("{op} failed: {err}")),
    };
    match f(reader) {
        Ok(view) => to_view_response(view),
        Err(err) => ReaderViewResponse::failure(format!("{op} failed: {err}")),
    }
}

fn to_view_response(view: ReaderView) -> ReaderViewResponse {
    ReaderViewResponse {
        ok: true,
        message: String::new(),
        index: to_u32(view.index()),
        blocked_reason: view.next_blocked_reason.map(|reason| reason.as_str().to_string()),
        blocked_message: view.blocked_message(),
        position: view.position.as_str().to_string(),
        available_count: to_u32(view.available_count),
        total_count: to_u32(view.total_count),
        developer_mode: view.state.developer_mode,
        unlock_date: view.unlock_date.map(|date| date.to_string()),
        next_unlock_date: view.next_unlock_date.map(|date| date.to_string()),
        can_go_previous: view.can_go_previous,
        can_go_next: view.can_go_next,
        preview: view.preview,
        html: view.html,
        title: view.article.title,
        author: view.article.author,
    }
}

fn to_index(index: u32) -> usize {
    usize::try_from(index).unwrap_or(usize::MAX)
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, ping, reader_next, reader_open, reader_previous,
        reader_status, reader_view,
    };

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(error.contains("unsupported log level"));
    }

    #[test]
    fn reader_open_returns_reachable_article() {
        let view = reader_open();
        assert!(view.ok, "{}", view.message);
        assert!(view.index < view.total_count);
        assert!(!view.title.is_empty());
        assert!(!view.html.is_empty());
        assert_eq!(view.can_go_next, view.blocked_reason.is_none());
        assert_eq!(view.blocked_reason.is_some(), view.blocked_message.is_some());
        assert_eq!(
            view.next_unlock_date.is_some(),
            view.blocked_reason.as_deref() == Some("schedule")
        );
    }

    #[test]
    fn out_of_range_index_is_clamped() {
        let view = reader_view(u32::MAX);
        assert!(view.ok, "{}", view.message);
        assert!(view.index < view.total_count);
    }

    #[test]
    fn previous_at_start_is_a_no_op() {
        let view = reader_previous(0);
        assert!(view.ok, "{}", view.message);
        assert_eq!(view.index, 0);
        assert!(!view.can_go_previous);
    }

    #[test]
    fn next_never_passes_reachable_range() {
        let opened = reader_open();
        let moved = reader_next(opened.index);
        assert!(moved.ok, "{}", moved.message);
        if opened.can_go_next {
            assert_eq!(moved.index, opened.index + 1);
        } else {
            assert_eq!(moved.index, opened.index);
        }
    }

    #[test]
    fn status_counts_are_consistent() {
        let status = reader_status();
        assert!(status.ok, "{}", status.message);
        assert!(status.available_count <= status.total_count);
        assert_eq!(
            status.next_unlock_date.is_none(),
            status.available_count == status.total_count
        );
    }
}
