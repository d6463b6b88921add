//! Reader use-case service.
//!
//! # Responsibility
//! - Combine catalog, schedule and navigator into render-ready views.
//! - Keep UI/FFI layers free of date arithmetic and bounds checks.
//!
//! # Invariants
//! - The clock is read on every call; a new weekday takes effect without reload.
//! - Every returned view points at an existing, reachable article.
//! - The service holds no view state; callers pass the current index in.

use crate::catalog::{ArticleCatalog, CatalogError};
use crate::config::{ConfigError, ReaderConfig};
use crate::model::article::Article;
use crate::navigation::navigator::{
    NavigationPosition, Navigator, NavigatorConfig, NextBlockedReason, ViewState,
};
use crate::render::markdown::{derive_preview, render_markdown_html};
use crate::schedule::clock::Clock;
use crate::schedule::resolver::ScheduleResolver;
use chrono::NaiveDate;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ReaderResult<T> = Result<T, ReaderError>;

/// Reader service errors.
#[derive(Debug)]
pub enum ReaderError {
    Config(ConfigError),
    Catalog(CatalogError),
    /// Catalog and navigator disagree about an index.
    MissingArticle(usize),
}

impl Display for ReaderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Catalog(err) => write!(f, "{err}"),
            Self::MissingArticle(index) => write!(f, "no article at index {index}"),
        }
    }
}

impl Error for ReaderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Catalog(err) => Some(err),
            Self::MissingArticle(_) => None,
        }
    }
}

impl From<ConfigError> for ReaderError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<CatalogError> for ReaderError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

/// Render-ready projection of one reader position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderView {
    pub state: ViewState,
    pub article: Article,
    /// Sanitized HTML rendered from `article.content`.
    pub html: String,
    pub preview: Option<String>,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub next_blocked_reason: Option<NextBlockedReason>,
    pub position: NavigationPosition,
    pub available_count: usize,
    pub total_count: usize,
    /// Weekday this article unlocks under the real schedule.
    pub unlock_date: Option<NaiveDate>,
    /// Date the next locked article unlocks; set only when the schedule blocks next.
    pub next_unlock_date: Option<NaiveDate>,
}

impl ReaderView {
    pub fn index(&self) -> usize {
        self.state.current_article_index
    }

    /// User-facing copy for a refused next move.
    ///
    /// Schedule blocks name the weekday the next article unlocks.
    pub fn blocked_message(&self) -> Option<String> {
        let reason = self.next_blocked_reason?;
        match (reason, self.next_unlock_date) {
            (NextBlockedReason::Schedule, Some(date)) => Some(format!(
                "The next article unlocks on {}.",
                date.format("%A, %Y-%m-%d")
            )),
            _ => Some(reason.message().to_string()),
        }
    }
}

/// Schedule snapshot for status surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleStatus {
    pub today: NaiveDate,
    pub start_date: NaiveDate,
    pub available_count: usize,
    pub total_count: usize,
    /// `None` once every article is unlocked.
    pub next_unlock_date: Option<NaiveDate>,
    pub developer_mode: bool,
}

/// Reader facade over catalog + schedule + navigator.
pub struct ReaderService<C: Clock> {
    catalog: ArticleCatalog,
    resolver: ScheduleResolver<C>,
    config: NavigatorConfig,
}

impl<C: Clock> ReaderService<C> {
    pub fn new(catalog: ArticleCatalog, resolver: ScheduleResolver<C>, config: NavigatorConfig) -> Self {
        Self {
            catalog,
            resolver,
            config,
        }
    }

    /// Loads the configured catalog and builds a service around `clock`.
    pub fn from_config(config: &ReaderConfig, clock: C) -> ReaderResult<Self> {
        let catalog = match &config.articles_path {
            Some(path) => ArticleCatalog::from_path(path)?,
            None => ArticleCatalog::builtin()?,
        };
        info!(
            "event=reader_init module=service status=ok start={} developer_mode={} count={}",
            config.start_date,
            config.developer_mode,
            catalog.len()
        );
        Ok(Self::new(
            catalog,
            ScheduleResolver::new(config.start_date, clock),
            config.navigator_config(),
        ))
    }

    pub fn catalog(&self) -> &ArticleCatalog {
        &self.catalog
    }

    /// Navigator for the current clock reading.
    pub fn navigator(&self) -> Navigator {
        let total = self.catalog.len();
        Navigator::new(total, self.resolver.available_count(total), self.config)
    }

    /// Initial view: newest unlocked article.
    pub fn open(&self) -> ReaderResult<ReaderView> {
        let navigator = self.navigator();
        let state = navigator.initial_state();
        debug!(
            "event=reader_open module=service status=ok index={} available={}",
            state.current_article_index,
            navigator.available_count()
        );
        self.build_view(&navigator, state)
    }

    /// View of `index`, clamped into the reachable range.
    pub fn view(&self, index: usize) -> ReaderResult<ReaderView> {
        let navigator = self.navigator();
        let state = navigator.clamp(self.state_at(index));
        self.build_view(&navigator, state)
    }

    /// Moves forward from `index`; a refused move returns the same article.
    pub fn next(&self, index: usize) -> ReaderResult<ReaderView> {
        let navigator = self.navigator();
        let current = navigator.clamp(self.state_at(index));
        let moved = navigator.next(current);
        if moved == current {
            debug!(
                "event=reader_next module=service status=blocked index={} reason={}",
                current.current_article_index,
                navigator
                    .next_blocked_reason(&current)
                    .map_or("none", NextBlockedReason::as_str)
            );
        }
        self.build_view(&navigator, moved)
    }

    /// Moves back from `index`; a refused move returns the same article.
    pub fn previous(&self, index: usize) -> ReaderResult<ReaderView> {
        let navigator = self.navigator();
        let current = navigator.clamp(self.state_at(index));
        self.build_view(&navigator, navigator.previous(current))
    }

    pub fn status(&self) -> ScheduleStatus {
        let total = self.catalog.len();
        let today = self.resolver.today();
        let available = self.resolver.available_count(total);
        let next_unlock_date = if available < total {
            self.resolver.next_unlock_date(today)
        } else {
            None
        };
        ScheduleStatus {
            today,
            start_date: self.resolver.start_date(),
            available_count: available,
            total_count: total,
            next_unlock_date,
            developer_mode: self.config.developer_mode,
        }
    }

    fn state_at(&self, index: usize) -> ViewState {
        ViewState {
            current_article_index: index,
            developer_mode: self.config.developer_mode,
        }
    }

    fn build_view(&self, navigator: &Navigator, state: ViewState) -> ReaderResult<ReaderView> {
        let index = state.current_article_index;
        let article = self
            .catalog
            .get(index)
            .cloned()
            .ok_or(ReaderError::MissingArticle(index))?;
        let html = render_markdown_html(&article.content);
        let preview = derive_preview(&article.content);
        let next_blocked_reason = navigator.next_blocked_reason(&state);
        let next_unlock_date = match next_blocked_reason {
            Some(NextBlockedReason::Schedule) => {
                self.resolver.unlock_date(navigator.available_count())
            }
            _ => None,
        };
        Ok(ReaderView {
            state,
            html,
            preview,
            can_go_previous: navigator.can_go_previous(&state),
            can_go_next: navigator.can_go_next(&state),
            next_blocked_reason,
            position: navigator.position(&state),
            available_count: navigator.available_count(),
            total_count: navigator.article_count(),
            unlock_date: self.resolver.unlock_date(index),
            next_unlock_date,
            article,
        })
    }
}
