//! Index navigation over unlocked articles.
//!
//! # Responsibility
//! - Decide whether previous/next moves are allowed for a view state.
//! - Explain why a next move was refused (schedule vs. end of list).
//!
//! # Invariants
//! - `next`/`previous` never move out of bounds; refused moves are no-ops.
//! - Developer mode bypasses the schedule but never the list length.
//! - States returned by a move carry the navigator's developer mode.

use serde::{Deserialize, Serialize};

/// Navigator configuration supplied by the host environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigatorConfig {
    /// Bypass the unlock schedule and expose all content.
    pub developer_mode: bool,
}

/// Reader position owned by the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub current_article_index: usize,
    pub developer_mode: bool,
}

/// Why a next request cannot be honoured.
///
/// Serializes to the same labels as [`NextBlockedReason::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NextBlockedReason {
    /// More content exists but is not unlocked yet.
    Schedule,
    /// The current article is the last one in the catalog.
    EndOfList,
}

impl NextBlockedReason {
    /// Stable wire label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Schedule => "schedule",
            Self::EndOfList => "end-of-list",
        }
    }

    /// User-facing copy for a refused next request.
    pub fn message(self) -> &'static str {
        match self {
            Self::Schedule => "The next article unlocks on the next weekday.",
            Self::EndOfList => "You have reached the last article. There is no more content.",
        }
    }
}

/// Coarse classification of a view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPosition {
    /// Catalog has no articles.
    Empty,
    AtStart,
    MidRange,
    /// Newest unlocked article while later content is still locked.
    AtEndOfUnlocked,
    AtEndOfList,
}

impl NavigationPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::AtStart => "at_start",
            Self::MidRange => "mid_range",
            Self::AtEndOfUnlocked => "at_end_of_unlocked",
            Self::AtEndOfList => "at_end_of_list",
        }
    }
}

/// Bounds calculator for one `(article_count, available_count)` snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigator {
    article_count: usize,
    available_count: usize,
    config: NavigatorConfig,
}

impl Navigator {
    /// Creates a navigator; `available_count` is clamped to `article_count`.
    pub fn new(article_count: usize, available_count: usize, config: NavigatorConfig) -> Self {
        Self {
            article_count,
            available_count: available_count.min(article_count),
            config,
        }
    }

    pub fn article_count(&self) -> usize {
        self.article_count
    }

    pub fn available_count(&self) -> usize {
        self.available_count
    }

    pub fn developer_mode(&self) -> bool {
        self.config.developer_mode
    }

    /// Number of articles the reader may open under the active mode.
    pub fn reachable_count(&self) -> usize {
        if self.config.developer_mode {
            self.article_count
        } else {
            self.available_count
        }
    }

    /// Initial state on load: the newest article unlocked by the real schedule.
    ///
    /// Developer mode starts at the same position but may move forward.
    pub fn initial_state(&self) -> ViewState {
        let latest = self.available_count.max(1) - 1;
        ViewState {
            current_article_index: latest.min(self.article_count.saturating_sub(1)),
            developer_mode: self.config.developer_mode,
        }
    }

    /// Pulls an externally supplied state into the reachable range.
    pub fn clamp(&self, state: ViewState) -> ViewState {
        let upper = self.reachable_count().max(1) - 1;
        ViewState {
            current_article_index: state.current_article_index.min(upper),
            developer_mode: self.config.developer_mode,
        }
    }

    pub fn can_go_previous(&self, state: &ViewState) -> bool {
        state.current_article_index > 0
    }

    pub fn can_go_next(&self, state: &ViewState) -> bool {
        match state.current_article_index.checked_add(1) {
            Some(candidate) => candidate < self.reachable_count(),
            None => false,
        }
    }

    /// Returns why next is refused, or `None` when next is allowed.
    pub fn next_blocked_reason(&self, state: &ViewState) -> Option<NextBlockedReason> {
        if self.can_go_next(state) {
            return None;
        }
        let has_more = state
            .current_article_index
            .checked_add(1)
            .is_some_and(|candidate| candidate < self.article_count);
        if has_more {
            Some(NextBlockedReason::Schedule)
        } else {
            Some(NextBlockedReason::EndOfList)
        }
    }

    /// Moves forward one article, or returns `state` unchanged.
    ///
    /// A successful move reports the navigator's developer mode.
    pub fn next(&self, state: ViewState) -> ViewState {
        if !self.can_go_next(&state) {
            return state;
        }
        ViewState {
            current_article_index: state.current_article_index + 1,
            developer_mode: self.config.developer_mode,
        }
    }

    /// Moves back one article, or returns `state` unchanged.
    pub fn previous(&self, state: ViewState) -> ViewState {
        if !self.can_go_previous(&state) {
            return state;
        }
        ViewState {
            current_article_index: state.current_article_index - 1,
            developer_mode: self.config.developer_mode,
        }
    }

    pub fn position(&self, state: &ViewState) -> NavigationPosition {
        if self.article_count == 0 {
            return NavigationPosition::Empty;
        }
        match self.next_blocked_reason(state) {
            Some(NextBlockedReason::EndOfList) => NavigationPosition::AtEndOfList,
            Some(NextBlockedReason::Schedule) => NavigationPosition::AtEndOfUnlocked,
            None if state.current_article_index == 0 => NavigationPosition::AtStart,
            None => NavigationPosition::MidRange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NavigationPosition, Navigator, NavigatorConfig, NextBlockedReason, ViewState};

    const NORMAL: NavigatorConfig = NavigatorConfig {
        developer_mode: false,
    };
    const DEVELOPER: NavigatorConfig = NavigatorConfig {
        developer_mode: true,
    };

    fn at(index: usize) -> ViewState {
        ViewState {
            current_article_index: index,
            developer_mode: false,
        }
    }

    #[test]
    fn initial_state_points_at_latest_unlocked() {
        assert_eq!(Navigator::new(97, 5, NORMAL).initial_state().current_article_index, 4);
        assert_eq!(Navigator::new(97, 0, NORMAL).initial_state().current_article_index, 0);
        assert_eq!(Navigator::new(3, 10, NORMAL).initial_state().current_article_index, 2);
        assert_eq!(Navigator::new(0, 0, NORMAL).initial_state().current_article_index, 0);
    }

    #[test]
    fn developer_initial_state_uses_real_schedule_position() {
        let navigator = Navigator::new(97, 5, DEVELOPER);
        let state = navigator.initial_state();
        assert_eq!(state.current_article_index, 4);
        assert!(state.developer_mode);
        assert!(navigator.can_go_next(&state));
    }

    #[test]
    fn clamp_pulls_index_into_reachable_range() {
        let navigator = Navigator::new(97, 5, NORMAL);
        assert_eq!(navigator.clamp(at(50)).current_article_index, 4);
        assert_eq!(navigator.clamp(at(2)).current_article_index, 2);

        let developer = Navigator::new(97, 5, DEVELOPER);
        assert_eq!(developer.clamp(at(500)).current_article_index, 96);
    }

    #[test]
    fn blocked_messages_differ_by_reason() {
        assert_ne!(
            NextBlockedReason::Schedule.message(),
            NextBlockedReason::EndOfList.message()
        );
        assert_eq!(NextBlockedReason::EndOfList.as_str(), "end-of-list");
    }

    #[test]
    fn serialized_reason_matches_wire_label() {
        for reason in [NextBlockedReason::Schedule, NextBlockedReason::EndOfList] {
            let encoded = serde_json::to_string(&reason).unwrap();
            assert_eq!(encoded, format!("\"{}\"", reason.as_str()));
            let decoded: NextBlockedReason = serde_json::from_str(&encoded).unwrap();
            assert_eq!(decoded, reason);
        }
    }

    #[test]
    fn schedule_message_does_not_promise_tomorrow() {
        assert!(!NextBlockedReason::Schedule.message().contains("tomorrow"));
    }

    #[test]
    fn moves_report_navigator_developer_mode() {
        let developer = Navigator::new(97, 5, DEVELOPER);
        let moved = developer.next(at(4));
        assert_eq!(moved.current_article_index, 5);
        assert!(moved.developer_mode);
        assert!(developer.previous(at(4)).developer_mode);

        let normal = Navigator::new(97, 5, NORMAL);
        let stale = ViewState {
            current_article_index: 2,
            developer_mode: true,
        };
        assert!(!normal.next(stale).developer_mode);
        assert!(!normal.previous(stale).developer_mode);
    }

    #[test]
    fn position_labels_are_stable() {
        assert_eq!(NavigationPosition::AtEndOfUnlocked.as_str(), "at_end_of_unlocked");
        assert_eq!(NavigationPosition::Empty.as_str(), "empty");
    }

    #[test]
    fn position_covers_all_bounded_states() {
        let navigator = Navigator::new(10, 5, NORMAL);
        assert_eq!(navigator.position(&at(0)), NavigationPosition::AtStart);
        assert_eq!(navigator.position(&at(2)), NavigationPosition::MidRange);
        assert_eq!(navigator.position(&at(4)), NavigationPosition::AtEndOfUnlocked);

        let finished = Navigator::new(10, 10, NORMAL);
        assert_eq!(finished.position(&at(9)), NavigationPosition::AtEndOfList);

        let empty = Navigator::new(0, 0, NORMAL);
        assert_eq!(empty.position(&at(0)), NavigationPosition::Empty);
    }

    #[test]
    fn next_does_not_overflow_at_usize_max() {
        let navigator = Navigator::new(usize::MAX, usize::MAX, NORMAL);
        let state = at(usize::MAX);
        assert!(!navigator.can_go_next(&state));
        assert_eq!(navigator.next(state), state);
    }
}
