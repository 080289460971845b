//! State management for Oddsdesk.
//!
//! This module provides centralized state management with a unidirectional
//! data flow pattern inspired by Redux/Elm architecture. Fetch results come
//! back as actions tagged with the navigation they were issued for; the
//! reducer drops any that no longer match the session.

mod app_state;
mod feed_state;
mod match_state;
mod region;
mod session;

pub use app_state::{AppState, View};
pub use feed_state::FeedState;
pub use match_state::{BoardState, MatchState};
pub use region::Region;
pub use session::{PollTarget, RequestTag, Session};

use crate::api::{ArbItem, EvItem, FeedQuery, MatchSummary};
use crate::config::FeedConfig;
use crate::error::Result;
use crate::market::MarketBoard;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Actions that can be dispatched to modify state.
#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    SetView(View),
    OpenSelectedMatch,
    Back,
    NextLeague,
    PrevLeague,
    NextPage,
    PrevPage,

    // Data
    Refresh,
    Poll(RequestTag),
    Loaded(RequestTag, Payload),

    // UI actions
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,
    ToggleHelp,
    ShowNotification(Notification),
    DismissNotification,
    Tick,

    // Connection status
    SetConnected(bool),
    SetLoading(bool),

    // Quit
    Quit,
}

impl Action {
    /// Actions that may change what the visible view fetches.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::SetView(_)
                | Self::OpenSelectedMatch
                | Self::Back
                | Self::NextLeague
                | Self::PrevLeague
                | Self::NextPage
                | Self::PrevPage
        )
    }
}

/// Why a fetch produced no data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    /// Shown in place of the data.
    pub notice: String,
    /// The backend never answered.
    pub offline: bool,
}

impl LoadFailure {
    pub fn new(notice: impl Into<String>, offline: bool) -> Self {
        Self {
            notice: notice.into(),
            offline,
        }
    }
}

/// Result of one fetch.
#[derive(Debug, Clone)]
pub enum Payload {
    Matches(std::result::Result<Vec<MatchSummary>, LoadFailure>),
    Board(std::result::Result<MarketBoard, LoadFailure>),
    TopEv(std::result::Result<Vec<EvItem>, LoadFailure>),
    Arbs(std::result::Result<Vec<ArbItem>, LoadFailure>),
}

impl Payload {
    /// The failure, if the fetch failed.
    pub fn error(&self) -> Option<&LoadFailure> {
        match self {
            Self::Matches(r) => r.as_ref().err(),
            Self::Board(r) => r.as_ref().err(),
            Self::TopEv(r) => r.as_ref().err(),
            Self::Arbs(r) => r.as_ref().err(),
        }
    }

    /// The failure notice, if the fetch failed.
    pub fn failure(&self) -> Option<&str> {
        self.error().map(|f| f.notice.as_str())
    }
}

/// A notification to display to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub created_at: Instant,
    pub duration: Duration,
}

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

impl Notification {
    fn new(message: impl Into<String>, level: NotificationLevel, secs: u64) -> Self {
        Self {
            message: message.into(),
            level,
            created_at: Instant::now(),
            duration: Duration::from_secs(secs),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Info, 3)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Warning, 5)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Error, 10)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.created_at) >= self.duration
    }
}

/// The global state store.
#[derive(Debug)]
pub struct Store {
    /// Application state.
    pub app: AppState,
    /// Match list.
    pub matches: MatchState,
    /// Market board of the open match.
    pub board: BoardState,
    /// Top EV feed.
    pub ev: FeedState<EvItem>,
    /// Arbitrage feed.
    pub arbs: FeedState<ArbItem>,
    /// Navigation session.
    pub session: Session,
    /// Action sender for dispatching actions.
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Store {
    /// Create a new store with the given action sender.
    pub fn new(action_tx: mpsc::UnboundedSender<Action>, feeds: &FeedConfig) -> Self {
        let query = FeedQuery::new(feeds.page_size, feeds.hours);
        Self {
            app: AppState::default(),
            matches: MatchState::new(&feeds.leagues, feeds.hours),
            board: BoardState::default(),
            ev: FeedState::new(query),
            arbs: FeedState::new(query),
            session: Session::default(),
            action_tx,
        }
    }

    /// Dispatch an action to the store.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        self.action_tx
            .send(action)
            .map_err(|e| crate::Error::channel(e.to_string()))
    }

    /// What the current view fetches, if anything.
    pub fn poll_target(&self) -> Option<PollTarget> {
        match self.app.current_view {
            View::Matches => Some(PollTarget::Matches {
                league: self.matches.league(),
                hours: self.matches.hours,
            }),
            View::MatchDetail => self
                .board
                .match_id()
                .map(|match_id| PollTarget::Board { match_id }),
            View::TopEv => Some(PollTarget::TopEv(self.ev.query)),
            View::Arbs => Some(PollTarget::Arbs(self.arbs.query)),
        }
    }

    /// Apply an action to update state.
    pub fn reduce(&mut self, action: Action) {
        match action {
            // Navigation
            Action::SetView(View::MatchDetail) if self.board.current.is_none() => {}
            Action::SetView(view) => self.app.current_view = view,
            Action::OpenSelectedMatch => {
                if self.app.current_view == View::Matches
                    && let Some(summary) = self.matches.selected_match().cloned()
                {
                    tracing::info!(match_id = summary.match_id, "opening match");
                    self.board.open(summary);
                    self.app.current_view = View::MatchDetail;
                }
            }
            Action::Back => {
                if self.app.show_help {
                    self.app.show_help = false;
                } else {
                    self.app.current_view = View::Matches;
                }
            }
            Action::NextLeague | Action::PrevLeague => {
                if self.app.current_view == View::Matches {
                    self.matches
                        .cycle_league(matches!(action, Action::NextLeague));
                }
            }
            Action::NextPage | Action::PrevPage => {
                let forward = matches!(action, Action::NextPage);
                match self.app.current_view {
                    View::TopEv => {
                        self.ev.turn_page(forward);
                    }
                    View::Arbs => {
                        self.arbs.turn_page(forward);
                    }
                    _ => {}
                }
            }

            // Data
            Action::Refresh | Action::Poll(_) => {}
            Action::Loaded(tag, payload) => self.apply_loaded(tag, payload),

            // UI actions
            Action::ScrollUp => self.scroll(-1),
            Action::ScrollDown => self.scroll(1),
            Action::PageUp => self.scroll(-10),
            Action::PageDown => self.scroll(10),
            Action::GoToTop => self.scroll(i32::MIN / 2),
            Action::GoToBottom => self.scroll(i32::MAX / 2),
            Action::ToggleHelp => self.app.show_help = !self.app.show_help,
            Action::ShowNotification(notification) => {
                self.app.notification = Some(notification);
            }
            Action::DismissNotification => {
                self.app.notification = None;
            }
            Action::Tick => self.app.expire_notification(Instant::now()),

            // Connection status
            Action::SetConnected(connected) => {
                self.app.connected = connected;
            }
            Action::SetLoading(loading) => {
                self.app.loading = loading;
            }

            // Quit
            Action::Quit => {
                self.app.should_quit = true;
            }
        }
    }

    fn apply_loaded(&mut self, tag: RequestTag, payload: Payload) {
        if !self.session.accept(&tag) {
            tracing::debug!(
                poll_target = ?tag.target,
                generation = tag.generation,
                request = tag.request,
                "discarding stale response"
            );
            return;
        }

        self.app.loading = false;
        match payload.error() {
            Some(failure) => {
                // Any answer from the backend, even an error status, means it is up.
                self.app.connected = !failure.offline;
                self.app.notification = Some(Notification::warning(failure.notice.clone()));
            }
            None => self.app.connected = true,
        }

        let notice = |failure: LoadFailure| failure.notice;
        match payload {
            Payload::Matches(result) => self.matches.apply(result.map_err(notice)),
            Payload::Board(result) => self.board.apply(result.map_err(notice)),
            Payload::TopEv(result) => self.ev.apply(result.map_err(notice)),
            Payload::Arbs(result) => self.arbs.apply(result.map_err(notice)),
        }
    }

    fn scroll(&mut self, delta: i32) {
        match self.app.current_view {
            View::Matches => {
                let len = self.matches.content.len();
                if len == 0 {
                    return;
                }
                let current = self.matches.selected_index.unwrap_or(0) as i64;
                let index = (current + delta as i64).clamp(0, len as i64 - 1);
                self.matches.selected_index = Some(index as usize);
            }
            View::MatchDetail => self.board.scroll_by(delta),
            View::TopEv => {
                let current = self.ev.selected_index.unwrap_or(0) as i64;
                self.ev.scroll_to(current + delta as i64);
            }
            View::Arbs => {
                let current = self.arbs.selected_index.unwrap_or(0) as i64;
                self.arbs.scroll_to(current + delta as i64);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::OddsQuote;
    use crate::market::{OutcomeOrder, aggregate};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn store() -> Store {
        let (tx, _rx) = mpsc::unbounded_channel();
        let feeds = FeedConfig {
            leagues: vec!["epl".into(), "nba".into()],
            page_size: 2,
            hours: None,
        };
        Store::new(tx, &feeds)
    }

    fn summary(match_id: i64) -> MatchSummary {
        MatchSummary {
            match_id,
            home_team: format!("Home {match_id}"),
            away_team: format!("Away {match_id}"),
            start_time: Utc.with_ymd_and_hms(2025, 5, 1, 18, 0, 0).unwrap(),
            league: Some("epl".into()),
            sport: None,
        }
    }

    fn board(price: rust_decimal::Decimal) -> MarketBoard {
        let odds = vec![OddsQuote {
            market_code: "h2h".into(),
            outcome: "home".into(),
            bookmaker_name: "A".into(),
            price,
            line: None,
        }];
        aggregate(&[], &odds, OutcomeOrder::Lexicographic)
    }

    /// Navigate the session to whatever the store shows, like the app does.
    fn navigate(store: &mut Store) -> RequestTag {
        let target = store.poll_target().unwrap();
        store.session.begin(target)
    }

    fn load_matches(store: &mut Store, ids: &[i64]) {
        let tag = navigate(store);
        let matches = ids.iter().copied().map(summary).collect();
        store.reduce(Action::Loaded(tag, Payload::Matches(Ok(matches))));
    }

    #[test]
    fn test_poll_target_follows_view() {
        let mut store = store();
        assert_eq!(
            store.poll_target(),
            Some(PollTarget::Matches {
                league: None,
                hours: None
            })
        );

        store.reduce(Action::NextLeague);
        assert_eq!(
            store.poll_target(),
            Some(PollTarget::Matches {
                league: Some("epl".into()),
                hours: None
            })
        );

        store.reduce(Action::SetView(View::TopEv));
        assert_eq!(
            store.poll_target(),
            Some(PollTarget::TopEv(FeedQuery::new(2, None)))
        );

        // No match opened yet
        store.reduce(Action::SetView(View::MatchDetail));
        assert_eq!(store.app.current_view, View::TopEv);
    }

    #[test]
    fn test_match_window_follows_feed_hours() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let window = |hours| {
            let feeds = FeedConfig {
                hours,
                ..FeedConfig::default()
            };
            match Store::new(tx.clone(), &feeds).poll_target() {
                Some(PollTarget::Matches { hours, .. }) => hours,
                other => panic!("unexpected target: {other:?}"),
            }
        };

        assert_eq!(window(Some(24)), Some(24));
        assert_eq!(window(Some(500)), Some(FeedQuery::MAX_HOURS));
        assert_eq!(window(Some(0)), None);
        assert_eq!(window(None), None);
    }

    #[test]
    fn test_league_cycle_wraps() {
        let mut store = store();
        store.reduce(Action::PrevLeague);
        assert_eq!(store.matches.league(), Some("nba".into()));
        store.reduce(Action::NextLeague);
        assert_eq!(store.matches.league(), None);
        assert_eq!(store.matches.league_label(), "All leagues");
    }

    #[test]
    fn test_open_match_and_back() {
        let mut store = store();
        load_matches(&mut store, &[10, 11]);
        store.reduce(Action::ScrollDown);
        store.reduce(Action::OpenSelectedMatch);

        assert_eq!(store.app.current_view, View::MatchDetail);
        assert_eq!(
            store.poll_target(),
            Some(PollTarget::Board { match_id: 11 })
        );

        store.reduce(Action::Back);
        assert_eq!(store.app.current_view, View::Matches);
    }

    #[test]
    fn test_stale_board_response_discarded() {
        let mut store = store();
        load_matches(&mut store, &[1, 2]);

        store.reduce(Action::OpenSelectedMatch);
        let first = navigate(&mut store);

        store.reduce(Action::Back);
        store.reduce(Action::ScrollDown);
        store.reduce(Action::OpenSelectedMatch);
        let second = navigate(&mut store);

        store.reduce(Action::Loaded(second, Payload::Board(Ok(board(dec!(1.5))))));
        store.reduce(Action::Loaded(first, Payload::Board(Ok(board(dec!(9.9))))));

        assert_eq!(store.board.match_id(), Some(2));
        let shown = store.board.content.ready().unwrap();
        assert_eq!(shown, &board(dec!(1.5)));
    }

    #[test]
    fn test_failure_replaces_content_and_notifies() {
        let mut store = store();
        load_matches(&mut store, &[1]);
        store.reduce(Action::OpenSelectedMatch);
        let tag = navigate(&mut store);

        store.reduce(Action::Loaded(tag, Payload::Board(Ok(board(dec!(2.0))))));
        assert!(store.board.content.ready().is_some());

        let refresh = store.session.reissue().unwrap();
        store.reduce(Action::Loaded(
            refresh,
            Payload::Board(Err(LoadFailure::new(
                "Could not load odds: request timed out",
                true,
            ))),
        ));
        assert_eq!(
            store.board.content.failure(),
            Some("Could not load odds: request timed out")
        );
        let notification = store.app.notification.as_ref().unwrap();
        assert_eq!(notification.level, NotificationLevel::Warning);
    }

    #[test]
    fn test_unreachable_backend_marks_disconnected() {
        let mut store = store();
        load_matches(&mut store, &[1]);
        assert!(store.app.connected);

        let poll = store.session.reissue().unwrap();
        store.reduce(Action::Loaded(
            poll,
            Payload::Matches(Err(LoadFailure::new(
                "Could not load matches: backend unreachable",
                true,
            ))),
        ));
        assert!(!store.app.connected);

        let poll = store.session.reissue().unwrap();
        store.reduce(Action::Loaded(poll, Payload::Matches(Ok(vec![summary(1)]))));
        assert!(store.app.connected);
    }

    #[test]
    fn test_backend_error_status_keeps_connected() {
        let mut store = store();
        load_matches(&mut store, &[1]);

        let poll = store.session.reissue().unwrap();
        store.reduce(Action::Loaded(
            poll,
            Payload::Matches(Err(LoadFailure::new(
                "Could not load matches: backend error (503)",
                false,
            ))),
        ));
        assert!(store.app.connected);
        assert_eq!(
            store.matches.content.failure(),
            Some("Could not load matches: backend error (503)")
        );
    }

    #[test]
    fn test_older_poll_of_same_board_cannot_overwrite_newer() {
        let mut store = store();
        load_matches(&mut store, &[1]);
        store.reduce(Action::OpenSelectedMatch);
        let older = navigate(&mut store);
        let newer = store.session.reissue().unwrap();
        assert_eq!(older.generation, newer.generation);

        store.reduce(Action::Loaded(newer, Payload::Board(Ok(board(dec!(1.8))))));
        store.reduce(Action::Loaded(older, Payload::Board(Ok(board(dec!(2.4))))));

        assert_eq!(store.board.content.ready(), Some(&board(dec!(1.8))));
    }

    #[test]
    fn test_reopening_other_match_clears_board() {
        let mut store = store();
        load_matches(&mut store, &[1, 2]);
        store.reduce(Action::OpenSelectedMatch);
        let tag = navigate(&mut store);
        store.reduce(Action::Loaded(tag, Payload::Board(Ok(board(dec!(2.0))))));

        store.reduce(Action::Back);
        store.reduce(Action::ScrollDown);
        store.reduce(Action::OpenSelectedMatch);
        assert_eq!(store.board.content, Region::Empty);
    }

    #[test]
    fn test_paging_only_from_full_page() {
        let mut store = store();
        store.reduce(Action::SetView(View::Arbs));
        let tag = navigate(&mut store);
        store.reduce(Action::Loaded(tag, Payload::Arbs(Ok(Vec::new()))));

        store.reduce(Action::NextPage);
        assert_eq!(store.arbs.query.offset, 0);

        store.reduce(Action::PrevPage);
        assert_eq!(store.arbs.query.offset, 0);
    }

    #[test]
    fn test_match_selection_clamped_after_reload() {
        let mut store = store();
        load_matches(&mut store, &[1, 2, 3]);
        store.reduce(Action::GoToBottom);
        assert_eq!(store.matches.selected_index, Some(2));

        load_matches(&mut store, &[1]);
        assert_eq!(store.matches.selected_index, Some(0));

        load_matches(&mut store, &[]);
        assert_eq!(store.matches.selected_index, None);
        store.reduce(Action::ScrollDown);
        assert_eq!(store.matches.selected_index, None);
    }

    #[test]
    fn test_notification_expires_on_tick() {
        let mut store = store();
        let mut notification = Notification::info("hello");
        notification.duration = Duration::ZERO;
        store.reduce(Action::ShowNotification(notification));
        store.reduce(Action::Tick);
        assert!(store.app.notification.is_none());
    }
}
