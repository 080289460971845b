//! Application-level state.

use super::Notification;
use std::time::Instant;

/// The current view/screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Matches,
    MatchDetail,
    TopEv,
    Arbs,
}

impl View {
    /// Views reachable from the tab bar, with their labels.
    pub const TABS: [(View, &'static str); 3] = [
        (View::Matches, "Matches"),
        (View::TopEv, "Top EV"),
        (View::Arbs, "Arbitrage"),
    ];
}

/// Global application state.
#[derive(Debug, Default)]
pub struct AppState {
    /// Current view.
    pub current_view: View,
    /// Whether to show help overlay.
    pub show_help: bool,
    /// Current notification.
    pub notification: Option<Notification>,
    /// Whether a fetch is in flight.
    pub loading: bool,
    /// Whether the backend answered the last request.
    pub connected: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl AppState {
    /// Drop the notification once its display time has passed.
    pub fn expire_notification(&mut self, now: Instant) {
        if self
            .notification
            .as_ref()
            .is_some_and(|n| n.is_expired(now))
        {
            self.notification = None;
        }
    }
}
