//! UI rendering using ratatui.
//!
//! Rendering is a pure function of the [`Store`]; nothing here mutates state.

mod layout;
mod widgets;

pub use layout::Layout;
pub use widgets::{ArbList, EvList, HelpPanel, MarketBoardView, MatchList, StatusBar, TabBar};

use crate::state::{Store, View};
use ratatui::Frame;

/// Main UI renderer.
pub struct Ui;

impl Ui {
    /// Render the entire UI.
    pub fn render(frame: &mut Frame, store: &Store) {
        let layout = Layout::new(frame.area());

        StatusBar::render(frame, layout.status_area, store);
        TabBar::render(frame, layout.tab_area, store);

        // Render main content based on current view
        match store.app.current_view {
            View::Matches => MatchList::render(frame, layout.main_area, store),
            View::MatchDetail => MarketBoardView::render(frame, layout.main_area, store),
            View::TopEv => EvList::render(frame, layout.main_area, store),
            View::Arbs => ArbList::render(frame, layout.main_area, store),
        }

        // Render help panel if visible
        if store.app.show_help {
            HelpPanel::render(frame, frame.area());
        }

        // Render notification if present
        if let Some(notification) = &store.app.notification {
            widgets::render_notification(frame, layout.notification_area, notification);
        }
    }
}
