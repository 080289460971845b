//! Tab bar widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::{Store, View};

/// Tab bar widget.
pub struct TabBar;

impl TabBar {
    /// Render the tab bar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        // The match detail lives under the Matches tab.
        let active = match store.app.current_view {
            View::MatchDetail => View::Matches,
            view => view,
        };

        let mut spans = vec![Span::raw(" ")];

        for (index, (view, name)) in View::TABS.into_iter().enumerate() {
            let key_style = Style::default().fg(Color::DarkGray);
            let name_style = if active == view {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::White)
            };

            spans.push(Span::styled(format!("[{}] ", index + 1), key_style));
            spans.push(Span::styled(name, name_style));
            spans.push(Span::raw("  "));
        }

        if let Some(current) = &store.board.current
            && store.app.current_view == View::MatchDetail
        {
            spans.push(Span::styled(
                format!("> {}", current.title()),
                Style::default().fg(Color::Yellow),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
