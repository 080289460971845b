//! Status bar widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use chrono::{DateTime, Utc};

use crate::state::{Store, View};

/// Status bar widget.
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let connection_status = if store.app.connected {
            Span::styled("● Connected", Style::default().fg(Color::Green))
        } else {
            Span::styled("○ Disconnected", Style::default().fg(Color::Red))
        };

        let league = Span::styled(
            format!(" {} ", store.matches.league_label()),
            Style::default().fg(Color::Yellow),
        );

        let updated = Span::styled(
            format!(" updated {} ", last_update(Self::last_updated(store))),
            Style::default().fg(Color::Gray),
        );

        let loading = if store.app.loading {
            Span::styled(
                " Loading... ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Span::raw("")
        };

        let help_hint = Span::styled(" Press ? for help ", Style::default().fg(Color::DarkGray));

        let left_content = vec![
            Span::styled(
                " Oddsdesk ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            connection_status,
            Span::raw(" | "),
            league,
            Span::raw("|"),
            updated,
            loading,
        ];

        let status_line = Line::from(left_content);

        // Right-align the help hint
        let left_len = status_line.width();
        let right_len = help_hint.width();
        let padding = (area.width as usize).saturating_sub(left_len + right_len);

        let mut full_line = status_line.spans;
        full_line.push(Span::raw(" ".repeat(padding)));
        full_line.push(help_hint);

        let paragraph =
            Paragraph::new(Line::from(full_line)).style(Style::default().bg(Color::DarkGray));

        frame.render_widget(paragraph, area);
    }

    /// Last successful update of the region the view shows.
    fn last_updated(store: &Store) -> Option<DateTime<Utc>> {
        match store.app.current_view {
            View::Matches => store.matches.last_updated,
            View::MatchDetail => store.board.last_updated,
            View::TopEv => store.ev.last_updated,
            View::Arbs => store.arbs.last_updated,
        }
    }
}

fn last_update(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.format("%H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "never".to_string())
}
