//! Help panel widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::super::layout::centered_rect;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("j/↓", "Move down"),
            ("k/↑", "Move up"),
            ("PgUp/PgDn", "Move by ten rows"),
            ("Home/End", "Go to top / bottom"),
            ("Enter", "Open selected match"),
            ("Esc", "Back to matches"),
        ],
    ),
    (
        "Views",
        &[("1", "Matches"), ("2", "Top EV"), ("3", "Arbitrage")],
    ),
    (
        "Lists",
        &[
            ("[ / ]", "Previous / next league"),
            ("p / n", "Previous / next page"),
        ],
    ),
    (
        "Actions",
        &[
            ("r/F5", "Refresh now"),
            ("?", "Toggle help"),
            ("q", "Quit"),
        ],
    ),
];

/// Help panel showing the default keybindings.
pub struct HelpPanel;

impl HelpPanel {
    /// Render the help panel.
    pub fn render(frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 80, area);

        // Clear the area behind the popup
        frame.render_widget(Clear, popup_area);

        let mut help_text = Vec::new();
        for (title, keys) in SECTIONS {
            if !help_text.is_empty() {
                help_text.push(Line::from(""));
            }
            help_text.push(Line::from(Span::styled(
                *title,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            help_text.push(Line::from(""));
            for (key, description) in *keys {
                help_text.push(Line::from(vec![
                    Span::styled(format!("  {key:<10}"), Style::default().fg(Color::Cyan)),
                    Span::raw(*description),
                ]));
            }
        }

        let help = Paragraph::new(help_text)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White));

        frame.render_widget(help, popup_area);
    }
}
