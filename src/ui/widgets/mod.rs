//! TUI widgets.

mod arb_list;
mod ev_list;
mod help;
mod market_board;
mod match_list;
mod notifications;
mod status_bar;
mod tab_bar;

pub use arb_list::ArbList;
pub use ev_list::EvList;
pub use help::HelpPanel;
pub use market_board::MarketBoardView;
pub use match_list::MatchList;
pub use notifications::render_notification;
pub use status_bar::StatusBar;
pub use tab_bar::TabBar;

use crate::state::Region;
use chrono::{DateTime, Utc};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

/// Bordered block in the common list style.
fn list_block(title: String) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
}

fn header_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Text shown instead of a region's rows, if it has none to show.
fn region_message<T>(
    region: &Region<T>,
    is_empty: impl FnOnce(&T) -> bool,
    empty_text: &'static str,
) -> Option<Line<'static>> {
    match region {
        Region::Empty => Some(Line::styled(
            "Loading...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        )),
        Region::Failed(notice) => Some(Line::styled(
            notice.clone(),
            Style::default().fg(Color::Red),
        )),
        Region::Ready(value) if is_empty(value) => Some(Line::styled(
            empty_text,
            Style::default().fg(Color::DarkGray),
        )),
        Region::Ready(_) => None,
    }
}

fn render_message(frame: &mut Frame, area: Rect, block: Block, message: Line) {
    let paragraph = Paragraph::new(message)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn kickoff(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.format("%a %d %b %H:%M").to_string())
        .unwrap_or_else(|| crate::market::PLACEHOLDER.to_string())
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{head}...")
    }
}
