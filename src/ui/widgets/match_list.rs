//! Match list widget.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Cell, Row, Table, TableState},
};

use super::{header_style, kickoff, list_block, region_message, render_message, truncate_string};
use crate::state::Store;

/// Upcoming matches of the selected league.
pub struct MatchList;

impl MatchList {
    /// Render the match list.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let state = &store.matches;
        let block = list_block(format!(
            " Matches - {} ({}) ",
            state.league_label(),
            state.content.len()
        ));

        if let Some(message) =
            region_message(&state.content, Vec::is_empty, "No upcoming matches")
        {
            render_message(frame, area, block, message);
            return;
        }
        let matches = state.content.ready().map(Vec::as_slice).unwrap_or_default();

        let header = Row::new(
            ["Kickoff", "Match", "League"]
                .into_iter()
                .map(|h| Cell::from(h).style(header_style())),
        )
        .height(1)
        .bottom_margin(1);

        let rows = matches.iter().map(|m| {
            Row::new(vec![
                Cell::from(kickoff(Some(m.start_time))),
                Cell::from(truncate_string(&m.title(), 60)),
                Cell::from(m.competition().to_string()).style(Style::default().fg(Color::Cyan)),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(18),
                Constraint::Percentage(60),
                Constraint::Min(10),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

        let mut table_state = TableState::default();
        table_state.select(state.selected_index);

        frame.render_stateful_widget(table, area, &mut table_state);
    }
}
