//! Top EV feed widget.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Cell, Row, Table, TableState},
};

use super::{header_style, kickoff, list_block, region_message, render_message, truncate_string};
use crate::api::{EvItem, fixture_label};
use crate::market::{format_percent, format_price, market_title};
use crate::state::Store;

/// Highest expected-value bets.
pub struct EvList;

impl EvList {
    /// Render the EV feed.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let feed = &store.ev;
        let block = list_block(format!(" Top EV - page {} ", feed.query.page()));

        if let Some(message) = region_message(&feed.content, Vec::is_empty, "No positive EV bets") {
            render_message(frame, area, block, message);
            return;
        }
        let items = feed.content.ready().map(Vec::as_slice).unwrap_or_default();

        let header = Row::new(
            [
                "Kickoff", "Match", "Market", "Outcome", "Book", "Odds", "Fair %", "EV", "Ref",
            ]
            .into_iter()
            .map(|h| Cell::from(h).style(header_style())),
        )
        .height(1)
        .bottom_margin(1);

        let rows = items.iter().map(ev_row);

        let table = Table::new(
            rows,
            [
                Constraint::Length(17),
                Constraint::Min(20),
                Constraint::Length(14),
                Constraint::Length(9),
                Constraint::Length(12),
                Constraint::Length(7),
                Constraint::Length(8),
                Constraint::Length(8),
                Constraint::Length(12),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let mut state = TableState::default();
        state.select(feed.selected_index);

        frame.render_stateful_widget(table, area, &mut state);
    }
}

fn ev_row(item: &EvItem) -> Row<'static> {
    let label = fixture_label(
        item.home_team.as_deref(),
        item.away_team.as_deref(),
        item.match_id,
    );
    let ev_style = if item.ev_fraction.is_sign_positive() {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Red)
    };

    Row::new(vec![
        Cell::from(kickoff(item.start_time)),
        Cell::from(truncate_string(&label, 40)),
        Cell::from(market_title(&item.market_code)),
        Cell::from(item.outcome.clone()),
        Cell::from(item.bookmaker_name.clone()),
        Cell::from(format_price(item.odds)),
        Cell::from(format_percent(item.fair_probability)),
        Cell::from(format_percent(item.ev_fraction)).style(ev_style),
        Cell::from(item.reference_bookmaker_name.clone())
            .style(Style::default().fg(Color::DarkGray)),
    ])
}
