//! Arbitrage feed widget.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Cell, Row, Table, TableState},
};

use super::{header_style, kickoff, list_block, region_message, render_message, truncate_string};
use crate::api::{ArbItem, fixture_label};
use crate::market::{PLACEHOLDER, format_percent, format_price, market_title};
use crate::state::Store;

/// Most recent arbitrage opportunities.
pub struct ArbList;

impl ArbList {
    /// Render the arbitrage feed.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let feed = &store.arbs;
        let block = list_block(format!(" Arbitrage - page {} ", feed.query.page()));

        if let Some(message) = region_message(&feed.content, Vec::is_empty, "No arbitrage found") {
            render_message(frame, area, block, message);
            return;
        }
        let items = feed.content.ready().map(Vec::as_slice).unwrap_or_default();

        let header = Row::new(
            ["Kickoff", "Match", "Market", "ROI", "Legs", "Stakes"]
                .into_iter()
                .map(|h| Cell::from(h).style(header_style())),
        )
        .height(1)
        .bottom_margin(1);

        let table = Table::new(
            items.iter().map(arb_row),
            [
                Constraint::Length(17),
                Constraint::Length(28),
                Constraint::Length(14),
                Constraint::Length(8),
                Constraint::Percentage(40),
                Constraint::Min(16),
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

fn arb_row(item: &ArbItem) -> Row<'static> {
    let label = fixture_label(
        item.home_team.as_deref(),
        item.away_team.as_deref(),
        item.match_id,
    );

    Row::new(vec![
        Cell::from(kickoff(item.start_time)),
        Cell::from(truncate_string(&label, 28)),
        Cell::from(market_title(&item.market_code)),
        Cell::from(format_percent(item.roi_fraction)).style(Style::default().fg(Color::Green)),
        Cell::from(legs_summary(item)),
        Cell::from(stakes_summary(item)),
    ])
}

/// `away: Book @ 2.10, home: Other @ 2.05`
fn legs_summary(item: &ArbItem) -> String {
    item.legs
        .iter()
        .map(|(outcome, leg)| format!("{outcome}: {} @ {}", leg.book, format_price(leg.odds)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `away 48.78, home 51.22`
fn stakes_summary(item: &ArbItem) -> String {
    match &item.stake_split {
        Some(split) if !split.is_empty() => split
            .iter()
            .map(|(outcome, stake)| format!("{outcome} {}", format_price(*stake)))
            .collect::<Vec<_>>()
            .join(", "),
        _ => PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ArbLeg;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    fn arb(stake_split: Option<BTreeMap<String, rust_decimal::Decimal>>) -> ArbItem {
        let mut legs = BTreeMap::new();
        legs.insert(
            "home".to_string(),
            ArbLeg {
                book: "Bet365".into(),
                odds: dec!(2.1),
            },
        );
        legs.insert(
            "away".to_string(),
            ArbLeg {
                book: "Unibet".into(),
                odds: dec!(2.05),
            },
        );
        ArbItem {
            match_id: 9,
            home_team: None,
            away_team: None,
            market_code: "match_outcome".into(),
            roi_fraction: dec!(0.012),
            legs,
            stake_split,
            start_time: None,
            league: None,
        }
    }

    #[test]
    fn test_legs_summary_sorted_by_outcome() {
        assert_eq!(
            legs_summary(&arb(None)),
            "away: Unibet @ 2.05, home: Bet365 @ 2.10"
        );
    }

    #[test]
    fn test_stakes_summary() {
        assert_eq!(stakes_summary(&arb(None)), "-");

        let mut split = BTreeMap::new();
        split.insert("home".to_string(), dec!(49.4));
        split.insert("away".to_string(), dec!(50.6));
        assert_eq!(stakes_summary(&arb(Some(split))), "away 50.60, home 49.40");
    }
}
