//! Market board widget: one stacked table per market of the open match.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use super::{header_style, kickoff, list_block, region_message, render_message};
use crate::market::{MarketBoard, MarketTable, PriceRow};
use crate::state::Store;

const LABEL_WIDTH: u16 = 20;
const PRICE_WIDTH: u16 = 9;

/// Aggregated markets of the selected match.
pub struct MarketBoardView;

impl MarketBoardView {
    /// Render the board.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(area);

        Self::render_header(frame, chunks[0], store);

        let board = &store.board;
        let block = list_block(format!(" Markets ({}) ", board.table_count()));
        let message = match board.content.ready().and_then(MarketBoard::notice) {
            Some(notice) => Some(Line::styled(notice, Style::default().fg(Color::DarkGray))),
            None => region_message(
                &board.content,
                |b: &MarketBoard| b.tables().is_empty(),
                "No markets for this match",
            ),
        };
        if let Some(message) = message {
            render_message(frame, chunks[1], block, message);
            return;
        }

        let tables = board.content.ready().map(MarketBoard::tables).unwrap_or_default();
        let inner = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);

        // Stack tables from the scroll position until the area is full.
        let mut y = inner.y;
        for table in tables.iter().skip(board.scroll) {
            let remaining = inner.bottom().saturating_sub(y);
            if remaining < 4 {
                break;
            }
            let height = table_height(table).min(remaining);
            let table_area = Rect {
                x: inner.x,
                y,
                width: inner.width,
                height,
            };
            Self::render_table(frame, table_area, table);
            y += height;
        }
    }

    fn render_header(frame: &mut Frame, area: Rect, store: &Store) {
        let Some(summary) = &store.board.current else {
            return;
        };

        let mut spans = vec![
            Span::styled(
                format!(" {} ", summary.title()),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::raw(kickoff(Some(summary.start_time))),
        ];
        if !summary.competition().is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                summary.competition().to_string(),
                Style::default().fg(Color::Cyan),
            ));
        }

        let hint = Line::styled(
            " Esc: back  j/k: scroll markets  r: refresh",
            Style::default().fg(Color::DarkGray),
        );
        frame.render_widget(Paragraph::new(vec![Line::from(spans), hint]), area);
    }

    fn render_table(frame: &mut Frame, area: Rect, table: &MarketTable) {
        let header = Row::new(
            std::iter::once(Cell::from("Bookmaker"))
                .chain(table.outcomes.iter().map(|o| Cell::from(o.clone())))
                .map(|c| c.style(header_style())),
        );

        let reference = price_row(&table.reference, |_| {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::ITALIC)
        });
        let books = table.books.iter().map(|row| {
            price_row(row, |column| {
                if table.is_best(column, &row.cells[column]) {
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                }
            })
        });

        let widths = std::iter::once(Constraint::Length(LABEL_WIDTH))
            .chain(table.outcomes.iter().map(|_| Constraint::Length(PRICE_WIDTH)));

        let widget = Table::new(std::iter::once(reference).chain(books), widths)
            .header(header)
            .block(
                Block::default()
                    .title(format!(" {} ", table.title))
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );

        frame.render_widget(widget, area);
    }
}

/// Border, header, reference row, one row per bookmaker.
fn table_height(table: &MarketTable) -> u16 {
    3 + table.books.len() as u16
}

fn price_row(row: &PriceRow, style: impl Fn(usize) -> Style) -> Row<'static> {
    let label = Cell::from(row.label.clone()).style(Style::default().fg(Color::White));
    let cells = row
        .cells
        .iter()
        .enumerate()
        .map(|(column, cell)| Cell::from(cell.to_string()).style(style(column)));
    Row::new(std::iter::once(label).chain(cells))
}
