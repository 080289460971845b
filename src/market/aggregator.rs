//! Odds aggregation into per-market display tables.

use super::format::{PLACEHOLDER, format_price, market_title};
use super::OutcomeOrder;
use crate::api::{FairQuote, OddsQuote};
use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Separates the market code from its line in the composite key.
const LINE_SEPARATOR: char = '@';

/// Shown instead of tables when the odds feed is empty.
pub const NO_ODDS_NOTICE: &str = "No odds available for this match";

/// Identifies one displayed market: a market code plus an optional line.
///
/// Keys compare by their composite string (`totals`, `totals@2.5`), so a
/// sorted collection of keys is in plain string order.
#[derive(Debug, Clone, Serialize)]
pub struct MarketKey {
    code: String,
    line: Option<Decimal>,
    id: String,
}

impl MarketKey {
    pub fn new(code: impl Into<String>, line: Option<Decimal>) -> Self {
        let code = code.into();
        let line = line.map(|l| l.normalize());
        let id = match line {
            Some(line) => format!("{code}{LINE_SEPARATOR}{line}"),
            None => code.clone(),
        };
        Self { code, line, id }
    }

    /// Base market code, without the line.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn line(&self) -> Option<Decimal> {
        self.line
    }

    /// Composite key string.
    pub fn as_str(&self) -> &str {
        &self.id
    }

    /// Display title: the market label, followed by the line if any.
    pub fn title(&self) -> String {
        match self.line {
            Some(line) => format!("{} {}", market_title(&self.code), line),
            None => market_title(&self.code),
        }
    }
}

impl PartialEq for MarketKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MarketKey {}

impl Hash for MarketKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for MarketKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MarketKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Display for MarketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// One cell of a price row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PriceCell {
    Price(Decimal),
    Missing,
}

impl PriceCell {
    fn from_option(price: Option<Decimal>) -> Self {
        price.map_or(Self::Missing, Self::Price)
    }

    pub fn value(&self) -> Option<Decimal> {
        match self {
            Self::Price(price) => Some(*price),
            Self::Missing => None,
        }
    }
}

impl fmt::Display for PriceCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Price(price) => f.write_str(&format_price(*price)),
            Self::Missing => f.write_str(PLACEHOLDER),
        }
    }
}

/// A labelled row of prices, one cell per outcome column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceRow {
    pub label: String,
    pub cells: Vec<PriceCell>,
}

impl PriceRow {
    fn from_prices(label: impl Into<String>, outcomes: &[String], prices: &BTreeMap<&str, Decimal>) -> Self {
        Self {
            label: label.into(),
            cells: outcomes
                .iter()
                .map(|o| PriceCell::from_option(prices.get(o.as_str()).copied()))
                .collect(),
        }
    }
}

/// Display table for one market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketTable {
    pub key: MarketKey,
    pub title: String,
    /// Outcome column labels, in display order.
    pub outcomes: Vec<String>,
    /// Bookmaker the no-vig prices were derived from.
    pub reference_book: Option<String>,
    /// No-vig reference prices.
    pub reference: PriceRow,
    /// One row per bookmaker, sorted by name.
    pub books: Vec<PriceRow>,
    /// Highest bookmaker price per column.
    pub best: Vec<Option<Decimal>>,
}

impl MarketTable {
    /// Whether `cell` in `column` is the best bookmaker price for it.
    pub fn is_best(&self, column: usize, cell: &PriceCell) -> bool {
        match (cell.value(), self.best.get(column).copied().flatten()) {
            (Some(price), Some(best)) => price == best,
            _ => false,
        }
    }
}

/// Aggregated markets for one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MarketBoard {
    /// The odds feed was empty.
    NoOdds,
    /// Tables in ascending market key order.
    Markets(Vec<MarketTable>),
}

impl MarketBoard {
    pub fn tables(&self) -> &[MarketTable] {
        match self {
            Self::NoOdds => &[],
            Self::Markets(tables) => tables,
        }
    }

    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Self::NoOdds => Some(NO_ODDS_NOTICE),
            Self::Markets(_) => None,
        }
    }
}

/// Reference prices for one base market code.
#[derive(Default)]
struct Reference<'a> {
    book: Option<&'a str>,
    prices: BTreeMap<&'a str, Decimal>,
}

/// bookmaker -> outcome -> price
type BookPrices<'a> = BTreeMap<&'a str, BTreeMap<&'a str, Decimal>>;

/// Merge the fair and odds feeds of one match into display tables.
///
/// Markets are driven by the odds feed: fair quotes only decorate markets
/// that have at least one bookmaker price. Duplicate quotes overwrite
/// earlier ones in feed order.
pub fn aggregate(fair: &[FairQuote], odds: &[OddsQuote], order: OutcomeOrder) -> MarketBoard {
    if odds.is_empty() {
        return MarketBoard::NoOdds;
    }

    let mut references: BTreeMap<&str, Reference<'_>> = BTreeMap::new();
    for quote in fair {
        let reference = references.entry(quote.market_code.as_str()).or_default();
        reference.book = Some(quote.reference_bookmaker_name.as_str());
        reference
            .prices
            .insert(quote.outcome.as_str(), quote.no_vig_odds);
    }

    let mut markets: BTreeMap<MarketKey, BookPrices<'_>> = BTreeMap::new();
    for quote in odds {
        markets
            .entry(MarketKey::new(quote.market_code.as_str(), quote.line))
            .or_default()
            .entry(quote.bookmaker_name.as_str())
            .or_default()
            .insert(quote.outcome.as_str(), quote.price);
    }

    let tables = markets
        .into_iter()
        .map(|(key, books)| {
            let reference = references.get(key.code());
            build_table(key, &books, reference, order)
        })
        .collect();

    MarketBoard::Markets(tables)
}

fn build_table(
    key: MarketKey,
    books: &BookPrices<'_>,
    reference: Option<&Reference<'_>>,
    order: OutcomeOrder,
) -> MarketTable {
    let empty = BTreeMap::new();
    let reference_prices = reference.map_or(&empty, |r| &r.prices);

    let mut outcomes: Vec<String> = reference_prices
        .keys()
        .chain(books.values().flat_map(|prices| prices.keys()))
        .copied()
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect();
    order.sort(&mut outcomes);

    let reference_book = reference.and_then(|r| r.book).map(str::to_string);
    let reference_label = match &reference_book {
        Some(book) => format!("No-vig ({book})"),
        None => "No-vig".to_string(),
    };

    let rows: Vec<PriceRow> = books
        .iter()
        .map(|(book, prices)| PriceRow::from_prices(*book, &outcomes, prices))
        .collect();

    let best = (0..outcomes.len())
        .map(|column| rows.iter().filter_map(|row| row.cells[column].value()).max())
        .collect();

    MarketTable {
        title: key.title(),
        key,
        reference: PriceRow::from_prices(reference_label, &outcomes, reference_prices),
        outcomes,
        reference_book,
        books: rows,
        best,
    }
}
