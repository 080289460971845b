//! Market aggregation.
//!
//! Turns the two per-match feeds (bookmaker odds and reference no-vig
//! odds) into one display table per market. The board is rebuilt from
//! scratch on every fetch; nothing here keeps state between calls.

mod aggregator;
mod format;

pub use aggregator::{MarketBoard, MarketKey, MarketTable, PriceCell, PriceRow, aggregate};
pub use format::{PLACEHOLDER, format_percent, format_price, market_title};

use serde::{Deserialize, Serialize};

/// Outcome column ordering policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeOrder {
    /// Plain string sort.
    #[default]
    Lexicographic,
    /// `home`, `draw`, `away` first when present, then the rest sorted.
    Canonical,
}

impl OutcomeOrder {
    const CANONICAL: [&'static str; 3] = ["home", "draw", "away"];

    /// Sort a set of outcome labels in place.
    pub fn sort(self, outcomes: &mut [String]) {
        match self {
            Self::Lexicographic => outcomes.sort(),
            Self::Canonical => outcomes.sort_by(|a, b| {
                let rank = |s: &str| {
                    Self::CANONICAL
                        .iter()
                        .position(|c| *c == s)
                        .unwrap_or(Self::CANONICAL.len())
                };
                rank(a).cmp(&rank(b)).then_with(|| a.cmp(b))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_lexicographic_order() {
        let mut outcomes = labels(&["home", "away", "draw"]);
        OutcomeOrder::Lexicographic.sort(&mut outcomes);
        assert_eq!(outcomes, labels(&["away", "draw", "home"]));
    }

    #[test]
    fn test_canonical_order_puts_triple_first() {
        let mut outcomes = labels(&["over", "away", "home", "draw", "btts"]);
        OutcomeOrder::Canonical.sort(&mut outcomes);
        assert_eq!(outcomes, labels(&["home", "draw", "away", "btts", "over"]));

        let mut partial = labels(&["away", "home"]);
        OutcomeOrder::Canonical.sort(&mut partial);
        assert_eq!(partial, labels(&["home", "away"]));
    }
}
