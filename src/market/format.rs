//! Display formatting for prices, percentages and market titles.

use rust_decimal::{Decimal, RoundingStrategy};

/// Shown wherever a price is missing. Never a numeric zero.
pub const PLACEHOLDER: &str = "-";

/// Fixed display label for the 1X2 market.
const MATCH_OUTCOME_TITLE: &str = "Match Result";

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Price with exactly two decimals. The input is not modified.
pub fn format_price(price: Decimal) -> String {
    format!("{:.2}", round2(price))
}

/// Fraction as a percentage with two decimals (`0.0425` -> `4.25%`).
pub fn format_percent(fraction: Decimal) -> String {
    format!("{:.2}%", round2(fraction * Decimal::ONE_HUNDRED))
}

/// Human-readable market label.
pub fn market_title(market_code: &str) -> String {
    match market_code {
        "match_outcome" => MATCH_OUTCOME_TITLE.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_price_pads_and_rounds() {
        assert_eq!(format_price(dec!(2.1)), "2.10");
        assert_eq!(format_price(dec!(3)), "3.00");
        assert_eq!(format_price(dec!(1.905)), "1.91");
        assert_eq!(format_price(dec!(1.9049)), "1.90");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(dec!(0.0425)), "4.25%");
        assert_eq!(format_percent(dec!(-0.01)), "-1.00%");
        assert_eq!(format_percent(dec!(0.123456)), "12.35%");
    }

    #[test]
    fn test_market_title() {
        assert_eq!(market_title("match_outcome"), "Match Result");
        assert_eq!(market_title("totals"), "totals");
        assert_eq!(market_title("Both Teams To Score"), "Both Teams To Score");
    }
}
