//! Fetches the data behind a poll target.
//!
//! A load never fails: errors are logged and turned into the notice the
//! affected region shows instead of its data.

use crate::api::OddsApi;
use crate::error::Error;
use crate::market::{OutcomeOrder, aggregate};
use crate::state::{LoadFailure, Payload, PollTarget};

/// Fetch everything the target displays.
pub async fn load(api: &dyn OddsApi, target: &PollTarget, order: OutcomeOrder) -> Payload {
    match target {
        PollTarget::Matches { league, hours } => Payload::Matches(
            api.fetch_matches(league.clone(), *hours)
                .await
                .map_err(|e| notice("matches", &e)),
        ),
        PollTarget::Board { match_id } => {
            let odds = api.fetch_odds(*match_id);
            let fair = api.fetch_fair(*match_id);
            // Render only once both feeds are in.
            let board = futures::future::try_join(odds, fair)
                .await
                .map(|(odds, fair)| aggregate(&fair, &odds, order))
                .map_err(|e| notice("odds", &e));
            Payload::Board(board)
        }
        PollTarget::TopEv(query) => Payload::TopEv(
            api.fetch_top_ev(*query)
                .await
                .map_err(|e| notice("EV feed", &e)),
        ),
        PollTarget::Arbs(query) => Payload::Arbs(
            api.fetch_latest_arbs(*query)
                .await
                .map_err(|e| notice("arbitrage feed", &e)),
        ),
    }
}

fn notice(what: &str, error: &Error) -> LoadFailure {
    tracing::warn!(
        error = %error,
        recoverable = error.is_recoverable(),
        "failed to load {what}"
    );
    LoadFailure::new(
        format!("Could not load {what}: {}", error.notice()),
        error.is_offline(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{FairQuote, FeedQuery, MockOddsApi, OddsQuote};
    use crate::market::MarketBoard;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn quote(book: &str, outcome: &str, price: rust_decimal::Decimal) -> OddsQuote {
        OddsQuote {
            market_code: "match_outcome".into(),
            outcome: outcome.into(),
            bookmaker_name: book.into(),
            price,
            line: None,
        }
    }

    fn fair(outcome: &str, odds: rust_decimal::Decimal) -> FairQuote {
        FairQuote {
            market_code: "match_outcome".into(),
            outcome: outcome.into(),
            fair_probability: dec!(1) / odds,
            no_vig_odds: odds,
            margin: dec!(0.025),
            reference_bookmaker_name: "Pinnacle".into(),
        }
    }

    #[test]
    fn test_board_joins_both_feeds() {
        let odds = vec![quote("Bet365", "home", dec!(2.10)), quote("Bet365", "away", dec!(1.80))];
        let fair_feed = vec![fair("home", dec!(2.05)), fair("away", dec!(1.95))];

        let mut api = MockOddsApi::new();
        let odds_clone = odds.clone();
        api.expect_fetch_odds()
            .withf(|id| *id == 7)
            .times(1)
            .returning(move |_| Ok(odds_clone.clone()));
        let fair_clone = fair_feed.clone();
        api.expect_fetch_fair()
            .withf(|id| *id == 7)
            .times(1)
            .returning(move |_| Ok(fair_clone.clone()));

        let target = PollTarget::Board { match_id: 7 };
        let payload = tokio_test::block_on(load(&api, &target, OutcomeOrder::Lexicographic));

        let Payload::Board(Ok(board)) = payload else {
            panic!("expected a board");
        };
        assert_eq!(
            board,
            aggregate(&fair_feed, &odds, OutcomeOrder::Lexicographic)
        );
    }

    #[test]
    fn test_board_failure_discards_partial_data() {
        let mut api = MockOddsApi::new();
        api.expect_fetch_odds()
            .returning(|_| Ok(vec![quote("A", "home", dec!(2.0))]));
        api.expect_fetch_fair().returning(|_| {
            Err(Error::Status {
                status: 503,
                url: "/api/fair/7".into(),
            })
        });

        let target = PollTarget::Board { match_id: 7 };
        let payload = tokio_test::block_on(load(&api, &target, OutcomeOrder::Lexicographic));

        match payload {
            Payload::Board(Err(failure)) => {
                assert_eq!(failure.notice, "Could not load odds: backend error (503)");
                assert!(!failure.offline);
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_empty_odds_give_no_odds_board() {
        let mut api = MockOddsApi::new();
        api.expect_fetch_odds().returning(|_| Ok(Vec::new()));
        api.expect_fetch_fair()
            .returning(|_| Ok(vec![fair("home", dec!(2.0))]));

        let target = PollTarget::Board { match_id: 1 };
        let payload = tokio_test::block_on(load(&api, &target, OutcomeOrder::Canonical));
        assert!(matches!(payload, Payload::Board(Ok(MarketBoard::NoOdds))));
    }

    #[test]
    fn test_matches_pass_league_and_window() {
        let mut api = MockOddsApi::new();
        api.expect_fetch_matches()
            .withf(|league, hours| league.as_deref() == Some("nba") && *hours == Some(48))
            .times(1)
            .returning(|_, _| Ok(Vec::new()));

        let target = PollTarget::Matches {
            league: Some("nba".into()),
            hours: Some(48),
        };
        let payload = tokio_test::block_on(load(&api, &target, OutcomeOrder::Lexicographic));
        assert!(matches!(payload, Payload::Matches(Ok(ref m)) if m.is_empty()));
    }

    #[test]
    fn test_feed_failures_become_notices() {
        let query = FeedQuery::new(20, Some(24));
        let mut api = MockOddsApi::new();
        api.expect_fetch_top_ev()
            .withf(move |q| *q == query)
            .returning(|_| Err(Error::RateLimited(30)));
        api.expect_fetch_latest_arbs()
            .returning(|_| Err(Error::network("connection refused")));

        let ev = tokio_test::block_on(load(
            &api,
            &PollTarget::TopEv(query),
            OutcomeOrder::Lexicographic,
        ));
        assert_eq!(
            ev.failure(),
            Some("Could not load EV feed: rate limited, retry in 30s")
        );

        let arbs = tokio_test::block_on(load(
            &api,
            &PollTarget::Arbs(query),
            OutcomeOrder::Lexicographic,
        ));
        assert_eq!(
            arbs.failure(),
            Some("Could not load arbitrage feed: backend unreachable")
        );
        assert!(arbs.error().is_some_and(|f| f.offline));
        assert!(ev.error().is_some_and(|f| !f.offline));
    }
}
