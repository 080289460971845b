//! Odds backend integration.
//!
//! This module provides a typed interface to the read-only REST backend,
//! handling the API key header, rate limiting, and response decoding.

mod client;
mod types;

pub use client::{ApiClient, ApiClientBuilder};
pub use types::{
    ArbItem, ArbLeg, EvItem, FairQuote, FeedQuery, MatchSummary, OddsQuote, fixture_label,
};

use crate::error::Result;
use async_trait::async_trait;

/// Read access to the odds backend.
///
/// Implemented by [`ApiClient`]; loaders depend on this trait so they can run
/// against a mock in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OddsApi: Send + Sync {
    /// Check that the backend answers.
    async fn health(&self) -> Result<()>;

    /// Upcoming matches, optionally restricted to one league and to those
    /// starting within `hours`.
    async fn fetch_matches(
        &self,
        league: Option<String>,
        hours: Option<u32>,
    ) -> Result<Vec<MatchSummary>>;

    /// Current bookmaker odds for a match.
    async fn fetch_odds(&self, match_id: i64) -> Result<Vec<OddsQuote>>;

    /// Latest fair probabilities and no-vig odds for a match.
    async fn fetch_fair(&self, match_id: i64) -> Result<Vec<FairQuote>>;

    /// Highest expected-value bets.
    async fn fetch_top_ev(&self, query: FeedQuery) -> Result<Vec<EvItem>>;

    /// Most recent arbitrage opportunities.
    async fn fetch_latest_arbs(&self, query: FeedQuery) -> Result<Vec<ArbItem>>;
}
