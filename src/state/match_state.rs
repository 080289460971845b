//! Match list and market board state.

use super::Region;
use crate::api::{FeedQuery, MatchSummary};
use crate::market::MarketBoard;
use chrono::{DateTime, Utc};

/// State for the match list.
#[derive(Debug, Default)]
pub struct MatchState {
    /// Matches of the current league.
    pub content: Region<Vec<MatchSummary>>,
    /// Currently selected match index.
    pub selected_index: Option<usize>,
    /// League filters; `None` lists every league.
    pub leagues: Vec<Option<String>>,
    /// Index into `leagues`.
    pub league_index: usize,
    /// Only matches starting within this many hours.
    pub hours: Option<u32>,
    /// Last successful update.
    pub last_updated: Option<DateTime<Utc>>,
}

impl MatchState {
    /// "All leagues" followed by the configured leagues. A window of zero
    /// hours is treated as no window.
    pub fn new(leagues: &[String], hours: Option<u32>) -> Self {
        let leagues = std::iter::once(None)
            .chain(leagues.iter().cloned().map(Some))
            .collect();
        Self {
            leagues,
            hours: hours
                .filter(|h| *h > 0)
                .map(|h| h.min(FeedQuery::MAX_HOURS)),
            ..Default::default()
        }
    }

    /// Current league filter.
    pub fn league(&self) -> Option<String> {
        self.leagues.get(self.league_index).cloned().flatten()
    }

    /// Label for the current league filter.
    pub fn league_label(&self) -> String {
        self.league().unwrap_or_else(|| "All leagues".to_string())
    }

    /// Step through the league list, wrapping at both ends.
    pub fn cycle_league(&mut self, forward: bool) {
        let count = self.leagues.len().max(1);
        self.league_index = if forward {
            (self.league_index + 1) % count
        } else {
            (self.league_index + count - 1) % count
        };
        self.content.clear();
        self.selected_index = None;
    }

    /// Get the currently selected match.
    pub fn selected_match(&self) -> Option<&MatchSummary> {
        let matches = self.content.ready()?;
        self.selected_index.and_then(|i| matches.get(i))
    }

    /// Apply a fetch result, keeping the selection within bounds.
    pub fn apply(&mut self, result: Result<Vec<MatchSummary>, String>) {
        if result.is_ok() {
            self.last_updated = Some(Utc::now());
        }
        self.content = Region::from_result(result);
        let len = self.content.len();
        self.selected_index = match (len, self.selected_index) {
            (0, _) => None,
            (_, None) => Some(0),
            (len, Some(i)) => Some(i.min(len - 1)),
        };
    }
}

/// State for the market board of one match.
#[derive(Debug, Default)]
pub struct BoardState {
    /// The match being shown.
    pub current: Option<MatchSummary>,
    /// Aggregated markets.
    pub content: Region<MarketBoard>,
    /// Index of the first visible market table.
    pub scroll: usize,
    /// Last successful update.
    pub last_updated: Option<DateTime<Utc>>,
}

impl BoardState {
    /// Show a match. Switching to another match drops the old board.
    pub fn open(&mut self, summary: MatchSummary) {
        let same = self
            .current
            .as_ref()
            .is_some_and(|m| m.match_id == summary.match_id);
        if !same {
            self.content.clear();
            self.scroll = 0;
            self.last_updated = None;
        }
        self.current = Some(summary);
    }

    pub fn match_id(&self) -> Option<i64> {
        self.current.as_ref().map(|m| m.match_id)
    }

    pub fn apply(&mut self, result: Result<MarketBoard, String>) {
        if result.is_ok() {
            self.last_updated = Some(Utc::now());
        }
        self.content = Region::from_result(result);
        self.scroll = self.scroll.min(self.table_count().saturating_sub(1));
    }

    pub fn table_count(&self) -> usize {
        self.content.ready().map_or(0, |b| b.tables().len())
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let max = self.table_count().saturating_sub(1) as i64;
        self.scroll = (self.scroll as i64 + delta as i64).clamp(0, max) as usize;
    }
}
