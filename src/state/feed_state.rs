//! Paged feed state for the EV and arbitrage lists.

use super::Region;
use crate::api::FeedQuery;
use chrono::{DateTime, Utc};

/// A paged list fetched from the backend.
#[derive(Debug)]
pub struct FeedState<T> {
    pub content: Region<Vec<T>>,
    pub selected_index: Option<usize>,
    /// Page currently requested.
    pub query: FeedQuery,
    pub last_updated: Option<DateTime<Utc>>,
}

impl<T> FeedState<T> {
    pub fn new(query: FeedQuery) -> Self {
        Self {
            content: Region::Empty,
            selected_index: None,
            query,
            last_updated: None,
        }
    }

    /// Move to another page. Returns false when the page does not change.
    pub fn turn_page(&mut self, forward: bool) -> bool {
        let query = if forward {
            // Only page forward from a full page.
            if self.content.len() < self.query.limit as usize {
                return false;
            }
            self.query.next_page()
        } else {
            self.query.prev_page()
        };
        if query == self.query {
            return false;
        }
        self.query = query;
        self.content.clear();
        self.selected_index = None;
        true
    }

    pub fn apply(&mut self, result: Result<Vec<T>, String>) {
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

    pub fn scroll_to(&mut self, index: i64) {
        let len = self.content.len();
        if len == 0 {
            self.selected_index = None;
            return;
        }
        self.selected_index = Some(index.clamp(0, len as i64 - 1) as usize);
    }
}
