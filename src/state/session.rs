//! Navigation session: what is being watched and which responses still count.

use crate::api::FeedQuery;
use crate::events::PollTimer;

/// What the visible view fetches and polls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollTarget {
    /// Upcoming matches, optionally for one league and time window.
    Matches {
        league: Option<String>,
        hours: Option<u32>,
    },
    /// Odds and fair feeds of one match.
    Board { match_id: i64 },
    /// A page of the top EV feed.
    TopEv(FeedQuery),
    /// A page of the arbitrage feed.
    Arbs(FeedQuery),
}

/// Identifies one request. `generation` names the navigation it was issued
/// under; `request` orders requests within it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTag {
    pub target: PollTarget,
    pub generation: u64,
    pub request: u64,
}

/// Single owner of the current target and its poll timer.
#[derive(Debug, Default)]
pub struct Session {
    target: Option<PollTarget>,
    generation: u64,
    /// Last request number handed out.
    issued: u64,
    /// Request number of the newest response applied in this generation.
    applied: u64,
    timer: Option<PollTimer>,
}

impl Session {
    /// Start a new navigation. Cancels the running timer and invalidates
    /// every tag issued before.
    pub fn begin(&mut self, target: PollTarget) -> RequestTag {
        self.cancel_timer();
        self.generation += 1;
        self.applied = 0;
        self.target = Some(target.clone());
        self.issue(target)
    }

    /// Tag for re-fetching the current target without navigating.
    pub fn reissue(&mut self) -> Option<RequestTag> {
        let target = self.target.clone()?;
        Some(self.issue(target))
    }

    fn issue(&mut self, target: PollTarget) -> RequestTag {
        self.issued += 1;
        RequestTag {
            target,
            generation: self.generation,
            request: self.issued,
        }
    }

    /// Install the poll timer for the current navigation.
    pub fn arm(&mut self, timer: PollTimer) {
        self.cancel_timer();
        self.timer = Some(timer);
    }

    pub fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
    }

    /// Whether `tag` belongs to the current navigation.
    pub fn is_current(&self, tag: &RequestTag) -> bool {
        tag.generation == self.generation && self.target.as_ref() == Some(&tag.target)
    }

    /// Claim the response for `tag`. Refused when the navigation moved on or
    /// a newer request of the same navigation has already been applied.
    pub fn accept(&mut self, tag: &RequestTag) -> bool {
        if !self.is_current(tag) || tag.request <= self.applied {
            return false;
        }
        self.applied = tag.request;
        true
    }

    pub fn target(&self) -> Option<&PollTarget> {
        self.target.as_ref()
    }

    pub fn is_polling(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.is_finished())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::mpsc;

    #[test]
    fn test_begin_invalidates_older_tags() {
        let mut session = Session::default();
        let first = session.begin(PollTarget::Board { match_id: 1 });
        assert!(session.is_current(&first));

        let second = session.begin(PollTarget::Board { match_id: 2 });
        assert!(!session.is_current(&first));
        assert!(session.is_current(&second));
        assert_eq!(session.target(), Some(&second.target));
    }

    #[test]
    fn test_same_target_new_generation_is_distinct() {
        let mut session = Session::default();
        let league = PollTarget::Matches {
            league: Some("epl".into()),
            hours: None,
        };
        let first = session.begin(league.clone());
        let second = session.begin(league);
        assert_ne!(first, second);
        assert!(!session.is_current(&first));
    }

    #[test]
    fn test_no_target_initially() {
        let mut session = Session::default();
        assert_eq!(session.reissue(), None);
        assert!(!session.is_polling());
    }

    #[test]
    fn test_older_request_of_same_navigation_refused() {
        let mut session = Session::default();
        let first = session.begin(PollTarget::Board { match_id: 1 });
        let second = session.reissue().unwrap();
        assert_eq!(second.generation, first.generation);
        assert!(second.request > first.request);

        assert!(session.accept(&second));
        assert!(!session.accept(&first));
        assert!(!session.accept(&second));

        let third = session.reissue().unwrap();
        assert!(session.accept(&third));
    }

    #[test]
    fn test_begin_resets_applied_request() {
        let mut session = Session::default();
        let tag = session.begin(PollTarget::Board { match_id: 1 });
        assert!(session.accept(&tag));

        let next = session.begin(PollTarget::Board { match_id: 2 });
        assert!(!session.accept(&tag));
        assert!(session.accept(&next));
    }

    #[tokio::test(start_paused = true)]
    async fn test_begin_cancels_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut session = Session::default();

        let tag = session.begin(PollTarget::Board { match_id: 1 });
        session.arm(PollTimer::spawn(tag, Duration::from_secs(5), tx.clone()));
        assert!(session.is_polling());

        session.begin(PollTarget::Board { match_id: 2 });
        assert!(!session.is_polling());

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert!(rx.try_recv().is_err());
    }
}
