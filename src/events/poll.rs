//! Poll timer for the visible view.

use crate::state::{Action, RequestTag};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::IntervalStream;

/// Sends `Action::Poll(tag)` every period until cancelled or dropped.
#[derive(Debug)]
pub struct PollTimer {
    handle: JoinHandle<()>,
}

impl PollTimer {
    /// Start polling. The first poll fires one period from now; the initial
    /// fetch is issued by the navigation itself.
    pub fn spawn(tag: RequestTag, period: Duration, tx: mpsc::UnboundedSender<Action>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut ticks = IntervalStream::new(interval);

            while ticks.next().await.is_some() {
                tracing::trace!(poll_target = ?tag.target, generation = tag.generation, "poll");
                if tx.send(Action::Poll(tag.clone())).is_err() {
                    break;
                }
            }
        });
        Self { handle }
    }

    pub fn cancel(self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for PollTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PollTarget;

    fn tag() -> RequestTag {
        RequestTag {
            target: PollTarget::Board { match_id: 42 },
            generation: 3,
            request: 7,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_every_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timer = PollTimer::spawn(tag(), Duration::from_secs(10), tx);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_secs(30)).await;
        let mut polls = Vec::new();
        while let Ok(action) = rx.try_recv() {
            polls.push(action);
        }
        assert_eq!(polls.len(), 3);
        assert!(matches!(&polls[0], Action::Poll(t) if *t == tag()));

        drop(timer);
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_when_receiver_gone() {
        let (tx, rx) = mpsc::unbounded_channel();
        let timer = PollTimer::spawn(tag(), Duration::from_secs(1), tx);
        drop(rx);

        tokio::time::sleep(Duration::from_secs(3)).await;
        tokio::task::yield_now().await;
        assert!(timer.is_finished());
    }
}
