//! Ingestion queue staging events between arrival and the drain tick.
//!
//! The queue is the sole hand-off point between the producer tick and
//! the drain tick. Both run on the same cooperative loop, so no locking
//! is involved -- the queue is plain owned state on the pipeline.
//!
//! By default the queue is unbounded, matching the assumption that the
//! producer rate is far below the drain cadence. A misbehaving producer
//! can be contained with an explicit bound and an [`OverflowPolicy`];
//! dropped events are counted and surfaced for logging, never reported
//! as errors.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use stumpcast_types::MatchEvent;

/// What to do with an incoming event when a bounded queue is full.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Evict the oldest pending event to make room for the new one.
    #[default]
    DropOldest,
    /// Reject the new event, keeping the pending backlog intact.
    DropNewest,
}

/// Insertion-ordered staging queue of pending events.
#[derive(Debug, Clone)]
pub struct IngestionQueue {
    /// Pending events, oldest at the front.
    pending: VecDeque<MatchEvent>,
    /// Maximum pending events; 0 means unbounded.
    max_pending: usize,
    /// Policy applied when a bounded queue is full.
    policy: OverflowPolicy,
    /// Events dropped by the overflow policy since construction.
    dropped: u64,
}

impl IngestionQueue {
    /// Create an unbounded queue (the default; growth under a
    /// producer/drain rate mismatch is an accepted risk).
    pub const fn unbounded() -> Self {
        Self {
            pending: VecDeque::new(),
            max_pending: 0,
            policy: OverflowPolicy::DropOldest,
            dropped: 0,
        }
    }

    /// Create a queue holding at most `max_pending` events, applying
    /// `policy` on overflow. `max_pending` of 0 means unbounded.
    pub const fn bounded(max_pending: usize, policy: OverflowPolicy) -> Self {
        Self {
            pending: VecDeque::new(),
            max_pending,
            policy,
            dropped: 0,
        }
    }

    /// Append an event to the tail. O(1), never fails.
    ///
    /// On a full bounded queue the overflow policy decides which event
    /// is dropped; the drop is counted, not reported.
    pub fn enqueue(&mut self, event: MatchEvent) {
        if self.max_pending > 0 && self.pending.len() >= self.max_pending {
            match self.policy {
                OverflowPolicy::DropOldest => {
                    let _ = self.pending.pop_front();
                }
                OverflowPolicy::DropNewest => {
                    self.dropped = self.dropped.saturating_add(1);
                    return;
                }
            }
            self.dropped = self.dropped.saturating_add(1);
        }
        self.pending.push_back(event);
    }

    /// Atomically remove and return every queued event in arrival order.
    ///
    /// An empty queue yields an empty vec with no further side effects --
    /// callers treat that as a no-op signal, not an error.
    pub fn drain_all(&mut self) -> Vec<MatchEvent> {
        self.pending.drain(..).collect()
    }

    /// Number of events currently pending.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no events are pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Total events dropped by the overflow policy so far.
    pub const fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl Default for IngestionQueue {
    fn default() -> Self {
        Self::unbounded()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn labeled(n: usize) -> MatchEvent {
        MatchEvent::ball(1, Some(format!("batter-{n}")), None)
    }

    fn labels(events: &[MatchEvent]) -> Vec<String> {
        events
            .iter()
            .map(|e| match &e.body {
                stumpcast_types::EventBody::Ball(d) => d.batter.clone().unwrap_or_default(),
                _ => String::new(),
            })
            .collect()
    }

    #[test]
    fn drain_returns_arrival_order_and_empties() {
        let mut queue = IngestionQueue::unbounded();
        for n in 0..3 {
            queue.enqueue(labeled(n));
        }
        let drained = queue.drain_all();
        assert_eq!(labels(&drained), vec!["batter-0", "batter-1", "batter-2"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn empty_drain_is_a_no_op() {
        let mut queue = IngestionQueue::unbounded();
        assert!(queue.drain_all().is_empty());
        assert_eq!(queue.dropped(), 0);
    }

    #[test]
    fn unbounded_queue_never_drops() {
        let mut queue = IngestionQueue::unbounded();
        for n in 0..10_000 {
            queue.enqueue(labeled(n));
        }
        assert_eq!(queue.len(), 10_000);
        assert_eq!(queue.dropped(), 0);
    }

    #[test]
    fn drop_oldest_keeps_newest_events() {
        let mut queue = IngestionQueue::bounded(2, OverflowPolicy::DropOldest);
        for n in 0..4 {
            queue.enqueue(labeled(n));
        }
        assert_eq!(queue.dropped(), 2);
        let drained = queue.drain_all();
        assert_eq!(labels(&drained), vec!["batter-2", "batter-3"]);
    }

    #[test]
    fn drop_newest_keeps_backlog_intact() {
        let mut queue = IngestionQueue::bounded(2, OverflowPolicy::DropNewest);
        for n in 0..4 {
            queue.enqueue(labeled(n));
        }
        assert_eq!(queue.dropped(), 2);
        let drained = queue.drain_all();
        assert_eq!(labels(&drained), vec!["batter-0", "batter-1"]);
    }

    #[test]
    fn queue_refills_after_drain() {
        let mut queue = IngestionQueue::bounded(2, OverflowPolicy::DropNewest);
        queue.enqueue(labeled(0));
        queue.enqueue(labeled(1));
        let _ = queue.drain_all();
        queue.enqueue(labeled(2));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.dropped(), 0);
    }
}
