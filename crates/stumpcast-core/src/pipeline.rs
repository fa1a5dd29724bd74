//! The pipeline coordinator: single owner of all mutable scoreboard state.
//!
//! A [`Pipeline`] owns the feed buffer, the running summary, and the
//! ingestion queue. Events arrive through [`Pipeline::submit`] and are
//! applied on [`Pipeline::drain_tick`]: each drained event, in arrival
//! order, is pushed to the feed and folded into the summary, and the
//! resulting views are packaged into a [`ScoreUpdate`] for publication.
//!
//! Ordering guarantee: events reach both the feed and the fold in the
//! exact order they were submitted, across drain batches. Only
//! publication is batched, never the events themselves.

use stumpcast_types::{MatchEvent, ScoreboardSummary};
use tracing::debug;

use crate::config::PipelineConfig;
use crate::feed::{FeedBuffer, FeedError};
use crate::queue::IngestionQueue;
use crate::scoreboard::{self, InningsResetPolicy};

/// A published view pair produced by a non-empty drain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreUpdate {
    /// Feed snapshot, newest first, length bounded by the feed capacity.
    pub feed: Vec<MatchEvent>,
    /// The summary after applying the drained batch.
    pub summary: ScoreboardSummary,
    /// Number of events applied in this batch.
    pub applied: usize,
    /// Monotonically increasing publication counter (1-based).
    pub sequence: u64,
}

/// The event-ingestion pipeline.
#[derive(Debug)]
pub struct Pipeline {
    /// Most-recent-first feed store.
    feed: FeedBuffer,
    /// Staging queue between arrival and application.
    queue: IngestionQueue,
    /// The running summary, replaced on every applied event.
    summary: ScoreboardSummary,
    /// Innings-break behavior for the fold.
    reset_policy: InningsResetPolicy,
    /// Publications so far.
    sequence: u64,
}

impl Pipeline {
    /// Build a pipeline from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::ZeroCapacity`] if the configured feed
    /// capacity is 0.
    pub fn from_config(config: &PipelineConfig) -> Result<Self, FeedError> {
        Ok(Self {
            feed: FeedBuffer::new(config.feed.capacity)?,
            queue: IngestionQueue::bounded(
                config.queue.max_pending,
                config.queue.overflow_policy,
            ),
            summary: ScoreboardSummary::zero(),
            reset_policy: config.scoreboard.reset_policy(),
            sequence: 0,
        })
    }

    /// Stage an event for the next drain tick. O(1), never blocks.
    pub fn submit(&mut self, event: MatchEvent) {
        self.queue.enqueue(event);
    }

    /// Drain all staged events, apply them in arrival order, and return
    /// the views to publish.
    ///
    /// Returns `None` when the staged batch was empty: nothing changed,
    /// so nothing should be re-published.
    pub fn drain_tick(&mut self) -> Option<ScoreUpdate> {
        let batch = self.queue.drain_all();
        if batch.is_empty() {
            return None;
        }

        let applied = batch.len();
        for event in batch {
            self.summary = scoreboard::fold(self.summary, &event, self.reset_policy);
            self.feed.push(event);
        }

        self.sequence = self.sequence.saturating_add(1);
        debug!(
            applied,
            sequence = self.sequence,
            summary = %self.summary,
            "Drain applied"
        );

        Some(ScoreUpdate {
            feed: self.feed.snapshot(),
            summary: self.summary,
            applied,
            sequence: self.sequence,
        })
    }

    /// Replace the summary wholesale with the all-zero summary.
    ///
    /// The feed is untouched: a reset is a scoreboard operation, not an
    /// event-history operation.
    pub const fn reset(&mut self) {
        self.summary = ScoreboardSummary::zero();
    }

    /// The current summary.
    pub const fn summary(&self) -> ScoreboardSummary {
        self.summary
    }

    /// A fresh feed snapshot, newest first.
    pub fn feed_snapshot(&self) -> Vec<MatchEvent> {
        self.feed.snapshot()
    }

    /// Events currently staged and awaiting a drain.
    pub fn queue_depth(&self) -> usize {
        self.queue.len()
    }

    /// Events dropped by the queue's overflow policy so far.
    pub const fn dropped(&self) -> u64 {
        self.queue.dropped()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use stumpcast_types::{EventBody, MatchEvent};

    use super::*;

    fn pipeline() -> Pipeline {
        Pipeline::from_config(&PipelineConfig::default()).unwrap()
    }

    #[test]
    fn empty_drain_publishes_nothing() {
        let mut p = pipeline();
        assert!(p.drain_tick().is_none());
        assert_eq!(p.summary(), ScoreboardSummary::zero());
    }

    #[test]
    fn drain_applies_and_publishes_both_views() {
        let mut p = pipeline();
        p.submit(MatchEvent::ball(1, None, None));
        p.submit(MatchEvent::boundary(4, None));

        let update = p.drain_tick().unwrap();
        assert_eq!(update.applied, 2);
        assert_eq!(update.sequence, 1);
        assert_eq!(update.summary.runs, 5);
        assert_eq!(update.summary.balls, 2);
        assert_eq!(update.feed.len(), 2);
        // Feed is newest first: the boundary leads.
        assert!(matches!(
            update.feed.first().map(|e| &e.body),
            Some(EventBody::Boundary(_))
        ));
    }

    #[test]
    fn events_apply_in_fifo_order_across_batches() {
        // A wicket followed by a new-innings reset must zero out the
        // wicket just counted; the reverse order would leave it standing.
        let mut p = pipeline();
        p.submit(MatchEvent::ball(2, None, None));
        let first = p.drain_tick().unwrap();
        assert_eq!(first.summary.runs, 2);

        p.submit(MatchEvent::wicket(None, None, None));
        p.submit(MatchEvent::status("new innings underway"));
        let second = p.drain_tick().unwrap();

        assert_eq!(second.summary.wickets, 0);
        assert_eq!(second.summary.runs, 0);
        assert_eq!(second.sequence, 2);
        // All three events remain visible in the feed.
        assert_eq!(second.feed.len(), 3);
    }

    #[test]
    fn unknown_event_reaches_feed_but_not_summary() {
        let mut p = pipeline();
        p.submit(MatchEvent::unknown("free_hit", serde_json::json!({"runs": 6})));

        let update = p.drain_tick().unwrap();
        assert_eq!(update.summary, ScoreboardSummary::zero());
        assert_eq!(update.feed.len(), 1);
        assert!(matches!(
            update.feed.first().map(|e| &e.body),
            Some(EventBody::Unknown { .. })
        ));
    }

    #[test]
    fn feed_respects_configured_capacity() {
        let config = PipelineConfig::parse("feed:\n  capacity: 3\n").unwrap();
        let mut p = Pipeline::from_config(&config).unwrap();
        for n in 0..5 {
            p.submit(MatchEvent::ball(n, None, None));
        }
        let update = p.drain_tick().unwrap();
        assert_eq!(update.applied, 5);
        assert_eq!(update.feed.len(), 3);
    }

    #[test]
    fn reset_zeroes_summary_but_keeps_feed() {
        let mut p = pipeline();
        p.submit(MatchEvent::boundary(6, None));
        let _ = p.drain_tick();

        p.reset();
        assert_eq!(p.summary(), ScoreboardSummary::zero());
        assert_eq!(p.feed_snapshot().len(), 1);
    }

    #[test]
    fn sequence_only_advances_on_non_empty_drains() {
        let mut p = pipeline();
        assert!(p.drain_tick().is_none());
        p.submit(MatchEvent::ball(0, None, None));
        let update = p.drain_tick().unwrap();
        assert_eq!(update.sequence, 1);
        assert!(p.drain_tick().is_none());
        p.submit(MatchEvent::ball(0, None, None));
        let update = p.drain_tick().unwrap();
        assert_eq!(update.sequence, 2);
    }
}
