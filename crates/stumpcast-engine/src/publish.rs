//! Publish sink that updates the Observer API state.
//!
//! After each published drain, this sink replaces the in-memory
//! [`ScoreSnapshot`] and broadcasts a [`ScoreBroadcast`] to all
//! connected `WebSocket` clients.
//!
//! [`ScoreSnapshot`]: stumpcast_observer::state::ScoreSnapshot

use std::sync::Arc;

use chrono::Utc;
use stumpcast_core::pipeline::ScoreUpdate;
use stumpcast_core::runner::PublishSink;
use stumpcast_observer::state::{AppState, ScoreBroadcast};
use tracing::debug;

/// Sink that bridges the pipeline run loop to the Observer API.
pub struct ObserverPublisher {
    state: Arc<AppState>,
}

impl ObserverPublisher {
    /// Create a new publisher backed by the given app state.
    pub const fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

impl PublishSink for ObserverPublisher {
    fn on_publish(&mut self, update: &ScoreUpdate) {
        // Broadcast the lightweight projection to WebSocket clients.
        let broadcast = ScoreBroadcast {
            sequence: update.sequence,
            summary: update.summary,
            scoreline: update.summary.to_string(),
            applied: u64::try_from(update.applied).unwrap_or(u64::MAX),
        };
        let receivers = self.state.broadcast(&broadcast);
        debug!(
            sequence = update.sequence,
            receivers, "Score broadcast sent"
        );

        // Replace the snapshot. Use try_write to avoid blocking the
        // run loop; if a REST handler holds the read lock, skip this
        // update and let the next publication catch up.
        if let Ok(mut snap) = self.state.snapshot.try_write() {
            snap.feed = update.feed.clone();
            snap.summary = update.summary;
            snap.last_sequence = update.sequence;
            snap.updated_at = Some(Utc::now());
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use stumpcast_types::{MatchEvent, ScoreboardSummary};

    use super::*;

    #[tokio::test]
    async fn publish_replaces_snapshot_and_broadcasts() {
        let state = Arc::new(AppState::new());
        let mut rx = state.subscribe();
        let mut publisher = ObserverPublisher::new(Arc::clone(&state));

        let update = ScoreUpdate {
            feed: vec![MatchEvent::boundary(4, None)],
            summary: ScoreboardSummary {
                runs: 4,
                wickets: 0,
                overs: 0,
                balls: 1,
            },
            applied: 1,
            sequence: 1,
        };

        publisher.on_publish(&update);

        let snap = state.snapshot.read().await;
        assert_eq!(snap.last_sequence, 1);
        assert_eq!(snap.feed.len(), 1);
        assert_eq!(snap.summary.runs, 4);
        assert!(snap.updated_at.is_some());
        drop(snap);

        let received = rx.recv().await.unwrap();
        assert_eq!(received.sequence, 1);
        assert_eq!(received.scoreline, "4/0 (0.1)");
    }
}
