//! Shared application state for the Observer API server.
//!
//! [`AppState`] holds the broadcast channel for published score updates
//! and the in-memory snapshot of the two derived views (feed and
//! summary) that the REST endpoints serve. The engine writes the
//! snapshot after each published drain; the observer only ever reads.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use stumpcast_types::{MatchEvent, ScoreboardSummary};
use tokio::sync::{broadcast, RwLock};

/// Capacity of the broadcast channel for score updates.
///
/// If a subscriber falls behind by more than this many messages it will
/// receive a [`broadcast::error::RecvError::Lagged`] and skip to the
/// newest message.
const BROADCAST_CAPACITY: usize = 256;

/// JSON-serializable score update pushed over the `WebSocket`.
///
/// A lightweight projection of a published update: the summary plus the
/// publication sequence, without the full feed payload.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ScoreBroadcast {
    /// Publication sequence number (1-based, monotonic).
    pub sequence: u64,
    /// The summary after this publication.
    pub summary: ScoreboardSummary,
    /// Conventional scoreline, e.g. `142/3 (18.4)`.
    pub scoreline: String,
    /// Events applied in the drain that produced this update.
    pub applied: u64,
}

/// In-memory snapshot of the published views served by REST endpoints.
///
/// Replaced by the engine on each published update. All reads are
/// served from this snapshot so the observer never blocks the pipeline.
#[derive(Debug, Clone, Default)]
pub struct ScoreSnapshot {
    /// Feed events, most recent first, bounded by the feed capacity.
    pub feed: Vec<MatchEvent>,
    /// The current scoreboard summary.
    pub summary: ScoreboardSummary,
    /// Sequence number of the latest publication (0 before the first).
    pub last_sequence: u64,
    /// When the snapshot was last replaced.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor. The
/// broadcast sender pushes score updates to all connected `WebSocket`
/// clients; the snapshot is a read-write lock protecting the views.
#[derive(Clone)]
pub struct AppState {
    /// Broadcast sender for score update messages.
    pub tx: broadcast::Sender<ScoreBroadcast>,
    /// The current published views (replaced on each publication).
    pub snapshot: Arc<RwLock<ScoreSnapshot>>,
}

impl AppState {
    /// Create a new application state with an empty snapshot.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            tx,
            snapshot: Arc::new(RwLock::new(ScoreSnapshot::default())),
        }
    }

    /// Subscribe to the score broadcast channel.
    pub fn subscribe(&self) -> broadcast::Receiver<ScoreBroadcast> {
        self.tx.subscribe()
    }

    /// Publish a score update to all connected clients.
    ///
    /// Returns the number of receivers that received the message.
    /// Returns 0 if no clients are connected (this is not an error).
    pub fn broadcast(&self, update: &ScoreBroadcast) -> usize {
        // send returns Err only when there are zero receivers,
        // which is normal when no WebSocket clients are connected.
        self.tx.send(update.clone()).unwrap_or(0)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
