//! Match event types flowing through the pipeline.
//!
//! A [`MatchEvent`] is immutable once constructed: created by the
//! producer (or decoded from a raw wire record), pushed through the
//! ingestion queue, applied to the feed buffer and the scoreboard fold,
//! and eventually evicted from the feed in insertion order.
//!
//! Unrecognized wire kinds are carried as [`EventBody::Unknown`] with
//! the original tag and payload preserved verbatim -- they stay visible
//! in the feed but never touch the scoreboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Dismissal, EventKind};
use crate::ids::EventId;

// ---------------------------------------------------------------------------
// Payload shapes
// ---------------------------------------------------------------------------

/// Payload for a legal delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BallDetails {
    /// Runs scored off this delivery.
    pub runs: u32,
    /// The batter on strike, if known.
    pub batter: Option<String>,
    /// The bowler, if known.
    pub bowler: Option<String>,
}

/// Payload for a boundary (4 or 6).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BoundaryDetails {
    /// Runs scored: 4 for a boundary along the ground, 6 over the rope.
    pub runs: u32,
    /// The batter who hit the boundary, if known.
    pub batter: Option<String>,
}

/// Payload for a dismissal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WicketDetails {
    /// How the batter was out, if the producer reported it.
    pub dismissal: Option<Dismissal>,
    /// The dismissed batter, if known.
    pub batter: Option<String>,
    /// The bowler credited, if any (run outs have none).
    pub bowler: Option<String>,
}

/// Payload for a match status transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StatusDetails {
    /// Free-text status line, e.g. "Rain delay" or "New innings underway".
    pub status: String,
}

// ---------------------------------------------------------------------------
// Event body
// ---------------------------------------------------------------------------

/// The kind-specific body of a match event.
///
/// Serialized adjacently tagged so the feed JSON mirrors the wire shape
/// (`type` + `payload`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum EventBody {
    /// A legal delivery.
    Ball(BallDetails),
    /// A boundary.
    Boundary(BoundaryDetails),
    /// A dismissal.
    Wicket(WicketDetails),
    /// A match status transition.
    MatchStatus(StatusDetails),
    /// An unrecognized kind, preserved verbatim for feed visibility.
    Unknown {
        /// The original wire tag.
        kind: String,
        /// The original payload, unchanged (empty object when absent).
        payload: serde_json::Value,
    },
}

impl EventBody {
    /// The recognized kind of this body, or `None` for unknown events.
    pub const fn kind(&self) -> Option<EventKind> {
        match self {
            Self::Ball(_) => Some(EventKind::Ball),
            Self::Boundary(_) => Some(EventKind::Boundary),
            Self::Wicket(_) => Some(EventKind::Wicket),
            Self::MatchStatus(_) => Some(EventKind::MatchStatus),
            Self::Unknown { .. } => None,
        }
    }

    /// The wire tag of this body: the canonical tag for known kinds,
    /// the verbatim original for unknown ones.
    pub fn tag(&self) -> &str {
        match self {
            Self::Ball(_) => EventKind::Ball.as_tag(),
            Self::Boundary(_) => EventKind::Boundary.as_tag(),
            Self::Wicket(_) => EventKind::Wicket.as_tag(),
            Self::MatchStatus(_) => EventKind::MatchStatus.as_tag(),
            Self::Unknown { kind, .. } => kind.as_str(),
        }
    }
}

// ---------------------------------------------------------------------------
// MatchEvent
// ---------------------------------------------------------------------------

/// A single timestamped event in the match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MatchEvent {
    /// Unique event identifier (producer-assigned or pipeline fallback).
    pub id: EventId,
    /// When the event occurred, per the producer.
    pub timestamp: DateTime<Utc>,
    /// The kind-specific body.
    pub body: EventBody,
}

impl MatchEvent {
    /// Construct an event with a fresh ID and the current time.
    pub fn new(body: EventBody) -> Self {
        Self {
            id: EventId::new(),
            timestamp: Utc::now(),
            body,
        }
    }

    /// A delivery scoring `runs` off the bat.
    pub fn ball(runs: u32, batter: Option<String>, bowler: Option<String>) -> Self {
        Self::new(EventBody::Ball(BallDetails {
            runs,
            batter,
            bowler,
        }))
    }

    /// A boundary worth `runs` (4 or 6).
    pub fn boundary(runs: u32, batter: Option<String>) -> Self {
        Self::new(EventBody::Boundary(BoundaryDetails { runs, batter }))
    }

    /// A dismissal.
    pub fn wicket(
        dismissal: Option<Dismissal>,
        batter: Option<String>,
        bowler: Option<String>,
    ) -> Self {
        Self::new(EventBody::Wicket(WicketDetails {
            dismissal,
            batter,
            bowler,
        }))
    }

    /// A match status transition with the given status line.
    pub fn status(status: impl Into<String>) -> Self {
        Self::new(EventBody::MatchStatus(StatusDetails {
            status: status.into(),
        }))
    }

    /// An unrecognized event, carrying tag and payload verbatim.
    pub fn unknown(kind: impl Into<String>, payload: serde_json::Value) -> Self {
        Self::new(EventBody::Unknown {
            kind: kind.into(),
            payload,
        })
    }
}
