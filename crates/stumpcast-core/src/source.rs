//! Event source trait and scripted stub implementation.
//!
//! On each producer tick the runner asks its [`EventSource`] for one
//! event. The trait abstracts the mechanism by which events are
//! obtained: a network feed in production, a randomized generator in
//! the demo engine, or a scripted stub in tests.
//!
//! Sources must not block; an implementation with nothing to offer on a
//! given tick returns `None` via exhaustion semantics described below.

use stumpcast_types::MatchEvent;

/// A producer of match events.
///
/// The runner calls [`next_event`] once per producer tick. Returning
/// `None` signals the source is exhausted and ends the run (a live
/// network source would never return `None`; a replay or scripted
/// source does when its material runs out).
///
/// [`next_event`]: EventSource::next_event
pub trait EventSource {
    /// Produce the next event, or `None` when exhausted.
    fn next_event(&mut self) -> Option<MatchEvent>;
}

/// A scripted source that replays a fixed sequence of events.
///
/// Used in tests and offline replays: events come back in the exact
/// order they were loaded, then the source reports exhaustion.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    /// Remaining events, next at the front.
    events: std::collections::VecDeque<MatchEvent>,
}

impl ScriptedSource {
    /// Create a scripted source from an ordered event sequence.
    pub fn new(events: impl IntoIterator<Item = MatchEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Events not yet produced.
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventSource for ScriptedSource {
    fn next_event(&mut self) -> Option<MatchEvent> {
        self.events.pop_front()
    }
}
