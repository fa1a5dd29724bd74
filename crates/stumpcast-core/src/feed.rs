//! Fixed-capacity ring buffer holding the most recent feed events.
//!
//! The buffer owns its storage exclusively. Once `capacity` events are
//! held, every push evicts exactly one event -- the logically oldest,
//! never any other -- so the buffer always holds the last N pushes.
//! The only read surface is [`FeedBuffer::snapshot`], which returns
//! owned events in strict most-recent-first order; callers cannot reach
//! back into internal storage.

use std::collections::VecDeque;

use stumpcast_types::MatchEvent;

/// Errors that can occur when constructing a feed buffer.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// A buffer must be able to hold at least one event.
    #[error("feed capacity must be at least 1")]
    ZeroCapacity,
}

/// Ring buffer of the most recent feed events.
#[derive(Debug, Clone)]
pub struct FeedBuffer {
    /// Stored events, oldest at the front.
    events: VecDeque<MatchEvent>,
    /// Maximum number of events held.
    capacity: usize,
}

impl FeedBuffer {
    /// Create an empty buffer holding at most `capacity` events.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::ZeroCapacity`] if `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self, FeedError> {
        if capacity == 0 {
            return Err(FeedError::ZeroCapacity);
        }
        Ok(Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Append an event, evicting the oldest stored event when full.
    ///
    /// O(1), always succeeds.
    pub fn push(&mut self, event: MatchEvent) {
        if self.events.len() >= self.capacity {
            let _ = self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// All currently held events, newest first, as owned copies.
    pub fn snapshot(&self) -> Vec<MatchEvent> {
        self.events.iter().rev().cloned().collect()
    }

    /// Number of events currently held.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the buffer holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The configured capacity.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// A ball event labeled so tests can identify it by batter name.
    fn labeled(n: usize) -> MatchEvent {
        MatchEvent::ball(1, Some(format!("batter-{n}")), None)
    }

    fn label(event: &MatchEvent) -> String {
        match &event.body {
            stumpcast_types::EventBody::Ball(details) => {
                details.batter.clone().unwrap_or_default()
            }
            _ => String::new(),
        }
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(FeedBuffer::new(0).is_err());
    }

    #[test]
    fn snapshot_is_newest_first() {
        let mut buffer = FeedBuffer::new(10).unwrap();
        for n in 0..4 {
            buffer.push(labeled(n));
        }
        let snapshot = buffer.snapshot();
        let labels: Vec<String> = snapshot.iter().map(label).collect();
        assert_eq!(labels, vec!["batter-3", "batter-2", "batter-1", "batter-0"]);
    }

    #[test]
    fn never_exceeds_capacity() {
        let mut buffer = FeedBuffer::new(5).unwrap();
        for n in 0..50 {
            buffer.push(labeled(n));
            assert!(buffer.len() <= 5);
        }
        assert_eq!(buffer.len(), 5);
    }

    #[test]
    fn overflow_keeps_exactly_the_last_n() {
        let mut buffer = FeedBuffer::new(3).unwrap();
        for n in 0..7 {
            buffer.push(labeled(n));
        }
        let labels: Vec<String> = buffer.snapshot().iter().map(label).collect();
        // Pushes 0..7 into capacity 3: only 4, 5, 6 survive, newest first.
        assert_eq!(labels, vec!["batter-6", "batter-5", "batter-4"]);
    }

    #[test]
    fn snapshot_does_not_alias_storage() {
        let mut buffer = FeedBuffer::new(3).unwrap();
        buffer.push(labeled(0));
        let mut snapshot = buffer.snapshot();
        snapshot.clear();
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn capacity_one_holds_only_newest() {
        let mut buffer = FeedBuffer::new(1).unwrap();
        buffer.push(labeled(0));
        buffer.push(labeled(1));
        let labels: Vec<String> = buffer.snapshot().iter().map(label).collect();
        assert_eq!(labels, vec!["batter-1"]);
    }
}
