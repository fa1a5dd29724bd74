//! The pipeline run loop: two periodic ticks on one cooperative task.
//!
//! [`run_pipeline`] drives the two independent cadences: a slow producer
//! tick that pulls one event from the [`EventSource`] and stages it, and
//! a fast drain tick that applies the staged batch and hands the
//! published views to a [`PublishSink`].
//!
//! Both ticks run inside a single `tokio::select!` loop, so all state is
//! touched from one logical thread and no locking is needed. A shared
//! [`Notify`] tears both ticks down together; teardown performs one
//! final drain so every event accepted before shutdown is applied, and
//! nothing submitted afterwards ever will be.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tracing::{debug, info, warn};

use crate::pipeline::{Pipeline, ScoreUpdate};
use crate::source::EventSource;
use stumpcast_types::ScoreboardSummary;

/// Cadence and bounds for a pipeline run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Milliseconds between producer ticks.
    pub producer_interval_ms: u64,
    /// Milliseconds between drain ticks.
    pub drain_interval_ms: u64,
    /// Maximum events to ingest before ending the run (0 = unlimited).
    pub max_events: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            producer_interval_ms: 3000,
            drain_interval_ms: 200,
            max_events: 0,
        }
    }
}

/// Why a pipeline run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The configured event bound was reached.
    MaxEventsReached,
    /// Shutdown was requested through the notify handle.
    ShutdownRequested,
    /// The event source reported exhaustion.
    SourceExhausted,
}

/// Result of a pipeline run.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Why the run ended.
    pub end_reason: EndReason,
    /// Total events pulled from the source and staged.
    pub events_ingested: u64,
    /// Total non-empty drains published.
    pub batches_published: u64,
    /// The summary at the end of the run.
    pub final_summary: ScoreboardSummary,
}

/// Callback invoked with each published update.
///
/// Implementations forward the views to the presentation layer -- the
/// observer snapshot and its `WebSocket` broadcast in the engine, a
/// counter in tests.
pub trait PublishSink: Send {
    /// Called once per non-empty drain with the freshly published views.
    fn on_publish(&mut self, update: &ScoreUpdate);
}

/// A publish sink that discards updates, for tests and dry runs.
pub struct NoOpSink;

impl PublishSink for NoOpSink {
    fn on_publish(&mut self, _update: &ScoreUpdate) {}
}

/// Run the pipeline until a termination condition is met.
///
/// # Arguments
///
/// * `pipeline` - The pipeline owning feed, queue, and summary
/// * `source` - Producer of events, asked once per producer tick
/// * `sink` - Receiver of published updates
/// * `shutdown` - Notify handle; one notification ends the run
/// * `config` - Tick cadence and event bound
pub async fn run_pipeline(
    pipeline: &mut Pipeline,
    source: &mut dyn EventSource,
    sink: &mut dyn PublishSink,
    shutdown: &Arc<Notify>,
    config: &RunnerConfig,
) -> RunResult {
    let mut producer =
        tokio::time::interval(Duration::from_millis(config.producer_interval_ms.max(1)));
    let mut drain = tokio::time::interval(Duration::from_millis(config.drain_interval_ms.max(1)));
    // A slow drain should not replay a burst of missed ticks afterwards.
    drain.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let mut events_ingested: u64 = 0;
    let mut batches_published: u64 = 0;

    info!(
        producer_interval_ms = config.producer_interval_ms,
        drain_interval_ms = config.drain_interval_ms,
        max_events = config.max_events,
        "Pipeline run starting"
    );

    let end_reason = loop {
        tokio::select! {
            () = shutdown.notified() => {
                debug!("Shutdown requested");
                break EndReason::ShutdownRequested;
            }

            _ = producer.tick() => {
                match source.next_event() {
                    Some(event) => {
                        pipeline.submit(event);
                        events_ingested = events_ingested.saturating_add(1);
                        if config.max_events > 0 && events_ingested >= config.max_events {
                            debug!(events_ingested, "Event bound reached");
                            break EndReason::MaxEventsReached;
                        }
                    }
                    None => {
                        debug!(events_ingested, "Source exhausted");
                        break EndReason::SourceExhausted;
                    }
                }
            }

            _ = drain.tick() => {
                if let Some(update) = pipeline.drain_tick() {
                    batches_published = batches_published.saturating_add(1);
                    sink.on_publish(&update);
                }
            }
        }
    };

    // Final drain: apply everything accepted before teardown. Events
    // submitted after this point are never processed.
    if let Some(update) = pipeline.drain_tick() {
        batches_published = batches_published.saturating_add(1);
        sink.on_publish(&update);
    }

    let dropped = pipeline.dropped();
    if dropped > 0 {
        warn!(dropped, "Events were dropped by the queue overflow policy");
    }

    info!(
        reason = ?end_reason,
        events_ingested,
        batches_published,
        final_summary = %pipeline.summary(),
        "Pipeline run ended"
    );

    RunResult {
        end_reason,
        events_ingested,
        batches_published,
        final_summary: pipeline.summary(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use stumpcast_types::MatchEvent;

    use super::*;
    use crate::config::PipelineConfig;
    use crate::source::ScriptedSource;

    /// Fast cadence for tests: both ticks at 1 ms.
    const fn fast(max_events: u64) -> RunnerConfig {
        RunnerConfig {
            producer_interval_ms: 1,
            drain_interval_ms: 1,
            max_events,
        }
    }

    fn pipeline() -> Pipeline {
        Pipeline::from_config(&PipelineConfig::default()).unwrap()
    }

    /// Sink that records the sequence numbers it sees.
    struct RecordingSink {
        sequences: Vec<u64>,
    }

    impl RecordingSink {
        const fn new() -> Self {
            Self {
                sequences: Vec::new(),
            }
        }
    }

    impl PublishSink for RecordingSink {
        fn on_publish(&mut self, update: &ScoreUpdate) {
            self.sequences.push(update.sequence);
        }
    }

    #[tokio::test]
    async fn bounded_by_max_events() {
        let mut p = pipeline();
        let mut source = ScriptedSource::new((0..10).map(|_| MatchEvent::ball(1, None, None)));
        let mut sink = NoOpSink;
        let shutdown = Arc::new(Notify::new());

        let result = run_pipeline(&mut p, &mut source, &mut sink, &shutdown, &fast(4)).await;

        assert_eq!(result.end_reason, EndReason::MaxEventsReached);
        assert_eq!(result.events_ingested, 4);
        assert_eq!(result.final_summary.runs, 4);
    }

    #[tokio::test]
    async fn exhausted_source_ends_the_run() {
        let mut p = pipeline();
        let mut source = ScriptedSource::new([
            MatchEvent::ball(2, None, None),
            MatchEvent::boundary(4, None),
        ]);
        let mut sink = RecordingSink::new();
        let shutdown = Arc::new(Notify::new());

        let result = run_pipeline(&mut p, &mut source, &mut sink, &shutdown, &fast(0)).await;

        assert_eq!(result.end_reason, EndReason::SourceExhausted);
        assert_eq!(result.events_ingested, 2);
        // Every accepted event was applied before the run returned.
        assert_eq!(result.final_summary.runs, 6);
        assert_eq!(result.final_summary.balls, 2);
    }

    #[tokio::test]
    async fn shutdown_requested_before_start_stops_immediately() {
        let mut p = pipeline();
        let mut source = ScriptedSource::new((0..100).map(|_| MatchEvent::ball(1, None, None)));
        let mut sink = NoOpSink;
        let shutdown = Arc::new(Notify::new());
        shutdown.notify_one();

        let result = run_pipeline(&mut p, &mut source, &mut sink, &shutdown, &fast(0)).await;

        assert_eq!(result.end_reason, EndReason::ShutdownRequested);
    }

    #[tokio::test]
    async fn publishes_have_monotonic_sequences() {
        let mut p = pipeline();
        let mut source = ScriptedSource::new((0..6).map(|_| MatchEvent::ball(1, None, None)));
        let mut sink = RecordingSink::new();
        let shutdown = Arc::new(Notify::new());

        let _ = run_pipeline(&mut p, &mut source, &mut sink, &shutdown, &fast(0)).await;

        assert!(!sink.sequences.is_empty());
        assert!(sink.sequences.windows(2).all(|w| match w {
            [a, b] => a < b,
            _ => true,
        }));
    }

    #[tokio::test]
    async fn order_is_preserved_across_drain_ticks() {
        // A wicket followed by a new-innings status: the reset must land
        // after the wicket regardless of how the drains batch them.
        let mut p = pipeline();
        let mut source = ScriptedSource::new([
            MatchEvent::wicket(None, None, None),
            MatchEvent::status("new innings underway"),
        ]);
        let mut sink = RecordingSink::new();
        let shutdown = Arc::new(Notify::new());

        let result = run_pipeline(&mut p, &mut source, &mut sink, &shutdown, &fast(0)).await;

        assert_eq!(result.final_summary.wickets, 0);
        assert_eq!(result.final_summary.runs, 0);
    }
}
