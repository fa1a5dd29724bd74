//! The scoreboard accumulator: a pure fold over the event stream.
//!
//! [`fold`] maps `(summary, event)` to the next summary. It never
//! mutates its inputs and has no side effects, so the pipeline can
//! apply events one at a time or in any contiguous batching and reach
//! the same result.
//!
//! After every transition the raw ball count carries into completed
//! overs (six legal deliveries per over), then the totals are clamped
//! at the domain boundaries. Clamping is saturating and idempotent:
//! folding a no-op event through an already-clamped summary leaves it
//! unchanged.

use stumpcast_types::{
    BallDetails, BoundaryDetails, EventBody, MatchEvent, ScoreboardSummary,
};

/// Marker phrase in a status line that signals the start of a new
/// innings. Matched case-insensitively as a substring.
pub const NEW_INNINGS_MARKER: &str = "new innings";

/// Whether an innings break also resets the completed-over count.
///
/// The two reference scoreboard behaviors in this domain disagree on
/// this point, so it is a configuration choice rather than a constant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InningsResetPolicy {
    /// A new innings zeroes runs, wickets, and the in-over ball count,
    /// but completed overs keep accumulating.
    #[default]
    RetainOvers,
    /// A new innings zeroes completed overs as well.
    ResetOvers,
}

/// Fold a single event into the summary, returning the next summary.
///
/// Unrecognized events leave the summary untouched -- they are feed-only.
pub fn fold(
    summary: ScoreboardSummary,
    event: &MatchEvent,
    policy: InningsResetPolicy,
) -> ScoreboardSummary {
    let mut next = summary;

    match &event.body {
        EventBody::Ball(BallDetails { runs, .. })
        | EventBody::Boundary(BoundaryDetails { runs, .. }) => {
            next.runs = next.runs.saturating_add(*runs);
            next.balls = next.balls.saturating_add(1);
        }
        EventBody::Wicket(_) => {
            next.wickets = next.wickets.saturating_add(1);
            next.balls = next.balls.saturating_add(1);
        }
        EventBody::MatchStatus(details) => {
            if details.status.to_lowercase().contains(NEW_INNINGS_MARKER) {
                next.runs = 0;
                next.wickets = 0;
                next.balls = 0;
                if policy == InningsResetPolicy::ResetOvers {
                    next.overs = 0;
                }
            }
        }
        EventBody::Unknown { .. } => {}
    }

    carry_and_clamp(next)
}

/// Fold a sequence of events in order. Equivalent to repeated [`fold`].
pub fn fold_all<'a>(
    summary: ScoreboardSummary,
    events: impl IntoIterator<Item = &'a MatchEvent>,
    policy: InningsResetPolicy,
) -> ScoreboardSummary {
    events
        .into_iter()
        .fold(summary, |acc, event| fold(acc, event, policy))
}

/// Apply the over-carry, then the clamps, in that order.
fn carry_and_clamp(mut summary: ScoreboardSummary) -> ScoreboardSummary {
    while summary.balls >= ScoreboardSummary::BALLS_PER_OVER {
        summary.overs = summary.overs.saturating_add(1);
        summary.balls = summary
            .balls
            .saturating_sub(ScoreboardSummary::BALLS_PER_OVER);
    }

    summary.wickets = summary.wickets.min(ScoreboardSummary::MAX_WICKETS);
    summary.runs = summary.runs.min(ScoreboardSummary::MAX_RUNS);
    summary.overs = summary.overs.min(ScoreboardSummary::MAX_OVERS);
    summary
}
