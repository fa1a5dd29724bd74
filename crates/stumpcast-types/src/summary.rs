//! The running scoreboard summary derived from the event stream.
//!
//! A [`ScoreboardSummary`] is never mutated in place by consumers: the
//! accumulator folds events into successive summary values, and the
//! pipeline replaces its copy wholesale. Totals are clamped at cricket's
//! domain boundaries -- clamping is a silent, saturating, idempotent
//! policy, not an error.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Running match totals displayed on the scoreboard.
///
/// Invariant: `balls < 6` -- whenever a fold brings the raw ball count to
/// six, it carries into `overs` and resets modulo six.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ScoreboardSummary {
    /// Total runs, clamped to `[0, 300]`.
    pub runs: u32,
    /// Wickets fallen, clamped to `[0, 10]`.
    pub wickets: u32,
    /// Completed overs, clamped to `[0, 50]`.
    pub overs: u32,
    /// Balls bowled in the current over, always in `[0, 5]`.
    pub balls: u32,
}

impl ScoreboardSummary {
    /// Maximum runs the scoreboard will display.
    pub const MAX_RUNS: u32 = 300;
    /// Maximum wickets in an innings.
    pub const MAX_WICKETS: u32 = 10;
    /// Maximum overs in the match format.
    pub const MAX_OVERS: u32 = 50;
    /// Legal deliveries per over.
    pub const BALLS_PER_OVER: u32 = 6;

    /// The all-zero summary a pipeline starts from (and resets to).
    pub const fn zero() -> Self {
        Self {
            runs: 0,
            wickets: 0,
            overs: 0,
            balls: 0,
        }
    }

    /// Whether every field is within its documented range.
    pub const fn in_range(&self) -> bool {
        self.runs <= Self::MAX_RUNS
            && self.wickets <= Self::MAX_WICKETS
            && self.overs <= Self::MAX_OVERS
            && self.balls < Self::BALLS_PER_OVER
    }
}

impl core::fmt::Display for ScoreboardSummary {
    /// Conventional scoreline: `runs/wickets (overs.balls)`.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}/{} ({}.{})",
            self.runs, self.wickets, self.overs, self.balls
        )
    }
}
