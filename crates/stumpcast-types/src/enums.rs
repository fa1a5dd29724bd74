//! Enumeration types for the Stumpcast pipeline.
//!
//! The known event kinds recognized by the scoreboard accumulator, and
//! the dismissal modes a wicket event can carry. Anything outside the
//! known kind set is represented as `Unknown` on the event body, never
//! as a parse failure.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Event kinds
// ---------------------------------------------------------------------------

/// A recognized event kind on the wire.
///
/// The wire tag is matched case-insensitively; tags outside this set are
/// preserved verbatim on [`EventBody::Unknown`](crate::events::EventBody).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A legal delivery, scoring zero or more runs off the bat.
    Ball,
    /// A delivery reaching or clearing the boundary rope (4 or 6 runs).
    Boundary,
    /// A dismissal.
    Wicket,
    /// A match status transition (innings break, rain delay, result).
    MatchStatus,
}

impl EventKind {
    /// Parse a wire tag into a known kind, case-insensitively.
    ///
    /// Returns `None` for tags outside the known set; callers route
    /// those to the unknown-event path rather than failing.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "ball" => Some(Self::Ball),
            "boundary" => Some(Self::Boundary),
            "wicket" => Some(Self::Wicket),
            "match_status" | "status" => Some(Self::MatchStatus),
            _ => None,
        }
    }

    /// The canonical wire tag for this kind.
    pub const fn as_tag(self) -> &'static str {
        match self {
            Self::Ball => "ball",
            Self::Boundary => "boundary",
            Self::Wicket => "wicket",
            Self::MatchStatus => "match_status",
        }
    }
}

impl core::fmt::Display for EventKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_tag())
    }
}

// ---------------------------------------------------------------------------
// Dismissals
// ---------------------------------------------------------------------------

/// How a batter was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum Dismissal {
    /// The delivery hit the stumps.
    Bowled,
    /// The ball was caught before touching the ground.
    Caught,
    /// Leg before wicket.
    Lbw,
    /// Run out attempting a run.
    RunOut,
    /// Stumped by the wicket-keeper.
    Stumped,
}

impl Dismissal {
    /// Parse a wire label into a dismissal mode, case-insensitively.
    pub fn parse(label: &str) -> Option<Self> {
        match label.to_lowercase().as_str() {
            "bowled" => Some(Self::Bowled),
            "caught" => Some(Self::Caught),
            "lbw" => Some(Self::Lbw),
            "run_out" | "runout" => Some(Self::RunOut),
            "stumped" => Some(Self::Stumped),
            _ => None,
        }
    }
}

impl core::fmt::Display for Dismissal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            Self::Bowled => "bowled",
            Self::Caught => "caught",
            Self::Lbw => "lbw",
            Self::RunOut => "run out",
            Self::Stumped => "stumped",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parse_is_case_insensitive() {
        assert_eq!(EventKind::parse("BALL"), Some(EventKind::Ball));
        assert_eq!(EventKind::parse("Boundary"), Some(EventKind::Boundary));
        assert_eq!(EventKind::parse("wicket"), Some(EventKind::Wicket));
        assert_eq!(EventKind::parse("MATCH_STATUS"), Some(EventKind::MatchStatus));
    }

    #[test]
    fn kind_parse_rejects_unknown_tags() {
        assert_eq!(EventKind::parse("free_hit"), None);
        assert_eq!(EventKind::parse(""), None);
    }

    #[test]
    fn status_alias_parses() {
        assert_eq!(EventKind::parse("status"), Some(EventKind::MatchStatus));
    }

    #[test]
    fn dismissal_parse_aliases() {
        assert_eq!(Dismissal::parse("run_out"), Some(Dismissal::RunOut));
        assert_eq!(Dismissal::parse("runout"), Some(Dismissal::RunOut));
        assert_eq!(Dismissal::parse("caught behind"), None);
    }

    #[test]
    fn kind_tag_roundtrip() {
        for kind in [
            EventKind::Ball,
            EventKind::Boundary,
            EventKind::Wicket,
            EventKind::MatchStatus,
        ] {
            assert_eq!(EventKind::parse(kind.as_tag()), Some(kind));
        }
    }
}
