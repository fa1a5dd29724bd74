//! Randomized event generator standing in for a live network feed.
//!
//! The generator synthesizes one event per producer tick: mostly legal
//! deliveries with a realistic run distribution, the occasional
//! boundary, wicket, or status line, and (rarely) an event with an
//! unrecognized kind to exercise the feed-only path the way a flaky
//! real-world feed would. Batters and bowlers are drawn from a built-in
//! name pool. A fixed seed makes a run reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use stumpcast_core::source::EventSource;
use stumpcast_types::{Dismissal, MatchEvent};

// -----------------------------------------------------------------------
// Configuration
// -----------------------------------------------------------------------

/// Configuration for the event generator, loaded from `stumpcast.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratorConfig {
    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Percentage chance (0-100) that a tick produces an event with an
    /// unrecognized kind, simulating a misbehaving upstream feed.
    #[serde(default = "default_unknown_pct")]
    pub unknown_pct: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            unknown_pct: default_unknown_pct(),
        }
    }
}

const fn default_seed() -> u64 {
    42
}

const fn default_unknown_pct() -> u32 {
    2
}

// -----------------------------------------------------------------------
// Name pools
// -----------------------------------------------------------------------

/// Built-in pool of batter names.
const BATTERS: &[&str] = &[
    "Sharma", "Head", "Khan", "Williamson", "Babar", "Root", "Kohli",
    "Warner", "Stokes", "Labuschagne", "Gill", "Brook",
];

/// Built-in pool of bowler names.
const BOWLERS: &[&str] = &[
    "Bumrah", "Starc", "Rabada", "Shaheen", "Cummins", "Anderson",
    "Jadeja", "Lyon", "Rashid", "Boult",
];

/// Status lines the generator can emit. The innings-break line carries
/// the marker phrase the accumulator watches for.
const STATUS_LINES: &[&str] = &[
    "Players taking drinks",
    "Rain delay, covers coming on",
    "New innings underway",
    "Strategic timeout",
];

// -----------------------------------------------------------------------
// Generator
// -----------------------------------------------------------------------

/// A seeded random source of match events.
#[derive(Debug)]
pub struct RandomEventSource {
    /// Seeded RNG driving all choices.
    rng: StdRng,
    /// Chance (0-100) of an unrecognized event kind.
    unknown_pct: u32,
}

impl RandomEventSource {
    /// Create a generator from configuration.
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            rng: StdRng::seed_from_u64(config.seed),
            unknown_pct: config.unknown_pct.min(100),
        }
    }

    /// Pick a random entry from a non-empty pool.
    fn pick(&mut self, pool: &[&str]) -> Option<String> {
        if pool.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..pool.len());
        pool.get(idx).map(|s| (*s).to_owned())
    }

    /// Runs off the bat for a non-boundary delivery: dots and singles
    /// dominate, threes are rare.
    fn delivery_runs(&mut self) -> u32 {
        match self.rng.random_range(0_u32..100) {
            0..=44 => 0,
            45..=74 => 1,
            75..=89 => 2,
            _ => 3,
        }
    }

    /// A random dismissal mode.
    fn dismissal(&mut self) -> Dismissal {
        const MODES: &[Dismissal] = &[
            Dismissal::Bowled,
            Dismissal::Caught,
            Dismissal::Lbw,
            Dismissal::RunOut,
            Dismissal::Stumped,
        ];
        let idx = self.rng.random_range(0..MODES.len());
        MODES.get(idx).copied().unwrap_or(Dismissal::Caught)
    }
}

impl EventSource for RandomEventSource {
    fn next_event(&mut self) -> Option<MatchEvent> {
        if self.rng.random_range(0_u32..100) < self.unknown_pct {
            return Some(MatchEvent::unknown(
                "telemetry",
                serde_json::json!({"signal": self.rng.random_range(0_u32..1000)}),
            ));
        }

        let batter = self.pick(BATTERS);
        let bowler = self.pick(BOWLERS);

        let event = match self.rng.random_range(0_u32..100) {
            // Ordinary delivery.
            0..=69 => MatchEvent::ball(self.delivery_runs(), batter, bowler),
            // Boundary: four or six.
            70..=84 => {
                let runs = if self.rng.random_bool(0.3) { 6 } else { 4 };
                MatchEvent::boundary(runs, batter)
            }
            // Wicket.
            85..=93 => MatchEvent::wicket(Some(self.dismissal()), batter, bowler),
            // Status line.
            _ => {
                let line = self
                    .pick(STATUS_LINES)
                    .unwrap_or_else(|| String::from("Play continues"));
                MatchEvent::status(line)
            }
        };

        Some(event)
    }
}
