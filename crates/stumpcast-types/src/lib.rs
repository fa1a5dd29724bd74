//! Shared type definitions for the Stumpcast live score pipeline.
//!
//! This crate is the single source of truth for the event vocabulary and
//! the scoreboard summary shared across the workspace. Types defined here
//! flow downstream to `TypeScript` via `ts-rs` for the scoreboard
//! dashboard.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for event identifiers
//! - [`enums`] -- Event kinds and dismissal modes
//! - [`events`] -- The [`MatchEvent`] tagged union and payload shapes
//! - [`wire`] -- Total decoding of raw producer records
//! - [`summary`] -- The running [`ScoreboardSummary`]

pub mod enums;
pub mod events;
pub mod ids;
pub mod summary;
pub mod wire;

// Re-export all public types at crate root for convenience.
pub use enums::{Dismissal, EventKind};
pub use events::{
    BallDetails, BoundaryDetails, EventBody, MatchEvent, StatusDetails, WicketDetails,
};
pub use ids::EventId;
pub use summary::ScoreboardSummary;
pub use wire::{RawEvent, DEFAULT_BOUNDARY_RUNS};

#[cfg(test)]
mod tests {
    //! Integration tests for type exports and `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs generates TypeScript bindings when types with
        // #[ts(export)] are used. Importing them here triggers generation.
        // The actual files are written to the `bindings/` directory
        // relative to the crate root.
        use ts_rs::TS;

        let _ = crate::ids::EventId::export_all();

        let _ = crate::enums::EventKind::export_all();
        let _ = crate::enums::Dismissal::export_all();

        let _ = crate::events::BallDetails::export_all();
        let _ = crate::events::BoundaryDetails::export_all();
        let _ = crate::events::WicketDetails::export_all();
        let _ = crate::events::StatusDetails::export_all();
        let _ = crate::events::EventBody::export_all();
        let _ = crate::events::MatchEvent::export_all();

        let _ = crate::summary::ScoreboardSummary::export_all();
    }
}
