//! Observer API server for the Stumpcast live score pipeline.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`WebSocket` endpoint** (`/ws/score`) for real-time score update
//!   streaming via [`tokio::sync::broadcast`]
//! - **REST endpoints** for the two published views: the feed
//!   (`/api/feed`) and the scoreboard summary (`/api/summary`)
//! - **Minimal HTML scoreboard** (`GET /`) showing the current
//!   scoreline and links to API endpoints
//!
//! # Architecture
//!
//! The observer reads from an in-memory [`ScoreSnapshot`] that the
//! engine replaces after each published drain. All REST reads are
//! served from this snapshot so the observer never blocks the pipeline.
//! `WebSocket` clients receive score updates via a broadcast channel
//! with automatic lag handling.
//!
//! [`ScoreSnapshot`]: state::ScoreSnapshot

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{spawn_observer, start_server, ServerConfig, ServerError};
pub use state::{AppState, ScoreBroadcast, ScoreSnapshot};
