//! REST API endpoint handlers for the Observer server.
//!
//! All handlers read from the in-memory [`ScoreSnapshot`] via the
//! shared [`AppState`]. The pipeline is never consulted directly.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML scoreboard page |
//! | `GET` | `/api/feed` | Feed events, most recent first |
//! | `GET` | `/api/summary` | Current scoreboard summary |
//!
//! [`ScoreSnapshot`]: crate::state::ScoreSnapshot

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};
use axum::Json;

use crate::error::ObserverError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters for the `GET /api/feed` endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct FeedQuery {
    /// Maximum number of events to return (default: entire feed).
    pub limit: Option<usize>,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML scoreboard page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing the current scoreline and API links.
///
/// This is the placeholder scoreboard until the dashboard frontend
/// consumes the `TypeScript` bindings.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.snapshot.read().await;
    let scoreline = snapshot.summary.to_string();
    let runs = snapshot.summary.runs;
    let wickets = snapshot.summary.wickets;
    let overs = format!("{}.{}", snapshot.summary.overs, snapshot.summary.balls);
    let feed_len = snapshot.feed.len();
    let sequence = snapshot.last_sequence;

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Stumpcast Observer</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        li::before {{ content: "GET "; color: #7ee787; font-weight: bold; }}
        .status {{ color: #3fb950; font-weight: bold; }}
        hr {{ border: none; border-top: 1px solid #30363d; margin: 1.5rem 0; }}
    </style>
</head>
<body>
    <h1>Stumpcast Observer</h1>
    <p class="subtitle">Live score feed server</p>

    <p>Status: <span class="status">LIVE</span> &mdash; {scoreline}</p>

    <div>
        <div class="metric">
            <div class="label">Runs</div>
            <div class="value">{runs}</div>
        </div>
        <div class="metric">
            <div class="label">Wickets</div>
            <div class="value">{wickets}</div>
        </div>
        <div class="metric">
            <div class="label">Overs</div>
            <div class="value">{overs}</div>
        </div>
        <div class="metric">
            <div class="label">Feed events</div>
            <div class="value">{feed_len}</div>
        </div>
        <div class="metric">
            <div class="label">Publications</div>
            <div class="value">{sequence}</div>
        </div>
    </div>

    <hr>

    <h2>API Endpoints</h2>
    <ul>
        <li><a href="/api/summary">/api/summary</a> -- Current scoreboard summary</li>
        <li><a href="/api/feed">/api/feed</a> -- Feed events, newest first (?limit=N)</li>
    </ul>

    <h2>WebSocket</h2>
    <ul>
        <li style="list-style:none;"><code>ws://host:port/ws/score</code> -- Live score update stream</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// GET /api/summary -- current scoreboard summary
// ---------------------------------------------------------------------------

/// Return the current scoreboard summary with its conventional
/// scoreline and publication metadata.
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let snapshot = state.snapshot.read().await;

    let body = serde_json::json!({
        "summary": snapshot.summary,
        "scoreline": snapshot.summary.to_string(),
        "last_sequence": snapshot.last_sequence,
        "updated_at": snapshot.updated_at,
    });

    Ok(Json(body))
}

// ---------------------------------------------------------------------------
// GET /api/feed -- feed events, newest first
// ---------------------------------------------------------------------------

/// Return the feed events, most recent first.
///
/// # Query Parameters
///
/// - `limit`: Maximum number of events to return (must be at least 1;
///   defaults to the entire feed).
pub async fn get_feed(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FeedQuery>,
) -> Result<impl IntoResponse, ObserverError> {
    if params.limit == Some(0) {
        return Err(ObserverError::InvalidQuery(String::from(
            "limit must be at least 1",
        )));
    }

    let snapshot = state.snapshot.read().await;

    let limit = params.limit.unwrap_or(snapshot.feed.len());
    let events: Vec<&stumpcast_types::MatchEvent> = snapshot.feed.iter().take(limit).collect();

    Ok(Json(serde_json::json!({
        "count": events.len(),
        "events": events,
    })))
}
