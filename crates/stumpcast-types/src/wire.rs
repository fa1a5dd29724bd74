//! Wire-format decoding for producer-supplied event records.
//!
//! Producers send loosely-shaped JSON records: a `type` tag, an optional
//! `payload`, and optional `id`/`timestamp` fields. [`RawEvent::into_event`]
//! is a total function -- it never fails. Malformed input is defaulted or
//! routed to the unknown-event path:
//!
//! - unknown `type` tags become [`EventBody::Unknown`] with tag and
//!   payload preserved verbatim
//! - a missing payload decodes as an empty record
//! - missing or non-numeric `runs` defaults to 0 for a ball and 4 for a
//!   boundary
//! - a missing, non-UUID, or unparseable `id` gets a pipeline-assigned
//!   [`EventId`] fallback
//! - timestamps accept RFC 3339 strings or epoch seconds/milliseconds;
//!   anything else defaults to the decode time

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::{Dismissal, EventKind};
use crate::events::{
    BallDetails, BoundaryDetails, EventBody, MatchEvent, StatusDetails, WicketDetails,
};
use crate::ids::EventId;

/// Default runs credited for a boundary with a missing or invalid payload.
pub const DEFAULT_BOUNDARY_RUNS: u32 = 4;

/// A producer event record as it arrives on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Producer-assigned event ID, if any.
    #[serde(default)]
    pub id: Option<String>,

    /// Producer-assigned timestamp: RFC 3339 string or epoch number.
    #[serde(default)]
    pub timestamp: Option<serde_json::Value>,

    /// The event kind tag.
    #[serde(rename = "type")]
    pub kind: String,

    /// Kind-dependent payload; absent means an empty record.
    #[serde(default)]
    pub payload: Option<serde_json::Value>,
}

impl RawEvent {
    /// Decode this record into a typed [`MatchEvent`]. Total -- applies
    /// the defaulting rules above instead of failing.
    pub fn into_event(self) -> MatchEvent {
        let id = parse_id(self.id.as_deref());
        let timestamp = parse_timestamp(self.timestamp.as_ref());
        let payload = self
            .payload
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        let body = match EventKind::parse(&self.kind) {
            Some(EventKind::Ball) => EventBody::Ball(BallDetails {
                runs: runs_or(&payload, 0),
                batter: opt_str(&payload, "batter"),
                bowler: opt_str(&payload, "bowler"),
            }),
            Some(EventKind::Boundary) => EventBody::Boundary(BoundaryDetails {
                runs: runs_or(&payload, DEFAULT_BOUNDARY_RUNS),
                batter: opt_str(&payload, "batter"),
            }),
            Some(EventKind::Wicket) => EventBody::Wicket(WicketDetails {
                dismissal: opt_str(&payload, "dismissal")
                    .as_deref()
                    .and_then(Dismissal::parse),
                batter: opt_str(&payload, "batter"),
                bowler: opt_str(&payload, "bowler"),
            }),
            Some(EventKind::MatchStatus) => EventBody::MatchStatus(StatusDetails {
                status: opt_str(&payload, "status").unwrap_or_default(),
            }),
            None => EventBody::Unknown {
                kind: self.kind,
                payload,
            },
        };

        MatchEvent {
            id,
            timestamp,
            body,
        }
    }
}

/// Parse a producer ID, assigning a fresh pipeline ID when the field is
/// missing or not a UUID. The producer's uniqueness contract is
/// best-effort either way; the feed only needs an opaque key.
fn parse_id(raw: Option<&str>) -> EventId {
    raw.and_then(|s| s.parse::<Uuid>().ok())
        .map_or_else(EventId::new, EventId::from)
}

/// Parse a producer timestamp: RFC 3339 string, epoch seconds, or epoch
/// milliseconds. Defaults to the decode time.
fn parse_timestamp(raw: Option<&serde_json::Value>) -> DateTime<Utc> {
    match raw {
        Some(serde_json::Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc)),
        Some(serde_json::Value::Number(n)) => n.as_i64().map_or_else(Utc::now, |epoch| {
            // Heuristic: values past the year 33658 in seconds are millis.
            let parsed = if epoch.unsigned_abs() >= 1_000_000_000_000 {
                DateTime::from_timestamp_millis(epoch)
            } else {
                DateTime::from_timestamp(epoch, 0)
            };
            parsed.unwrap_or_else(Utc::now)
        }),
        _ => Utc::now(),
    }
}

/// Extract `payload.runs` as a non-negative integer, defaulting otherwise.
fn runs_or(payload: &serde_json::Value, default: u32) -> u32 {
    payload
        .get("runs")
        .and_then(serde_json::Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(default)
}

/// Extract `payload[key]` as an owned string, if present.
fn opt_str(payload: &serde_json::Value, key: &str) -> Option<String> {
    payload
        .get(key)
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn raw(kind: &str, payload: serde_json::Value) -> RawEvent {
        RawEvent {
            id: None,
            timestamp: None,
            kind: kind.to_owned(),
            payload: Some(payload),
        }
    }

    #[test]
    fn ball_with_runs_decodes() {
        let event = raw("ball", serde_json::json!({"runs": 2, "batter": "Smith"})).into_event();
        match event.body {
            EventBody::Ball(details) => {
                assert_eq!(details.runs, 2);
                assert_eq!(details.batter.as_deref(), Some("Smith"));
            }
            other => panic!("expected ball, got {other:?}"),
        }
    }

    #[test]
    fn ball_missing_runs_defaults_to_zero() {
        let event = raw("ball", serde_json::json!({})).into_event();
        match event.body {
            EventBody::Ball(details) => assert_eq!(details.runs, 0),
            other => panic!("expected ball, got {other:?}"),
        }
    }

    #[test]
    fn ball_non_numeric_runs_defaults_to_zero() {
        let event = raw("ball", serde_json::json!({"runs": "two"})).into_event();
        match event.body {
            EventBody::Ball(details) => assert_eq!(details.runs, 0),
            other => panic!("expected ball, got {other:?}"),
        }
    }

    #[test]
    fn boundary_missing_runs_defaults_to_four() {
        let event = raw("boundary", serde_json::json!({})).into_event();
        match event.body {
            EventBody::Boundary(details) => assert_eq!(details.runs, DEFAULT_BOUNDARY_RUNS),
            other => panic!("expected boundary, got {other:?}"),
        }
    }

    #[test]
    fn missing_payload_decodes_as_empty_record() {
        let event = RawEvent {
            id: None,
            timestamp: None,
            kind: String::from("wicket"),
            payload: None,
        }
        .into_event();
        match event.body {
            EventBody::Wicket(details) => {
                assert_eq!(details.dismissal, None);
                assert_eq!(details.batter, None);
            }
            other => panic!("expected wicket, got {other:?}"),
        }
    }

    #[test]
    fn unknown_kind_preserved_verbatim() {
        let payload = serde_json::json!({"weird": [1, 2, 3]});
        let event = raw("Free_Hit", payload.clone()).into_event();
        match event.body {
            EventBody::Unknown { kind, payload: p } => {
                assert_eq!(kind, "Free_Hit");
                assert_eq!(p, payload);
            }
            other => panic!("expected unknown, got {other:?}"),
        }
    }

    #[test]
    fn producer_uuid_id_is_kept() {
        let uuid = Uuid::now_v7();
        let event = RawEvent {
            id: Some(uuid.to_string()),
            timestamp: None,
            kind: String::from("ball"),
            payload: None,
        }
        .into_event();
        assert_eq!(event.id.into_inner(), uuid);
    }

    #[test]
    fn non_uuid_id_gets_fallback() {
        let event = RawEvent {
            id: Some(String::from("delivery-42")),
            timestamp: None,
            kind: String::from("ball"),
            payload: None,
        }
        .into_event();
        assert_ne!(event.id.into_inner(), Uuid::nil());
    }

    #[test]
    fn rfc3339_timestamp_parses() {
        let event = RawEvent {
            id: None,
            timestamp: Some(serde_json::json!("2026-06-01T14:30:00Z")),
            kind: String::from("ball"),
            payload: None,
        }
        .into_event();
        assert_eq!(event.timestamp.to_rfc3339(), "2026-06-01T14:30:00+00:00");
    }

    #[test]
    fn epoch_seconds_timestamp_parses() {
        let event = RawEvent {
            id: None,
            timestamp: Some(serde_json::json!(1_750_000_000)),
            kind: String::from("ball"),
            payload: None,
        }
        .into_event();
        assert_eq!(event.timestamp.timestamp(), 1_750_000_000);
    }

    #[test]
    fn epoch_millis_timestamp_parses() {
        let event = RawEvent {
            id: None,
            timestamp: Some(serde_json::json!(1_750_000_000_000_i64)),
            kind: String::from("ball"),
            payload: None,
        }
        .into_event();
        assert_eq!(event.timestamp.timestamp(), 1_750_000_000);
    }

    #[test]
    fn status_text_is_extracted() {
        let event = raw("match_status", serde_json::json!({"status": "Rain delay"})).into_event();
        match event.body {
            EventBody::MatchStatus(details) => assert_eq!(details.status, "Rain delay"),
            other => panic!("expected status, got {other:?}"),
        }
    }

    #[test]
    fn wire_json_roundtrip() {
        let json = r#"{"type": "wicket", "payload": {"dismissal": "lbw", "batter": "Khan"}}"#;
        let raw: RawEvent = serde_json::from_str(json).unwrap();
        let event = raw.into_event();
        match event.body {
            EventBody::Wicket(details) => {
                assert_eq!(details.dismissal, Some(Dismissal::Lbw));
                assert_eq!(details.batter.as_deref(), Some("Khan"));
            }
            other => panic!("expected wicket, got {other:?}"),
        }
    }
}
