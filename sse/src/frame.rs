use axum::response::sse::Event;
use log::*;
use serde::Serialize;
use serde_json::{Map, Value};
use std::time::{SystemTime, UNIX_EPOCH};

/// Event type used when a payload does not name one.
pub const DEFAULT_EVENT_TYPE: &str = "message";

/// One logical event as it sits in the queue and as it is framed on the wire.
///
/// `timestamp` is floating-point seconds since the Unix epoch, matching what
/// the demo front end expects inside the `data:` JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct EventPayload {
    pub event: String,
    pub data: Value,
    pub timestamp: f64,
}

/// The exact JSON object carried on the `data:` line. A named struct keeps
/// the field order deterministic so formatting is byte-stable.
#[derive(Serialize)]
struct WireData<'a> {
    timestamp: f64,
    data: &'a Value,
}

impl EventPayload {
    /// Build a payload stamped with the current wall-clock time.
    pub fn new(event: &str, data: Value) -> Self {
        Self::with_timestamp(event, data, unix_timestamp())
    }

    /// Build a payload with an explicit timestamp.
    pub fn with_timestamp(event: &str, data: Value, timestamp: f64) -> Self {
        Self {
            event: event.to_string(),
            data,
            timestamp,
        }
    }

    /// The wire event type. Payloads that never named one format as the
    /// default `message` type.
    pub fn event_type(&self) -> &str {
        if self.event.is_empty() {
            DEFAULT_EVENT_TYPE
        } else {
            &self.event
        }
    }

    /// Serialize the `data:` line contents: `{"timestamp": .., "data": ..}`.
    pub fn data_json(&self) -> String {
        let wire = WireData {
            timestamp: self.timestamp,
            data: &self.data,
        };

        match serde_json::to_string(&wire) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize SSE event data: {e}");
                String::from("{}")
            }
        }
    }

    /// Render the full wire frame: `event: <type>\ndata: <json>\n\n`.
    pub fn wire_format(&self) -> String {
        format!("event: {}\ndata: {}\n\n", self.event_type(), self.data_json())
    }

    /// Convert into the axum SSE event that produces [`Self::wire_format`]
    /// on the socket.
    pub fn to_sse_event(&self) -> Event {
        Event::default()
            .event(self.event_type())
            .data(self.data_json())
    }
}

/// Wrap non-object data under a `value` key so every emitted frame carries
/// a JSON object in its `data` field.
pub fn coerce_object(data: Value) -> Map<String, Value> {
    match data {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            map
        }
    }
}

fn unix_timestamp() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}
