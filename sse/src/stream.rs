use crate::frame::{coerce_object, EventPayload};
use crate::queue::MessageQueue;
use async_stream::stream;
use axum::response::sse::Event;
use futures::Stream;
use log::*;
use serde_json::{json, Map, Value};
use std::convert::Infallible;
use std::mem;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

/// Shape of the burst replayed for each queued message.
#[derive(Debug, Clone)]
pub struct BurstConfig {
    /// Number of frames emitted per message.
    pub count: u32,
    /// Delay between consecutive frames.
    pub interval: Duration,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            count: 3,
            interval: Duration::from_secs(1),
        }
    }
}

/// Protocol position of a stream connection. Each connection walks
/// `Handshake -> Waiting -> Emitting(1..=count) -> Closing -> Done`
/// exactly once; the machine never returns to `Waiting`.
enum BurstState {
    Handshake,
    Waiting,
    Emitting { base: EventPayload, next: u32 },
    Closing { base: EventPayload },
    Done,
}

/// Drives one stream connection's event protocol against the shared queue.
///
/// Suspension points are explicit: the queue wait in `Waiting` and the
/// inter-frame sleep in `Emitting`. Both are plain `.await`s, so dropping
/// the generator (axum does this when the client disconnects) cancels them
/// promptly without leaking a blocked task.
pub struct BurstGenerator {
    queue: Arc<MessageQueue>,
    config: BurstConfig,
    state: BurstState,
}

impl BurstGenerator {
    pub fn new(queue: Arc<MessageQueue>, config: BurstConfig) -> Self {
        Self {
            queue,
            config,
            state: BurstState::Handshake,
        }
    }

    /// Advance the machine and produce the next frame, or `None` once the
    /// protocol has run to completion.
    pub async fn next_frame(&mut self) -> Option<EventPayload> {
        loop {
            match mem::replace(&mut self.state, BurstState::Done) {
                BurstState::Handshake => {
                    self.state = BurstState::Waiting;
                    return Some(EventPayload::new("keepalive", json!({"status": "connected"})));
                }
                BurstState::Waiting => match self.queue.dequeue().await {
                    Some(base) if self.config.count > 0 => {
                        self.state = BurstState::Emitting { base, next: 1 };
                    }
                    Some(base) => {
                        self.state = BurstState::Closing { base };
                    }
                    // Queue closed while waiting: end the stream without a
                    // close frame, there was never a message to bracket.
                    None => return None,
                },
                BurstState::Emitting { base, next } => {
                    if next > 1 {
                        sleep(self.config.interval).await;
                    }

                    let frame = burst_frame(&base, next, self.config.count);
                    self.state = if next >= self.config.count {
                        BurstState::Closing { base }
                    } else {
                        BurstState::Emitting {
                            base,
                            next: next + 1,
                        }
                    };
                    return Some(frame);
                }
                BurstState::Closing { base } => {
                    return Some(close_frame(&base));
                }
                BurstState::Done => return None,
            }
        }
    }
}

/// Derive burst frame `sequence` of `total` from the base payload: the base
/// data merged with the burst counters, stamped with a fresh timestamp.
fn burst_frame(base: &EventPayload, sequence: u32, total: u32) -> EventPayload {
    let mut data = coerce_object(base.data.clone());
    data.insert("sequence".to_string(), json!(sequence));
    data.insert("total".to_string(), json!(total));
    data.insert("remaining".to_string(), json!(total - sequence));

    EventPayload::new(base.event_type(), Value::Object(data))
}

/// The terminal frame. Carries the base data's `message` key when present so
/// clients can tell which message the stream served.
fn close_frame(base: &EventPayload) -> EventPayload {
    let mut data = Map::new();
    data.insert("status".to_string(), json!("complete"));

    if let Some(message) = base.data.get("message") {
        data.insert("message".to_string(), message.clone());
    }

    EventPayload::new("close", Value::Object(data))
}

/// Bridge a [`BurstGenerator`] to the stream of SSE events that axum's
/// `Sse` response writes to the socket.
pub fn burst_stream(
    queue: Arc<MessageQueue>,
    config: BurstConfig,
) -> impl Stream<Item = Result<Event, Infallible>> {
    stream! {
        let mut generator = BurstGenerator::new(queue, config);

        while let Some(frame) = generator.next_frame().await {
            yield Ok(frame.to_sse_event());
        }

        debug!("Burst stream complete, connection closing");
    }
}
