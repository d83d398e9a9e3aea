use anyhow::Result;
use eventsource_client::{self as es, Client};
use futures_util::stream::StreamExt;
use log::*;
use serde_json::Value;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: String,
    pub data: Value,
}

/// A live `/stream` connection feeding received events into a channel.
pub struct Connection {
    event_rx: mpsc::UnboundedReceiver<Event>,
    _handle: tokio::task::JoinHandle<()>,
}

impl Connection {
    pub fn establish(base_url: &str) -> Result<Self> {
        let url = format!("{}/stream", base_url);
        let (tx, rx) = mpsc::unbounded_channel();

        let client = es::ClientBuilder::for_url(&url)?.build();

        let handle = tokio::spawn(async move {
            let mut stream = client.stream();

            loop {
                match stream.next().await {
                    Some(Ok(es::SSE::Event(event))) => {
                        if let Ok(data) = serde_json::from_str(&event.data) {
                            let sse_event = Event {
                                event_type: event.event_type,
                                data,
                            };

                            if tx.send(sse_event).is_err() {
                                debug!("SSE receiver dropped");
                                break;
                            }
                        }
                    }
                    Some(Ok(es::SSE::Comment(_))) => {
                        // Ignore comments
                    }
                    Some(Err(e)) => {
                        // The relay closes the socket after the close frame;
                        // eventsource-client reports that as a stream error.
                        debug!("SSE stream ended: {e}");
                        break;
                    }
                    None => {
                        debug!("SSE stream ended");
                        break;
                    }
                }
            }
        });

        Ok(Self {
            event_rx: rx,
            _handle: handle,
        })
    }

    /// Wait until an event of the given type arrives, discarding others.
    pub async fn wait_for_event(&mut self, event_type: &str, timeout: Duration) -> Result<Event> {
        let deadline = Instant::now() + timeout;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                anyhow::bail!("Timed out waiting for '{event_type}' event");
            }

            match tokio::time::timeout(remaining, self.event_rx.recv()).await {
                Ok(Some(event)) if event.event_type == event_type => return Ok(event),
                Ok(Some(event)) => {
                    debug!("Skipping '{}' event", event.event_type);
                }
                Ok(None) => anyhow::bail!("Stream closed before '{event_type}' event"),
                Err(_) => anyhow::bail!("Timed out waiting for '{event_type}' event"),
            }
        }
    }

    /// Receive the next event of any type.
    pub async fn next_event(&mut self, timeout: Duration) -> Result<Event> {
        match tokio::time::timeout(timeout, self.event_rx.recv()).await {
            Ok(Some(event)) => Ok(event),
            Ok(None) => anyhow::bail!("Stream closed"),
            Err(_) => anyhow::bail!("Timed out waiting for next event"),
        }
    }
}
