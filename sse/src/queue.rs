use crate::frame::EventPayload;
use log::*;
use serde_json::Value;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::{Mutex, Semaphore};

/// Outcome of a bounded-wait dequeue.
#[derive(Debug, Clone, PartialEq)]
pub enum Dequeued {
    Item(EventPayload),
    TimedOut,
    Closed,
}

/// Unbounded, strict-FIFO queue shared between the publish endpoints
/// (producers) and stream connections (consumers).
///
/// The semaphore carries exactly one permit per queued item, so a consumer
/// that wins a permit is guaranteed an item and no wakeup is ever lost,
/// even with several consumers blocked at once. Depth is unbounded; if
/// producers outpace consumers the queue simply grows.
pub struct MessageQueue {
    items: Mutex<VecDeque<EventPayload>>,
    ready: Semaphore,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            ready: Semaphore::new(0),
        }
    }

    /// Append a payload stamped with the current time and wake one waiting
    /// consumer.
    pub async fn enqueue(&self, event: &str, data: Value) {
        self.push(EventPayload::new(event, data)).await;
    }

    /// Append an already-built payload. Used by tests that need fixed
    /// timestamps.
    pub async fn push(&self, payload: EventPayload) {
        trace!("Enqueueing '{}' event", payload.event_type());
        self.items.lock().await.push_back(payload);
        self.ready.add_permits(1);
    }

    /// Wait indefinitely for the next payload. Returns `None` only after
    /// [`MessageQueue::close`] has been called.
    pub async fn dequeue(&self) -> Option<EventPayload> {
        let permit = self.ready.acquire().await.ok()?;
        permit.forget();
        self.items.lock().await.pop_front()
    }

    /// Wait for the next payload, giving up after `timeout`.
    ///
    /// The timeout is surfaced as a distinguishable result rather than an
    /// error; a cancelled wait consumes no permit.
    pub async fn dequeue_timeout(&self, timeout: Duration) -> Dequeued {
        match tokio::time::timeout(timeout, self.ready.acquire()).await {
            Err(_elapsed) => Dequeued::TimedOut,
            Ok(Err(_closed)) => Dequeued::Closed,
            Ok(Ok(permit)) => {
                permit.forget();
                match self.items.lock().await.pop_front() {
                    Some(payload) => Dequeued::Item(payload),
                    None => Dequeued::Closed,
                }
            }
        }
    }

    /// Current number of queued payloads.
    pub async fn depth(&self) -> usize {
        self.items.lock().await.len()
    }

    /// Release every blocked consumer with a `Closed` result. Items already
    /// queued are discarded; the queue accepts no further dequeues.
    pub fn close(&self) {
        debug!("Closing message queue");
        self.ready.close();
    }
}

impl Default for MessageQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_dequeue_preserves_fifo_order() {
        let queue = MessageQueue::new();
        queue.enqueue("message", json!({"message": "first"})).await;
        queue.enqueue("message", json!({"message": "second"})).await;

        let first = queue.dequeue().await.unwrap();
        let second = queue.dequeue().await.unwrap();

        assert_eq!(first.data, json!({"message": "first"}));
        assert_eq!(second.data, json!({"message": "second"}));
        assert_eq!(queue.depth().await, 0);
    }

    #[tokio::test]
    async fn test_blocked_dequeue_is_woken_by_later_enqueue() {
        let queue = Arc::new(MessageQueue::new());

        let consumer = {
            let queue = Arc::clone(&queue);
            tokio::spawn(async move { queue.dequeue().await })
        };

        // Give the consumer a chance to block before producing.
        tokio::task::yield_now().await;
        queue.enqueue("message", json!({"message": "late"})).await;

        let payload = consumer.await.unwrap().unwrap();
        assert_eq!(payload.data, json!({"message": "late"}));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dequeue_timeout_returns_timed_out_on_empty_queue() {
        let queue = MessageQueue::new();

        let outcome = queue.dequeue_timeout(Duration::from_secs(15)).await;
        assert_eq!(outcome, Dequeued::TimedOut);
    }

    #[tokio::test]
    async fn test_dequeue_timeout_returns_item_when_available() {
        let queue = MessageQueue::new();
        queue.enqueue("message", json!({"message": "hi"})).await;

        match queue.dequeue_timeout(Duration::from_secs(1)).await {
            Dequeued::Item(payload) => assert_eq!(payload.data, json!({"message": "hi"})),
            other => panic!("expected item, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_close_releases_blocked_consumers() {
        let queue = Arc::new(MessageQueue::new());

        let consumer = {
            let queue = Arc::clone(&queue);
            tokio::spawn(async move { queue.dequeue().await })
        };

        tokio::task::yield_now().await;
        queue.close();

        assert_eq!(consumer.await.unwrap(), None);
        assert_eq!(
            queue.dequeue_timeout(Duration::from_millis(10)).await,
            Dequeued::Closed
        );
    }

    #[tokio::test]
    async fn test_competing_consumers_receive_disjoint_items() {
        let queue = Arc::new(MessageQueue::new());
        queue.enqueue("message", json!({"message": "a"})).await;
        queue.enqueue("message", json!({"message": "b"})).await;

        let mut handles = Vec::new();
        for _ in 0..2 {
            let queue = Arc::clone(&queue);
            handles.push(tokio::spawn(async move { queue.dequeue().await }));
        }

        let mut seen = Vec::new();
        for handle in handles {
            let payload = handle.await.unwrap().unwrap();
            seen.push(payload.data["message"].as_str().unwrap().to_string());
        }

        seen.sort();
        assert_eq!(seen, vec!["a", "b"]);
        assert_eq!(queue.depth().await, 0);
    }
}
