use config::Config;
use sse::queue::MessageQueue;
use std::sync::Arc;

pub mod config;
pub mod logging;

// Service-level state containing only infrastructure concerns
// Needs to implement Clone to be able to be passed into Router as State
#[derive(Clone)]
pub struct AppState {
    pub message_queue: Arc<MessageQueue>,
    pub config: Config,
}

impl AppState {
    /// Build the process-wide state: one shared message queue plus the
    /// parsed configuration. Constructed once in `main` and injected into
    /// every handler; tests build their own instances with fresh queues.
    pub fn new(app_config: Config) -> Self {
        Self {
            message_queue: Arc::new(MessageQueue::new()),
            config: app_config,
        }
    }

    /// A cloned handle to the shared queue, for consumers that outlive a
    /// single handler call (the stream generator, shutdown hooks).
    pub fn queue(&self) -> Arc<MessageQueue> {
        Arc::clone(&self.message_queue)
    }

    pub fn queue_ref(&self) -> &MessageQueue {
        self.message_queue.as_ref()
    }
}
