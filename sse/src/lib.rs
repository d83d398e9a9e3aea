//! Server-Sent Events (SSE) core for the message relay.
//!
//! This crate holds everything that is not HTTP glue: the shared message
//! queue that the publish endpoints feed, the wire-format frame type, and
//! the burst generator that drains one queued message into a finite,
//! timed SSE stream.
//!
//! # Architecture
//!
//! - **Single shared queue**: one [`queue::MessageQueue`] is constructed at
//!   process start and handed to both the publish controllers (producers)
//!   and the stream handler (consumers). There is no module-level global;
//!   tests build their own fresh queues.
//! - **Competing consumers**: if several streams are connected at once they
//!   race for queue items. Exactly one consumer receives any given payload.
//! - **Finite streams**: each stream connection serves exactly one message.
//!   The generator emits a handshake keepalive, waits for a payload, replays
//!   it as a timed burst, emits a close marker, and terminates.
//! - **Ephemeral messages**: nothing is persisted. A message published while
//!   no stream is connected waits in the queue until a consumer arrives or
//!   the process exits.
//!
//! # Message flow
//!
//! 1. Client POSTs to `/api/messages` or `/publish`
//! 2. Controller validates the body and calls [`queue::MessageQueue::enqueue`]
//! 3. A stream connection's [`stream::BurstGenerator`] dequeues the payload
//! 4. The generator derives one frame per burst step and the close frame
//! 5. Frames are serialized by [`frame::EventPayload`] and written to the
//!    client socket by axum's `Sse` response
//!
//! # Modules
//!
//! - `queue`: blocking FIFO queue with timeout-aware dequeue
//! - `frame`: event payload and SSE wire formatting
//! - `stream`: burst generator state machine and axum stream glue

pub mod frame;
pub mod queue;
pub mod stream;

pub use frame::EventPayload;
pub use queue::MessageQueue;
