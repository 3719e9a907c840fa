//! Lifecycle events emitted during reasoning runs.
//!
//! Emission is fire-and-forget: sinks must never block the reasoning loop
//! and are never awaited for correctness. The default implementation pushes
//! events onto an unbounded channel that a separate observer drains.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

/// A single lifecycle event with a structured payload.
///
/// Event names follow the `reasoning.*` convention: `reasoning.started`,
/// `reasoning.step`, `reasoning.aborted`, `reasoning.completed`,
/// `reasoning.consensus`. Payloads always include the `goal`.
#[derive(Debug, Clone, Serialize)]
pub struct ReasoningEvent {
    /// Event name.
    pub name: String,
    /// Structured payload.
    pub payload: Value,
    /// Emission timestamp.
    pub emitted_at: DateTime<Utc>,
}

impl ReasoningEvent {
    /// Create a new event
    pub fn new(name: impl Into<String>, payload: Value) -> Self {
        Self {
            name: name.into(),
            payload,
            emitted_at: Utc::now(),
        }
    }
}

/// Sink for lifecycle events. Implementations must not block.
pub trait EventSink: Send + Sync {
    /// Emit an event. Has no return value; delivery failures are swallowed.
    fn emit(&self, event: ReasoningEvent);
}

/// Event sink that pushes onto an unbounded channel.
///
/// The reasoning loop never waits on the receiver; if the observer drops
/// its end, subsequent events are discarded.
#[derive(Clone)]
pub struct ChannelEventSink {
    tx: UnboundedSender<ReasoningEvent>,
}

impl ChannelEventSink {
    /// Create a sink and the receiver that drains it
    pub fn new() -> (Self, UnboundedReceiver<ReasoningEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: ReasoningEvent) {
        if self.tx.send(event).is_err() {
            debug!("event receiver dropped, discarding event");
        }
    }
}

/// Sink that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn emit(&self, _event: ReasoningEvent) {}
}
