//! Emission sinks: where usage records go.
//!
//! The dispatch handler hands each record to exactly one sink, inline on the
//! caller's stack, and ignores everything about the outcome except logging
//! failures. Implementations decide what "receiving" means: retaining in
//! memory, logging, posting to the collector, or queueing for a worker.

use crate::error::SinkError;
use crate::usage::events::UsageEvent;
use crate::usage::message::UsageMessage;
use std::sync::{Arc, Mutex};

/// Destination for usage records.
pub trait UsageSink: Send + Sync {
    /// Deliver one record. Called inline by the dispatch handler, so
    /// implementations should return quickly or hand off internally.
    fn emit(&self, message: &UsageMessage) -> Result<(), SinkError>;

    /// Deliver anything still buffered. The default has nothing to do.
    fn flush(&self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Sink that retains every record in memory.
///
/// Clones share storage, which is what makes it the observation point for
/// tests: hand a clone to the handler, keep the original for assertions.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    messages: Arc<Mutex<Vec<UsageMessage>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every record received so far, in emission order.
    pub fn messages(&self) -> Vec<UsageMessage> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }

    /// The event identifiers received so far, in emission order.
    pub fn events(&self) -> Vec<UsageEvent> {
        self.messages()
            .into_iter()
            .map(|message| message.event)
            .collect()
    }

    /// Number of records received.
    pub fn len(&self) -> usize {
        self.messages.lock().map(|m| m.len()).unwrap_or(0)
    }

    /// Whether no records have been received.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Discard everything received so far.
    pub fn clear(&self) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.clear();
        }
    }
}

impl UsageSink for MemorySink {
    fn emit(&self, message: &UsageMessage) -> Result<(), SinkError> {
        let mut messages = self.messages.lock().map_err(|_| SinkError::Closed)?;
        messages.push(message.clone());
        Ok(())
    }
}

/// Sink that logs each record through `tracing` at debug level.
///
/// The destination of last resort: used when usage statistics are disabled
/// so the handler always has somewhere to point, and handy in development.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl UsageSink for TracingSink {
    fn emit(&self, message: &UsageMessage) -> Result<(), SinkError> {
        tracing::debug!(
            event = %message.event,
            success = ?message.success,
            data_context_id = %message.data_context_id,
            "usage record"
        );
        Ok(())
    }
}
