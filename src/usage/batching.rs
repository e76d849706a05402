//! Background batching for usage delivery.
//!
//! Wraps any sink with a bounded queue and a worker thread so the caller's
//! stack never waits on the network. Dispatch itself stays synchronous:
//! enqueueing is the delivery the handler observes. Records queued at drop
//! time are delivered before the worker exits.

use crate::error::SinkError;
use crate::usage::message::UsageMessage;
use crate::usage::sink::UsageSink;
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Queue capacity before records are dropped.
const DEFAULT_CAPACITY: usize = 256;

enum Command {
    Emit(UsageMessage),
    Flush(mpsc::Sender<()>),
    Shutdown,
}

/// Sink that forwards records to an inner sink on a worker thread.
pub struct BatchingSink {
    tx: SyncSender<Command>,
    worker: Option<JoinHandle<()>>,
}

impl BatchingSink {
    /// Wrap `inner` with the default queue capacity.
    pub fn new(inner: impl UsageSink + 'static) -> Self {
        Self::with_capacity(inner, DEFAULT_CAPACITY)
    }

    /// Wrap `inner` with an explicit queue capacity.
    pub fn with_capacity(inner: impl UsageSink + 'static, capacity: usize) -> Self {
        let (tx, rx) = mpsc::sync_channel(capacity);
        let inner: Arc<dyn UsageSink> = Arc::new(inner);
        let worker = thread::spawn(move || run_worker(rx, inner));
        Self {
            tx,
            worker: Some(worker),
        }
    }
}

fn run_worker(rx: Receiver<Command>, inner: Arc<dyn UsageSink>) {
    for command in rx {
        match command {
            Command::Emit(message) => {
                if let Err(error) = inner.emit(&message) {
                    tracing::debug!(%error, event = %message.event, "queued usage record dropped");
                }
            }
            Command::Flush(ack) => {
                if let Err(error) = inner.flush() {
                    tracing::debug!(%error, "usage flush failed");
                }
                let _ = ack.send(());
            }
            Command::Shutdown => break,
        }
    }
    if let Err(error) = inner.flush() {
        tracing::debug!(%error, "usage flush failed during shutdown");
    }
}

impl UsageSink for BatchingSink {
    fn emit(&self, message: &UsageMessage) -> Result<(), SinkError> {
        match self.tx.try_send(Command::Emit(message.clone())) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(SinkError::Delivery(
                "usage queue full, record dropped".to_string(),
            )),
            Err(TrySendError::Disconnected(_)) => Err(SinkError::Closed),
        }
    }

    /// Block until every record queued so far has been handed to the inner
    /// sink and the inner sink itself has flushed.
    fn flush(&self) -> Result<(), SinkError> {
        let (ack_tx, ack_rx) = mpsc::channel();
        self.tx
            .send(Command::Flush(ack_tx))
            .map_err(|_| SinkError::Closed)?;
        ack_rx.recv().map_err(|_| SinkError::Closed)
    }
}

impl Drop for BatchingSink {
    fn drop(&mut self) {
        let _ = self.tx.send(Command::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
