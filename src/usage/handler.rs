//! The usage-statistics handler: the one dispatch point pairing tracked
//! context calls with their emission records.
//!
//! Instrumentation lives here rather than on individual methods, so a new
//! backend (or an override of an existing operation) cannot lose events:
//! anything routed through [`UsageStatsHandler::track`] gets the
//! initialization-then-completion pair whenever its method is in the
//! registry, and runs silently untracked otherwise.

use crate::config::Config;
use crate::context::ops::{ContextMethod, DATA_CONTEXT_OWNER};
use crate::error::ContextResult;
use crate::usage::events::UsageEvent;
use crate::usage::http::HttpSink;
use crate::usage::message::UsageMessage;
use crate::usage::registry;
use crate::usage::sink::{TracingSink, UsageSink};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Delivery counters for one handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HandlerStats {
    /// Records the sink accepted
    pub emitted_total: u64,
    /// Records the sink refused (logged and forgotten)
    pub failed_total: u64,
}

/// Pairs tracked context calls with usage emissions.
///
/// One handler per context instance. All state is interior so tracked
/// dispatch works from `&self`; the first-call flag is what makes the
/// context-initialized event fire exactly once per context lifetime.
pub struct UsageStatsHandler {
    sink: Arc<dyn UsageSink>,
    enabled: bool,
    data_context_id: Uuid,
    instance_id: Uuid,
    init_emitted: AtomicBool,
    emitted_total: AtomicU64,
    failed_total: AtomicU64,
}

impl UsageStatsHandler {
    /// Create a handler delivering to `sink`.
    pub fn new(sink: impl UsageSink + 'static, data_context_id: Uuid, enabled: bool) -> Self {
        Self {
            sink: Arc::new(sink),
            enabled,
            data_context_id,
            instance_id: Uuid::new_v4(),
            init_emitted: AtomicBool::new(false),
            emitted_total: AtomicU64::new(0),
            failed_total: AtomicU64::new(0),
        }
    }

    /// Handler that runs every operation untracked.
    pub fn disabled(data_context_id: Uuid) -> Self {
        Self::new(TracingSink, data_context_id, false)
    }

    /// Handler configured from `config`: HTTP delivery to the collector when
    /// usage statistics are enabled, disabled otherwise.
    pub fn from_config(config: &Config, data_context_id: Uuid) -> Self {
        if config.usage_statistics_enabled {
            let sink = HttpSink::new(config.usage_statistics_url.clone(), config.request_timeout);
            Self::new(sink, data_context_id, true)
        } else {
            Self::disabled(data_context_id)
        }
    }

    /// Whether this handler emits at all.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Installation identity stamped on records.
    pub fn data_context_id(&self) -> Uuid {
        self.data_context_id
    }

    /// Instance identity stamped on records.
    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    /// Current delivery counters.
    pub fn stats(&self) -> HandlerStats {
        HandlerStats {
            emitted_total: self.emitted_total.load(Ordering::Relaxed),
            failed_total: self.failed_total.load(Ordering::Relaxed),
        }
    }

    /// Route one public call through instrumentation.
    ///
    /// The registry decides whether the method is tracked. Tracked calls emit
    /// the context-initialized record first (once per handler), run the
    /// operation, then emit a completion record carrying the outcome flag.
    /// Untracked calls run the operation and nothing else. The operation's
    /// result is returned untouched either way; emission can never fail or
    /// alter the call.
    pub fn track<T>(
        &self,
        method: ContextMethod,
        op: impl FnOnce() -> ContextResult<T>,
    ) -> ContextResult<T> {
        let event = match registry::lookup(DATA_CONTEXT_OWNER, method.as_str()) {
            Some(event) => event,
            None => return op(),
        };
        if !self.enabled {
            return op();
        }

        self.emit_init_once();
        let result = op();
        let message = UsageMessage::new(event, self.data_context_id, self.instance_id)
            .with_success(result.is_ok());
        self.emit(message);
        result
    }

    /// Send an ad-hoc event outside the tracked dispatch path.
    pub fn send_event(&self, message: UsageMessage) {
        if !self.enabled {
            return;
        }
        self.emit(message);
    }

    /// Build a record stamped with this handler's identities.
    pub fn message(&self, event: UsageEvent) -> UsageMessage {
        UsageMessage::new(event, self.data_context_id, self.instance_id)
    }

    /// Block until the sink has delivered everything it buffered.
    pub fn flush(&self) {
        if let Err(error) = self.sink.flush() {
            tracing::debug!(%error, "usage flush failed");
        }
    }

    fn emit_init_once(&self) {
        if self.init_emitted.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(event) = registry::lookup(DATA_CONTEXT_OWNER, registry::CONSTRUCTOR_METHOD) {
            self.emit(UsageMessage::new(
                event,
                self.data_context_id,
                self.instance_id,
            ));
        }
    }

    fn emit(&self, message: UsageMessage) {
        match self.sink.emit(&message) {
            Ok(()) => {
                self.emitted_total.fetch_add(1, Ordering::Relaxed);
            }
            Err(error) => {
                self.failed_total.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(event = %message.event, %error, "usage emission failed");
            }
        }
    }
}

impl std::fmt::Debug for UsageStatsHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsageStatsHandler")
            .field("enabled", &self.enabled)
            .field("data_context_id", &self.data_context_id)
            .field("instance_id", &self.instance_id)
            .finish_non_exhaustive()
    }
}
