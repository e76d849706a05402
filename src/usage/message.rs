//! The usage record envelope handed to emission sinks.

use crate::usage::events::UsageEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Schema version reported on every record.
pub const MESSAGE_SCHEMA_VERSION: &str = "1.0.0";

/// A single usage record.
///
/// Built at call time by the handler and handed straight to the sink; the
/// handler never stores it. `event_payload` carries identifiers, counts and
/// flags only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UsageMessage {
    /// The event identifier
    pub event: UsageEvent,

    /// Content-free structured payload
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub event_payload: Value,

    /// Whether the underlying operation succeeded; absent for events with no
    /// operation outcome (initialization)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,

    /// When the record was created (UTC)
    pub event_time: DateTime<Utc>,

    /// Stable identity of the installation
    pub data_context_id: Uuid,

    /// Identity of the context instance that produced the record
    pub data_context_instance_id: Uuid,

    /// Record schema version
    pub version: String,

    /// Version of the toolkit that produced the record
    pub toolkit_version: String,
}

impl UsageMessage {
    /// Create a record for `event`, stamped with the current time.
    pub fn new(event: UsageEvent, data_context_id: Uuid, instance_id: Uuid) -> Self {
        Self {
            event,
            event_payload: Value::Null,
            success: None,
            event_time: Utc::now(),
            data_context_id,
            data_context_instance_id: instance_id,
            version: MESSAGE_SCHEMA_VERSION.to_string(),
            toolkit_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Attach an operation outcome.
    pub fn with_success(mut self, success: bool) -> Self {
        self.success = Some(success);
        self
    }

    /// Attach a content-free payload.
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.event_payload = payload;
        self
    }
}
