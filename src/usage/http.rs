//! HTTP delivery of usage records to the collector.

use crate::error::SinkError;
use crate::usage::message::UsageMessage;
use crate::usage::sink::UsageSink;
use std::sync::Arc;
use std::time::Duration;

/// Sink that POSTs each record to the collector endpoint as JSON.
///
/// Delivery happens inline on the caller's stack; wrap in a
/// [`BatchingSink`](crate::usage::BatchingSink) when that is not acceptable.
#[derive(Clone)]
pub struct HttpSink {
    endpoint: String,
    agent: Arc<ureq::Agent>,
}

impl HttpSink {
    /// Create a sink posting to `endpoint` with the given timeout.
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(timeout_secs))
            .build();
        Self {
            endpoint: endpoint.into(),
            agent: Arc::new(agent),
        }
    }
}

impl UsageSink for HttpSink {
    fn emit(&self, message: &UsageMessage) -> Result<(), SinkError> {
        let body = serde_json::to_value(message)?;
        let response = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .send_json(&body)
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => SinkError::Rejected(code),
                ureq::Error::Transport(transport) => SinkError::Delivery(transport.to_string()),
            })?;

        tracing::debug!(
            status = response.status(),
            event = %message.event,
            "usage record delivered"
        );
        Ok(())
    }
}
