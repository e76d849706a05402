//! The backend seam: where context operations actually happen.
//!
//! The facade owns instrumentation; backends own storage and execution. One
//! trait method per public facade operation, same names, so the mapping from
//! a tracked call to its backend work is mechanical.

use crate::error::{ContextError, ContextResult};
use crate::models::{
    Batch, BatchRequest, CheckpointConfig, CheckpointResult, Datasource, ExpectationSuite,
    ValidationOperatorResult,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Which kind of storage backs a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextVariant {
    /// In-memory, nothing survives drop
    Ephemeral,
    /// A context root on the local filesystem
    File,
    /// State held by the Veracity Cloud service
    Cloud,
}

impl ContextVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextVariant::Ephemeral => "ephemeral",
            ContextVariant::File => "file",
            ContextVariant::Cloud => "cloud",
        }
    }
}

impl fmt::Display for ContextVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage and execution operations backing a data context.
pub trait ContextBackend {
    /// Which variant this backend is.
    fn variant(&self) -> ContextVariant;

    /// Persistent installation identity, for backends that have one. Wins
    /// over the configured identity when building a context from config.
    fn data_context_id(&self) -> Option<Uuid> {
        None
    }

    fn add_datasource(&mut self, datasource: Datasource) -> ContextResult<Datasource>;
    fn list_datasources(&self) -> ContextResult<Vec<Datasource>>;
    fn get_batch_list(&self, request: &BatchRequest) -> ContextResult<Vec<Batch>>;
    fn save_expectation_suite(&mut self, suite: ExpectationSuite) -> ContextResult<()>;
    fn get_expectation_suite(&self, name: &str) -> ContextResult<ExpectationSuite>;
    fn add_checkpoint(&mut self, checkpoint: CheckpointConfig) -> ContextResult<()>;
    fn run_checkpoint(&self, checkpoint_name: &str) -> ContextResult<CheckpointResult>;
    fn run_validation_operator(
        &self,
        operator_name: &str,
        batch_requests: &[BatchRequest],
    ) -> ContextResult<ValidationOperatorResult>;
    fn run_profiler_on_data(
        &self,
        profiler_name: &str,
        request: &BatchRequest,
    ) -> ContextResult<ExpectationSuite>;
    fn run_profiler_with_dynamic_arguments(
        &self,
        profiler_name: &str,
        variables: &Value,
    ) -> ContextResult<ExpectationSuite>;
    fn build_data_docs(&mut self) -> ContextResult<BTreeMap<String, String>>;
    fn open_data_docs(&self) -> ContextResult<Vec<String>>;
}

/// Reject names that are empty or would escape a storage namespace.
pub(crate) fn validate_object_name(name: &str, what: &str) -> ContextResult<()> {
    if name.trim().is_empty() {
        return Err(ContextError::InvalidRequest(format!(
            "{} name cannot be empty",
            what
        )));
    }
    if name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(ContextError::InvalidRequest(format!(
            "{} name {:?} must not contain path separators",
            what, name
        )));
    }
    Ok(())
}

/// Resolve the batches a datasource exposes for a request: one batch per
/// matching asset, capped by the request's limit.
pub(crate) fn resolve_batches(
    datasource: &Datasource,
    request: &BatchRequest,
) -> ContextResult<Vec<Batch>> {
    if !datasource.has_asset(&request.data_asset_name) {
        return Err(ContextError::NotFound(format!(
            "data asset '{}' in datasource '{}'",
            request.data_asset_name, datasource.name
        )));
    }
    let mut batches = vec![Batch::for_asset(&datasource.name, &request.data_asset_name)];
    if let Some(limit) = request.limit {
        batches.truncate(limit);
    }
    Ok(batches)
}

/// Skeleton suite produced by a profiler run. Metadata stays content-free:
/// profiler name, counts, flags.
pub(crate) fn profiled_suite(profiler_name: &str, batch_count: usize) -> ExpectationSuite {
    let mut suite = ExpectationSuite::new(format!("{}_profiled", profiler_name));
    suite.meta = serde_json::json!({
        "profiler": profiler_name,
        "batch_count": batch_count,
    });
    suite
}
