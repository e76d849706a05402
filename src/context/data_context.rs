//! The public data-context facade.
//!
//! Every public operation passes through [`UsageStatsHandler::track`], so
//! instrumentation lives in exactly one place. A backend implements storage
//! and execution; it cannot opt out of (or forget) emission, and overriding
//! an operation in a new backend never changes which event fires. The
//! context-initialized record is emitted before the first tracked operation
//! of the context's lifetime, not at construction.

use crate::config::Config;
use crate::context::backend::{ContextBackend, ContextVariant};
use crate::context::cloud::CloudBackend;
use crate::context::ephemeral::EphemeralBackend;
use crate::context::file::FileBackend;
use crate::context::ops::ContextMethod;
use crate::error::ContextResult;
use crate::models::{
    Batch, BatchRequest, CheckpointConfig, CheckpointResult, Datasource, ExpectationSuite,
    ValidationOperatorResult,
};
use crate::usage::handler::UsageStatsHandler;
use serde_json::Value;
use std::collections::BTreeMap;

/// A data context: the single entry point for storing datasources, suites
/// and checkpoints, and for running validations over them.
///
/// Generic over its [`ContextBackend`], with ephemeral, file, and cloud
/// variants shipped in this crate.
pub struct DataContext<B: ContextBackend> {
    backend: B,
    usage: UsageStatsHandler,
}

/// In-memory context.
pub type EphemeralDataContext = DataContext<EphemeralBackend>;

/// Context rooted in a directory on disk.
pub type FileDataContext = DataContext<FileBackend>;

/// Context backed by the Veracity Cloud service.
pub type CloudDataContext = DataContext<CloudBackend>;

impl<B: ContextBackend> DataContext<B> {
    /// Create a context over `backend`, emitting usage through `usage`.
    ///
    /// Construction emits nothing.
    pub fn new(backend: B, usage: UsageStatsHandler) -> Self {
        tracing::info!(variant = %backend.variant(), "data context created");
        Self { backend, usage }
    }

    /// Create a context with usage delivery configured from `config`.
    ///
    /// A backend with persistent identity (the file variant) wins over the
    /// configured `data_context_id`.
    pub fn with_config(backend: B, config: &Config) -> Self {
        let data_context_id = backend
            .data_context_id()
            .unwrap_or(config.data_context_id);
        let usage = UsageStatsHandler::from_config(config, data_context_id);
        Self::new(backend, usage)
    }

    /// Which kind of storage backs this context.
    pub fn variant(&self) -> ContextVariant {
        self.backend.variant()
    }

    /// The usage handler, for counters and flushing.
    pub fn usage(&self) -> &UsageStatsHandler {
        &self.usage
    }

    /// Direct backend access, outside the instrumented path.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Register a datasource.
    pub fn add_datasource(&mut self, datasource: Datasource) -> ContextResult<Datasource> {
        let backend = &mut self.backend;
        self.usage.track(ContextMethod::AddDatasource, || {
            backend.add_datasource(datasource)
        })
    }

    /// List every registered datasource.
    pub fn list_datasources(&self) -> ContextResult<Vec<Datasource>> {
        self.usage.track(ContextMethod::ListDatasources, || {
            self.backend.list_datasources()
        })
    }

    /// Resolve the batches matching a request.
    pub fn get_batch_list(&self, request: &BatchRequest) -> ContextResult<Vec<Batch>> {
        self.usage.track(ContextMethod::GetBatchList, || {
            self.backend.get_batch_list(request)
        })
    }

    /// Store an expectation suite, replacing any suite of the same name.
    pub fn save_expectation_suite(&mut self, suite: ExpectationSuite) -> ContextResult<()> {
        let backend = &mut self.backend;
        self.usage.track(ContextMethod::SaveExpectationSuite, || {
            backend.save_expectation_suite(suite)
        })
    }

    /// Fetch an expectation suite by name.
    pub fn get_expectation_suite(&self, name: &str) -> ContextResult<ExpectationSuite> {
        self.usage.track(ContextMethod::GetExpectationSuite, || {
            self.backend.get_expectation_suite(name)
        })
    }

    /// Store a checkpoint configuration.
    pub fn add_checkpoint(&mut self, checkpoint: CheckpointConfig) -> ContextResult<()> {
        let backend = &mut self.backend;
        self.usage.track(ContextMethod::AddCheckpoint, || {
            backend.add_checkpoint(checkpoint)
        })
    }

    /// Run a stored checkpoint: resolve its suite and batches, validate, and
    /// return the run result.
    pub fn run_checkpoint(&self, checkpoint_name: &str) -> ContextResult<CheckpointResult> {
        self.usage.track(ContextMethod::RunCheckpoint, || {
            self.backend.run_checkpoint(checkpoint_name)
        })
    }

    /// Run a validation operator over explicit batch requests.
    pub fn run_validation_operator(
        &self,
        operator_name: &str,
        batch_requests: &[BatchRequest],
    ) -> ContextResult<ValidationOperatorResult> {
        self.usage.track(ContextMethod::RunValidationOperator, || {
            self.backend
                .run_validation_operator(operator_name, batch_requests)
        })
    }

    /// Profile one batch of data into a generated expectation suite.
    pub fn run_profiler_on_data(
        &self,
        profiler_name: &str,
        request: &BatchRequest,
    ) -> ContextResult<ExpectationSuite> {
        self.usage.track(ContextMethod::RunProfilerOnData, || {
            self.backend.run_profiler_on_data(profiler_name, request)
        })
    }

    /// Run a profiler parameterized by ad-hoc variables.
    pub fn run_profiler_with_dynamic_arguments(
        &self,
        profiler_name: &str,
        variables: &Value,
    ) -> ContextResult<ExpectationSuite> {
        self.usage
            .track(ContextMethod::RunProfilerWithDynamicArguments, || {
                self.backend
                    .run_profiler_with_dynamic_arguments(profiler_name, variables)
            })
    }

    /// Build the data-docs sites, returning site name to URL.
    pub fn build_data_docs(&mut self) -> ContextResult<BTreeMap<String, String>> {
        let backend = &mut self.backend;
        self.usage
            .track(ContextMethod::BuildDataDocs, || backend.build_data_docs())
    }

    /// Resolve the data-docs site URLs for viewing.
    pub fn open_data_docs(&self) -> ContextResult<Vec<String>> {
        self.usage
            .track(ContextMethod::OpenDataDocs, || self.backend.open_data_docs())
    }
}
