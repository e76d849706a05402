//! Cloud-backed context backend.
//!
//! A thin delegation layer over [`CloudApiClient`]; the Veracity Cloud
//! service owns all state. Keeping the backend free of HTTP detail means the
//! facade's instrumentation sees exactly the same shape as the local
//! variants.

use crate::client::CloudApiClient;
use crate::config::Config;
use crate::context::backend::{ContextBackend, ContextVariant};
use crate::error::{ConfigError, ContextResult};
use crate::models::{
    Batch, BatchRequest, CheckpointConfig, CheckpointResult, Datasource, ExpectationSuite,
    ValidationOperatorResult,
};
use serde_json::Value;
use std::collections::BTreeMap;

/// Backend delegating every operation to the Veracity Cloud API.
pub struct CloudBackend {
    client: CloudApiClient,
}

impl CloudBackend {
    /// Wrap an existing API client.
    pub fn new(client: CloudApiClient) -> Self {
        Self { client }
    }

    /// Build a backend straight from configuration.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self::new(CloudApiClient::from_config(config)?))
    }
}

impl ContextBackend for CloudBackend {
    fn variant(&self) -> ContextVariant {
        ContextVariant::Cloud
    }

    fn add_datasource(&mut self, datasource: Datasource) -> ContextResult<Datasource> {
        self.client.create_datasource(&datasource)
    }

    fn list_datasources(&self) -> ContextResult<Vec<Datasource>> {
        self.client.list_datasources()
    }

    fn get_batch_list(&self, request: &BatchRequest) -> ContextResult<Vec<Batch>> {
        self.client.get_batch_list(request)
    }

    fn save_expectation_suite(&mut self, suite: ExpectationSuite) -> ContextResult<()> {
        self.client.put_expectation_suite(&suite)
    }

    fn get_expectation_suite(&self, name: &str) -> ContextResult<ExpectationSuite> {
        self.client.get_expectation_suite(name)
    }

    fn add_checkpoint(&mut self, checkpoint: CheckpointConfig) -> ContextResult<()> {
        self.client.put_checkpoint(&checkpoint)
    }

    fn run_checkpoint(&self, checkpoint_name: &str) -> ContextResult<CheckpointResult> {
        self.client.run_checkpoint(checkpoint_name)
    }

    fn run_validation_operator(
        &self,
        operator_name: &str,
        batch_requests: &[BatchRequest],
    ) -> ContextResult<ValidationOperatorResult> {
        self.client
            .run_validation_operator(operator_name, batch_requests)
    }

    fn run_profiler_on_data(
        &self,
        profiler_name: &str,
        request: &BatchRequest,
    ) -> ContextResult<ExpectationSuite> {
        self.client.run_profiler_on_data(profiler_name, request)
    }

    fn run_profiler_with_dynamic_arguments(
        &self,
        profiler_name: &str,
        variables: &Value,
    ) -> ContextResult<ExpectationSuite> {
        self.client
            .run_profiler_with_dynamic_arguments(profiler_name, variables)
    }

    fn build_data_docs(&mut self) -> ContextResult<BTreeMap<String, String>> {
        self.client.build_data_docs()
    }

    fn open_data_docs(&self) -> ContextResult<Vec<String>> {
        let urls = self.client.list_data_docs_sites()?;
        for url in &urls {
            tracing::info!(%url, "opening data docs");
        }
        Ok(urls)
    }
}
