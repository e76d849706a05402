//! In-memory context backend.

use crate::context::backend::{
    profiled_suite, resolve_batches, validate_object_name, ContextBackend, ContextVariant,
};
use crate::error::{ContextError, ContextResult};
use crate::models::{
    Batch, BatchRequest, CheckpointConfig, CheckpointResult, Datasource, ExpectationSuite,
    RunIdentifier, ValidationOperatorResult,
};
use serde_json::Value;
use std::collections::BTreeMap;

/// Backend that keeps everything in process memory.
///
/// Nothing survives drop. The variant of choice for tests, notebooks, and
/// short-lived pipelines that assemble their configuration in code.
#[derive(Debug, Default)]
pub struct EphemeralBackend {
    datasources: BTreeMap<String, Datasource>,
    suites: BTreeMap<String, ExpectationSuite>,
    checkpoints: BTreeMap<String, CheckpointConfig>,
    docs_sites: BTreeMap<String, String>,
}

impl EphemeralBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContextBackend for EphemeralBackend {
    fn variant(&self) -> ContextVariant {
        ContextVariant::Ephemeral
    }

    fn add_datasource(&mut self, datasource: Datasource) -> ContextResult<Datasource> {
        validate_object_name(&datasource.name, "datasource")?;
        self.datasources
            .insert(datasource.name.clone(), datasource.clone());
        Ok(datasource)
    }

    fn list_datasources(&self) -> ContextResult<Vec<Datasource>> {
        Ok(self.datasources.values().cloned().collect())
    }

    fn get_batch_list(&self, request: &BatchRequest) -> ContextResult<Vec<Batch>> {
        let datasource = self.datasources.get(&request.datasource_name).ok_or_else(|| {
            ContextError::NotFound(format!("datasource '{}'", request.datasource_name))
        })?;
        resolve_batches(datasource, request)
    }

    fn save_expectation_suite(&mut self, suite: ExpectationSuite) -> ContextResult<()> {
        validate_object_name(&suite.name, "suite")?;
        self.suites.insert(suite.name.clone(), suite);
        Ok(())
    }

    fn get_expectation_suite(&self, name: &str) -> ContextResult<ExpectationSuite> {
        self.suites
            .get(name)
            .cloned()
            .ok_or_else(|| ContextError::NotFound(format!("expectation suite '{}'", name)))
    }

    fn add_checkpoint(&mut self, checkpoint: CheckpointConfig) -> ContextResult<()> {
        validate_object_name(&checkpoint.name, "checkpoint")?;
        self.checkpoints.insert(checkpoint.name.clone(), checkpoint);
        Ok(())
    }

    fn run_checkpoint(&self, checkpoint_name: &str) -> ContextResult<CheckpointResult> {
        let checkpoint = self.checkpoints.get(checkpoint_name).ok_or_else(|| {
            ContextError::NotFound(format!("checkpoint '{}'", checkpoint_name))
        })?;
        let suite = self.get_expectation_suite(&checkpoint.suite_name)?;
        if let Some(request) = &checkpoint.batch_request {
            self.get_batch_list(request)?;
        }
        Ok(CheckpointResult {
            checkpoint_name: checkpoint_name.to_string(),
            run_id: RunIdentifier::now(None),
            success: true,
            validated_suites: vec![suite.name],
        })
    }

    fn run_validation_operator(
        &self,
        operator_name: &str,
        batch_requests: &[BatchRequest],
    ) -> ContextResult<ValidationOperatorResult> {
        validate_object_name(operator_name, "operator")?;
        for request in batch_requests {
            self.get_batch_list(request)?;
        }
        Ok(ValidationOperatorResult {
            operator_name: operator_name.to_string(),
            run_id: RunIdentifier::now(None),
            success: true,
            batch_count: batch_requests.len(),
        })
    }

    fn run_profiler_on_data(
        &self,
        profiler_name: &str,
        request: &BatchRequest,
    ) -> ContextResult<ExpectationSuite> {
        validate_object_name(profiler_name, "profiler")?;
        let batches = self.get_batch_list(request)?;
        Ok(profiled_suite(profiler_name, batches.len()))
    }

    fn run_profiler_with_dynamic_arguments(
        &self,
        profiler_name: &str,
        variables: &Value,
    ) -> ContextResult<ExpectationSuite> {
        validate_object_name(profiler_name, "profiler")?;
        if !variables.is_object() && !variables.is_null() {
            return Err(ContextError::InvalidRequest(
                "profiler variables must be an object".to_string(),
            ));
        }
        let variable_count = variables.as_object().map(|vars| vars.len()).unwrap_or(0);
        let mut suite = profiled_suite(profiler_name, 0);
        suite.meta["variable_count"] = variable_count.into();
        Ok(suite)
    }

    fn build_data_docs(&mut self) -> ContextResult<BTreeMap<String, String>> {
        self.docs_sites.insert(
            "local_site".to_string(),
            "memory://data_docs/local_site/index.html".to_string(),
        );
        tracing::info!(suites = self.suites.len(), "built in-memory data docs");
        Ok(self.docs_sites.clone())
    }

    fn open_data_docs(&self) -> ContextResult<Vec<String>> {
        if self.docs_sites.is_empty() {
            return Err(ContextError::NotFound(
                "data docs (run build_data_docs first)".to_string(),
            ));
        }
        let urls: Vec<String> = self.docs_sites.values().cloned().collect();
        for url in &urls {
            tracing::info!(%url, "opening data docs");
        }
        Ok(urls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> EphemeralBackend {
        let mut backend = EphemeralBackend::new();
        backend
            .add_datasource(Datasource::new("warehouse", "sql").with_assets(["orders"]))
            .unwrap();
        backend
            .save_expectation_suite(ExpectationSuite::new("orders.warning"))
            .unwrap();
        backend
            .add_checkpoint(
                CheckpointConfig::new("nightly", "orders.warning")
                    .with_batch_request(BatchRequest::new("warehouse", "orders")),
            )
            .unwrap();
        backend
    }

    #[test]
    fn test_datasource_roundtrip() {
        let backend = seeded();
        let listed = backend.list_datasources().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "warehouse");
    }

    #[test]
    fn test_get_batch_list_unknown_datasource() {
        let backend = EphemeralBackend::new();
        let result = backend.get_batch_list(&BatchRequest::new("missing", "orders"));
        assert!(matches!(result, Err(ContextError::NotFound(_))));
    }

    #[test]
    fn test_run_checkpoint_end_to_end() {
        let backend = seeded();
        let result = backend.run_checkpoint("nightly").unwrap();
        assert_eq!(result.checkpoint_name, "nightly");
        assert!(result.success);
        assert_eq!(result.validated_suites, vec!["orders.warning".to_string()]);
    }

    #[test]
    fn test_run_checkpoint_missing_suite() {
        let mut backend = EphemeralBackend::new();
        backend
            .add_checkpoint(CheckpointConfig::new("nightly", "missing.suite"))
            .unwrap();
        let result = backend.run_checkpoint("nightly");
        assert!(matches!(result, Err(ContextError::NotFound(_))));
    }

    #[test]
    fn test_profiler_with_non_object_variables() {
        let backend = seeded();
        let result =
            backend.run_profiler_with_dynamic_arguments("default", &Value::String("x".into()));
        assert!(matches!(result, Err(ContextError::InvalidRequest(_))));

        let suite = backend
            .run_profiler_with_dynamic_arguments("default", &serde_json::json!({"threshold": 3}))
            .unwrap();
        assert_eq!(suite.meta["variable_count"], 1);
    }

    #[test]
    fn test_open_data_docs_requires_build() {
        let mut backend = seeded();
        assert!(backend.open_data_docs().is_err());

        let sites = backend.build_data_docs().unwrap();
        assert!(sites.contains_key("local_site"));
        assert_eq!(backend.open_data_docs().unwrap().len(), 1);
    }

    #[test]
    fn test_add_datasource_rejects_empty_name() {
        let mut backend = EphemeralBackend::new();
        let result = backend.add_datasource(Datasource::default());
        assert!(matches!(result, Err(ContextError::InvalidRequest(_))));
    }
}
