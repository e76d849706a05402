//! File-backed context backend.
//!
//! A context root on disk, one JSON document per stored object:
//!
//! ```text
//! root/
//!   veracity.json                    stable context identity
//!   datasources/<name>.json
//!   expectation_suites/<name>.json
//!   checkpoints/<name>.json
//!   data_docs/index.html             written by build_data_docs
//! ```

use crate::context::backend::{
    profiled_suite, resolve_batches, validate_object_name, ContextBackend, ContextVariant,
};
use crate::error::{ContextError, ContextResult};
use crate::models::{
    Batch, BatchRequest, CheckpointConfig, CheckpointResult, Datasource, ExpectationSuite,
    RunIdentifier, ValidationOperatorResult,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const CONTEXT_FILE: &str = "veracity.json";
const DATASOURCES_DIR: &str = "datasources";
const SUITES_DIR: &str = "expectation_suites";
const CHECKPOINTS_DIR: &str = "checkpoints";
const DATA_DOCS_DIR: &str = "data_docs";

/// Identity document stored at the context root.
#[derive(Debug, Serialize, Deserialize)]
struct ContextFile {
    data_context_id: Uuid,
}

/// Backend persisting everything under a context root directory.
#[derive(Debug)]
pub struct FileBackend {
    root: PathBuf,
    data_context_id: Uuid,
}

impl FileBackend {
    /// Open an existing context root, or initialize a fresh one.
    ///
    /// Initialization writes the identity document, so the same root keeps
    /// the same `data_context_id` across processes.
    pub fn new(root: impl Into<PathBuf>) -> ContextResult<Self> {
        let root = root.into();
        fs::create_dir_all(root.join(DATASOURCES_DIR))?;
        fs::create_dir_all(root.join(SUITES_DIR))?;
        fs::create_dir_all(root.join(CHECKPOINTS_DIR))?;

        let context_file = root.join(CONTEXT_FILE);
        let data_context_id = if context_file.exists() {
            let raw = fs::read_to_string(&context_file)?;
            let parsed: ContextFile = serde_json::from_str(&raw)?;
            parsed.data_context_id
        } else {
            let id = Uuid::new_v4();
            let raw = serde_json::to_string_pretty(&ContextFile { data_context_id: id })?;
            fs::write(&context_file, raw)?;
            tracing::info!(root = %root.display(), "initialized file context root");
            id
        };

        Ok(Self {
            root,
            data_context_id,
        })
    }

    /// The context root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_path(&self, dir: &str, name: &str, what: &str) -> ContextResult<PathBuf> {
        validate_object_name(name, what)?;
        Ok(self.root.join(dir).join(format!("{}.json", name)))
    }

    fn write_object<T: Serialize>(
        &self,
        dir: &str,
        name: &str,
        what: &str,
        value: &T,
    ) -> ContextResult<()> {
        let path = self.object_path(dir, name, what)?;
        fs::write(path, serde_json::to_string_pretty(value)?)?;
        Ok(())
    }

    fn read_object<T: DeserializeOwned>(
        &self,
        dir: &str,
        name: &str,
        what: &str,
    ) -> ContextResult<T> {
        let path = self.object_path(dir, name, what)?;
        if !path.exists() {
            return Err(ContextError::NotFound(format!("{} '{}'", what, name)));
        }
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn suite_names(&self) -> ContextResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(self.root.join(SUITES_DIR))? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort_unstable();
        Ok(names)
    }
}

impl ContextBackend for FileBackend {
    fn variant(&self) -> ContextVariant {
        ContextVariant::File
    }

    fn data_context_id(&self) -> Option<Uuid> {
        Some(self.data_context_id)
    }

    fn add_datasource(&mut self, datasource: Datasource) -> ContextResult<Datasource> {
        self.write_object(DATASOURCES_DIR, &datasource.name, "datasource", &datasource)?;
        Ok(datasource)
    }

    fn list_datasources(&self) -> ContextResult<Vec<Datasource>> {
        let mut datasources = Vec::new();
        for entry in fs::read_dir(self.root.join(DATASOURCES_DIR))? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                let raw = fs::read_to_string(path)?;
                datasources.push(serde_json::from_str(&raw)?);
            }
        }
        datasources.sort_by(|a: &Datasource, b: &Datasource| a.name.cmp(&b.name));
        Ok(datasources)
    }

    fn get_batch_list(&self, request: &BatchRequest) -> ContextResult<Vec<Batch>> {
        let datasource: Datasource = self.read_object(
            DATASOURCES_DIR,
            &request.datasource_name,
            "datasource",
        )?;
        resolve_batches(&datasource, request)
    }

    fn save_expectation_suite(&mut self, suite: ExpectationSuite) -> ContextResult<()> {
        self.write_object(SUITES_DIR, &suite.name, "suite", &suite)
    }

    fn get_expectation_suite(&self, name: &str) -> ContextResult<ExpectationSuite> {
        self.read_object(SUITES_DIR, name, "expectation suite")
    }

    fn add_checkpoint(&mut self, checkpoint: CheckpointConfig) -> ContextResult<()> {
        self.write_object(CHECKPOINTS_DIR, &checkpoint.name, "checkpoint", &checkpoint)
    }

    fn run_checkpoint(&self, checkpoint_name: &str) -> ContextResult<CheckpointResult> {
        let checkpoint: CheckpointConfig =
            self.read_object(CHECKPOINTS_DIR, checkpoint_name, "checkpoint")?;
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
        let docs_dir = self.root.join(DATA_DOCS_DIR);
        fs::create_dir_all(&docs_dir)?;

        let suites = self.suite_names()?;
        let mut index = String::from("<html><body><h1>Data Docs</h1><ul>");
        for name in &suites {
            index.push_str(&format!("<li>{}</li>", name));
        }
        index.push_str("</ul></body></html>");

        let index_path = docs_dir.join("index.html");
        fs::write(&index_path, index)?;
        tracing::info!(suites = suites.len(), path = %index_path.display(), "built data docs");

        let mut sites = BTreeMap::new();
        sites.insert(
            "local_site".to_string(),
            format!("file://{}", index_path.display()),
        );
        Ok(sites)
    }

    fn open_data_docs(&self) -> ContextResult<Vec<String>> {
        let index_path = self.root.join(DATA_DOCS_DIR).join("index.html");
        if !index_path.exists() {
            return Err(ContextError::NotFound(
                "data docs (run build_data_docs first)".to_string(),
            ));
        }
        let url = format!("file://{}", index_path.display());
        tracing::info!(%url, "opening data docs");
        Ok(vec![url])
    }
}
