//! HTTP client for the Veracity Cloud API.
//!
//! This is a synchronous `ureq` client handling authentication, error
//! mapping, and the REST surface the cloud backend delegates to. Object
//! payloads travel as plain JSON documents; list endpoints wrap their items
//! in a `data` array.

use crate::config::Config;
use crate::context::backend::validate_object_name;
use crate::error::{ConfigError, ContextError, ContextResult};
use crate::models::{
    Batch, BatchRequest, CheckpointConfig, CheckpointResult, Datasource, ExpectationSuite,
    ValidationOperatorResult,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// Response wrapper for list endpoints.
#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    data: Vec<T>,
}

/// Response wrapper for data-docs endpoints.
#[derive(Debug, Deserialize)]
struct SitesResponse {
    sites: BTreeMap<String, String>,
}

/// HTTP client for the Veracity Cloud API.
#[derive(Clone, Debug)]
pub struct CloudApiClient {
    /// Base URL for the cloud API
    base_url: String,

    /// Bearer token for authentication
    api_token: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,
}

impl CloudApiClient {
    /// Create a client from configuration. Fails when the cloud settings are
    /// absent, since only cloud-backed contexts need this client.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let base_url = config
            .cloud_base_url
            .clone()
            .ok_or_else(|| ConfigError::MissingVar("VERACITY_CLOUD_BASE_URL".to_string()))?;
        let api_token = config
            .cloud_api_token
            .clone()
            .ok_or_else(|| ConfigError::MissingVar("VERACITY_CLOUD_API_TOKEN".to_string()))?;

        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Ok(Self {
            base_url,
            api_token,
            agent: Arc::new(agent),
        })
    }

    /// Create a client with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_token: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            api_token,
            agent: Arc::new(agent),
        }
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Execute a GET request with authentication.
    fn get(&self, path: &str) -> Result<ureq::Response, ContextError> {
        let url = self.build_url(path);

        self.agent
            .get(&url)
            .set("Authorization", &format!("Bearer {}", self.api_token))
            .set("Content-Type", "application/json")
            .call()
            .map_err(|e| self.map_error(e))
    }

    /// Execute a POST request with authentication and JSON body.
    fn post(&self, path: &str, body: &Value) -> Result<ureq::Response, ContextError> {
        let url = self.build_url(path);

        tracing::debug!("POST {}", url);

        let result = self
            .agent
            .post(&url)
            .set("Authorization", &format!("Bearer {}", self.api_token))
            .set("Content-Type", "application/json")
            .send_json(body)
            .map_err(|e| self.map_error(e));

        match &result {
            Ok(response) => {
                tracing::debug!("POST {} - Success (status: {})", url, response.status());
            }
            Err(e) => {
                tracing::error!("POST {} - Error: {:?}", url, e);
            }
        }

        result
    }

    /// Execute a PUT request with authentication and JSON body.
    fn put(&self, path: &str, body: &Value) -> Result<ureq::Response, ContextError> {
        let url = self.build_url(path);

        self.agent
            .put(&url)
            .set("Authorization", &format!("Bearer {}", self.api_token))
            .set("Content-Type", "application/json")
            .send_json(body)
            .map_err(|e| self.map_error(e))
    }

    /// Map a ureq error to a ContextError.
    fn map_error(&self, error: ureq::Error) -> ContextError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 => ContextError::Unauthorized,
                    404 => ContextError::NotFound(message),
                    429 => ContextError::RateLimitExceeded,
                    _ => ContextError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    ContextError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    ContextError::Timeout
                } else {
                    ContextError::HttpError(transport.to_string())
                }
            }
        }
    }

    /// Read and deserialize a JSON response body.
    fn read_json<T: DeserializeOwned>(response: ureq::Response) -> ContextResult<T> {
        let body = response
            .into_string()
            .map_err(|e| ContextError::HttpError(e.to_string()))?;
        Ok(serde_json::from_str(&body)?)
    }

    // ========================= Datasource Operations =========================

    /// Register a datasource, returning the stored representation.
    pub fn create_datasource(&self, datasource: &Datasource) -> ContextResult<Datasource> {
        let body = serde_json::to_value(datasource)?;
        let response = self.post("/datasources", &body)?;
        Self::read_json(response)
    }

    /// List every datasource in the cloud organization.
    pub fn list_datasources(&self) -> ContextResult<Vec<Datasource>> {
        let response = self.get("/datasources")?;
        let list: ListResponse<Datasource> = Self::read_json(response)?;
        Ok(list.data)
    }

    /// Resolve a batch request server-side.
    pub fn get_batch_list(&self, request: &BatchRequest) -> ContextResult<Vec<Batch>> {
        let body = serde_json::to_value(request)?;
        let response = self.post("/batches", &body)?;
        let list: ListResponse<Batch> = Self::read_json(response)?;
        Ok(list.data)
    }

    // ========================= Suite Operations =========================

    /// Upsert an expectation suite, keyed by its name.
    pub fn put_expectation_suite(&self, suite: &ExpectationSuite) -> ContextResult<()> {
        let body = serde_json::to_value(suite)?;
        self.put("/expectation-suites", &body)?;
        Ok(())
    }

    /// Fetch an expectation suite by name.
    pub fn get_expectation_suite(&self, name: &str) -> ContextResult<ExpectationSuite> {
        validate_object_name(name, "suite")?;
        let response = self.get(&format!("/expectation-suites/{}", name))?;
        Self::read_json(response)
    }

    // ========================= Checkpoint Operations =========================

    /// Upsert a checkpoint configuration, keyed by its name.
    pub fn put_checkpoint(&self, checkpoint: &CheckpointConfig) -> ContextResult<()> {
        let body = serde_json::to_value(checkpoint)?;
        self.put("/checkpoints", &body)?;
        Ok(())
    }

    /// Run a checkpoint server-side and return its result.
    pub fn run_checkpoint(&self, name: &str) -> ContextResult<CheckpointResult> {
        validate_object_name(name, "checkpoint")?;
        let response = self.post(&format!("/checkpoints/{}/runs", name), &json!({}))?;
        Self::read_json(response)
    }

    /// Run a validation operator server-side over the given batch requests.
    pub fn run_validation_operator(
        &self,
        name: &str,
        batch_requests: &[BatchRequest],
    ) -> ContextResult<ValidationOperatorResult> {
        validate_object_name(name, "operator")?;
        let body = json!({ "batch_requests": batch_requests });
        let response = self.post(&format!("/validation-operators/{}/runs", name), &body)?;
        Self::read_json(response)
    }

    // ========================= Profiler Operations =========================

    /// Run a profiler against one batch request, returning the generated suite.
    pub fn run_profiler_on_data(
        &self,
        name: &str,
        request: &BatchRequest,
    ) -> ContextResult<ExpectationSuite> {
        validate_object_name(name, "profiler")?;
        let body = json!({ "batch_request": request });
        let response = self.post(&format!("/profilers/{}/runs", name), &body)?;
        Self::read_json(response)
    }

    /// Run a profiler with ad-hoc variables, returning the generated suite.
    pub fn run_profiler_with_dynamic_arguments(
        &self,
        name: &str,
        variables: &Value,
    ) -> ContextResult<ExpectationSuite> {
        validate_object_name(name, "profiler")?;
        let body = json!({ "variables": variables });
        let response = self.post(&format!("/profilers/{}/runs", name), &body)?;
        Self::read_json(response)
    }

    // ========================= Data Docs Operations =========================

    /// Trigger a data-docs build, returning site name to URL.
    pub fn build_data_docs(&self) -> ContextResult<BTreeMap<String, String>> {
        let response = self.post("/data-docs/builds", &json!({}))?;
        let sites: SitesResponse = Self::read_json(response)?;
        Ok(sites.sites)
    }

    /// List the hosted data-docs site URLs.
    pub fn list_data_docs_sites(&self) -> ContextResult<Vec<String>> {
        let response = self.get("/data-docs/sites")?;
        let sites: SitesResponse = Self::read_json(response)?;
        Ok(sites.sites.into_values().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let client = CloudApiClient::with_base_url(
            "https://api.example.com".to_string(),
            "test-token".to_string(),
        );

        assert_eq!(
            client.build_url("/datasources"),
            "https://api.example.com/datasources"
        );

        assert_eq!(
            client.build_url("datasources"),
            "https://api.example.com/datasources"
        );

        let client_with_slash = CloudApiClient::with_base_url(
            "https://api.example.com/".to_string(),
            "test-token".to_string(),
        );

        assert_eq!(
            client_with_slash.build_url("/datasources"),
            "https://api.example.com/datasources"
        );
    }

    #[test]
    fn test_client_from_config() {
        let config = Config {
            cloud_base_url: Some("https://api.veracity-data.io".to_string()),
            cloud_api_token: Some("token-123".to_string()),
            ..Config::default()
        };

        let client = CloudApiClient::from_config(&config).unwrap();
        assert_eq!(client.base_url, "https://api.veracity-data.io");
        assert_eq!(client.api_token, "token-123");
    }

    #[test]
    fn test_client_from_config_missing_settings() {
        let config = Config::default();
        let result = CloudApiClient::from_config(&config);
        match result {
            Err(ConfigError::MissingVar(var)) => assert_eq!(var, "VERACITY_CLOUD_BASE_URL"),
            other => panic!("Expected MissingVar error, got: {:?}", other),
        }
    }
}
