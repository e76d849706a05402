//! Checkpoint and validation-operator models.

use crate::models::batch::BatchRequest;
use crate::models::run_identifier::RunIdentifier;
use serde::{Deserialize, Serialize};

/// Declarative checkpoint configuration stored by a context.
///
/// A checkpoint names the expectation suite it validates and, optionally, a
/// default batch request to validate it against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct CheckpointConfig {
    /// Unique checkpoint name within its context
    pub name: String,

    /// Expectation suite the checkpoint validates
    pub suite_name: String,

    /// Default batch request, resolved at run time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_request: Option<BatchRequest>,
}

impl CheckpointConfig {
    /// Create a checkpoint validating one suite.
    pub fn new(name: impl Into<String>, suite_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            suite_name: suite_name.into(),
            batch_request: None,
        }
    }

    /// Attach a default batch request.
    pub fn with_batch_request(mut self, request: BatchRequest) -> Self {
        self.batch_request = Some(request);
        self
    }
}

/// Outcome of a checkpoint run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckpointResult {
    /// Checkpoint that ran
    pub checkpoint_name: String,

    /// Identity of this run
    pub run_id: RunIdentifier,

    /// Whether the run completed successfully
    pub success: bool,

    /// Suites the run covered
    pub validated_suites: Vec<String>,
}

/// Outcome of a validation-operator run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationOperatorResult {
    /// Operator that ran
    pub operator_name: String,

    /// Identity of this run
    pub run_id: RunIdentifier,

    /// Whether the run completed successfully
    pub success: bool,

    /// Number of batches the operator covered
    pub batch_count: usize,
}
