//! Batch request and batch models used by `get_batch_list`.

use serde::{Deserialize, Serialize};

/// A request for batches of data from a datasource asset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct BatchRequest {
    /// Name of the datasource to resolve against
    pub datasource_name: String,

    /// Data asset within the datasource
    pub data_asset_name: String,

    /// Optional cap on the number of batches returned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl BatchRequest {
    /// Create a request for one asset of one datasource.
    pub fn new(datasource_name: impl Into<String>, data_asset_name: impl Into<String>) -> Self {
        Self {
            datasource_name: datasource_name.into(),
            data_asset_name: data_asset_name.into(),
            limit: None,
        }
    }

    /// Cap the number of batches returned.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// A concrete batch of data resolved from a request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Batch {
    /// Stable identifier, derived from the datasource and asset names
    pub id: String,

    /// Datasource the batch came from
    pub datasource_name: String,

    /// Asset the batch covers
    pub data_asset_name: String,
}

impl Batch {
    /// Derive the batch for one asset of a datasource.
    pub fn for_asset(datasource_name: &str, data_asset_name: &str) -> Self {
        Self {
            id: format!("{}::{}", datasource_name, data_asset_name),
            datasource_name: datasource_name.to_string(),
            data_asset_name: data_asset_name.to_string(),
        }
    }
}
