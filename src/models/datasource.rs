//! Datasource model representing a named connection to validatable data.

use serde::{Deserialize, Serialize};

/// A datasource registered with a data context.
///
/// The execution machinery behind a datasource lives elsewhere in the toolkit;
/// the context stores the declarative configuration and the asset names the
/// datasource exposes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Datasource {
    /// Unique name of the datasource within its context
    pub name: String,

    /// Execution engine kind (e.g. "sql", "filesystem", "in_memory")
    pub kind: String,

    /// Data asset names this datasource exposes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assets: Vec<String>,
}

impl Datasource {
    /// Create a datasource with no assets.
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            assets: Vec::new(),
        }
    }

    /// Attach asset names.
    pub fn with_assets<I, S>(mut self, assets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assets = assets.into_iter().map(Into::into).collect();
        self
    }

    /// Check whether the datasource exposes the named asset.
    pub fn has_asset(&self, asset: &str) -> bool {
        self.assets.iter().any(|a| a == asset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datasource_new() {
        let datasource = Datasource::new("warehouse", "sql").with_assets(["orders", "customers"]);
        assert_eq!(datasource.name, "warehouse");
        assert_eq!(datasource.kind, "sql");
        assert!(datasource.has_asset("orders"));
        assert!(!datasource.has_asset("payments"));
    }

    #[test]
    fn test_datasource_serialization_skips_empty_assets() {
        let datasource = Datasource::new("warehouse", "sql");
        let json = serde_json::to_string(&datasource).unwrap();
        assert!(!json.contains("assets"));

        let with_assets = datasource.with_assets(["orders"]);
        let json = serde_json::to_string(&with_assets).unwrap();
        assert!(json.contains("\"assets\":[\"orders\"]"));
    }

    #[test]
    fn test_datasource_deserialization_defaults() {
        let json = r#"{"name": "warehouse", "kind": "sql"}"#;
        let datasource: Datasource = serde_json::from_str(json).unwrap();
        assert_eq!(datasource.name, "warehouse");
        assert!(datasource.assets.is_empty());
    }
}
