//! Configuration management for the Veracity context core.
//!
//! This module handles loading and validating configuration from environment variables.
//! Usage statistics are on by default and opted out of via `VERACITY_USAGE_STATS`;
//! cloud credentials are only required when a cloud-backed context is actually built.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use uuid::Uuid;

/// Default usage-statistics collector endpoint.
pub const DEFAULT_USAGE_STATS_URL: &str = "https://telemetry.veracity-data.io/v1/usage";

/// Values of `VERACITY_USAGE_STATS` treated as "disabled" (case-insensitive).
const FALSY_VALUES: &[&str] = &["false", "f", "no", "n", "0", "off"];

/// Configuration for the Veracity context core.
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether usage statistics are collected (opt-out, default: true)
    pub usage_statistics_enabled: bool,

    /// Usage-statistics collector endpoint
    pub usage_statistics_url: String,

    /// Stable identity for this installation, stamped on every usage record
    pub data_context_id: Uuid,

    /// Base URL of the Veracity Cloud API (only needed for cloud contexts)
    pub cloud_base_url: Option<String>,

    /// API token for the Veracity Cloud API
    pub cloud_api_token: Option<String>,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `VERACITY_USAGE_STATS`: set to a falsy value ("false", "no", "0", "off")
    ///   to disable usage statistics
    /// - `VERACITY_USAGE_STATS_URL`: collector endpoint (default: the hosted collector)
    /// - `VERACITY_DATA_CONTEXT_ID`: UUID identifying this installation (default: random)
    /// - `VERACITY_CLOUD_BASE_URL`: base URL for the Veracity Cloud API
    /// - `VERACITY_CLOUD_API_TOKEN`: token for the Veracity Cloud API
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        let _ = dotenvy::dotenv();

        let usage_statistics_enabled = Self::parse_env_flag("VERACITY_USAGE_STATS", true);

        let usage_statistics_url = env::var("VERACITY_USAGE_STATS_URL")
            .unwrap_or_else(|_| DEFAULT_USAGE_STATS_URL.to_string());
        Self::validate_url("VERACITY_USAGE_STATS_URL", &usage_statistics_url)?;

        let data_context_id = match env::var("VERACITY_DATA_CONTEXT_ID") {
            Ok(raw) => raw.parse::<Uuid>().map_err(|_| ConfigError::InvalidValue {
                var: "VERACITY_DATA_CONTEXT_ID".to_string(),
                reason: format!("Must be a UUID, got: {}", raw),
            })?,
            Err(_) => Uuid::new_v4(),
        };

        let cloud_base_url = env::var("VERACITY_CLOUD_BASE_URL").ok();
        if let Some(url) = &cloud_base_url {
            Self::validate_url("VERACITY_CLOUD_BASE_URL", url)?;
        }

        let cloud_api_token = env::var("VERACITY_CLOUD_API_TOKEN").ok();
        if let Some(token) = &cloud_api_token {
            if token.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    var: "VERACITY_CLOUD_API_TOKEN".to_string(),
                    reason: "Cannot be empty".to_string(),
                });
            }
        }

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            usage_statistics_enabled,
            usage_statistics_url,
            data_context_id,
            cloud_base_url,
            cloud_api_token,
            request_timeout,
            log_level,
        })
    }

    /// Parse an opt-out flag: unset means `default`, a falsy value means false,
    /// anything else means true.
    fn parse_env_flag(var_name: &str, default: bool) -> bool {
        match env::var(var_name) {
            Ok(val) => !FALSY_VALUES.contains(&val.trim().to_lowercase().as_str()),
            Err(_) => default,
        }
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    fn validate_url(var_name: &str, url: &str) -> ConfigResult<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            usage_statistics_enabled: true,
            usage_statistics_url: DEFAULT_USAGE_STATS_URL.to_string(),
            data_context_id: Uuid::nil(),
            cloud_base_url: None,
            cloud_api_token: None,
            request_timeout: 10,
            log_level: "error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    // Helper to set and unset env vars for testing
    struct EnvGuard {
        vars: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            EnvGuard { vars: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.vars.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.usage_statistics_enabled);
        assert_eq!(config.usage_statistics_url, DEFAULT_USAGE_STATS_URL);
        assert_eq!(config.request_timeout, 10);
        assert!(config.cloud_base_url.is_none());
    }

    #[test]
    #[serial]
    fn test_config_from_env_defaults() {
        let _guard = EnvGuard::new();
        env::remove_var("VERACITY_USAGE_STATS");
        env::remove_var("VERACITY_USAGE_STATS_URL");
        env::remove_var("VERACITY_DATA_CONTEXT_ID");

        let config = Config::from_env().unwrap();
        assert!(config.usage_statistics_enabled);
        assert_eq!(config.usage_statistics_url, DEFAULT_USAGE_STATS_URL);
        assert!(!config.data_context_id.is_nil());
    }

    #[test]
    #[serial]
    fn test_usage_stats_opt_out_values() {
        for value in ["false", "FALSE", "f", "no", "N", "0", "off", " Off "] {
            let mut guard = EnvGuard::new();
            guard.set("VERACITY_USAGE_STATS", value);

            let config = Config::from_env().unwrap();
            assert!(
                !config.usage_statistics_enabled,
                "value {:?} should disable usage statistics",
                value
            );
        }
    }

    #[test]
    #[serial]
    fn test_usage_stats_enabled_for_other_values() {
        for value in ["true", "yes", "1", "anything"] {
            let mut guard = EnvGuard::new();
            guard.set("VERACITY_USAGE_STATS", value);

            let config = Config::from_env().unwrap();
            assert!(
                config.usage_statistics_enabled,
                "value {:?} should leave usage statistics enabled",
                value
            );
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_invalid_collector_url() {
        let mut guard = EnvGuard::new();
        guard.set("VERACITY_USAGE_STATS_URL", "not-a-url");

        let result = Config::from_env();
        assert!(result.is_err());
        if let Err(ConfigError::InvalidValue { var, .. }) = result {
            assert_eq!(var, "VERACITY_USAGE_STATS_URL");
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_invalid_data_context_id() {
        let mut guard = EnvGuard::new();
        guard.set("VERACITY_DATA_CONTEXT_ID", "not-a-uuid");

        let result = Config::from_env();
        assert!(result.is_err());
        match result {
            Err(ConfigError::InvalidValue { var, .. }) => {
                assert_eq!(var, "VERACITY_DATA_CONTEXT_ID");
            }
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid_cloud_settings() {
        let mut guard = EnvGuard::new();
        guard.set("VERACITY_CLOUD_BASE_URL", "https://api.veracity-data.io");
        guard.set("VERACITY_CLOUD_API_TOKEN", "token-123");
        guard.set(
            "VERACITY_DATA_CONTEXT_ID",
            "6a52bdfa-e182-455b-a825-e69f076e67d6",
        );
        guard.set("REQUEST_TIMEOUT", "30");

        let config = Config::from_env().unwrap();
        assert_eq!(
            config.cloud_base_url.as_deref(),
            Some("https://api.veracity-data.io")
        );
        assert_eq!(config.cloud_api_token.as_deref(), Some("token-123"));
        assert_eq!(
            config.data_context_id.to_string(),
            "6a52bdfa-e182-455b-a825-e69f076e67d6"
        );
        assert_eq!(config.request_timeout, 30);
    }

    #[test]
    #[serial]
    fn test_config_from_env_empty_cloud_token() {
        let mut guard = EnvGuard::new();
        guard.set("VERACITY_CLOUD_BASE_URL", "https://api.veracity-data.io");
        guard.set("VERACITY_CLOUD_API_TOKEN", "   ");

        let result = Config::from_env();
        assert!(result.is_err());
        if let Err(ConfigError::InvalidValue { var, .. }) = result {
            assert_eq!(var, "VERACITY_CLOUD_API_TOKEN");
        }
    }

    #[test]
    #[serial]
    fn test_parse_env_u64() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_U64", "42");

        let result = Config::parse_env_u64("TEST_U64", 10);
        assert_eq!(result.unwrap(), 42);

        let result = Config::parse_env_u64("NONEXISTENT", 10);
        assert_eq!(result.unwrap(), 10);
    }

    #[test]
    #[serial]
    fn test_parse_env_u64_invalid() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_U64_INVALID", "not-a-number");

        let result = Config::parse_env_u64("TEST_U64_INVALID", 10);
        assert!(result.is_err());
    }
}
