//! Error types for the Veracity context core.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can occur when operating on a data context.
#[derive(Error, Debug)]
pub enum ContextError {
    /// A named object (datasource, suite, checkpoint) does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid operation arguments
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Cloud API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Failed to parse or produce JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Filesystem error from the file backend
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Generic context error
    #[error("Context error: {0}")]
    Other(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Other(String),
}

/// Errors that can occur while delivering usage records.
#[derive(Error, Debug)]
pub enum SinkError {
    /// Transport failure reaching the collector
    #[error("Delivery failed: {0}")]
    Delivery(String),

    /// Collector rejected the record
    #[error("Collector rejected record (status {0})")]
    Rejected(u16),

    /// Record could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Sink has shut down and accepts no more records
    #[error("Sink closed")]
    Closed,
}

/// Convenience type alias for Results with ContextError
pub type ContextResult<T> = Result<T, ContextError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with SinkError
pub type SinkResult<T> = Result<T, SinkError>;
