//! Veracity Context Core - the usage-instrumented data context layer of the
//! Veracity data-quality toolkit.
//!
//! This library provides the `DataContext` facade over interchangeable
//! storage backends (ephemeral, file, cloud) together with the usage
//! analytics that instrument its public surface: a registry mapping
//! qualified method names to event identifiers, an envelope for emitted
//! records, and pluggable delivery sinks.
//!
//! # Architecture
//!
//! - **models**: Datasources, batches, expectation suites, checkpoints, run identifiers
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//! - **usage**: Event catalog, tracked-method registry, sinks, and the dispatch handler
//! - **context**: The `DataContext` facade and its three backends
//! - **client**: HTTP client for the Veracity Cloud API
//!
//! Tracked calls emit a context-initialized record before the first tracked
//! operation of a context's lifetime, and one completion record per call
//! carrying the operation's outcome. Methods absent from the registry run
//! untracked; emission failures are logged and never surface to the caller.

pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod models;
pub mod usage;

// Re-export commonly used types
pub use client::CloudApiClient;
pub use config::Config;
pub use context::{
    CloudBackend, CloudDataContext, ContextBackend, ContextMethod, ContextVariant, DataContext,
    EphemeralBackend, EphemeralDataContext, FileBackend, FileDataContext, DATA_CONTEXT_OWNER,
};
pub use error::{ConfigError, ContextError, ContextResult, SinkError, SinkResult};
pub use models::{
    Batch, BatchRequest, CheckpointConfig, CheckpointResult, Datasource, Expectation,
    ExpectationSuite, RunIdentifier, ValidationOperatorResult,
};
pub use usage::{
    BatchingSink, HandlerStats, HttpSink, MemorySink, TracingSink, UsageEvent, UsageMessage,
    UsageSink, UsageStatsHandler,
};
