//! Data models for Veracity data-quality entities.
//!
//! This module contains the data structures a context stores and hands around:
//! datasources, batch requests, expectation suites, checkpoints, and the run
//! identifiers stamped on validation results.

pub mod batch;
pub mod checkpoint;
pub mod datasource;
pub mod run_identifier;
pub mod suite;

pub use batch::{Batch, BatchRequest};
pub use checkpoint::{CheckpointConfig, CheckpointResult, ValidationOperatorResult};
pub use datasource::Datasource;
pub use run_identifier::RunIdentifier;
pub use suite::{Expectation, ExpectationSuite};
