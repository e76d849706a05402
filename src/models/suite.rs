//! Expectation suite models.
//!
//! A suite is a named collection of declarative expectations. Evaluating them
//! against data is the validation engine's job; the context stores, retrieves,
//! and hands suites around.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single declarative expectation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Expectation {
    /// Expectation type identifier (e.g. "expect_column_values_to_not_be_null")
    pub expectation_type: String,

    /// Type-specific arguments
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub kwargs: Value,
}

impl Expectation {
    /// Create an expectation of the given type.
    pub fn new(expectation_type: impl Into<String>, kwargs: Value) -> Self {
        Self {
            expectation_type: expectation_type.into(),
            kwargs,
        }
    }
}

/// A named collection of expectations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ExpectationSuite {
    /// Unique suite name within its context
    pub name: String,

    /// The expectations in the suite
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expectations: Vec<Expectation>,

    /// Free-form metadata (identifiers and counts only)
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub meta: Value,
}

impl ExpectationSuite {
    /// Create an empty suite.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expectations: Vec::new(),
            meta: Value::Null,
        }
    }

    /// Append an expectation.
    pub fn add(&mut self, expectation: Expectation) {
        self.expectations.push(expectation);
    }

    /// Number of expectations in the suite.
    pub fn len(&self) -> usize {
        self.expectations.len()
    }

    /// Whether the suite has no expectations.
    pub fn is_empty(&self) -> bool {
        self.expectations.is_empty()
    }
}
