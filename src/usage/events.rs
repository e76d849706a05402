//! Usage-event identifiers.
//!
//! One variant per distinguishable user action, plus the context-initialized
//! event. Wire names are stable identifiers the collector aggregates on, so
//! they live here as the single source of truth. Payloads attached to these
//! events are restricted to identifiers, counts and flags; never data,
//! queries, or anything derived from user content.

use serde::de::{self, Deserialize, Deserializer};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Symbolic identifier for a tracked user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UsageEvent {
    /// Emitted once per context lifetime, before the first tracked action
    ContextInit,
    AddDatasource,
    BuildDataDocs,
    GetBatchList,
    OpenDataDocs,
    RunCheckpoint,
    RunProfilerOnData,
    RunProfilerWithDynamicArguments,
    RunValidationOperator,
    SaveExpectationSuite,
}

impl UsageEvent {
    /// Every event, in declaration order.
    pub const ALL: &'static [UsageEvent] = &[
        UsageEvent::ContextInit,
        UsageEvent::AddDatasource,
        UsageEvent::BuildDataDocs,
        UsageEvent::GetBatchList,
        UsageEvent::OpenDataDocs,
        UsageEvent::RunCheckpoint,
        UsageEvent::RunProfilerOnData,
        UsageEvent::RunProfilerWithDynamicArguments,
        UsageEvent::RunValidationOperator,
        UsageEvent::SaveExpectationSuite,
    ];

    /// Stable wire name reported to the collector.
    pub fn as_str(&self) -> &'static str {
        match self {
            UsageEvent::ContextInit => "data_context.init",
            UsageEvent::AddDatasource => "data_context.add_datasource",
            UsageEvent::BuildDataDocs => "data_context.build_data_docs",
            UsageEvent::GetBatchList => "data_context.get_batch_list",
            UsageEvent::OpenDataDocs => "data_context.open_data_docs",
            UsageEvent::RunCheckpoint => "data_context.run_checkpoint",
            UsageEvent::RunProfilerOnData => "data_context.run_profiler_on_data",
            UsageEvent::RunProfilerWithDynamicArguments => {
                "data_context.run_profiler_with_dynamic_arguments"
            }
            UsageEvent::RunValidationOperator => "data_context.run_validation_operator",
            UsageEvent::SaveExpectationSuite => "data_context.save_expectation_suite",
        }
    }
}

impl fmt::Display for UsageEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown wire name.
#[derive(Debug, Error)]
#[error("unknown usage event: {0}")]
pub struct UnknownEvent(String);

impl FromStr for UsageEvent {
    type Err = UnknownEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UsageEvent::ALL
            .iter()
            .copied()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| UnknownEvent(s.to_string()))
    }
}

// Serialized as the bare wire name so records carry "data_context.init"
// rather than a variant name.
impl Serialize for UsageEvent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for UsageEvent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_wire_names_are_unique_and_namespaced() {
        let names: HashSet<&str> = UsageEvent::ALL.iter().map(|e| e.as_str()).collect();
        assert_eq!(names.len(), UsageEvent::ALL.len());
        for name in names {
            assert!(
                name.starts_with("data_context."),
                "wire name {:?} missing namespace",
                name
            );
        }
    }

    #[test]
    fn test_from_str_roundtrip() {
        for event in UsageEvent::ALL {
            let parsed: UsageEvent = event.as_str().parse().unwrap();
            assert_eq!(parsed, *event);
        }
        assert!("data_context.unknown".parse::<UsageEvent>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_name() {
        let json = serde_json::to_string(&UsageEvent::RunCheckpoint).unwrap();
        assert_eq!(json, "\"data_context.run_checkpoint\"");

        let parsed: UsageEvent = serde_json::from_str("\"data_context.init\"").unwrap();
        assert_eq!(parsed, UsageEvent::ContextInit);
    }
}
