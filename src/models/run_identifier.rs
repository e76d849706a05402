//! Run identity: a (run_name, run_time) pair identifying one validation run.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel used in tuple form when no run name was provided.
const NO_RUN_NAME: &str = "__none__";

/// Timestamp layout used in tuple form.
const TUPLE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S%.6fZ";

/// Datetime layouts accepted for run-time strings, tried in order.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y%m%dT%H%M%S%.fZ",
];

/// Identifies a run (a grouping of validations) by name and time.
///
/// `run_time` is always UTC: aware inputs are converted, naive inputs are
/// assumed to already be UTC. A run name that itself parses as a datetime
/// seeds the run time when none is given, so stores keyed by time sort
/// runs named after their schedule correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunIdentifier {
    /// Optional human-readable run name
    pub run_name: Option<String>,

    /// When the run happened (UTC)
    pub run_time: DateTime<Utc>,
}

impl RunIdentifier {
    /// Create an identifier, defaulting the run time.
    ///
    /// When `run_time` is absent the run name is tried as a datetime, and
    /// failing that the current time is used.
    pub fn new(run_name: Option<String>, run_time: Option<DateTime<Utc>>) -> Self {
        let run_time = run_time
            .or_else(|| run_name.as_deref().and_then(parse_run_time))
            .unwrap_or_else(Utc::now);
        Self { run_name, run_time }
    }

    /// Identifier for a run happening now.
    pub fn now(run_name: Option<String>) -> Self {
        Self::new(run_name, None)
    }

    /// Create an identifier from raw string parts.
    ///
    /// An unparseable `run_time` string logs a warning and defaults the run
    /// time to now. The run-name seeding in [`RunIdentifier::new`] applies
    /// only when no run time was given at all.
    pub fn from_parts(run_name: Option<&str>, run_time: Option<&str>) -> Self {
        let parsed = run_time.map(|raw| {
            parse_run_time(raw).unwrap_or_else(|| {
                tracing::warn!(
                    run_time = raw,
                    "unable to parse run_time string, defaulting run time to now"
                );
                Utc::now()
            })
        });
        Self::new(run_name.map(str::to_string), parsed)
    }

    /// Tuple form used by store keys: `(run_name, run_time)` with the
    /// `__none__` sentinel standing in for a missing name.
    pub fn to_tuple(&self) -> (String, String) {
        (
            self.run_name
                .clone()
                .unwrap_or_else(|| NO_RUN_NAME.to_string()),
            self.run_time.format(TUPLE_TIME_FORMAT).to_string(),
        )
    }

    /// Fixed-length tuple form; identical to [`RunIdentifier::to_tuple`].
    pub fn to_fixed_length_tuple(&self) -> (String, String) {
        self.to_tuple()
    }

    /// Rebuild an identifier from its tuple form.
    pub fn from_tuple(parts: (String, String)) -> Self {
        let run_name = if parts.0 == NO_RUN_NAME {
            None
        } else {
            Some(parts.0.as_str())
        };
        Self::from_parts(run_name, Some(parts.1.as_str()))
    }

    /// Rebuild an identifier from its fixed-length tuple form.
    pub fn from_fixed_length_tuple(parts: (String, String)) -> Self {
        Self::from_tuple(parts)
    }
}

/// Parse a datetime string, accepting RFC 3339 plus the common naive layouts.
/// Naive values are taken as UTC.
fn parse_run_time(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(aware) = DateTime::parse_from_rfc3339(raw) {
        return Some(aware.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let naive = date.and_hms_opt(0, 0, 0)?;
        return Some(Utc.from_utc_datetime(&naive));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aware_run_time_converts_to_utc() {
        let id = RunIdentifier::from_parts(None, Some("2024-01-15T12:30:00+02:00"));
        assert_eq!(id.run_time.to_rfc3339(), "2024-01-15T10:30:00+00:00");
    }

    #[test]
    fn test_naive_run_time_assumed_utc() {
        let id = RunIdentifier::from_parts(None, Some("2024-01-15T12:30:00"));
        assert_eq!(id.run_time.to_rfc3339(), "2024-01-15T12:30:00+00:00");
    }

    #[test]
    fn test_unparseable_run_time_defaults_to_now() {
        let before = Utc::now();
        let id = RunIdentifier::from_parts(Some("2021-06-18T13:00:00"), Some("not a time"));
        let after = Utc::now();
        // The datetime-shaped run name must not seed the run time here.
        assert_eq!(id.run_name.as_deref(), Some("2021-06-18T13:00:00"));
        assert!(id.run_time >= before && id.run_time <= after);
    }

    #[test]
    fn test_run_name_seeds_run_time() {
        let id = RunIdentifier::new(Some("20240115T101530.000000Z".to_string()), None);
        assert_eq!(id.run_time.to_rfc3339(), "2024-01-15T10:15:30+00:00");
    }

    #[test]
    fn test_missing_parts_default_to_now() {
        let before = Utc::now();
        let id = RunIdentifier::now(Some("nightly".to_string()));
        let after = Utc::now();
        assert!(id.run_time >= before && id.run_time <= after);
        assert_eq!(id.run_name.as_deref(), Some("nightly"));
    }

    #[test]
    fn test_tuple_uses_sentinel_for_missing_name() {
        let id = RunIdentifier::from_parts(None, Some("2024-01-15T10:15:30.123456"));
        let (name, time) = id.to_tuple();
        assert_eq!(name, "__none__");
        assert_eq!(time, "20240115T101530.123456Z");
    }

    #[test]
    fn test_tuple_roundtrip() {
        let id = RunIdentifier::from_parts(Some("nightly"), Some("2024-01-15T10:15:30.123456"));
        let rebuilt = RunIdentifier::from_tuple(id.to_tuple());
        assert_eq!(rebuilt, id);

        let anonymous = RunIdentifier::from_parts(None, Some("2024-01-15T10:15:30"));
        let rebuilt = RunIdentifier::from_fixed_length_tuple(anonymous.to_fixed_length_tuple());
        assert_eq!(rebuilt.run_name, None);
        assert_eq!(rebuilt.run_time, anonymous.run_time);
    }

    #[test]
    fn test_serde_roundtrip() {
        let id = RunIdentifier::from_parts(Some("nightly"), Some("2024-01-15T10:15:30"));
        let json = serde_json::to_string(&id).unwrap();
        let parsed: RunIdentifier = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_date_only_run_time() {
        let id = RunIdentifier::from_parts(None, Some("2024-01-15"));
        assert_eq!(id.run_time.to_rfc3339(), "2024-01-15T00:00:00+00:00");
    }
}
