//! The tracked-method registry: which qualified methods report usage, and
//! which event each one reports.
//!
//! Keys are qualified method names (`"DataContext.run_checkpoint"`). The
//! table is immutable after initialization; the dispatch wrapper consults it
//! on every public call, and test code enumerates it to pin down the tracked
//! surface. A method missing from the table is simply not tracked. Lookups
//! never fail loudly.

use crate::usage::events::UsageEvent;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// Method name treated as construction rather than an operation. Its entry
/// supplies the context-initialized event and is excluded from enumeration.
pub const CONSTRUCTOR_METHOD: &str = "new";

/// Qualified method name to event, for every usage-tracked method.
pub static TRACKED_METHODS: Lazy<BTreeMap<&'static str, UsageEvent>> = Lazy::new(|| {
    BTreeMap::from([
        ("DataContext.new", UsageEvent::ContextInit),
        ("DataContext.add_datasource", UsageEvent::AddDatasource),
        ("DataContext.build_data_docs", UsageEvent::BuildDataDocs),
        ("DataContext.get_batch_list", UsageEvent::GetBatchList),
        ("DataContext.open_data_docs", UsageEvent::OpenDataDocs),
        ("DataContext.run_checkpoint", UsageEvent::RunCheckpoint),
        (
            "DataContext.run_profiler_on_data",
            UsageEvent::RunProfilerOnData,
        ),
        (
            "DataContext.run_profiler_with_dynamic_arguments",
            UsageEvent::RunProfilerWithDynamicArguments,
        ),
        (
            "DataContext.run_validation_operator",
            UsageEvent::RunValidationOperator,
        ),
        (
            "DataContext.save_expectation_suite",
            UsageEvent::SaveExpectationSuite,
        ),
    ])
});

/// Look up the event for `owner`.`method`. `None` means the method is not
/// tracked and the call proceeds without any emission.
pub fn lookup(owner: &str, method: &str) -> Option<UsageEvent> {
    let qualified = format!("{}.{}", owner, method);
    TRACKED_METHODS.get(qualified.as_str()).copied()
}

/// All tracked operations of one owning type family, keyed by bare method
/// name, with constructor-like entries excluded.
pub fn tracked_methods(owner: &str) -> BTreeMap<&'static str, UsageEvent> {
    let prefix = format!("{}.", owner);
    TRACKED_METHODS
        .iter()
        .filter_map(|(key, event)| {
            let method = key.strip_prefix(prefix.as_str())?;
            if is_constructor_like(method) {
                None
            } else {
                Some((method, *event))
            }
        })
        .collect()
}

/// Whether a method name denotes construction rather than a user operation.
pub fn is_constructor_like(method: &str) -> bool {
    method == CONSTRUCTOR_METHOD
}
