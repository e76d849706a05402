//! Catalog of the public data-context operations.

/// Type-family name used in qualified registry keys. Every concrete backend
/// reports under this one owner, so polymorphism never changes which event a
/// method maps to.
pub const DATA_CONTEXT_OWNER: &str = "DataContext";

/// Every public operation exposed by the context facade.
///
/// Whether a catalogued method reports usage is decided by the registry, not
/// here: a method with no registry entry runs untracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContextMethod {
    AddCheckpoint,
    AddDatasource,
    BuildDataDocs,
    GetBatchList,
    GetExpectationSuite,
    ListDatasources,
    OpenDataDocs,
    RunCheckpoint,
    RunProfilerOnData,
    RunProfilerWithDynamicArguments,
    RunValidationOperator,
    SaveExpectationSuite,
}

impl ContextMethod {
    /// Every catalogued method, in name order.
    pub const ALL: &'static [ContextMethod] = &[
        ContextMethod::AddCheckpoint,
        ContextMethod::AddDatasource,
        ContextMethod::BuildDataDocs,
        ContextMethod::GetBatchList,
        ContextMethod::GetExpectationSuite,
        ContextMethod::ListDatasources,
        ContextMethod::OpenDataDocs,
        ContextMethod::RunCheckpoint,
        ContextMethod::RunProfilerOnData,
        ContextMethod::RunProfilerWithDynamicArguments,
        ContextMethod::RunValidationOperator,
        ContextMethod::SaveExpectationSuite,
    ];

    /// Bare method name as it appears on the facade.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextMethod::AddCheckpoint => "add_checkpoint",
            ContextMethod::AddDatasource => "add_datasource",
            ContextMethod::BuildDataDocs => "build_data_docs",
            ContextMethod::GetBatchList => "get_batch_list",
            ContextMethod::GetExpectationSuite => "get_expectation_suite",
            ContextMethod::ListDatasources => "list_datasources",
            ContextMethod::OpenDataDocs => "open_data_docs",
            ContextMethod::RunCheckpoint => "run_checkpoint",
            ContextMethod::RunProfilerOnData => "run_profiler_on_data",
            ContextMethod::RunProfilerWithDynamicArguments => {
                "run_profiler_with_dynamic_arguments"
            }
            ContextMethod::RunValidationOperator => "run_validation_operator",
            ContextMethod::SaveExpectationSuite => "save_expectation_suite",
        }
    }

    /// Qualified name as it appears in registry keys.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", DATA_CONTEXT_OWNER, self.as_str())
    }

    /// Look up a catalogued method by bare name.
    pub fn from_name(name: &str) -> Option<ContextMethod> {
        ContextMethod::ALL
            .iter()
            .copied()
            .find(|method| method.as_str() == name)
    }
}
