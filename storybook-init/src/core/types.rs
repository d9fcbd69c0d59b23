//! Shared deterministic types for the init pipeline.

use indexmap::IndexMap;
use serde::Serialize;

/// Package name to version specifier, in staging order.
pub type DependencyMap = IndexMap<String, String>;

/// Dependencies staged by the planner before they are merged into the manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingDependencies {
    pub dependencies: DependencyMap,
    pub dev_dependencies: DependencyMap,
}

impl PendingDependencies {
    /// Stage a development dependency.
    ///
    /// Re-staging a name replaces its version but keeps its original position.
    pub fn stage_dev(&mut self, name: &str, version: &str) {
        self.dev_dependencies
            .insert(name.to_string(), version.to_string());
    }
}

/// Names added to each manifest channel by a merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeSummary {
    pub added_dependencies: Vec<String>,
    pub added_dev_dependencies: Vec<String>,
}
