//! Pure edits of `package.json` dependency channels.

use serde_json::Value;

use crate::core::json::{JsonObject, is_truthy, object_or_default, root_object};
use crate::core::types::{DependencyMap, MergeSummary, PendingDependencies};

pub const DEPENDENCIES: &str = "dependencies";
pub const DEV_DEPENDENCIES: &str = "devDependencies";

const LABEL: &str = "package.json";

/// True if `name` has a non-empty entry under `dependencies` or `devDependencies`.
///
/// Missing, null or non-object channels count as not declaring anything, as
/// do entries whose version is empty or null.
pub fn is_declared(manifest: &Value, name: &str) -> bool {
    [DEPENDENCIES, DEV_DEPENDENCIES].iter().any(|channel| {
        manifest
            .get(channel)
            .and_then(Value::as_object)
            .is_some_and(|deps| deps.get(name).is_some_and(is_truthy))
    })
}

/// Merge staged dependencies into the manifest.
///
/// Entries already present in the target channel keep their declared version;
/// new entries are appended in staging order. A channel is only created or
/// touched when something is staged for it.
pub fn merge_dependencies(
    manifest: &mut Value,
    pending: &PendingDependencies,
) -> Result<MergeSummary, String> {
    let root = root_object(manifest, LABEL)?;
    let added_dependencies = merge_channel(root, DEPENDENCIES, &pending.dependencies)?;
    let added_dev_dependencies = merge_channel(root, DEV_DEPENDENCIES, &pending.dev_dependencies)?;
    Ok(MergeSummary {
        added_dependencies,
        added_dev_dependencies,
    })
}

fn merge_channel(
    root: &mut JsonObject,
    channel: &str,
    staged: &DependencyMap,
) -> Result<Vec<String>, String> {
    if staged.is_empty() {
        return Ok(Vec::new());
    }
    let target = object_or_default(root, channel)?;
    let mut added = Vec::new();
    for (name, version) in staged {
        if target.contains_key(name) {
            continue;
        }
        target.insert(name.clone(), Value::String(version.clone()));
        added.push(name.clone());
    }
    Ok(added)
}

/// Move `name` from `dependencies` to `devDependencies`.
///
/// Both channels are created when absent. The runtime specifier overwrites any
/// existing development entry. An empty or null runtime entry stays where it
/// is. Returns true if the package was moved.
pub fn relocate_to_dev(manifest: &mut Value, name: &str) -> Result<bool, String> {
    let root = root_object(manifest, LABEL)?;
    let deps = object_or_default(root, DEPENDENCIES)?;
    let moved = if deps.get(name).is_some_and(is_truthy) {
        deps.shift_remove(name)
    } else {
        None
    };
    let dev = object_or_default(root, DEV_DEPENDENCIES)?;
    match moved {
        Some(version) => {
            dev.insert(name.to_string(), version);
            Ok(true)
        }
        None => Ok(false),
    }
}
