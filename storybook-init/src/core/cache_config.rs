//! `nx.json` task runner cache settings.

use serde_json::Value;

use crate::core::json::{array_or_default, object_or_default, root_object};

pub const DEFAULT_TASKS_RUNNER: &str = "@nrwl/workspace/tasks-runners/default";
pub const BUILD_STORYBOOK_TASK: &str = "build-storybook";

/// Add `operation` to the default runner's `cacheableOperations`.
///
/// Configs without a default runner, or whose default runner is not
/// [`DEFAULT_TASKS_RUNNER`], are left untouched. Returns true if the list grew.
pub fn add_cacheable_operation(config: &mut Value, operation: &str) -> Result<bool, String> {
    let root = root_object(config, "nx.json")?;
    let Some(default) = root
        .get_mut("tasksRunnerOptions")
        .and_then(|options| options.get_mut("default"))
        .and_then(Value::as_object_mut)
    else {
        return Ok(false);
    };
    if default.get("runner").and_then(Value::as_str) != Some(DEFAULT_TASKS_RUNNER) {
        return Ok(false);
    }

    let options = object_or_default(default, "options")?;
    let operations = array_or_default(options, "cacheableOperations")?;
    if operations
        .iter()
        .any(|existing| existing.as_str() == Some(operation))
    {
        return Ok(false);
    }
    operations.push(Value::String(operation.to_string()));
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config_with_operations(operations: Value) -> Value {
        json!({
            "npmScope": "proj",
            "tasksRunnerOptions": {
                "default": {
                    "runner": DEFAULT_TASKS_RUNNER,
                    "options": { "cacheableOperations": operations }
                }
            }
        })
    }

    #[test]
    fn appends_to_empty_list() {
        let mut config = config_with_operations(json!([]));
        assert!(add_cacheable_operation(&mut config, BUILD_STORYBOOK_TASK).expect("patch"));
        assert_eq!(
            config["tasksRunnerOptions"]["default"]["options"]["cacheableOperations"],
            json!(["build-storybook"])
        );
    }

    #[test]
    fn existing_entry_is_not_duplicated() {
        let mut config = config_with_operations(json!(["build", "build-storybook", "test"]));
        let before = config.clone();
        assert!(!add_cacheable_operation(&mut config, BUILD_STORYBOOK_TASK).expect("patch"));
        assert_eq!(config, before);
    }

    #[test]
    fn appends_after_existing_entries() {
        let mut config = config_with_operations(json!(["build", "lint"]));
        add_cacheable_operation(&mut config, BUILD_STORYBOOK_TASK).expect("patch");
        assert_eq!(
            config["tasksRunnerOptions"]["default"]["options"]["cacheableOperations"],
            json!(["build", "lint", "build-storybook"])
        );
    }

    #[test]
    fn creates_missing_options_and_list() {
        let mut config = json!({
            "tasksRunnerOptions": { "default": { "runner": DEFAULT_TASKS_RUNNER } }
        });
        assert!(add_cacheable_operation(&mut config, BUILD_STORYBOOK_TASK).expect("patch"));
        assert_eq!(
            config["tasksRunnerOptions"]["default"]["options"],
            json!({ "cacheableOperations": ["build-storybook"] })
        );
    }

    #[test]
    fn unrecognized_runner_is_left_unchanged() {
        let mut config = json!({
            "tasksRunnerOptions": {
                "default": {
                    "runner": "@nrwl/nx-cloud",
                    "options": { "cacheableOperations": ["build"] }
                }
            }
        });
        let before = config.clone();
        assert!(!add_cacheable_operation(&mut config, BUILD_STORYBOOK_TASK).expect("patch"));
        assert_eq!(config, before);
    }

    #[test]
    fn missing_runner_options_are_left_unchanged() {
        for mut config in [
            json!({ "npmScope": "proj" }),
            json!({ "tasksRunnerOptions": {} }),
            json!({ "tasksRunnerOptions": { "default": { "options": {} } } }),
        ] {
            let before = config.clone();
            assert!(!add_cacheable_operation(&mut config, BUILD_STORYBOOK_TASK).expect("patch"));
            assert_eq!(config, before);
        }
    }

    #[test]
    fn malformed_operations_list_is_an_error() {
        let mut config = config_with_operations(json!("build"));
        let err = add_cacheable_operation(&mut config, BUILD_STORYBOOK_TASK).unwrap_err();
        assert!(err.contains("cacheableOperations"));
    }
}
