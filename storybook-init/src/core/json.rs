//! Small helpers for editing loosely-typed JSON documents in place.

use serde_json::{Map, Value};

pub type JsonObject = Map<String, Value>;

/// Borrow a document root as an object.
pub fn root_object<'a>(doc: &'a mut Value, label: &str) -> Result<&'a mut JsonObject, String> {
    match doc {
        Value::Object(map) => Ok(map),
        other => Err(format!(
            "{label}: expected a JSON object at the root, found {}",
            kind(other)
        )),
    }
}

/// Object stored under `key`, inserting `{}` when the key is absent or null.
pub fn object_or_default<'a>(
    parent: &'a mut JsonObject,
    key: &str,
) -> Result<&'a mut JsonObject, String> {
    let slot = parent
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if slot.is_null() {
        *slot = Value::Object(Map::new());
    }
    match slot {
        Value::Object(map) => Ok(map),
        other => Err(format!("{key}: expected an object, found {}", kind(other))),
    }
}

/// Array stored under `key`, inserting `[]` when the key is absent or null.
pub fn array_or_default<'a>(
    parent: &'a mut JsonObject,
    key: &str,
) -> Result<&'a mut Vec<Value>, String> {
    let slot = parent
        .entry(key.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    if slot.is_null() {
        *slot = Value::Array(Vec::new());
    }
    match slot {
        Value::Array(items) => Ok(items),
        other => Err(format!("{key}: expected an array, found {}", kind(other))),
    }
}

/// False for `null`, `false`, zero and the empty string.
///
/// Dependency entries with such values count as not installed.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_or_default_inserts_missing_and_null() {
        let mut doc = json!({ "present": { "a": 1 }, "nulled": null });
        let root = root_object(&mut doc, "doc").expect("root");

        object_or_default(root, "missing").expect("missing");
        object_or_default(root, "nulled").expect("nulled");
        let present = object_or_default(root, "present").expect("present");
        assert_eq!(present.get("a"), Some(&json!(1)));

        assert_eq!(
            doc,
            json!({ "present": { "a": 1 }, "nulled": {}, "missing": {} })
        );
    }

    #[test]
    fn object_or_default_rejects_wrong_type() {
        let mut doc = json!({ "dependencies": "oops" });
        let root = root_object(&mut doc, "doc").expect("root");
        let err = object_or_default(root, "dependencies").unwrap_err();
        assert!(err.contains("expected an object, found a string"));
    }

    #[test]
    fn array_or_default_keeps_existing_items() {
        let mut doc = json!({ "list": ["a", "b"] });
        let root = root_object(&mut doc, "doc").expect("root");
        let list = array_or_default(root, "list").expect("list");
        list.push(json!("c"));
        assert_eq!(doc, json!({ "list": ["a", "b", "c"] }));
    }

    #[test]
    fn truthiness_follows_package_json_conventions() {
        for value in [json!(null), json!(false), json!(0), json!("")] {
            assert!(!is_truthy(&value), "{value} should be falsy");
        }
        for value in [json!("*"), json!("0.0.0"), json!(true), json!(1), json!({}), json!([])] {
            assert!(is_truthy(&value), "{value} should be truthy");
        }
    }

    #[test]
    fn root_object_rejects_arrays() {
        let mut doc = json!([]);
        let err = root_object(&mut doc, "package.json").unwrap_err();
        assert!(err.starts_with("package.json:"));
    }
}
