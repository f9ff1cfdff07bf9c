//! Type-safe schema generation for Gemini structured output.
//!
//! Uses the `schemars` crate to generate a JSON schema from a Rust type, then
//! rewrites it into the OpenAPI subset that `generationConfig.responseSchema`
//! accepts.
//!
//! # Example
//!
//! ```rust,ignore
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//! use gemini_client::StructuredOutput;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct Word {
//!     word: String,
//!     definition: String,
//! }
//!
//! // {"type": "ARRAY", "items": {"type": "OBJECT", ...}}
//! let schema = Vec::<Word>::gemini_schema();
//! ```

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Keys copied through unchanged. Everything else schemars emits (`$schema`,
/// `title`, `additionalProperties`, `format`, `definitions`, ...) is dropped.
const PASSTHROUGH_KEYS: &[&str] = &["description", "enum", "required"];

/// Trait for types that can be used as Gemini structured output.
///
/// Automatically implemented for any type that implements `JsonSchema + DeserializeOwned`.
pub trait StructuredOutput: JsonSchema + DeserializeOwned {
    /// Generate a Gemini-compatible response schema for this type.
    ///
    /// Gemini requires:
    /// 1. Upper-case type names (`STRING`, `ARRAY`, `OBJECT`, ...)
    /// 2. `nullable: true` instead of `["string", "null"]` type unions
    /// 3. Fully inlined schemas (no `$ref` references)
    ///
    /// Object schemas also get `propertyOrdering` so the model emits fields in
    /// declaration order.
    fn gemini_schema() -> Value {
        let schema = schema_for!(Self);
        let value = serde_json::to_value(schema).unwrap_or_default();
        let definitions = value.get("definitions").cloned().unwrap_or(Value::Null);
        convert(&value, &definitions)
    }
}

// Blanket implementation for all types that satisfy the bounds
impl<T: JsonSchema + DeserializeOwned> StructuredOutput for T {}

/// Rewrite one schemars node (and its children) into Gemini's dialect.
fn convert(value: &Value, definitions: &Value) -> Value {
    let Value::Object(map) = value else {
        return value.clone();
    };

    if let Some(resolved) = resolve_ref(map, definitions) {
        return convert(resolved, definitions);
    }

    // Option<Struct> comes out as anyOf [{$ref}, {type: null}]
    if let Some(Value::Array(variants)) = map.get("anyOf") {
        let non_null: Vec<&Value> = variants.iter().filter(|v| !is_null_schema(v)).collect();
        if non_null.len() == 1 {
            let mut inner = convert(non_null[0], definitions);
            if non_null.len() < variants.len() {
                if let Value::Object(inner_map) = &mut inner {
                    inner_map.insert("nullable".to_string(), Value::Bool(true));
                }
            }
            return inner;
        }
    }

    let mut out = Map::new();

    match map.get("type") {
        Some(Value::String(t)) => {
            out.insert("type".to_string(), Value::String(t.to_uppercase()));
        }
        Some(Value::Array(types)) => {
            let mut nullable = false;
            for t in types.iter().filter_map(Value::as_str) {
                if t == "null" {
                    nullable = true;
                } else if !out.contains_key("type") {
                    out.insert("type".to_string(), Value::String(t.to_uppercase()));
                }
            }
            if nullable {
                out.insert("nullable".to_string(), Value::Bool(true));
            }
        }
        _ => {}
    }

    if let Some(Value::Object(properties)) = map.get("properties") {
        let mut converted = Map::new();
        let mut ordering = Vec::with_capacity(properties.len());
        for (name, schema) in properties {
            converted.insert(name.clone(), convert(schema, definitions));
            ordering.push(Value::String(name.clone()));
        }
        out.insert("properties".to_string(), Value::Object(converted));
        out.insert("propertyOrdering".to_string(), Value::Array(ordering));
    }

    match map.get("items") {
        Some(items @ Value::Object(_)) => {
            out.insert("items".to_string(), convert(items, definitions));
        }
        // Tuple schemas: Gemini only supports a single item schema
        Some(Value::Array(items)) => {
            if let Some(first) = items.first() {
                out.insert("items".to_string(), convert(first, definitions));
            }
        }
        _ => {}
    }

    for key in PASSTHROUGH_KEYS {
        if let Some(v) = map.get(*key) {
            out.insert((*key).to_string(), v.clone());
        }
    }

    Value::Object(out)
}

/// Look up `#/definitions/Name` references.
fn resolve_ref<'a>(map: &Map<String, Value>, definitions: &'a Value) -> Option<&'a Value> {
    let path = map.get("$ref")?.as_str()?;
    let name = path.strip_prefix("#/definitions/")?;
    definitions.get(name)
}

fn is_null_schema(value: &Value) -> bool {
    value.get("type").and_then(Value::as_str) == Some("null")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, JsonSchema)]
    struct TestWord {
        word: String,
        definition: String,
    }

    #[derive(Deserialize, JsonSchema)]
    struct TestEntry {
        headword: TestWord,
        note: Option<String>,
        related: Option<TestWord>,
        count: u32,
    }

    #[test]
    fn test_array_of_objects() {
        let schema = Vec::<TestWord>::gemini_schema();

        assert_eq!(schema["type"], "ARRAY");
        let items = &schema["items"];
        assert_eq!(items["type"], "OBJECT");
        assert_eq!(items["properties"]["word"]["type"], "STRING");
        assert_eq!(items["properties"]["definition"]["type"], "STRING");

        let required: Vec<&str> = items["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert!(required.contains(&"word"));
        assert!(required.contains(&"definition"));

        let ordering = items["propertyOrdering"].as_array().unwrap();
        assert_eq!(ordering.len(), 2);
    }

    #[test]
    fn test_drops_unsupported_keys() {
        let schema = Vec::<TestWord>::gemini_schema();
        let text = serde_json::to_string(&schema).unwrap();

        assert!(!text.contains("$schema"));
        assert!(!text.contains("$ref"));
        assert!(!text.contains("definitions"));
        assert!(!text.contains("additionalProperties"));
        assert!(schema.get("title").is_none());
    }

    #[test]
    fn test_nullable_and_nested() {
        let schema = TestEntry::gemini_schema();
        let props = &schema["properties"];

        assert_eq!(props["headword"]["type"], "OBJECT");
        assert_eq!(props["headword"]["properties"]["word"]["type"], "STRING");

        assert_eq!(props["note"]["type"], "STRING");
        assert_eq!(props["note"]["nullable"], true);

        assert_eq!(props["related"]["type"], "OBJECT");
        assert_eq!(props["related"]["nullable"], true);

        assert_eq!(props["count"]["type"], "INTEGER");
        assert!(props["count"].get("format").is_none());
    }
}
