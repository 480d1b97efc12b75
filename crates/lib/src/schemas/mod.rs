//! # Function-Calling Schemas
//!
//! Static JSON Schemas handed to the LLM as a forced function call. Each engine
//! family gets its own layout; every scalar field is nullable so the model can
//! leave out what the bulletin does not state.

mod cfm;
mod leap;

pub use cfm::{cfm_schema, CFM_FUNCTION_NAME};
pub use leap::{leap_schema, LEAP_FUNCTION_NAME};

use serde::Serialize;
use serde_json::{json, Map, Value};

/// A single function specification as understood by function-calling APIs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionSchema {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl FunctionSchema {
    pub fn new(name: &str, description: &str, parameters: Value) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            parameters,
        }
    }

    /// Returns the declaration in the OpenAPI subset accepted by Gemini.
    ///
    /// Gemini rejects JSON Schema type unions, so `"type": ["string", "null"]`
    /// becomes `"type": "string", "nullable": true`.
    pub fn to_gemini_declaration(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "parameters": to_openapi_subset(&self.parameters),
        })
    }
}

fn to_openapi_subset(schema: &Value) -> Value {
    let Some(object) = schema.as_object() else {
        return schema.clone();
    };

    let mut converted = Map::new();
    for (key, value) in object {
        match key.as_str() {
            "type" => match value {
                Value::Array(kinds) => {
                    let nullable = kinds.iter().any(|k| k == "null");
                    let primary = kinds
                        .iter()
                        .find(|k| *k != "null")
                        .cloned()
                        .unwrap_or_else(|| Value::String("string".to_string()));
                    converted.insert("type".to_string(), primary);
                    if nullable {
                        converted.insert("nullable".to_string(), Value::Bool(true));
                    }
                }
                other => {
                    converted.insert("type".to_string(), other.clone());
                }
            },
            "properties" => {
                let properties = value
                    .as_object()
                    .map(|props| {
                        props
                            .iter()
                            .map(|(name, prop)| (name.clone(), to_openapi_subset(prop)))
                            .collect::<Map<_, _>>()
                    })
                    .unwrap_or_default();
                converted.insert(key.clone(), Value::Object(properties));
            }
            "items" => {
                converted.insert(key.clone(), to_openapi_subset(value));
            }
            _ => {
                converted.insert(key.clone(), value.clone());
            }
        }
    }
    Value::Object(converted)
}

/// `{"type": [kind, "null"]}`
pub(crate) fn nullable(kind: &str) -> Value {
    json!({ "type": [kind, "null"] })
}

/// An object schema whose listed properties are all nullable strings.
pub(crate) fn nullable_strings(fields: &[&str]) -> Value {
    let properties: Map<String, Value> = fields
        .iter()
        .map(|field| (field.to_string(), nullable("string")))
        .collect();
    json!({ "type": "object", "properties": properties })
}

/// An array schema whose items are objects built from `item`.
pub(crate) fn array_of(item: Value) -> Value {
    json!({ "type": "array", "items": item })
}
