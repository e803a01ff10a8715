// ABOUTME: Template context management for resolution passes
// ABOUTME: Holds the ordered variable mapping handed to every render call

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::path::Path;

use super::error::{Result, TemplateError};

/// Ordered mapping from variable name to value, applied to every template
/// rendered during a resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateContext {
    variables: Map<String, JsonValue>,
}

impl TemplateContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context from a JSON value, which must be an object
    pub fn from_json(value: JsonValue) -> Result<Self> {
        match value {
            JsonValue::Object(variables) => Ok(Self { variables }),
            JsonValue::Null => Ok(Self::new()),
            other => Err(TemplateError::InvalidContext(json_type_name(&other))),
        }
    }

    /// Create a context from any serializable value that serializes to a mapping
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self> {
        Self::from_json(serde_json::to_value(value)?)
    }

    /// Load a context from a YAML or JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        // JSON documents are valid YAML, one parser covers both
        let value: JsonValue = serde_yaml::from_str(&contents)?;
        Self::from_json(value)
    }

    /// Add or update a variable
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Get a variable value
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.variables.get(key)
    }

    /// Add multiple variables, later values win
    pub fn extend<I, K, V>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<JsonValue>,
    {
        for (key, value) in vars {
            self.set(key, value);
        }
    }

    pub fn variables(&self) -> &Map<String, JsonValue> {
        &self.variables
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl From<Map<String, JsonValue>> for TemplateContext {
    fn from(variables: Map<String, JsonValue>) -> Self {
        Self { variables }
    }
}

/// Human readable name of a JSON value's type, used in error messages
pub fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_context_creation() {
        let mut variables = Map::new();
        variables.insert("env".to_string(), json!("test"));
        variables.insert("version".to_string(), json!("1.0.0"));

        let context = TemplateContext::from(variables);

        assert_eq!(context.get("env"), Some(&json!("test")));
        assert_eq!(context.get("version"), Some(&json!("1.0.0")));
        assert_eq!(context.len(), 2);
    }

    #[test]
    fn test_set_preserves_insertion_order() {
        let mut context = TemplateContext::new();
        context.set("zeta", 1);
        context.set("alpha", "two");
        context.set("mid", json!({"nested": true}));

        let keys: Vec<&String> = context.variables().keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        let err = TemplateContext::from_json(json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("array"));

        assert!(TemplateContext::from_json(JsonValue::Null).unwrap().is_empty());
    }

    #[test]
    fn test_from_serialize() {
        #[derive(Serialize)]
        struct Account {
            name: String,
            balance: i64,
        }

        let context = TemplateContext::from_serialize(&Account {
            name: "checking".to_string(),
            balance: 1250,
        })
        .unwrap();

        assert_eq!(context.get("name"), Some(&json!("checking")));
        assert_eq!(context.get("balance"), Some(&json!(1250)));
    }

    #[test]
    fn test_load_yaml_and_json() {
        let mut yaml = tempfile::NamedTempFile::new().unwrap();
        writeln!(yaml, "name: World\ncount: 3\nuser:\n  email: a@b.c").unwrap();
        let context = TemplateContext::load(yaml.path()).unwrap();
        assert_eq!(context.get("name"), Some(&json!("World")));
        assert_eq!(context.get("count"), Some(&json!(3)));
        assert_eq!(context.get("user"), Some(&json!({"email": "a@b.c"})));

        let mut json_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(json_file, r#"{{"name": "World", "tags": ["a", "b"]}}"#).unwrap();
        let context = TemplateContext::load(json_file.path()).unwrap();
        assert_eq!(context.get("tags"), Some(&json!(["a", "b"])));
    }

    #[test]
    fn test_extend_overrides_in_place() {
        let mut context = TemplateContext::new();
        context.extend([("a", 1), ("b", 2)]);
        context.extend([("a", 3)]);

        let keys: Vec<&String> = context.variables().keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(context.get("a"), Some(&json!(3)));
    }
}
