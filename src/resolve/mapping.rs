// ABOUTME: Mapping resolver for ordered JSON mappings
// ABOUTME: Renders marked string values and recurses into nested mappings, never mutating input

use serde_json::{Map, Value as JsonValue};
use tracing::debug;

use crate::template::{has_markers, Result, TemplateContext, TemplateEngine};

/// Build a new mapping with the same key order in which every string holding
/// template markers is rendered and every nested mapping is resolved.
/// Other values are copied as they are. The first render failure aborts.
pub fn resolve_mapping(
    engine: &TemplateEngine,
    source: &Map<String, JsonValue>,
    context: &TemplateContext,
) -> Result<Map<String, JsonValue>> {
    let mut resolved = Map::with_capacity(source.len());
    for (key, value) in source {
        resolved.insert(key.clone(), resolve_value(engine, value, context)?);
    }
    Ok(resolved)
}

/// Resolve a single value under the mapping rules
pub fn resolve_value(
    engine: &TemplateEngine,
    value: &JsonValue,
    context: &TemplateContext,
) -> Result<JsonValue> {
    match value {
        JsonValue::String(text) if has_markers(text) => {
            debug!("resolving template value: {}", text);
            Ok(JsonValue::String(engine.render(text, context)?))
        }
        JsonValue::Object(map) => Ok(JsonValue::Object(resolve_mapping(engine, map, context)?)),
        // Arrays, numbers, booleans, null and plain strings pass through
        other => Ok(other.clone()),
    }
}
