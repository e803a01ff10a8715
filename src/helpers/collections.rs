// ABOUTME: Collection search helper for templates
// ABOUTME: Implements find over arrays and mapping values using dotted property paths

use handlebars::{Context, Handlebars, Helper, Output, RenderContext, RenderError};
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use super::error::{HelperError, Result};
use super::{required_param, value_text};
use crate::template::context::json_type_name;

/// Follow a dotted path such as `owner.emails.0` through objects and arrays.
/// An empty path yields the value itself.
pub fn lookup_path<'a>(value: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    if path.is_empty() {
        return Some(value);
    }
    path.split('.').try_fold(value, |current, segment| match current {
        JsonValue::Object(map) => map.get(segment),
        JsonValue::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Return the text at `output` of the first item whose `path` holds the
/// string `arg`. Arrays are searched in order, mappings by their values.
/// No match is not an error and yields an empty string.
pub fn find(source: &JsonValue, path: &str, arg: &str, output: &str) -> Result<String> {
    let items: Box<dyn Iterator<Item = &JsonValue> + '_> = match source {
        JsonValue::Array(items) => Box::new(items.iter()),
        JsonValue::Object(map) => Box::new(map.values()),
        other => {
            return Err(HelperError::IllegalArgumentType {
                helper: "find",
                found: json_type_name(other).to_string(),
            })
        }
    };

    for (index, item) in items.enumerate() {
        let matches = match lookup_path(item, path) {
            Some(JsonValue::String(value)) => value == arg,
            Some(_) => false,
            None => {
                debug!("find: item {} has no property '{}'", index, path);
                false
            }
        };
        if !matches {
            continue;
        }
        match lookup_path(item, output) {
            Some(found) => return Ok(value_text(found)),
            None => warn!("find: item {} has no output property '{}'", index, output),
        }
    }

    Ok(String::new())
}

/// find helper - `{{find source "path" value "output"}}`
pub fn find_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let source = required_param(h, 0, "find")?;
    let path = value_text(required_param(h, 1, "find")?);
    let arg = value_text(required_param(h, 2, "find")?);
    let output = value_text(required_param(h, 3, "find")?);

    let found = find(source, &path, &arg, &output)?;
    out.write(&found)?;
    Ok(())
}
