// ABOUTME: Handlebars helper functions for template rendering
// ABOUTME: Registers the arithmetic, collection, text, currency, date and XML helpers

pub mod arithmetic;
pub mod collections;
pub mod currency;
pub mod dates;
pub mod error;
pub mod text;

use handlebars::{Handlebars, Helper};
use serde_json::Value as JsonValue;

pub use arithmetic::expr;
pub use collections::{find, lookup_path};
pub use dates::{long_val, long_val_at};
pub use error::{HelperError, Result};
pub use text::{strip_xml_declaration, truncate};

/// Register sha256, urlEncode, find, expr and truncate
pub fn register_utility_helpers(handlebars: &mut Handlebars) {
    handlebars.register_helper("sha256", Box::new(text::sha256_helper));
    handlebars.register_helper("urlEncode", Box::new(text::url_encode_helper));
    handlebars.register_helper("find", Box::new(collections::find_helper));
    handlebars.register_helper("expr", Box::new(arithmetic::expr_helper));
    handlebars.register_helper("truncate", Box::new(text::truncate_helper));
}

/// Register the five currency formatters
pub fn register_currency_helpers(handlebars: &mut Handlebars) {
    handlebars.register_helper("dollarsNoSign", Box::new(currency::dollars_no_sign_helper));
    handlebars.register_helper("dollarsWithSign", Box::new(currency::dollars_with_sign_helper));
    handlebars.register_helper(
        "dollarsAndCentsNoSign",
        Box::new(currency::dollars_and_cents_no_sign_helper),
    );
    handlebars.register_helper(
        "dollarsAndCentsWithSign",
        Box::new(currency::dollars_and_cents_with_sign_helper),
    );
    handlebars.register_helper(
        "dollarsAndCentsPlain",
        Box::new(currency::dollars_and_cents_plain_helper),
    );
}

/// Register the four date formatters
pub fn register_date_helpers(handlebars: &mut Handlebars) {
    handlebars.register_helper("date_short", Box::new(dates::date_short_helper));
    handlebars.register_helper("date_yyyy_mm_dd", Box::new(dates::date_yyyy_mm_dd_helper));
    handlebars.register_helper("date_mmm_dd_yyyy", Box::new(dates::date_mmm_dd_yyyy_helper));
    handlebars.register_helper("date_long", Box::new(dates::date_long_helper));
}

pub fn register_xml_helpers(handlebars: &mut Handlebars) {
    handlebars.register_helper(
        "strip_xml_declaration",
        Box::new(text::strip_xml_declaration_helper),
    );
}

/// Register all built-in helpers with a Handlebars instance
pub fn register_helpers(handlebars: &mut Handlebars) {
    register_utility_helpers(handlebars);
    register_currency_helpers(handlebars);
    register_date_helpers(handlebars);
    register_xml_helpers(handlebars);
}

/// Positional helper argument, `None` when the template did not pass one
pub(crate) fn param<'a>(h: &'a Helper, index: usize) -> Option<&'a JsonValue> {
    h.param(index).map(|p| p.value())
}

/// Positional argument that must be present
pub(crate) fn required_param<'a>(
    h: &'a Helper,
    index: usize,
    helper: &'static str,
) -> Result<&'a JsonValue> {
    param(h, index).ok_or(HelperError::MissingParameter { helper, index })
}

/// Absent, null and empty-string arguments all count as empty
pub(crate) fn is_empty(value: Option<&JsonValue>) -> bool {
    match value {
        None | Some(JsonValue::Null) => true,
        Some(JsonValue::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Text form of an argument: strings as-is, null as empty, anything else as JSON
pub fn value_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

/// Integer form of an argument given as a number or numeric string
pub(crate) fn integer_arg(value: &JsonValue, helper: &'static str) -> Result<i64> {
    let parsed = match value {
        JsonValue::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        JsonValue::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| HelperError::IllegalArgumentType {
        helper,
        found: value_text(value),
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use serde_json::Value as JsonValue;

    pub fn create_test_handlebars() -> Handlebars<'static> {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        register_helpers(&mut handlebars);
        handlebars
    }

    pub fn render(template: &str, data: &JsonValue) -> String {
        create_test_handlebars()
            .render_template(template, data)
            .unwrap()
    }

    pub fn render_err(template: &str, data: &JsonValue) -> String {
        create_test_handlebars()
            .render_template(template, data)
            .unwrap_err()
            .to_string()
    }
}
