// ABOUTME: Text helpers for templates
// ABOUTME: Implements truncate, strip_xml_declaration and the self-rendering sha256 and urlEncode

use handlebars::{Context, Handlebars, Helper, Output, RenderContext, RenderError};

use super::error::{HelperError, Result};
use super::{integer_arg, is_empty, param, required_param, value_text};
use crate::digest::sha256_hex;
use crate::format::{prefix, url_encode};

const XML_DECLARATION_OPEN: &str = "<?xml";
const XML_DECLARATION_CLOSE: &str = "?>";

/// Cut `source` to at most `max` characters, `-1` meaning no limit
pub fn truncate(max: i64, source: &str) -> Result<String> {
    if source.is_empty() || max == -1 {
        return Ok(source.to_string());
    }
    let max = usize::try_from(max).map_err(|_| HelperError::InvalidArgument {
        helper: "truncate",
        message: format!("invalid length {}", max),
    })?;
    Ok(prefix(source, max).to_string())
}

/// Drop a leading `<?xml ... ?>` declaration, trimming around it
pub fn strip_xml_declaration(source: &str) -> String {
    let xml = source.trim();
    if xml.starts_with(XML_DECLARATION_OPEN) {
        if let Some(close) = xml.find(XML_DECLARATION_CLOSE) {
            return xml[close + XML_DECLARATION_CLOSE.len()..].trim().to_string();
        }
    }
    xml.to_string()
}

/// truncate helper - `{{truncate max value}}`
pub fn truncate_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let max = integer_arg(required_param(h, 0, "truncate")?, "truncate")?;
    let source = param(h, 1).map(value_text).unwrap_or_default();

    out.write(&truncate(max, &source)?)?;
    Ok(())
}

/// strip_xml_declaration helper
pub fn strip_xml_declaration_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let source = param(h, 0);
    if is_empty(source) {
        return Ok(());
    }
    let xml = source.map(value_text).unwrap_or_default();
    out.write(&strip_xml_declaration(&xml))?;
    Ok(())
}

/// Render the first argument as a template so that values holding
/// expressions are expanded before they are transformed. The data is the
/// current block scope: the root context at top level, the current item
/// inside `{{#each}}` or `{{#with}}`.
fn render_argument<'reg, 'rc>(
    h: &Helper<'reg, 'rc>,
    r: &'reg Handlebars<'reg>,
    ctx: &'rc Context,
    rc: &mut RenderContext<'reg, 'rc>,
) -> std::result::Result<Option<String>, RenderError> {
    let source = param(h, 0);
    if is_empty(source) {
        return Ok(None);
    }
    let text = source.map(value_text).unwrap_or_default();
    let scope = rc.evaluate(ctx, "this")?;
    r.render_template(&text, scope.as_json()).map(Some)
}

/// sha256 helper - hex digest of the rendered argument
pub fn sha256_helper<'reg, 'rc>(
    h: &Helper<'reg, 'rc>,
    r: &'reg Handlebars<'reg>,
    ctx: &'rc Context,
    rc: &mut RenderContext<'reg, 'rc>,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    if let Some(rendered) = render_argument(h, r, ctx, rc)? {
        out.write(&sha256_hex(&rendered))?;
    }
    Ok(())
}

/// urlEncode helper - form encoding of the rendered argument
pub fn url_encode_helper<'reg, 'rc>(
    h: &Helper<'reg, 'rc>,
    r: &'reg Handlebars<'reg>,
    ctx: &'rc Context,
    rc: &mut RenderContext<'reg, 'rc>,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    if let Some(rendered) = render_argument(h, r, ctx, rc)? {
        out.write(&url_encode(&rendered))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::test_support::{render, render_err};
    use serde_json::json;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate(-1, "hello").unwrap(), "hello");
        assert_eq!(truncate(3, "hello").unwrap(), "hel");
        assert_eq!(truncate(10, "hi").unwrap(), "hi");
        assert_eq!(truncate(2, "hi").unwrap(), "hi");
        assert_eq!(truncate(0, "hi").unwrap(), "");
        assert_eq!(truncate(3, "").unwrap(), "");
        assert!(truncate(-2, "hello").is_err());
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate(4, "na\u{ef}ve").unwrap(), "na\u{ef}v");
    }

    #[test]
    fn test_truncate_helper() {
        let data = json!({"title": "A very long headline", "limit": "6"});
        assert_eq!(render("{{truncate 6 title}}", &data), "A very");
        assert_eq!(render("{{truncate limit title}}", &data), "A very");
        assert_eq!(render("{{truncate \"-1\" title}}", &data), "A very long headline");
        assert_eq!(render("[{{truncate 6 missing}}]", &data), "[]");
        assert!(render_err("{{truncate \"many\" title}}", &data).contains("invalid argument type many"));
    }

    #[test]
    fn test_strip_xml_declaration() {
        assert_eq!(
            strip_xml_declaration("  <?xml version=\"1.0\"?>\n<root/>  "),
            "<root/>"
        );
        assert_eq!(
            strip_xml_declaration("<?xml version=\"1.0\" encoding=\"UTF-8\"?><a><?pi x?></a>"),
            "<a><?pi x?></a>"
        );
        assert_eq!(strip_xml_declaration(" <root/> "), "<root/>");
        // unterminated declaration is left alone
        assert_eq!(strip_xml_declaration("<?xml version"), "<?xml version");
    }

    #[test]
    fn test_strip_xml_declaration_helper() {
        let data = json!({"doc": "<?xml version=\"1.0\"?>\n<root/>"});
        assert_eq!(render("{{strip_xml_declaration doc}}", &data), "<root/>");
        assert_eq!(render("[{{strip_xml_declaration missing}}]", &data), "[]");
    }

    #[test]
    fn test_sha256_helper_renders_argument_first() {
        let data = json!({"name": "world", "greeting": "hello {{name}}"});
        assert_eq!(
            render("{{sha256 greeting}}", &data),
            sha256_hex("hello world")
        );
        assert_eq!(
            render("{{sha256 \"hello world\"}}", &data),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
        assert_eq!(render("[{{sha256 missing}}]", &data), "[]");
    }

    #[test]
    fn test_url_encode_helper_renders_argument_first() {
        let data = json!({"city": "New York", "query": "q={{city}}&x=1"});
        assert_eq!(render("{{urlEncode query}}", &data), "q%3DNew+York%26x%3D1");
        assert_eq!(render("{{urlEncode city}}", &data), "New+York");
        assert_eq!(render("[{{urlEncode missing}}]", &data), "[]");
    }

    #[test]
    fn test_self_rendering_uses_block_scope() {
        let data = json!({
            "stops": [
                {"name": "San Jose", "link": "city={{name}}"},
                {"name": "Palo Alto", "link": "city={{name}}"}
            ],
            "owner": {"name": "ops team", "tag": "{{name}}"}
        });
        assert_eq!(
            render("{{#each stops}}{{urlEncode link}};{{/each}}", &data),
            "city%3DSan+Jose;city%3DPalo+Alto;"
        );
        assert_eq!(
            render("{{#with owner}}{{sha256 tag}}{{/with}}", &data),
            sha256_hex("ops team")
        );
    }

    #[test]
    fn test_self_rendering_failure_propagates() {
        let data = json!({"bad": "{{expr 1 \"?\" 1}}"});
        assert!(render_err("{{sha256 bad}}", &data).contains("invalid operator"));
    }
}
