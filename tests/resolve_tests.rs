// ABOUTME: Integration tests for mapping and object resolution
// ABOUTME: Exercises the public resolver API end to end with the full helper set

use serde_json::{json, Map, Value as JsonValue};

use resolvent::{
    resolve_mapping, resolve_object, resolve_object_reporting, TemplateContext, TemplateEngine,
    TemplateError,
};

mod common;
use common::{invoice_context, Invoice, Recipient};

fn mapping(value: JsonValue) -> Map<String, JsonValue> {
    match value {
        JsonValue::Object(map) => map,
        other => panic!("expected mapping, got {}", other),
    }
}

#[test]
fn test_mapping_without_markers_is_equal_copy() {
    let engine = TemplateEngine::new();
    let input = mapping(json!({
        "name": "plain",
        "count": 3,
        "nested": {"flag": true, "list": ["{{not}}", "touched"]}
    }));

    let resolved = resolve_mapping(&engine, &input, &TemplateContext::new()).unwrap();
    assert_eq!(resolved, input);
}

#[test]
fn test_mapping_with_helpers() {
    let engine = TemplateEngine::new();
    let input = mapping(json!({
        "greeting": "Dear {{customer}},",
        "billing": {
            "total": "{{dollarsAndCentsWithSign amount}}",
            "first_label": "{{find lines \"sku\" \"B-2\" \"label\"}}",
            "doubled": "{{expr amount \"*\" 2}}"
        },
        "code": 7
    }));

    let resolved = resolve_mapping(&engine, &input, &invoice_context()).unwrap();

    assert_eq!(resolved["greeting"], "Dear Ada,");
    assert_eq!(resolved["billing"]["total"], "$1,234.56");
    assert_eq!(resolved["billing"]["first_label"], "Gadget");
    assert_eq!(resolved["billing"]["doubled"], "246912");
    assert_eq!(resolved["code"], 7);
    // input is left untouched
    assert_eq!(input["greeting"], "Dear {{customer}},");
}

#[test]
fn test_mapping_aborts_on_first_failure() {
    let engine = TemplateEngine::new();
    let input = mapping(json!({
        "ok": "{{customer}}",
        "bad": "{{truncate \"wide\" customer}}"
    }));

    let err = resolve_mapping(&engine, &input, &invoice_context()).unwrap_err();
    assert!(matches!(err, TemplateError::Render(_)));
}

#[test]
fn test_object_graph_resolution() {
    let engine = TemplateEngine::new();
    let mut invoice = Invoice {
        subject: "Invoice for {{customer}}: {{dollarsAndCentsWithSign amount}}".to_string(),
        memo: None,
        total_cents: 123_456,
        recipient: Recipient {
            email: "{{customer}}@example.com".to_string(),
            cc: Some("billing@example.com".to_string()),
        },
        forward_to: Some(Recipient {
            email: "archive+{{urlEncode customer}}@example.com".to_string(),
            cc: None,
        }),
    };

    resolve_object(&engine, &mut invoice, &invoice_context());

    assert_eq!(invoice.subject, "Invoice for Ada: $1,234.56");
    assert!(invoice.memo.is_none());
    assert_eq!(invoice.total_cents, 123_456);
    assert_eq!(invoice.recipient.email, "Ada@example.com");
    assert_eq!(invoice.recipient.cc.as_deref(), Some("billing@example.com"));
    assert_eq!(
        invoice.forward_to.as_ref().map(|r| r.email.as_str()),
        Some("archive+Ada@example.com")
    );
}

#[test]
fn test_object_failures_do_not_stop_siblings() {
    let engine = TemplateEngine::new();
    let mut invoice = Invoice {
        subject: "{{expr amount \"~\" 1}}".to_string(),
        memo: Some("Thanks {{customer}}".to_string()),
        recipient: Recipient {
            email: "{{customer}}@example.com".to_string(),
            cc: None,
        },
        ..Default::default()
    };

    let report = resolve_object_reporting(&engine, &mut invoice, &invoice_context());

    assert_eq!(invoice.subject, "{{expr amount \"~\" 1}}");
    assert_eq!(invoice.memo.as_deref(), Some("Thanks Ada"));
    assert_eq!(invoice.recipient.email, "Ada@example.com");
    assert_eq!(report.rendered, vec!["memo", "recipient.email"]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].path, "subject");
}
