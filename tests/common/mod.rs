// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides temp file environments, CLI invocation and shared resolvable fixtures

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

use resolvent::{Property, Resolvable, TemplateContext};

pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    pub fn output_file(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }
}

/// Run the resolvent binary from inside `dir` so no stray config file is picked up
pub fn run_cli(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_resolvent"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("RESOLVENT_LOG_LEVEL")
        .env_remove("RESOLVENT_LOG_FORMAT")
        .output()
        .expect("Failed to execute resolvent")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub fn invoice_context() -> TemplateContext {
    let mut context = TemplateContext::new();
    context.set("customer", "Ada");
    context.set("amount", 123_456);
    context.set(
        "lines",
        serde_json::json!([
            {"sku": "A-1", "label": "Widget", "qty": 2},
            {"sku": "B-2", "label": "Gadget", "qty": 1}
        ]),
    );
    context
}

#[derive(Debug, Default)]
pub struct Recipient {
    pub email: String,
    pub cc: Option<String>,
}

impl Resolvable for Recipient {
    fn properties(&mut self) -> Vec<Property<'_>> {
        vec![
            Property::text("email", &mut self.email),
            Property::optional_text("cc", &mut self.cc),
        ]
    }
}

#[derive(Debug, Default)]
pub struct Invoice {
    pub subject: String,
    pub memo: Option<String>,
    pub total_cents: i64,
    pub recipient: Recipient,
    pub forward_to: Option<Recipient>,
}

impl Resolvable for Invoice {
    fn properties(&mut self) -> Vec<Property<'_>> {
        vec![
            Property::text("subject", &mut self.subject),
            Property::optional_text("memo", &mut self.memo),
            Property::nested("recipient", &mut self.recipient),
            Property::optional_nested("forward_to", self.forward_to.as_mut()),
        ]
    }
}
