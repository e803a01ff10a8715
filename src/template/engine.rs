// ABOUTME: Main template engine implementation using Handlebars
// ABOUTME: Compiles and renders template strings and drives the recursive resolvers

use handlebars::{Handlebars, HelperDef, Template};
use serde_json::{Map, Value as JsonValue};
use tracing::warn;

use super::context::TemplateContext;
use super::error::{Result, TemplateError};
use crate::helpers;
use crate::resolve::{self, Resolvable, ResolveReport};

/// Opening delimiter of a template expression
pub const OPEN_MARKER: &str = "{{";
/// Closing delimiter of a template expression
pub const CLOSE_MARKER: &str = "}}";

/// Fast-path check used before rendering a string. Both markers must appear
/// somewhere in the text; their pairing is not validated.
pub fn has_markers(text: &str) -> bool {
    text.contains(OPEN_MARKER) && text.contains(CLOSE_MARKER)
}

#[derive(Clone)]
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with all built-in helpers
    pub fn new() -> Self {
        let mut engine = Self::without_helpers();
        helpers::register_helpers(&mut engine.handlebars);
        engine
    }

    /// Create a template engine with no helpers registered
    pub fn without_helpers() -> Self {
        let mut handlebars = Handlebars::new();

        // Missing variables render as empty text
        handlebars.set_strict_mode(false);
        handlebars.set_dev_mode(false);

        // Resolved values end up in data, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);

        Self { handlebars }
    }

    /// Render a template string with the given context.
    ///
    /// The template is compiled once by the render itself. Only when that
    /// fails is it compiled again on its own, to report syntax errors as
    /// `TemplateError::Syntax`.
    pub fn render(&self, template: &str, context: &TemplateContext) -> Result<String> {
        self.handlebars
            .render_template(template, context)
            .map_err(|e| {
                if let Err(syntax) = self.validate_template(template) {
                    return syntax;
                }
                warn!("render: {}", e);
                TemplateError::Render(e)
            })
    }

    /// Validate template syntax without rendering
    pub fn validate_template(&self, template: &str) -> Result<()> {
        Template::compile(template).map(|_| ()).map_err(|e| {
            warn!("compile: {}", e);
            TemplateError::Syntax(e)
        })
    }

    /// Check if a string contains template expressions
    pub fn has_templates(&self, text: &str) -> bool {
        has_markers(text)
    }

    /// Resolve every templated string inside a mapping into a new mapping
    pub fn resolve_mapping(
        &self,
        source: &Map<String, JsonValue>,
        context: &TemplateContext,
    ) -> Result<Map<String, JsonValue>> {
        resolve::resolve_mapping(self, source, context)
    }

    /// Resolve a single JSON value (string or mapping)
    pub fn resolve_value(&self, value: &JsonValue, context: &TemplateContext) -> Result<JsonValue> {
        resolve::resolve_value(self, value, context)
    }

    /// Resolve an object graph in place
    pub fn resolve_object<'a, T: Resolvable + ?Sized>(
        &self,
        thing: &'a mut T,
        context: &TemplateContext,
    ) -> &'a mut T {
        resolve::resolve_object(self, thing, context)
    }

    /// Resolve an object graph in place and report what happened to each property
    pub fn resolve_object_reporting<T: Resolvable + ?Sized>(
        &self,
        thing: &mut T,
        context: &TemplateContext,
    ) -> ResolveReport {
        resolve::resolve_object_reporting(self, thing, context)
    }

    /// Register a custom helper function
    pub fn register_helper<F>(&mut self, name: &str, helper: F)
    where
        F: HelperDef + Send + Sync + 'static,
    {
        self.handlebars.register_helper(name, Box::new(helper));
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}
