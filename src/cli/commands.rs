// ABOUTME: Command implementations for the resolvent CLI
// ABOUTME: Handles the render, resolve and sha256 commands

use anyhow::{Context as _, Result};
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::args::{Args, DocumentFormat};
use super::config::Config;
use crate::digest;
use crate::template::{TemplateContext, TemplateEngine};

/// Layer the context: config variables, then the context file, then `-V` overrides
pub fn build_context(
    config: &Config,
    context_file: Option<&Path>,
    vars: &[String],
) -> Result<TemplateContext> {
    let mut context = TemplateContext::from(config.template_vars.clone());

    if let Some(path) = context_file {
        let loaded = TemplateContext::load(path)
            .with_context(|| format!("Failed to load context file '{}'", path.display()))?;
        debug!("Loaded {} variables from {}", loaded.len(), path.display());
        context.extend(loaded.variables().clone());
    }

    context.extend(Args::parse_variables(vars)?);
    Ok(context)
}

/// Render a template file and return the output
pub fn render_template(
    template_path: &Path,
    context_file: Option<&Path>,
    vars: &[String],
    config: &Config,
) -> Result<String> {
    info!("Rendering template: {}", template_path.display());

    let template = std::fs::read_to_string(template_path)
        .with_context(|| format!("Failed to read template '{}'", template_path.display()))?;
    let context = build_context(config, context_file, vars)?;

    let engine = TemplateEngine::new();
    let rendered = engine
        .render(&template, &context)
        .with_context(|| format!("Failed to render '{}'", template_path.display()))?;
    Ok(rendered)
}

/// Resolve every template value in a YAML or JSON mapping document
pub fn resolve_document(
    input: &Path,
    context_file: Option<&Path>,
    vars: &[String],
    format: DocumentFormat,
    config: &Config,
) -> Result<String> {
    info!("Resolving document: {}", input.display());

    let contents = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read document '{}'", input.display()))?;
    let document: JsonValue = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse document '{}'", input.display()))?;
    let mapping = match document {
        JsonValue::Object(mapping) => mapping,
        JsonValue::Null => Default::default(),
        _ => anyhow::bail!("Document '{}' must be a mapping", input.display()),
    };

    let context = build_context(config, context_file, vars)?;
    let engine = TemplateEngine::new();
    let resolved = JsonValue::Object(
        engine
            .resolve_mapping(&mapping, &context)
            .with_context(|| format!("Failed to resolve '{}'", input.display()))?,
    );

    let output = match format {
        DocumentFormat::Yaml => serde_yaml::to_string(&resolved)?,
        DocumentFormat::Json => {
            let mut json = serde_json::to_string_pretty(&resolved)?;
            json.push('\n');
            json
        }
    };
    Ok(output)
}

/// Write command output to a file, or stdout when no path is given
pub fn emit(output: &str, destination: Option<&PathBuf>) -> Result<()> {
    match destination {
        Some(path) => {
            std::fs::write(path, output)
                .with_context(|| format!("Failed to write output file '{}'", path.display()))?;
            info!("Output written to: {}", path.display());
        }
        None => print!("{}", output),
    }
    Ok(())
}

pub fn sha256_file(path: &Path) -> Result<String> {
    let digest = digest::sha256_file(path)?;
    debug!("sha256 {} = {}", path.display(), digest);
    Ok(digest)
}
