// ABOUTME: Error types for template engine operations
// ABOUTME: Separates compile failures from render failures and context loading problems

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template syntax error: {0}")]
    Syntax(#[source] handlebars::TemplateError),

    #[error("Template render error: {0}")]
    Render(#[source] handlebars::RenderError),

    #[error("Template context must be a mapping, got {0}")]
    InvalidContext(&'static str),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, TemplateError>;
