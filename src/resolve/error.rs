// ABOUTME: Error types for object graph resolution
// ABOUTME: Property level failures that are logged and skipped rather than propagated

use thiserror::Error;

use crate::template::TemplateError;

#[derive(Error, Debug)]
pub enum PropertyError {
    #[error("cannot read property: {0}")]
    Read(String),

    #[error("cannot write property: {0}")]
    Write(String),

    #[error(transparent)]
    Render(#[from] TemplateError),
}
