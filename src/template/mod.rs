// ABOUTME: Template engine module for resolvent
// ABOUTME: Provides the Handlebars wrapper, rendering context and template error types

pub mod context;
pub mod engine;
pub mod error;

pub use context::TemplateContext;
pub use engine::{has_markers, TemplateEngine, CLOSE_MARKER, OPEN_MARKER};
pub use error::{Result, TemplateError};
