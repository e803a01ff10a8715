// ABOUTME: Main library module for the resolvent template resolution engine
// ABOUTME: Exports the template engine, helper set, resolvers and supporting utilities

pub mod cli;
pub mod digest;
pub mod format;
pub mod helpers;
pub mod resolve;
pub mod template;

// Re-export commonly used types
pub use resolve::{
    resolve_mapping, resolve_object, resolve_object_reporting, resolve_value, Property,
    PropertyError, Resolvable, ResolveReport,
};
pub use template::{TemplateContext, TemplateEngine, TemplateError};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
