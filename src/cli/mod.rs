// ABOUTME: CLI module for the resolvent template resolver
// ABOUTME: Exports command line interface components and main application logic

pub mod app;
pub mod args;
pub mod commands;
pub mod config;

pub use app::App;
pub use args::{Args, Commands, DocumentFormat};
pub use config::Config;
