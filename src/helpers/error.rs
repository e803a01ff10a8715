// ABOUTME: Error types raised inside template helpers
// ABOUTME: Converts into Handlebars render errors while keeping the original cause

use handlebars::RenderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HelperError {
    #[error("{helper}: invalid argument type {found}")]
    IllegalArgumentType { helper: &'static str, found: String },

    #[error("expr: invalid operator: {0}")]
    InvalidOperator(String),

    #[error("{helper}: {message}")]
    InvalidArgument {
        helper: &'static str,
        message: String,
    },

    #[error("{helper}: missing parameter at position {index}")]
    MissingParameter { helper: &'static str, index: usize },

    #[error("expr: division by zero")]
    DivisionByZero,

    #[error("invalid period '{0}', expected [-]<months>m<days>d")]
    InvalidPeriod(String),

    #[error("timestamp out of range: {0}")]
    TimestampOutOfRange(i64),
}

impl From<HelperError> for RenderError {
    fn from(error: HelperError) -> Self {
        RenderError::from_error(&error.to_string(), error)
    }
}

pub type Result<T> = std::result::Result<T, HelperError>;
