//! CLI support for scim-filter
//!
//! Provides programmatic access to the `scimfilter` commands so they can be
//! embedded in other tools and tested without spawning a process.

mod check;
mod convert;
mod sql;

pub use check::{CheckOptions, execute_check, execute_tokens, render_tokens};
pub use convert::query_to_json;
pub use sql::{SqlOptions, execute_sql, parse_mapping};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("Compile error: {0}")]
    Compile(#[from] crate::CompileError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No filter provided. Pass it as an argument or pipe it to stdin.")]
    NoInput,

    #[error("Invalid column mapping '{0}': expected attribute=column")]
    InvalidMapping(String),
}
