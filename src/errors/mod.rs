use std::path::Path;

use anyhow::Context as _;
use thiserror::Error;

/// Malformed `itemId,userId,rating` record. Aborts the load of its source.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("line {line}: expected 3 comma-separated fields, found {found}: '{content}'")]
    FieldCount {
        line: usize,
        found: usize,
        content: String,
    },
    #[error("line {line}: invalid {field} '{value}'")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::FieldCount { line, .. } | ParseError::InvalidNumber { line, .. } => *line,
        }
    }
}

/// Add context to source loading errors
pub fn load_context(path: &Path) -> String {
    format!("Failed to load ratings from: {}", path.display())
}

/// Add context to parse errors
pub fn parse_context(source: &str) -> String {
    format!("Failed to parse {} ratings", source)
}

/// Add context to report errors
pub fn report_context(path: &Path) -> String {
    format!("Failed to write report to: {}", path.display())
}

/// Wrap result with load context
pub fn with_load_context<T, E>(result: Result<T, E>, path: &Path) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.with_context(|| load_context(path))
}
