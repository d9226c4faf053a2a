//! Error types for configuration reading
//!
//! Only two things can go wrong while reading a file: the bytes cannot be
//! read, or a `$(section.key)` reference cannot be resolved. Everything else
//! is tolerated by the readers and skipped silently.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for all readers
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable reference could not be resolved; the whole read is aborted
    #[error("Malformed variable in config file at line {line_number}: {source}")]
    MalformedVariable {
        line_number: usize,
        #[source]
        source: VariableError,
    },

    /// I/O failure on an anonymous reader
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O failure on a named file
    #[error("Unable to read {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Returns true if this is a `MalformedVariable` error
    pub fn is_malformed_variable(&self) -> bool {
        matches!(self, ConfigError::MalformedVariable { .. })
    }

    /// Returns the 1-based line number of a `MalformedVariable` error
    pub fn line_number(&self) -> Option<usize> {
        match self {
            ConfigError::MalformedVariable { line_number, .. } => Some(*line_number),
            _ => None,
        }
    }

    /// Returns the underlying variable error, if any
    pub fn variable_error(&self) -> Option<&VariableError> {
        match self {
            ConfigError::MalformedVariable { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Attaches a file path to an anonymous I/O error
    pub(crate) fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            ConfigError::Io(source) => ConfigError::File {
                path: path.into(),
                source,
            },
            other => other,
        }
    }
}

/// Reasons a `$(...)` reference is malformed
///
/// Every variant keeps the offending line so the message can show it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariableError {
    /// `$(` without a closing paren later in the line
    #[error("Variable doesn't contain a closing paren ')'\n    LINE: {line}")]
    Unterminated { line: String },

    /// `$()` with nothing inside
    #[error("Empty variable: $()\n    LINE: {line}")]
    Empty { line: String },

    /// Reference to a section or key that has not been parsed yet
    #[error("Undefined variable: $({section}.{key})\n    LINE: {line}")]
    Undefined {
        section: String,
        key: String,
        line: String,
    },
}

impl VariableError {
    /// Returns the line the error was raised on
    pub fn line(&self) -> &str {
        match self {
            VariableError::Unterminated { line }
            | VariableError::Empty { line }
            | VariableError::Undefined { line, .. } => line,
        }
    }

    /// Suggests how to fix the reference
    pub fn suggest_fix(&self) -> Vec<String> {
        match self {
            VariableError::Unterminated { .. } => vec![
                "Close the reference with ')'".to_string(),
                "Variables should be formatted like $(section.name)".to_string(),
            ],
            VariableError::Empty { .. } => vec![
                "Name a key inside the parens, e.g. $(username) or $(section.name)".to_string(),
            ],
            VariableError::Undefined { section, key, .. } => vec![
                format!("Define '{key}' in section [{section}] above this line"),
                "Variables may only reference keys that appear earlier in the file".to_string(),
            ],
        }
    }
}

/// Result alias used by every reader
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
