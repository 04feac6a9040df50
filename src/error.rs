//! Error handling for table loading, column selection and series export.
//!
//! Only structural problems are raised as errors. Individual cells that fail
//! to normalize are dropped silently by the inference engine and the series
//! builder and never surface here.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed input: {message}")]
    MalformedInput { message: String },

    #[error("Invalid selection for column '{column}': {reason}")]
    InvalidSelection { column: String, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Export failed: {message}")]
    Export { message: String },
}

impl GraphError {
    /// Structural parse failure, optionally pinned to a source line
    pub fn malformed(line: Option<u64>, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = match line {
            Some(line) => format!("line {}: {}", line, message),
            None => message,
        };
        Self::MalformedInput { message }
    }

    pub fn invalid_selection(column: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSelection {
            column: column.into(),
            reason: reason.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn export(message: impl Into<String>) -> Self {
        Self::Export {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
