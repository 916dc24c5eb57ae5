/// Error types for wordcount
///
/// This module defines all possible errors that can occur in the application.
/// Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for wordcount operations
#[derive(Error, Debug)]
pub enum WordCountError {
    /// The database could not be opened or failed its smoke test
    #[error("could not connect to the database at {}: {source}", path.display())]
    Connection {
        path: PathBuf,
        #[source]
        source: sqlx::Error,
    },

    /// A single gateway operation failed
    #[error("failed to {operation}: {source}")]
    Store {
        operation: String,
        #[source]
        source: sqlx::Error,
    },

    /// I/O errors (config file, terminal)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Date that isn't yyyy-mm-dd
    #[error("invalid date \"{0}\", expected yyyy-mm-dd")]
    InvalidDate(String),

    /// Malformed command line
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error (JSON output)
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for wordcount operations
pub type Result<T> = std::result::Result<T, WordCountError>;

impl WordCountError {
    /// Convert WordCountError to a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            WordCountError::Connection { path, source } => format!(
                "There was a problem connecting to the database at {}. Check that the path \
                 in your config file is correct and writable. Details: {}",
                path.display(),
                source
            ),
            WordCountError::Store { operation, source } => {
                format!("There was a problem while trying to {}. Details: {}", operation, source)
            }
            WordCountError::Io(e) => format!("File system error. Check permissions. Details: {}", e),
            WordCountError::InvalidDate(raw) => {
                format!("\"{}\" is not a date, dates look like 2024-01-31", raw)
            }
            WordCountError::InvalidCommand(reason) => {
                format!("Invalid command: {}. Enter help for a list of commands", reason)
            }
            WordCountError::Config(msg) => format!("Configuration issue: {}", msg),
            WordCountError::Serialization(e) => format!("Data format error: {}", e),
        }
    }
}

/// Attach a description of the attempted operation to a raw sqlx error
pub(crate) trait StoreContext<T> {
    fn during<F>(self, operation: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> StoreContext<T> for std::result::Result<T, sqlx::Error> {
    fn during<F>(self, operation: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|source| WordCountError::Store {
            operation: operation(),
            source,
        })
    }
}
