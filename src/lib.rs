/// wordcount library
///
/// Records how many words were written on which day and for which project.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;

// Re-exports for convenience
pub use db::Database;
pub use error::{Result, WordCountError};
