//! Command-line interface module.
//!
//! This module handles:
//! - Argument parsing via clap, one grammar for both modes
//! - Dispatching parsed commands to the database
//! - The interactive prompt
//! - Output formatting (text, JSON)
//! - Exit status of a batch run

pub mod args;
pub mod dispatcher;
pub mod output;
pub mod repl;
pub mod status;

pub use args::{Cli, Removal, Selection, TrackerCommand};
pub use dispatcher::Dispatcher;
pub use repl::{Flow, Repl};
pub use status::exit_status;
