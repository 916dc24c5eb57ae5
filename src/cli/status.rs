//! Exit status of a batch run.
//!
//! Argument errors never get here: clap prints them and exits with 2.

use crate::error::WordCountError;
use std::io::Write;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

/// Report a failed run on `err` and return the process exit status
pub fn exit_status<W: Write>(result: &anyhow::Result<()>, err: &mut W) -> u8 {
    let Err(e) = result else {
        return EXIT_SUCCESS;
    };

    let message = match e.downcast_ref::<WordCountError>() {
        Some(e) => e.user_message(),
        None => format!("{:#}", e),
    };
    // Nowhere left to report to if stderr itself is gone
    let _ = writeln!(err, "Error: {}", message);

    EXIT_FAILURE
}
