//! Rendering of command results.

use crate::config::OutputFormat;
use crate::db::{total_words, Entry, DATE_FORMAT};
use crate::error::Result;
use std::io::Write;

/// Print a selection of entries, one per line, followed by a summary
pub fn write_entries<W: Write>(out: &mut W, entries: &[Entry], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, entries)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            if entries.is_empty() {
                writeln!(out, "No entries found.")?;
                return Ok(());
            }

            for entry in entries {
                writeln!(out, "{}", entry)?;
            }
            writeln!(
                out,
                "{} {}, {} words",
                entries.len(),
                if entries.len() == 1 { "entry" } else { "entries" },
                total_words(entries)
            )?;
        }
    }

    Ok(())
}

/// Confirm a newly recorded entry
pub fn write_added<W: Write>(out: &mut W, entry: &Entry, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, entry)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            write!(
                out,
                "Added entry #{}: {} words on {}",
                entry.id,
                entry.word_count,
                entry.date_of_entry.format(DATE_FORMAT)
            )?;
            match &entry.project_title {
                Some(title) => writeln!(out, " for \"{}\"", title)?,
                None => writeln!(out)?,
            }
        }
    }

    Ok(())
}

/// Confirm a deletion
pub fn write_deleted<W: Write>(out: &mut W, removed: u64, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &serde_json::json!({ "deleted": removed }))?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            let noun = if removed == 1 { "entry" } else { "entries" };
            writeln!(out, "Deleted {} {}", removed, noun)?;
        }
    }

    Ok(())
}
