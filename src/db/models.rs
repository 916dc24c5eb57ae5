/// Data models for database entities
///
/// All models map to the word_count_entry table and use sqlx for type-safe queries.

use crate::error::{Result, WordCountError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Format used for dates everywhere: input, storage and output
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Longest project title the store accepts
pub const MAX_PROJECT_TITLE_LENGTH: usize = 100;

/// Represents a recorded word count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Entry {
    pub id: i64,
    pub word_count: i64,
    pub date_of_entry: NaiveDate,
    pub project_title: Option<String>,
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Entry #: {} | Wordcount: {} | Date: {} | Project Title: {}",
            self.id,
            self.word_count,
            self.date_of_entry.format(DATE_FORMAT),
            self.project_title.as_deref().unwrap_or("None")
        )
    }
}

/// Input for recording a new entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    pub word_count: i64,
    pub date_of_entry: NaiveDate,
    pub project_title: Option<String>,
}

impl NewEntry {
    pub fn new(word_count: i64, date_of_entry: NaiveDate, project_title: Option<String>) -> Self {
        Self {
            word_count,
            date_of_entry,
            project_title,
        }
    }
}

impl fmt::Display for NewEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "word count {}, date {}, ",
            self.word_count,
            self.date_of_entry.format(DATE_FORMAT)
        )?;
        match &self.project_title {
            Some(title) => write!(f, "project \"{}\"", title),
            None => write!(f, "no project"),
        }
    }
}

/// Parse a yyyy-mm-dd date typed by the user
///
/// This is the only place user-supplied dates are turned into `NaiveDate`.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| WordCountError::InvalidDate(raw.to_string()))
}

/// Sum of the word counts of a set of entries
///
/// Widened to i128 so any set of stored counts adds up without overflow.
pub fn total_words(entries: &[Entry]) -> i128 {
    entries.iter().map(|e| i128::from(e.word_count)).sum()
}
