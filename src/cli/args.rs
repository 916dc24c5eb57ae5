//! Command grammar shared by batch mode and the interactive prompt.

use crate::config::OutputFormat;
use crate::db::{parse_date, NewEntry};
use crate::error::{Result, WordCountError};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Keep track of how many words you write.
///
/// Run without a command to start the interactive prompt.
#[derive(Parser, Debug)]
#[command(name = "wordcount")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.wordcount/config.toml)
    #[arg(long, env = "WORDCOUNT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database file, overrides the config file
    #[arg(long, env = "WORDCOUNT_DATABASE", global = true)]
    pub database: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, global = true)]
    pub output: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Option<TrackerCommand>,
}

// One line typed at the interactive prompt
#[derive(Parser, Debug)]
#[command(multicall = true)]
#[command(
    about = "Commands: add, delete, print, help, quit",
    override_usage = "<COMMAND> [ARGS]..."
)]
pub struct ReplLine {
    #[command(subcommand)]
    pub command: ReplCommand,
}

#[derive(Subcommand, Debug)]
pub enum ReplCommand {
    #[command(flatten)]
    Tracker(TrackerCommand),

    /// Leave the prompt
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TrackerCommand {
    /// Record a word count
    Add(AddArgs),
    /// Delete entries
    Delete(DeleteArgs),
    /// Print entries
    Print(PrintArgs),
}

impl TrackerCommand {
    /// Read multi-word titles back from the raw prompt line
    ///
    /// Splitting a line on whitespace turns `My  Novel` into `My Novel`. A
    /// title is always the last thing on the line, so the original text can
    /// be taken from there.
    pub fn with_titles_from(self, line: &str) -> Self {
        match self {
            TrackerCommand::Add(mut args) => {
                args.project_title = respace(args.project_title, line);
                TrackerCommand::Add(args)
            }
            TrackerCommand::Delete(mut args) => {
                args.project = args.project.map(|words| respace(words, line));
                TrackerCommand::Delete(args)
            }
            TrackerCommand::Print(mut args) => {
                args.project = args.project.map(|words| respace(words, line));
                TrackerCommand::Print(args)
            }
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct AddArgs {
    /// Number of words written
    pub word_count: i64,

    /// Day the words were written, yyyy-mm-dd (default: today)
    #[arg(value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Project the words belong to, may contain spaces
    pub project_title: Vec<String>,
}

impl AddArgs {
    /// Build the insert, filling in `today` when no date was given
    pub fn into_new_entry(self, today: NaiveDate) -> NewEntry {
        NewEntry::new(
            self.word_count,
            self.date.unwrap_or(today),
            join_title(self.project_title),
        )
    }
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
#[group(required = true, multiple = false)]
pub struct DeleteArgs {
    /// Delete the entry with this id
    #[arg(long)]
    pub id: Option<i64>,

    /// Delete entries dated FIRST through SECOND
    #[arg(long, num_args = 2, value_names = ["FIRST", "SECOND"], value_parser = parse_date)]
    pub dates: Option<Vec<NaiveDate>>,

    /// Delete entries for this project
    #[arg(long, num_args = 1.., value_name = "TITLE")]
    pub project: Option<Vec<String>>,

    /// Delete every entry
    #[arg(long)]
    pub all: bool,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
#[group(required = true, multiple = false)]
pub struct PrintArgs {
    /// Print entries dated FIRST through SECOND
    #[arg(long, num_args = 2, value_names = ["FIRST", "SECOND"], value_parser = parse_date)]
    pub dates: Option<Vec<NaiveDate>>,

    /// Print entries for this project
    #[arg(long, num_args = 1.., value_name = "TITLE")]
    pub project: Option<Vec<String>>,

    /// Print every entry
    #[arg(long)]
    pub all: bool,
}

/// Which entries a print or delete applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    Dates(NaiveDate, NaiveDate),
    Project(String),
}

/// What a delete removes: one entry by id, or a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    Id(i64),
    Entries(Selection),
}

impl DeleteArgs {
    pub fn removal(self) -> Result<Removal> {
        match self.id {
            Some(id) => Ok(Removal::Id(id)),
            None => select(self.all, self.dates, self.project, "remove").map(Removal::Entries),
        }
    }
}

impl PrintArgs {
    pub fn selection(self) -> Result<Selection> {
        select(self.all, self.dates, self.project, "print")
    }
}

fn select(
    all: bool,
    dates: Option<Vec<NaiveDate>>,
    project: Option<Vec<String>>,
    verb: &str,
) -> Result<Selection> {
    if all {
        return Ok(Selection::All);
    }

    if let Some(dates) = dates {
        return match dates.as_slice() {
            [first, second] => Ok(Selection::Dates(*first, *second)),
            _ => Err(WordCountError::InvalidCommand(
                "this command requires two dates".to_string(),
            )),
        };
    }

    match project.and_then(join_title) {
        Some(title) => Ok(Selection::Project(title)),
        None => Err(WordCountError::InvalidCommand(format!(
            "specify which entries to {}",
            verb
        ))),
    }
}

fn respace(words: Vec<String>, line: &str) -> Vec<String> {
    if words.len() < 2 {
        return words;
    }

    match trailing_words(line, words.len()) {
        Some(raw) if raw.split_whitespace().eq(words.iter().map(String::as_str)) => {
            vec![raw.to_string()]
        }
        _ => words,
    }
}

/// The last `count` whitespace-separated words of `line`, as typed
fn trailing_words(line: &str, count: usize) -> Option<&str> {
    let line = line.trim_end();

    let mut starts = Vec::new();
    let mut after_space = true;
    for (i, c) in line.char_indices() {
        if after_space && !c.is_whitespace() {
            starts.push(i);
        }
        after_space = c.is_whitespace();
    }

    let first = starts.len().checked_sub(count)?;
    Some(&line[starts[first]..])
}

fn join_title(words: Vec<String>) -> Option<String> {
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}
