//! Turns parsed commands into database calls.

use crate::cli::args::{Removal, Selection, TrackerCommand};
use crate::cli::output;
use crate::config::OutputFormat;
use crate::db::Database;
use crate::error::Result;
use chrono::{Local, NaiveDate};
use std::io::Write;
use std::sync::Arc;

/// Executes tracker commands against the database
pub struct Dispatcher {
    db: Arc<Database>,
    format: OutputFormat,
}

impl Dispatcher {
    pub fn new(db: Arc<Database>, format: OutputFormat) -> Self {
        Self { db, format }
    }

    /// Run one command and write its result to `out`
    ///
    /// Store failures come back as errors so the caller can pick the message
    /// and exit code.
    pub async fn dispatch<W: Write>(&self, command: TrackerCommand, out: &mut W) -> Result<()> {
        let result = self.execute(command, out).await;

        // The caller reports the failure to the user
        if let Err(e) = &result {
            tracing::debug!(error = %e, "command failed");
        }

        result
    }

    async fn execute<W: Write>(&self, command: TrackerCommand, out: &mut W) -> Result<()> {
        match command {
            TrackerCommand::Add(args) => {
                let input = args.into_new_entry(today());
                let entry = self.db.add_entry(input).await?;
                output::write_added(out, &entry, self.format)
            }
            TrackerCommand::Delete(args) => {
                let removed = match args.removal()? {
                    Removal::Id(id) => self.db.delete_entry(id).await?,
                    Removal::Entries(Selection::All) => self.db.delete_all_entries().await?,
                    Removal::Entries(Selection::Dates(first, second)) => {
                        warn_if_reversed(first, second);
                        self.db.delete_entries_in_date_range(first, second).await?
                    }
                    Removal::Entries(Selection::Project(title)) => {
                        self.db.delete_project_entries(&title).await?
                    }
                };
                output::write_deleted(out, removed, self.format)
            }
            TrackerCommand::Print(args) => {
                let entries = match args.selection()? {
                    Selection::All => self.db.select_all_entries().await?,
                    Selection::Dates(first, second) => {
                        warn_if_reversed(first, second);
                        self.db.select_entries_in_date_range(first, second).await?
                    }
                    Selection::Project(title) => self.db.select_project_entries(&title).await?,
                };
                output::write_entries(out, &entries, self.format)
            }
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn warn_if_reversed(first: NaiveDate, second: NaiveDate) {
    if first > second {
        tracing::warn!(%first, %second, "date range is reversed and matches no entries");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::Cli;
    use crate::error::WordCountError;
    use clap::Parser;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    async fn setup() -> (Dispatcher, Arc<Database>) {
        crate::logging::init_test();
        let db = Arc::new(Database::new_test().await.unwrap());
        let dispatcher = Dispatcher::new(Arc::clone(&db), OutputFormat::Text);
        (dispatcher, db)
    }

    fn command(args: &[&str]) -> TrackerCommand {
        let mut argv = vec!["wordcount"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().command.unwrap()
    }

    async fn run(dispatcher: &Dispatcher, args: &[&str]) -> Result<String> {
        let mut out = Vec::new();
        dispatcher.dispatch(command(args), &mut out).await?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_add_defaults_to_today() {
        let (dispatcher, db) = setup().await;

        let text = run(&dispatcher, &["add", "750"]).await.unwrap();
        assert!(text.starts_with("Added entry #1: 750 words"));

        let all = db.select_all_entries().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].date_of_entry, today());
        assert_eq!(all[0].project_title, None);
    }

    #[tokio::test]
    async fn test_print_and_delete_flow() {
        let (dispatcher, db) = setup().await;

        run(&dispatcher, &["add", "500", "2024-01-01"]).await.unwrap();
        run(&dispatcher, &["add", "300", "2024-01-05", "Novel"]).await.unwrap();

        let text = run(&dispatcher, &["print", "--dates", "2024-01-01", "2024-01-03"])
            .await
            .unwrap();
        assert!(text.contains("Entry #: 1 |"));
        assert!(!text.contains("Entry #: 2 |"));
        assert!(text.ends_with("1 entry, 500 words\n"));

        let text = run(&dispatcher, &["delete", "--project", "Novel"]).await.unwrap();
        assert_eq!(text, "Deleted 1 entry\n");

        let remaining = db.select_all_entries().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, 1);
    }

    #[tokio::test]
    async fn test_delete_missing_id_succeeds() {
        let (dispatcher, _db) = setup().await;

        let text = run(&dispatcher, &["delete", "--id", "42"]).await.unwrap();
        assert_eq!(text, "Deleted 0 entries\n");
        let text = run(&dispatcher, &["delete", "--id", "42"]).await.unwrap();
        assert_eq!(text, "Deleted 0 entries\n");
    }

    #[tokio::test]
    async fn test_delete_all_then_print() {
        let (dispatcher, _db) = setup().await;

        run(&dispatcher, &["add", "100", "2024-02-02"]).await.unwrap();
        run(&dispatcher, &["add", "200", "2024-02-03"]).await.unwrap();

        let text = run(&dispatcher, &["delete", "--all"]).await.unwrap();
        assert_eq!(text, "Deleted 2 entries\n");

        let text = run(&dispatcher, &["print", "--all"]).await.unwrap();
        assert_eq!(text, "No entries found.\n");
    }

    #[tokio::test]
    async fn test_reversed_range_prints_nothing() {
        let (dispatcher, _db) = setup().await;

        run(&dispatcher, &["add", "100", "2024-02-02"]).await.unwrap();

        let text = run(&dispatcher, &["print", "--dates", "2024-02-03", "2024-02-01"])
            .await
            .unwrap();
        assert_eq!(text, "No entries found.\n");
    }

    #[tokio::test]
    async fn test_store_failure_is_returned() {
        let (dispatcher, db) = setup().await;

        let err = run(&dispatcher, &["add", "0", "2024-01-01"]).await.unwrap_err();
        assert!(matches!(err, WordCountError::Store { .. }));
        assert!(err.user_message().contains("word count 0"));

        assert!(db.select_all_entries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failure_is_not_logged_at_default_level() {
        let (dispatcher, _db) = setup().await;

        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("warn"))
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let err = run(&dispatcher, &["add", "0", "2024-01-01"]).await.unwrap_err();
        assert!(err.user_message().contains("word count 0"));
        assert!(logs.0.lock().unwrap().is_empty());

        // Warnings still reach the same subscriber
        run(&dispatcher, &["print", "--dates", "2024-02-03", "2024-02-01"])
            .await
            .unwrap();
        let captured = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(captured.contains("date range is reversed"));
    }

    #[tokio::test]
    async fn test_json_output() {
        let (_, db) = setup().await;
        let dispatcher = Dispatcher::new(Arc::clone(&db), OutputFormat::Json);

        run(&dispatcher, &["add", "300", "2024-01-05", "Novel"]).await.unwrap();

        let text = run(&dispatcher, &["print", "--project", "Novel"]).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["word_count"], 300);
        assert_eq!(value[0]["project_title"], "Novel");
    }
}
