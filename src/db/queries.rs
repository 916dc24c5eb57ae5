/// SQL query functions for the word_count_entry table
///
/// Every write runs in its own transaction: it either commits or is rolled
/// back when the transaction is dropped on the error path.

use crate::db::models::*;
use crate::db::Database;
use crate::error::{Result, StoreContext};
use chrono::NaiveDate;

const ENTRY_COLUMNS: &str = "id, word_count, date_of_entry, project_title";

impl Database {
    /// Record a new entry
    ///
    /// # Arguments
    /// * `input` - Word count, date and optional project title
    ///
    /// # Returns
    /// * `Ok(Entry)` - The stored row, including its freshly assigned id
    /// * `Err(WordCountError::Store)` - If the store rejects the row
    pub async fn add_entry(&self, input: NewEntry) -> Result<Entry> {
        let describe = || format!("add an entry with {}", input);

        let mut tx = self.pool().begin().await.during(describe)?;

        let entry = sqlx::query_as::<_, Entry>(&format!(
            "INSERT INTO word_count_entry (word_count, date_of_entry, project_title) \
             VALUES (?, ?, ?) RETURNING {}",
            ENTRY_COLUMNS
        ))
        .bind(input.word_count)
        .bind(input.date_of_entry)
        .bind(input.project_title.as_deref())
        .fetch_one(&mut *tx)
        .await
        .during(describe)?;

        tx.commit().await.during(describe)?;

        tracing::debug!(id = entry.id, word_count = entry.word_count, "entry added");
        Ok(entry)
    }

    /// Delete the entry with the given id
    ///
    /// Deleting an id that doesn't exist is not an error.
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of rows removed (0 or 1)
    pub async fn delete_entry(&self, id: i64) -> Result<u64> {
        let describe = || format!("delete the entry with id {}", id);

        let mut tx = self.pool().begin().await.during(describe)?;

        let removed = sqlx::query("DELETE FROM word_count_entry WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .during(describe)?
            .rows_affected();

        tx.commit().await.during(describe)?;

        tracing::debug!(id, removed, "entry deleted");
        Ok(removed)
    }

    /// Delete every entry dated between the two dates (inclusive)
    ///
    /// A reversed range matches nothing.
    pub async fn delete_entries_in_date_range(
        &self,
        first_date: NaiveDate,
        second_date: NaiveDate,
    ) -> Result<u64> {
        let describe = || {
            format!(
                "delete the entries from {} to {}",
                first_date.format(DATE_FORMAT),
                second_date.format(DATE_FORMAT)
            )
        };

        let mut tx = self.pool().begin().await.during(describe)?;

        let removed = sqlx::query(
            "DELETE FROM word_count_entry WHERE date_of_entry >= ? AND date_of_entry <= ?",
        )
        .bind(first_date)
        .bind(second_date)
        .execute(&mut *tx)
        .await
        .during(describe)?
        .rows_affected();

        tx.commit().await.during(describe)?;

        tracing::debug!(%first_date, %second_date, removed, "entries in range deleted");
        Ok(removed)
    }

    /// Delete every entry
    pub async fn delete_all_entries(&self) -> Result<u64> {
        let describe = || "delete all entries".to_string();

        let mut tx = self.pool().begin().await.during(describe)?;

        let removed = sqlx::query("DELETE FROM word_count_entry")
            .execute(&mut *tx)
            .await
            .during(describe)?
            .rows_affected();

        tx.commit().await.during(describe)?;

        tracing::debug!(removed, "all entries deleted");
        Ok(removed)
    }

    /// Delete the entries whose project title matches exactly
    pub async fn delete_project_entries(&self, project_title: &str) -> Result<u64> {
        let describe = || format!("delete the entries for the project \"{}\"", project_title);

        let mut tx = self.pool().begin().await.during(describe)?;

        let removed = sqlx::query("DELETE FROM word_count_entry WHERE project_title = ?")
            .bind(project_title)
            .execute(&mut *tx)
            .await
            .during(describe)?
            .rows_affected();

        tx.commit().await.during(describe)?;

        tracing::debug!(project_title, removed, "project entries deleted");
        Ok(removed)
    }

    /// Get every entry, oldest first
    pub async fn select_all_entries(&self) -> Result<Vec<Entry>> {
        let entries = sqlx::query_as::<_, Entry>(&format!(
            "SELECT {} FROM word_count_entry ORDER BY date_of_entry, id",
            ENTRY_COLUMNS
        ))
        .fetch_all(self.pool())
        .await
        .during(|| "retrieve all entries".to_string())?;

        Ok(entries)
    }

    /// Get the entries dated between the two dates (inclusive), oldest first
    pub async fn select_entries_in_date_range(
        &self,
        first_date: NaiveDate,
        second_date: NaiveDate,
    ) -> Result<Vec<Entry>> {
        let entries = sqlx::query_as::<_, Entry>(&format!(
            "SELECT {} FROM word_count_entry \
             WHERE date_of_entry >= ? AND date_of_entry <= ? \
             ORDER BY date_of_entry, id",
            ENTRY_COLUMNS
        ))
        .bind(first_date)
        .bind(second_date)
        .fetch_all(self.pool())
        .await
        .during(|| {
            format!(
                "retrieve the entries from {} to {}",
                first_date.format(DATE_FORMAT),
                second_date.format(DATE_FORMAT)
            )
        })?;

        Ok(entries)
    }

    /// Get the entries whose project title matches exactly, oldest first
    pub async fn select_project_entries(&self, project_title: &str) -> Result<Vec<Entry>> {
        let entries = sqlx::query_as::<_, Entry>(&format!(
            "SELECT {} FROM word_count_entry WHERE project_title = ? ORDER BY date_of_entry, id",
            ENTRY_COLUMNS
        ))
        .bind(project_title)
        .fetch_all(self.pool())
        .await
        .during(|| format!("retrieve the entries for the project \"{}\"", project_title))?;

        Ok(entries)
    }
}
