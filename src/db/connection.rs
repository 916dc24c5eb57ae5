/// Database connection management
///
/// Holds the single connection the tracker uses for the whole session.

use crate::error::{Result, WordCountError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::ConnectOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One user, one session: the pool never grows past a single connection
const MAX_CONNECTIONS: u32 = 1;

/// Database wrapper owning the connection pool
#[derive(Clone)]
pub struct Database {
    pool: Arc<SqlitePool>,
    db_path: PathBuf,
}

impl Database {
    /// Open the database and make sure it is usable
    ///
    /// # Arguments
    /// * `db_path` - Path to the SQLite database file
    ///
    /// # Returns
    /// * `Ok(Database)` - Connected, schema in place, smoke test passed
    /// * `Err(WordCountError::Connection)` - If any of that fails
    ///
    /// # Examples
    /// ```no_run
    /// use wordcount_lib::db::Database;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let db = Database::connect("entries.db").await?;
    /// db.close().await;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        // Create parent directory if it doesn't exist
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true)
            .disable_statement_logging();

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .map_err(|source| WordCountError::Connection {
                path: db_path.clone(),
                source,
            })?;

        let db = Self {
            pool: Arc::new(pool),
            db_path,
        };

        db.initialize_schema().await?;
        db.verify().await?;

        tracing::debug!(path = %db.db_path.display(), "database connected");

        Ok(db)
    }

    /// Create a test database in memory
    ///
    /// Used for testing. Creates a fresh database for each test.
    #[cfg(test)]
    pub async fn new_test() -> Result<Self> {
        use std::str::FromStr;

        let db_path = PathBuf::from(":memory:");
        let options = SqliteConnectOptions::from_str("sqlite::memory:").map_err(|source| {
            WordCountError::Connection {
                path: db_path.clone(),
                source,
            }
        })?;

        // An in-memory database lives exactly as long as its connection
        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|source| WordCountError::Connection {
                path: db_path.clone(),
                source,
            })?;

        let db = Self {
            pool: Arc::new(pool),
            db_path,
        };

        db.initialize_schema().await?;

        Ok(db)
    }

    /// Initialize database schema
    ///
    /// Creates the entry table and its indexes if they don't exist.
    async fn initialize_schema(&self) -> Result<()> {
        let schema = include_str!("../../database/schema.sql");

        // SQLite doesn't support multiple statements in execute,
        // so we need to split and execute each statement
        for statement in schema.split(';') {
            let trimmed = statement.trim();
            if !trimmed.is_empty() {
                sqlx::query(trimmed)
                    .execute(self.pool.as_ref())
                    .await
                    .map_err(|source| WordCountError::Connection {
                        path: self.db_path.clone(),
                        source,
                    })?;
            }
        }

        Ok(())
    }

    /// Query the entry table so a broken database is caught at startup
    async fn verify(&self) -> Result<()> {
        sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM word_count_entry")
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|source| WordCountError::Connection {
                path: self.db_path.clone(),
                source,
            })?;

        Ok(())
    }

    /// Get reference to the connection pool
    ///
    /// Used internally by query modules.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get the database file path
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Close the connection
    ///
    /// Should be called on application shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::debug!(path = %self.db_path.display(), "database closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_database_creation() {
        let db = Database::new_test().await;
        assert!(db.is_ok());
    }

    #[tokio::test]
    async fn test_schema_initialization() {
        let db = Database::new_test().await.unwrap();

        // Verify the table exists by querying it
        let result: std::result::Result<(i64,), sqlx::Error> =
            sqlx::query_as("SELECT COUNT(*) FROM word_count_entry")
                .fetch_one(db.pool())
                .await;

        assert_eq!(result.unwrap().0, 0);
    }

    #[tokio::test]
    async fn test_connect_creates_file_and_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("entries.db");

        let db = Database::connect(&path).await.unwrap();
        assert_eq!(db.path(), path.as_path());
        assert!(path.exists());

        db.close().await;
        assert!(db.pool().is_closed());
    }

    #[tokio::test]
    async fn test_connect_twice_keeps_existing_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.db");

        let first = Database::connect(&path).await.unwrap();
        first.close().await;

        let second = Database::connect(&path).await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn test_connect_fails_on_directory() {
        let dir = tempfile::tempdir().unwrap();

        let result = Database::connect(dir.path()).await;
        assert!(matches!(result, Err(WordCountError::Connection { .. })));
    }
}
