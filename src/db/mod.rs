/// Database module for wordcount
///
/// Handles all database operations using SQLite and sqlx.

pub mod connection;
pub mod models;
pub mod queries;

pub use connection::Database;
pub use models::*;
