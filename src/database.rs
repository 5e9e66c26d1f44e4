use rusqlite::Connection;
use std::path::PathBuf;
use thiserror::Error;

use crate::models::{Entry, NewEntry};
use crate::utils::get_current_timestamp_string;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
    #[error("Failed to create database directory: {0}")]
    DirectoryError(String),
}

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Create a new database connection and initialize the schema
    pub fn new(path: &str) -> Result<Self, DatabaseError> {
        let db_path = PathBuf::from(path);

        // Create parent directory if it doesn't exist
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| DatabaseError::DirectoryError(e.to_string()))?;
            }
        }

        let conn = Connection::open(&db_path)?;

        let db = Database { conn };
        db.initialize_schema()?;

        Ok(db)
    }

    /// Open a private in-memory database with the schema applied
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let db = Database {
            conn: Connection::open_in_memory()?,
        };
        db.initialize_schema()?;
        Ok(db)
    }

    fn initialize_schema(&self) -> Result<(), DatabaseError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS entries (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                created_at      TEXT NOT NULL,
                category        TEXT NOT NULL,
                text            TEXT NOT NULL,
                inserted_at     TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_entries_created_at ON entries(created_at)",
            [],
        )?;

        Ok(())
    }

    /// Store a validated entry and return it with its assigned ID
    pub fn insert_entry(&self, entry: &NewEntry) -> Result<Entry, DatabaseError> {
        self.insert_raw(&entry.created_at_string(), entry.category.as_str(), &entry.text)
    }

    /// Store an entry without checking its fields.
    ///
    /// The category label is kept as given, even when it is not one of the
    /// recognized categories; such rows stay in storage but never show up in
    /// a weekly summary.
    pub fn insert_raw(&self, created_at: &str, category: &str, text: &str) -> Result<Entry, DatabaseError> {
        let inserted_at = get_current_timestamp_string();
        self.conn.execute(
            "INSERT INTO entries (created_at, category, text, inserted_at)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![created_at, category, text, inserted_at],
        )?;
        Ok(Entry {
            id: self.conn.last_insert_rowid(),
            created_at: created_at.to_string(),
            category: category.to_string(),
            text: text.to_string(),
            inserted_at,
        })
    }

    fn row_to_entry(row: &rusqlite::Row) -> Result<Entry, rusqlite::Error> {
        Ok(Entry {
            id: row.get(0)?,
            created_at: row.get(1)?,
            category: row.get(2)?,
            text: row.get(3)?,
            inserted_at: row.get(4)?,
        })
    }

    /// Get every entry in insertion order
    pub fn get_all_entries(&self) -> Result<Vec<Entry>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, created_at, category, text, inserted_at
             FROM entries ORDER BY id ASC",
        )?;
        let entries = stmt
            .query_map([], Self::row_to_entry)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    pub fn count_entries(&self) -> Result<i64, DatabaseError> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
        Ok(count)
    }
}
