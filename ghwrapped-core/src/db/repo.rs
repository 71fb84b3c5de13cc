//! Database repository layer
//!
//! Stores assembled wrapped records and job status, both keyed by
//! `(username, year)`. Records are written wholesale; a re-run overwrites.

use crate::error::{Error, Result};
use crate::types::{StatusRecord, WrappedRecord, WrappedStatus};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::Mutex;

/// SQLite-backed store.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create a database at the given path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run migrations on this database
    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        super::schema::run_migrations(&conn)
    }

    /// Get the underlying connection (for advanced use)
    pub fn connection(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap()
    }

    // ============================================
    // Wrapped records
    // ============================================

    /// Insert or replace the wrapped record for its `(username, year)`.
    pub fn save_wrapped(&self, record: &WrappedRecord) -> Result<()> {
        let json = serde_json::to_string(record)?;
        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO wrapped_records (username, year, generated_at, record)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(username, year) DO UPDATE SET
                generated_at = excluded.generated_at,
                record = excluded.record
            "#,
            params![
                record.username,
                record.year,
                record.generated_at.to_rfc3339(),
                json,
            ],
        )?;
        Ok(())
    }

    /// Get the stored wrapped record, if any.
    pub fn get_wrapped(&self, username: &str, year: i32) -> Result<Option<WrappedRecord>> {
        let conn = self.conn.lock().unwrap();
        let json: Option<String> = conn
            .query_row(
                "SELECT record FROM wrapped_records WHERE username = ?1 AND year = ?2",
                params![username, year],
                |row| row.get(0),
            )
            .optional()?;

        json.map(|j| serde_json::from_str(&j).map_err(Error::from))
            .transpose()
    }

    /// Get the stored record or fail with [`Error::WrappedNotFound`].
    pub fn require_wrapped(&self, username: &str, year: i32) -> Result<WrappedRecord> {
        self.get_wrapped(username, year)?
            .ok_or_else(|| Error::WrappedNotFound {
                username: username.to_string(),
                year,
            })
    }

    /// Most recent year with a stored record for `username`.
    pub fn latest_wrapped_year(&self, username: &str) -> Result<Option<i32>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT MAX(year) FROM wrapped_records WHERE username = ?1",
            [username],
            |row| row.get(0),
        )
        .map_err(Error::from)
    }

    /// Remove the record and status for `(username, year)`.
    pub fn delete_wrapped(&self, username: &str, year: i32) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "DELETE FROM wrapped_records WHERE username = ?1 AND year = ?2",
            params![username, year],
        )?;
        conn.execute(
            "DELETE FROM wrapped_status WHERE username = ?1 AND year = ?2",
            params![username, year],
        )?;
        Ok(())
    }

    // ============================================
    // Job status
    // ============================================

    /// Record the current status of a computation.
    ///
    /// `started_at` is set the first time a `processing` status is written
    /// and kept across later updates. `completed_at` is set when the status
    /// becomes `completed`.
    pub fn set_status(
        &self,
        username: &str,
        year: i32,
        status: WrappedStatus,
        progress: u8,
        error: Option<&str>,
    ) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let started_at = (status == WrappedStatus::Processing).then(|| now.clone());
        let completed_at = (status == WrappedStatus::Completed).then_some(now);

        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO wrapped_status (username, year, status, progress, error, started_at, completed_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(username, year) DO UPDATE SET
                status = excluded.status,
                progress = excluded.progress,
                error = excluded.error,
                started_at = COALESCE(wrapped_status.started_at, excluded.started_at),
                completed_at = excluded.completed_at
            "#,
            params![
                username,
                year,
                status.as_str(),
                progress.min(100),
                error,
                started_at,
                completed_at,
            ],
        )?;

        tracing::debug!(username, year, status = %status, progress, "Status updated");
        Ok(())
    }

    /// Clear the status so the next run starts fresh.
    pub fn reset_status(&self, username: &str, year: i32) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "DELETE FROM wrapped_status WHERE username = ?1 AND year = ?2",
            params![username, year],
        )?;
        Ok(())
    }

    /// Get the status of a computation, if one was ever started.
    pub fn get_status(&self, username: &str, year: i32) -> Result<Option<StatusRecord>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT * FROM wrapped_status WHERE username = ?1 AND year = ?2",
            params![username, year],
            Self::row_to_status,
        )
        .optional()
        .map_err(Error::from)
    }

    fn row_to_status(row: &Row) -> rusqlite::Result<StatusRecord> {
        let status_str: String = row.get("status")?;
        let started_at: Option<String> = row.get("started_at")?;
        let completed_at: Option<String> = row.get("completed_at")?;

        Ok(StatusRecord {
            username: row.get("username")?,
            year: row.get("year")?,
            status: status_str.parse().unwrap_or(WrappedStatus::Failed),
            progress: row.get("progress")?,
            error: row.get("error")?,
            started_at: started_at.as_deref().and_then(parse_timestamp),
            completed_at: completed_at.as_deref().and_then(parse_timestamp),
        })
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
