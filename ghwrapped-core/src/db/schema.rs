//! Database schema and migrations
//!
//! Uses SQLite with embedded migrations managed via PRAGMA user_version.

use rusqlite::Connection;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// SQL migrations, indexed by version number
const MIGRATIONS: &[&str] = &[
    // Version 1: wrapped records and job status
    r#"
    CREATE TABLE IF NOT EXISTS wrapped_records (
        username         TEXT NOT NULL,
        year             INTEGER NOT NULL,
        generated_at     DATETIME NOT NULL,

        -- Full assembled record
        record           JSON NOT NULL,

        PRIMARY KEY (username, year)
    );

    CREATE TABLE IF NOT EXISTS wrapped_status (
        username         TEXT NOT NULL,
        year             INTEGER NOT NULL,
        status           TEXT NOT NULL,
        progress         INTEGER NOT NULL DEFAULT 0,
        error            TEXT,
        started_at       DATETIME,
        completed_at     DATETIME,

        PRIMARY KEY (username, year)
    );

    CREATE INDEX IF NOT EXISTS idx_wrapped_status_status ON wrapped_status(status);
    "#,
];

/// Run all pending migrations
pub fn run_migrations(conn: &Connection) -> crate::error::Result<()> {
    let current_version: i32 = conn
        .query_row("PRAGMA user_version", [], |r| r.get(0))
        .unwrap_or(0);

    tracing::info!(
        current_version,
        target_version = SCHEMA_VERSION,
        "Checking database migrations"
    );

    for (i, migration) in MIGRATIONS.iter().enumerate() {
        let version = (i + 1) as i32;
        if version > current_version {
            tracing::info!(version, "Running migration");
            conn.execute_batch(migration)?;
            conn.execute_batch(&format!("PRAGMA user_version = {}", version))?;
        }
    }

    if current_version < SCHEMA_VERSION {
        tracing::info!(
            from = current_version,
            to = SCHEMA_VERSION,
            "Migrations complete"
        );
    }

    Ok(())
}

/// Get the current schema version from the database
pub fn get_schema_version(conn: &Connection) -> crate::error::Result<i32> {
    let version: i32 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
    Ok(version)
}
