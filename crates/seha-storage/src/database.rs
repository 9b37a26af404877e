// SPDX-FileCopyrightText: 2026 Seha Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup and migrations.
//!
//! All reads and writes are serialized through tokio-rusqlite's single
//! background thread. Do NOT create additional connections for writes.

use std::path::Path;
use std::time::Duration;

use seha_core::SehaError;
use tracing::debug;

use crate::migrations;

/// Convert a tokio-rusqlite error into [`SehaError::Storage`].
pub fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> SehaError {
    SehaError::storage(e)
}

/// Handle to the SQLite database.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Opens (creating if needed) the database at `path` and applies migrations.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, SehaError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(SehaError::storage)?;
        }

        // Migrations need a plain connection; run them off the async runtime.
        let migrate_path = path.to_string();
        tokio::task::spawn_blocking(move || -> Result<(), SehaError> {
            let mut conn = rusqlite::Connection::open(&migrate_path).map_err(SehaError::storage)?;
            apply_pragmas(&conn, wal_mode).map_err(SehaError::storage)?;
            migrations::run_migrations(&mut conn)
        })
        .await
        .map_err(|e| SehaError::Internal(format!("migration task failed: {e}")))??;

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(SehaError::storage)?;
        conn.call(move |conn| apply_pragmas(conn, wal_mode))
            .await
            .map_err(map_tr_err)?;

        debug!(path, wal_mode, "database opened");
        Ok(Self { conn })
    }

    /// The shared async connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }
}

fn apply_pragmas(conn: &rusqlite::Connection, wal_mode: bool) -> Result<(), rusqlite::Error> {
    conn.busy_timeout(Duration::from_secs(5))?;
    if wal_mode {
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        debug!(mode = mode.as_str(), "journal mode set");
        conn.pragma_update(None, "synchronous", "NORMAL")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_creates_parent_dirs_and_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/seha.db");
        let db = Database::open(&path.to_string_lossy(), true).await.unwrap();

        let tables: Vec<String> = db
            .connection()
            .call(|conn| -> Result<Vec<String>, rusqlite::Error> {
                let mut stmt = conn.prepare(
                    "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'conversations'",
                )?;
                let rows = stmt.query_map([], |row| row.get(0))?;
                rows.collect()
            })
            .await
            .unwrap();
        assert_eq!(tables, vec!["conversations".to_string()]);
    }

    #[tokio::test]
    async fn reopening_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seha.db").to_string_lossy().into_owned();
        Database::open(&path, true).await.unwrap();
        Database::open(&path, true).await.unwrap();
    }
}
