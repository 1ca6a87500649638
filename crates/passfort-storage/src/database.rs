// SPDX-FileCopyrightText: 2026 Passfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup and migrations.
//!
//! All access goes through tokio-rusqlite's single background thread, so
//! writes are serialized without additional locking. Do not create extra
//! `Connection` instances for the same file.

use passfort_core::PassfortError;

use crate::migrations;

/// Handle to the Passfort SQLite database.
#[derive(Clone)]
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (or create) the database at `path`, apply PRAGMAs, and run all
    /// pending migrations.
    pub async fn open(path: &str) -> Result<Self, PassfortError> {
        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(PassfortError::storage)?;
        Self::initialize(conn).await
    }

    /// Open an in-memory database. Test use only.
    pub async fn open_in_memory() -> Result<Self, PassfortError> {
        let conn = tokio_rusqlite::Connection::open_in_memory()
            .await
            .map_err(PassfortError::storage)?;
        Self::initialize(conn).await
    }

    async fn initialize(conn: tokio_rusqlite::Connection) -> Result<Self, PassfortError> {
        conn.call(|conn| {
            conn.pragma_update(None, "journal_mode", "WAL")?;
            conn.pragma_update(None, "foreign_keys", "ON")?;
            conn.pragma_update(None, "busy_timeout", 5000)?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        // Migrations report their own error type, so run them as the call's
        // result value rather than through the rusqlite error channel.
        conn.call(|conn| Ok(migrations::run_migrations(conn)))
            .await
            .map_err(map_tr_err)??;

        tracing::debug!("database initialized");
        Ok(Self { conn })
    }

    /// The underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }
}

/// Map a tokio-rusqlite error into the crate-wide error type.
pub fn map_tr_err(err: tokio_rusqlite::Error) -> PassfortError {
    PassfortError::Storage {
        source: Box::new(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_in_memory_runs_migrations() {
        let db = Database::open_in_memory().await.unwrap();
        // Both tables must exist after migration.
        let count: i64 = db
            .connection()
            .call(|conn| {
                let n = conn.query_row(
                    "SELECT COUNT(*) FROM sqlite_master
                     WHERE type = 'table' AND name IN ('users', 'vault_items')",
                    [],
                    |row| row.get(0),
                )?;
                Ok::<_, rusqlite::Error>(n)
            })
            .await
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn open_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db = Database::open(path.to_str().unwrap()).await.unwrap();
        drop(db);
        assert!(path.exists());
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db1 = Database::open(path.to_str().unwrap()).await.unwrap();
        drop(db1);
        // Re-opening must not fail on already-applied migrations.
        Database::open(path.to_str().unwrap()).await.unwrap();
    }
}
