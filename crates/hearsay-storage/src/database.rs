// SPDX-FileCopyrightText: 2026 Hearsay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite connection handling and schema.
//!
//! The schema keys snapshots on `(story_id, queue_name)`: the same story is
//! recorded once per ladder stage, and a re-delivered message for a stage
//! already recorded is a no-op. Comments hang off the internal row id, not
//! the story id, so each snapshot carries its own comment set.

use std::path::Path;

use hearsay_core::HearsayError;
use tokio_rusqlite::Connection;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS stories (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    story_id     INTEGER NOT NULL,
    api_version  TEXT NOT NULL,
    queue_name   TEXT NOT NULL,
    fetched_at   TEXT NOT NULL,
    raw_document TEXT NOT NULL,
    UNIQUE (story_id, queue_name)
);

CREATE TABLE IF NOT EXISTS comments (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    internal_story_id INTEGER NOT NULL REFERENCES stories (id),
    comment_id        INTEGER NOT NULL,
    raw_document      TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_comments_internal_story_id
    ON comments (internal_story_id);
";

/// Handle to the snapshot database.
///
/// Wraps a single serialized connection; the worker is sequential, so one
/// connection is all the process needs.
#[derive(Clone)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (creating if needed) the database at `path` and applies the
    /// schema.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, HearsayError> {
        let conn = Connection::open(path.as_ref())
            .await
            .map_err(storage_err)?;

        conn.call(|conn| {
            conn.pragma_update(None, "journal_mode", "WAL")?;
            conn.pragma_update(None, "foreign_keys", "ON")?;
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await
        .map_err(storage_err)?;

        Ok(Database { conn })
    }

    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }
}

pub(crate) fn storage_err(err: tokio_rusqlite::Error) -> HearsayError {
    HearsayError::Storage { source: err.into() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hearsay.db");

        Database::open(&path).await.unwrap();
        // Re-opening applies the schema again without error.
        Database::open(&path).await.unwrap();
    }
}
