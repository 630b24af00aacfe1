// SPDX-FileCopyrightText: 2026 Hearsay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite-backed [`StoryRepo`].

use async_trait::async_trait;
use hearsay_core::{HearsayError, StoryModel, StoryRepo};
use rusqlite::{OptionalExtension, params};
use tracing::{debug, warn};

use crate::database::{Database, storage_err};

/// Persists story snapshots into the [`Database`].
pub struct SqliteStoryRepo {
    db: Database,
}

impl SqliteStoryRepo {
    pub fn new(db: Database) -> Self {
        SqliteStoryRepo { db }
    }
}

#[async_trait]
impl StoryRepo for SqliteStoryRepo {
    /// Writes the story and its comments in one transaction.
    ///
    /// A snapshot that already exists for this `(story_id, queue_name)` pair
    /// is left untouched: the insert is skipped, no comments are written, and
    /// the call succeeds.
    async fn write_story(&self, story: StoryModel) -> Result<(), HearsayError> {
        let story_id = story.story_id;
        let queue_name = story.queue_name.clone();

        let inserted = self
            .db
            .connection()
            .call(move |conn| {
                let tx = conn.transaction()?;

                let internal_id: Option<i64> = tx
                    .query_row(
                        "INSERT INTO stories
                             (story_id, api_version, queue_name, fetched_at, raw_document)
                         VALUES (?1, ?2, ?3, ?4, ?5)
                         ON CONFLICT (story_id, queue_name) DO NOTHING
                         RETURNING id",
                        params![
                            story.story_id,
                            story.api_version,
                            story.queue_name,
                            story.fetched_at.to_rfc3339(),
                            story.raw_document,
                        ],
                        |row| row.get(0),
                    )
                    .optional()?;

                let Some(internal_id) = internal_id else {
                    // Conflict: this stage's snapshot was already taken.
                    return Ok(false);
                };

                {
                    let mut stmt = tx.prepare(
                        "INSERT INTO comments (internal_story_id, comment_id, raw_document)
                         VALUES (?1, ?2, ?3)",
                    )?;
                    for comment in &story.comments {
                        stmt.execute(params![
                            internal_id,
                            comment.comment_id,
                            comment.raw_document
                        ])?;
                    }
                }

                tx.commit()?;
                Ok(true)
            })
            .await
            .map_err(storage_err)?;

        if inserted {
            debug!(story_id, queue_name, "story snapshot written");
        } else {
            warn!(story_id, queue_name, "duplicate story snapshot, skipping");
        }
        Ok(())
    }
}
