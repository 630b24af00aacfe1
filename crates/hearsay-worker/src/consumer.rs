// SPDX-FileCopyrightText: 2026 Hearsay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scheduled-stage consumer: dequeue, validate the processing window, fetch
//! the story and its comments, persist the snapshot.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hearsay_client::HnClient;
use hearsay_core::{Consumer, FetchKind, Fetched, HearsayError, HnComment, HnStory, StoryRepo};
use hearsay_queue::DelayQueue;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::mapper::build_story_model;

/// Waits for the processing window `[start, end)` to open.
///
/// Returns `true` when `now` is already at or past the window end (the
/// message expired). When `now` is before the window start, blocks exactly
/// until the start, racing the wait against `cancel`. Inside the window,
/// returns immediately.
pub async fn wait_for_window(
    now: DateTime<Utc>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    cancel: &CancellationToken,
) -> Result<bool, HearsayError> {
    if now >= end {
        return Ok(true);
    }
    if now < start {
        let wait = (start - now).to_std().unwrap_or(Duration::ZERO);
        debug!(wait_ms = wait.as_millis() as u64, "waiting for processing window");
        tokio::select! {
            _ = cancel.cancelled() => return Err(HearsayError::Cancelled),
            _ = tokio::time::sleep(wait) => {}
        }
    }
    Ok(false)
}

/// Consumes scheduled messages from one ladder stage.
///
/// Each fetch takes one message, validates its window, snapshots the story
/// plus every top-level comment, and hands the result to the repository. The
/// first comment failure aborts the whole operation so a partially fetched
/// comment set is never persisted.
pub struct StoryConsumer {
    client: HnClient,
    source: DelayQueue,
    repo: Arc<dyn StoryRepo>,
    cancel: CancellationToken,
}

impl StoryConsumer {
    pub fn new(
        client: HnClient,
        source: DelayQueue,
        repo: Arc<dyn StoryRepo>,
        cancel: CancellationToken,
    ) -> Self {
        StoryConsumer {
            client,
            source,
            repo,
            cancel,
        }
    }
}

#[async_trait]
impl Consumer for StoryConsumer {
    async fn fetch(&mut self) -> Result<Fetched, HearsayError> {
        let msg = self.source.dequeue().await?;

        let window_start = msg.process_at;
        let window_end = msg.process_at + self.source.grace_period();

        let expired =
            wait_for_window(Utc::now(), window_start, window_end, &self.cancel).await?;
        if expired {
            return Err(HearsayError::MessageExpired {
                story_id: msg.story_id,
                expired_at: window_end,
            });
        }

        let story: HnStory = self
            .client
            .fetch_item(msg.story_id)
            .await
            .map_err(|e| HearsayError::fetch_failed(FetchKind::Story, e))?;

        let created_at =
            DateTime::from_timestamp(story.time, 0).ok_or_else(|| HearsayError::Codec {
                source: format!("story {} has invalid time {}", msg.story_id, story.time).into(),
            })?;

        let mut comments = Vec::with_capacity(story.kids.len());
        for comment_id in &story.kids {
            let comment: HnComment = self
                .client
                .fetch_item(*comment_id)
                .await
                .map_err(|e| HearsayError::fetch_failed(FetchKind::Comment, e))?;
            comments.push(comment);
        }

        let model = build_story_model(
            &story,
            &comments,
            self.client.api_version(),
            self.source.stage_name(),
            Utc::now(),
        )?;
        self.repo.write_story(model).await?;

        Ok((msg.story_id, Some(created_at)))
    }
}
