// SPDX-FileCopyrightText: 2026 Hearsay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Consumer and producer traits driven by the worker loop.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::HearsayError;

/// Result of a consumer fetch: the story ID and the best-known creation time.
///
/// The frontier consumer has no item timestamp and yields `None`; downstream
/// callers must tolerate that.
pub type Fetched = (i64, Option<DateTime<Utc>>);

/// Source half of a worker: yields the next story to process.
#[async_trait]
pub trait Consumer: Send {
    async fn fetch(&mut self) -> Result<Fetched, HearsayError>;
}

/// Sink half of a worker: schedules a story for its next-stage fetch.
#[async_trait]
pub trait Producer: Send + Sync {
    async fn send(
        &self,
        story_id: i64,
        created_at: Option<DateTime<Utc>>,
    ) -> Result<(), HearsayError>;
}
