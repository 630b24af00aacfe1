// SPDX-FileCopyrightText: 2026 Hearsay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Repository trait for durable story persistence.

use async_trait::async_trait;

use crate::error::HearsayError;
use crate::types::StoryModel;

/// Persistent store for fetched story snapshots.
///
/// Implementations must persist the story and all its comments as one atomic
/// unit, and must treat a duplicate snapshot (same story at the same stage)
/// as a benign no-op rather than an error.
#[async_trait]
pub trait StoryRepo: Send + Sync {
    async fn write_story(&self, story: StoryModel) -> Result<(), HearsayError>;
}
