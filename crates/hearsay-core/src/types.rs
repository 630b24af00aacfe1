// SPDX-FileCopyrightText: 2026 Hearsay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Item schema of the Hacker News API and the persisted snapshot model.
//!
//! Items are immutable snapshots as returned by the API; they are never
//! mutated locally. Their canonical encoding (the raw document handed to the
//! repository) is `serde_json::to_string` of the typed struct.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A story item from the Hacker News API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HnStory {
    pub by: String,
    pub descendants: i32,
    pub id: i64,
    pub kids: Vec<i64>,
    pub score: i32,
    pub time: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

/// A comment item from the Hacker News API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HnComment {
    pub by: String,
    pub id: i64,
    pub kids: Vec<i64>,
    pub parent: i64,
    pub text: String,
    pub time: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

/// One comment snapshot within a [`StoryModel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentModel {
    pub comment_id: i64,
    pub raw_document: String,
}

/// The unit persisted by the repository: one story snapshot taken at one
/// stage of the escalation ladder, with all its top-level comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryModel {
    pub story_id: i64,
    pub api_version: String,
    pub queue_name: String,
    pub fetched_at: DateTime<Utc>,
    pub raw_document: String,
    pub comments: Vec<CommentModel>,
}
