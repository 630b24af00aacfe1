// SPDX-FileCopyrightText: 2026 Hearsay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire codec for scheduled messages.
//!
//! Only `{story_id, created_at}` goes into the member payload; `process_at`
//! rides along as the sorted-set score (integer epoch seconds) and is
//! restored from it on dequeue. Because the store deduplicates on the exact
//! encoded member, two messages for the same story with different recorded
//! creation times are distinct on purpose.

use chrono::{DateTime, Utc};
use hearsay_core::HearsayError;
use serde::{Deserialize, Serialize};

/// A request that one story be (re)fetched at a given time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledMessage {
    /// External ID of the Hacker News story.
    pub story_id: i64,
    /// Best-known creation time of the story, carried end to end.
    pub created_at: DateTime<Utc>,
    /// When the message becomes valid to process. Never serialized; it is
    /// the queue's sort score.
    pub process_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize)]
struct WireMessage {
    story_id: i64,
    created_at: DateTime<Utc>,
}

impl ScheduledMessage {
    /// Canonical member encoding: `{"story_id":<id>,"created_at":"<RFC3339>"}`.
    pub fn encode(&self) -> Result<String, HearsayError> {
        serde_json::to_string(&WireMessage {
            story_id: self.story_id,
            created_at: self.created_at,
        })
        .map_err(|e| HearsayError::Codec {
            source: Box::new(e),
        })
    }

    /// Decodes a member, restoring `process_at` from the sorted-set score.
    pub fn decode(member: &str, score: f64) -> Result<Self, HearsayError> {
        let wire: WireMessage = serde_json::from_str(member).map_err(|e| HearsayError::Codec {
            source: Box::new(e),
        })?;
        let process_at =
            DateTime::from_timestamp(score as i64, 0).ok_or_else(|| HearsayError::Codec {
                source: format!("score {score} is not a valid epoch timestamp").into(),
            })?;

        Ok(ScheduledMessage {
            story_id: wire.story_id,
            created_at: wire.created_at,
            process_at,
        })
    }

    /// The sorted-set score: `process_at` as integer epoch seconds.
    pub fn score(&self) -> i64 {
        self.process_at.timestamp()
    }
}
