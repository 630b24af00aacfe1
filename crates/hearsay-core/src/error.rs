// SPDX-FileCopyrightText: 2026 Hearsay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the hearsay ingestion pipeline.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Boxed error type used for wrapped causes crossing crate boundaries.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The primary error type used across all hearsay crates.
///
/// Transient HTTP conditions (throttling, 5xx, not-ready bodies) never appear
/// here: they are absorbed by the resource client's retry loop. Everything
/// that does surface is either recoverable by skipping one item
/// ([`HearsayError::MessageExpired`]), a clean shutdown
/// ([`HearsayError::Cancelled`]), or fatal to the worker process.
#[derive(Debug, Error)]
pub enum HearsayError {
    /// Configuration errors (invalid TOML, missing fields, unknown stage).
    #[error("configuration error: {0}")]
    Config(String),

    /// The retry budget was exhausted without a successful response.
    /// Carries the last transport-level error, if one occurred.
    #[error("maximum retries reached")]
    MaxRetriesReached { source: Option<BoxError> },

    /// The API answered with a status that is not worth retrying (404, 400, ...).
    #[error("unexpected HTTP status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// A blocking dequeue found no message before its timeout.
    #[error("timeout expired waiting for a message")]
    Timeout,

    /// The frontier polling deadline elapsed with no new story IDs.
    #[error("timed out polling for new stories")]
    PollTimeout,

    /// The message was dequeued after its processing window had closed.
    /// Recoverable: the worker drops the item and keeps running.
    #[error("message for story {story_id} expired at {expired_at}")]
    MessageExpired {
        story_id: i64,
        expired_at: DateTime<Utc>,
    },

    /// A story or comment fetch failed after the client's internal retries.
    #[error("unable to fetch {kind}: {source}")]
    FetchFailed {
        kind: FetchKind,
        source: Box<HearsayError>,
    },

    /// Message broker errors, propagated verbatim.
    #[error("broker error: {source}")]
    Broker { source: BoxError },

    /// Storage backend errors, propagated verbatim.
    #[error("storage error: {source}")]
    Storage { source: BoxError },

    /// A payload could not be encoded or decoded.
    #[error("codec error: {source}")]
    Codec { source: BoxError },

    /// A cancellation signal interrupted a sleep or wait.
    #[error("operation cancelled")]
    Cancelled,

    /// Internal invariant violations.
    #[error("internal error: {0}")]
    Internal(String),
}

/// What kind of item a failed fetch was after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Story,
    Comment,
}

impl std::fmt::Display for FetchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchKind::Story => f.write_str("story"),
            FetchKind::Comment => f.write_str("comment"),
        }
    }
}

impl HearsayError {
    /// Wraps an error as a failed story or comment fetch.
    pub fn fetch_failed(kind: FetchKind, source: HearsayError) -> Self {
        HearsayError::FetchFailed {
            kind,
            source: Box::new(source),
        }
    }
}
