// SPDX-FileCopyrightText: 2026 Hearsay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Broker trait for the sorted-set-capable message store.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::HearsayError;

/// The two atomic primitives the delay queue needs from its backing store.
///
/// Store-level atomicity of these operations is the only synchronization in
/// the design: it is what enforces at-most-once delivery per message instance
/// when several worker processes share one stage.
#[async_trait]
pub trait Broker: Send + Sync {
    /// Adds `member` with `score` iff the member is not already present.
    ///
    /// Returns `false` when the member already existed (not an error).
    async fn zadd_nx(&self, key: &str, score: i64, member: &str) -> Result<bool, HearsayError>;

    /// Removes and returns the minimum-score member, blocking up to `timeout`.
    ///
    /// Returns `None` when the timeout elapsed with nothing to pop.
    async fn bzpopmin(
        &self,
        key: &str,
        timeout: Duration,
    ) -> Result<Option<(String, f64)>, HearsayError>;
}
