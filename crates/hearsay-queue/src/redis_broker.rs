// SPDX-FileCopyrightText: 2026 Hearsay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Redis implementation of the [`Broker`] capability.
//!
//! `ZADD NX` gives the deduplicated insert; `BZPOPMIN` gives the blocking
//! minimum-score removal. `BZPOPMIN` holds the connection while it blocks,
//! which is fine here: each stage's queue is consumed by one sequential
//! worker.

use std::time::Duration;

use async_trait::async_trait;
use hearsay_core::{Broker, HearsayError};
use redis::aio::ConnectionManager;

/// Redis-backed sorted-set broker.
#[derive(Clone)]
pub struct RedisBroker {
    conn: ConnectionManager,
}

impl RedisBroker {
    /// Connects to the broker at `url` (e.g. `redis://localhost:6379`).
    pub async fn connect(url: &str) -> Result<Self, HearsayError> {
        let client = redis::Client::open(url).map_err(broker_err)?;
        let conn = client.get_connection_manager().await.map_err(broker_err)?;
        Ok(RedisBroker { conn })
    }
}

#[async_trait]
impl Broker for RedisBroker {
    async fn zadd_nx(&self, key: &str, score: i64, member: &str) -> Result<bool, HearsayError> {
        let mut conn = self.conn.clone();
        let added: i64 = redis::cmd("ZADD")
            .arg(key)
            .arg("NX")
            .arg(score)
            .arg(member)
            .query_async(&mut conn)
            .await
            .map_err(broker_err)?;
        Ok(added > 0)
    }

    async fn bzpopmin(
        &self,
        key: &str,
        timeout: Duration,
    ) -> Result<Option<(String, f64)>, HearsayError> {
        let mut conn = self.conn.clone();
        // Reply is (key, member, score), or nil on timeout.
        let reply: Option<(String, String, f64)> = redis::cmd("BZPOPMIN")
            .arg(key)
            .arg(timeout.as_secs_f64())
            .query_async(&mut conn)
            .await
            .map_err(broker_err)?;
        Ok(reply.map(|(_key, member, score)| (member, score)))
    }
}

fn broker_err(e: redis::RedisError) -> HearsayError {
    HearsayError::Broker {
        source: Box::new(e),
    }
}
