// SPDX-FileCopyrightText: 2026 Hearsay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable priority queue keyed by ready time.
//!
//! One [`DelayQueue`] wraps one ladder stage. Enqueued members are unique and
//! ordered by the time at which they should be processed. Dequeue pops the
//! lowest-score member and therefore implies at-most-once delivery: a worker
//! that crashes after popping loses that message instance.

use std::sync::Arc;
use std::time::Duration;

use hearsay_core::{Broker, HearsayError};
use tracing::debug;

use crate::message::ScheduledMessage;
use crate::stage::StageConfig;

/// Persistent priority queue for one escalation-ladder stage.
#[derive(Clone)]
pub struct DelayQueue {
    broker: Arc<dyn Broker>,
    config: StageConfig,
    timeout: Duration,
}

impl DelayQueue {
    pub fn new(broker: Arc<dyn Broker>, config: StageConfig, timeout: Duration) -> Self {
        DelayQueue {
            broker,
            config,
            timeout,
        }
    }

    pub fn stage_name(&self) -> &str {
        &self.config.name
    }

    pub fn fetch_delay(&self) -> Duration {
        self.config.fetch_delay
    }

    pub fn grace_period(&self) -> Duration {
        self.config.grace_period
    }

    /// Inserts the message with its ready time as score.
    ///
    /// An identical encoded member already in the set makes this a no-op,
    /// reported as success: the store's not-exists insert is the dedup.
    pub async fn enqueue(&self, msg: &ScheduledMessage) -> Result<(), HearsayError> {
        let member = msg.encode()?;
        let inserted = self
            .broker
            .zadd_nx(&self.config.queue_key(), msg.score(), &member)
            .await?;

        if !inserted {
            debug!(
                story_id = msg.story_id,
                stage = %self.config.name,
                "duplicate message, enqueue skipped"
            );
        }
        Ok(())
    }

    /// Pops the next message to process, blocking up to the configured
    /// timeout. A timeout with no message yields [`HearsayError::Timeout`].
    pub async fn dequeue(&self) -> Result<ScheduledMessage, HearsayError> {
        match self
            .broker
            .bzpopmin(&self.config.queue_key(), self.timeout)
            .await?
        {
            Some((member, score)) => ScheduledMessage::decode(&member, score),
            None => Err(HearsayError::Timeout),
        }
    }
}
