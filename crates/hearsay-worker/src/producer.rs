// SPDX-FileCopyrightText: 2026 Hearsay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Producers: schedule a story's next-stage fetch.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hearsay_core::{HearsayError, Producer};
use hearsay_queue::{DelayQueue, ScheduledMessage};

/// Produces messages onto the next ladder stage's delay queue.
pub struct MessageProducer {
    dst: DelayQueue,
}

impl MessageProducer {
    pub fn new(dst: DelayQueue) -> Self {
        MessageProducer { dst }
    }

    fn make_message(&self, story_id: i64, created_at: DateTime<Utc>) -> ScheduledMessage {
        ScheduledMessage {
            story_id,
            created_at,
            process_at: created_at + self.dst.fetch_delay(),
        }
    }
}

#[async_trait]
impl Producer for MessageProducer {
    /// Schedules the story `fetch_delay` after its creation time.
    ///
    /// When the caller has no creation time (the frontier), the current UTC
    /// time stands in as the best-known value.
    async fn send(
        &self,
        story_id: i64,
        created_at: Option<DateTime<Utc>>,
    ) -> Result<(), HearsayError> {
        let created_at = created_at.unwrap_or_else(Utc::now);
        let msg = self.make_message(story_id, created_at);
        self.dst.enqueue(&msg).await
    }
}

/// Producer for the ladder's terminal stage: accepts everything, enqueues
/// nothing.
pub struct NopProducer;

#[async_trait]
impl Producer for NopProducer {
    async fn send(
        &self,
        _story_id: i64,
        _created_at: Option<DateTime<Utc>>,
    ) -> Result<(), HearsayError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use hearsay_core::Broker;
    use hearsay_queue::{DEFAULT_GRACE_PERIOD, StageConfig};

    use super::*;

    #[derive(Default)]
    struct RecordingBroker {
        added: Mutex<Vec<(String, i64, String)>>,
    }

    #[async_trait]
    impl Broker for RecordingBroker {
        async fn zadd_nx(
            &self,
            key: &str,
            score: i64,
            member: &str,
        ) -> Result<bool, HearsayError> {
            self.added
                .lock()
                .unwrap()
                .push((key.to_string(), score, member.to_string()));
            Ok(true)
        }

        async fn bzpopmin(
            &self,
            _key: &str,
            _timeout: Duration,
        ) -> Result<Option<(String, f64)>, HearsayError> {
            Ok(None)
        }
    }

    fn hour_stage() -> StageConfig {
        StageConfig {
            name: "1h".to_string(),
            fetch_delay: Duration::from_secs(3600),
            grace_period: DEFAULT_GRACE_PERIOD,
        }
    }

    #[tokio::test]
    async fn send_schedules_at_created_at_plus_delay() {
        let broker = Arc::new(RecordingBroker::default());
        let producer = MessageProducer::new(DelayQueue::new(
            broker.clone(),
            hour_stage(),
            Duration::from_secs(1),
        ));

        let created_at: DateTime<Utc> = "2020-01-01T00:00:00Z".parse().unwrap();
        producer.send(1, Some(created_at)).await.unwrap();

        let added = broker.added.lock().unwrap();
        assert_eq!(
            *added,
            vec![(
                "ingestion-queue:1h".to_string(),
                1577840400, // 2020-01-01T01:00:00Z
                r#"{"story_id":1,"created_at":"2020-01-01T00:00:00Z"}"#.to_string(),
            )]
        );
    }

    #[tokio::test]
    async fn send_without_created_at_uses_now() {
        let broker = Arc::new(RecordingBroker::default());
        let producer = MessageProducer::new(DelayQueue::new(
            broker.clone(),
            hour_stage(),
            Duration::from_secs(1),
        ));

        let before = Utc::now().timestamp() + 3600;
        producer.send(1, None).await.unwrap();
        let after = Utc::now().timestamp() + 3600;

        let added = broker.added.lock().unwrap();
        let (_, score, _) = &added[0];
        assert!((before..=after).contains(score), "score {score} outside [{before}, {after}]");
    }

    #[tokio::test]
    async fn nop_producer_always_succeeds() {
        assert!(NopProducer.send(1, None).await.is_ok());
        assert!(NopProducer.send(2, Some(Utc::now())).await.is_ok());
    }
}
