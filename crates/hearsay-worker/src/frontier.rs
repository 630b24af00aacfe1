// SPDX-FileCopyrightText: 2026 Hearsay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Frontier consumer: the entry point of the escalation ladder.
//!
//! Polls the API for the newest story IDs, buffers them in descending order,
//! and yields one unseen ID at a time. Within a freshly discovered batch,
//! stories come out in ascending-ID order (oldest first), and already
//! buffered stories are always preferred over newly discovered ones.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use hearsay_client::HnClient;
use hearsay_core::{Consumer, Fetched, HearsayError};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Keeps the prefix of `ids` whose entries are strictly greater than
/// `max_seen`. IDs arrive descending by recency, so the first entry at or
/// below `max_seen` ends the unseen prefix.
pub fn filter_new_ids(ids: &[i64], max_seen: i64) -> &[i64] {
    match ids.iter().position(|id| *id <= max_seen) {
        Some(idx) => &ids[..idx],
        None => ids,
    }
}

/// Consumes new story IDs from the API, in order.
///
/// The buffer is owned exclusively by this instance and lost on restart by
/// design: the API's natural ordering makes it cheap to re-derive.
pub struct FrontierConsumer {
    client: HnClient,
    buffer: Vec<i64>,
    poll_interval: Duration,
    /// `None` means poll without a deadline.
    deadline: Option<Duration>,
    cancel: CancellationToken,
}

impl FrontierConsumer {
    pub fn new(
        client: HnClient,
        poll_interval: Duration,
        deadline: Option<Duration>,
        cancel: CancellationToken,
    ) -> Self {
        FrontierConsumer {
            client,
            buffer: Vec::new(),
            poll_interval,
            deadline,
            cancel,
        }
    }

    /// Polls for story IDs not yet buffered, sleeping between empty polls
    /// until something shows up or the deadline passes.
    ///
    /// Client errors propagate immediately; only an empty (fully filtered)
    /// result re-polls.
    async fn poll_for_new_ids(&mut self) -> Result<Vec<i64>, HearsayError> {
        let deadline = self.deadline.map(|d| Utc::now() + d);

        loop {
            let mut ids = self.client.fetch_new_ids().await?;

            // Drop everything at or below the newest buffered ID; those were
            // (ostensibly) enqueued already.
            if let Some(&max_seen) = self.buffer.first() {
                let unseen = filter_new_ids(&ids, max_seen).len();
                ids.truncate(unseen);
            }

            if !ids.is_empty() {
                return Ok(ids);
            }

            debug!("no new stories, polling again");
            tokio::select! {
                _ = self.cancel.cancelled() => return Err(HearsayError::Cancelled),
                _ = tokio::time::sleep(self.poll_interval) => {}
            }

            if let Some(deadline) = deadline {
                if Utc::now() > deadline {
                    return Err(HearsayError::PollTimeout);
                }
            }
        }
    }
}

#[async_trait]
impl Consumer for FrontierConsumer {
    /// Returns the next new story ID, refilling the buffer as necessary.
    ///
    /// No creation time is available at the frontier, so the second element
    /// is always `None`.
    async fn fetch(&mut self) -> Result<Fetched, HearsayError> {
        // Refill while one buffered ID remains so its value can still serve
        // as the dedup watermark for the fetched batch.
        if self.buffer.len() <= 1 {
            let mut ids = self.poll_for_new_ids().await?;
            ids.extend_from_slice(&self.buffer);
            self.buffer = ids;
        }

        match self.buffer.pop() {
            Some(story_id) => Ok((story_id, None)),
            None => Err(HearsayError::Internal(
                "frontier buffer empty after refill".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_client(base_url: &str) -> HnClient {
        HnClient::new(
            base_url.to_string(),
            "v0",
            Duration::ZERO,
            1,
            Duration::from_secs(5),
            CancellationToken::new(),
        )
        .unwrap()
    }

    async fn server_returning(body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v0/newstories.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body.to_string()))
            .mount(&server)
            .await;
        server
    }

    fn consumer(client: HnClient, deadline: Option<Duration>) -> FrontierConsumer {
        FrontierConsumer::new(client, Duration::ZERO, deadline, CancellationToken::new())
    }

    #[test]
    fn filter_new_ids_keeps_unseen_prefix() {
        let ids = [10, 9, 8];
        assert_eq!(filter_new_ids(&ids, 6), [10, 9, 8]);
        assert_eq!(filter_new_ids(&ids, 7), [10, 9, 8]);
        assert_eq!(filter_new_ids(&ids, 8), [10, 9]);
        assert_eq!(filter_new_ids(&ids, 9), [10]);
        assert!(filter_new_ids(&ids, 11).is_empty());
    }

    #[tokio::test]
    async fn first_fetch_returns_oldest_of_batch() {
        let server = server_returning("[10, 9, 8]").await;
        let mut frontier = consumer(test_client(&server.uri()), Some(Duration::from_secs(60)));

        let (story_id, created_at) = frontier.fetch().await.unwrap();
        assert_eq!(story_id, 8);
        assert!(created_at.is_none());
        assert_eq!(frontier.buffer, vec![10, 9]);
    }

    #[tokio::test]
    async fn refill_filters_already_seen_ids() {
        let server = server_returning("[10, 9, 8]").await;
        let mut frontier = consumer(test_client(&server.uri()), Some(Duration::from_secs(60)));
        frontier.buffer = vec![9];

        let (story_id, _) = frontier.fetch().await.unwrap();
        assert_eq!(story_id, 9);
        assert_eq!(frontier.buffer, vec![10]);
    }

    #[tokio::test]
    async fn buffered_ids_are_used_without_polling() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[10, 9, 8]"))
            .expect(0)
            .mount(&server)
            .await;

        let mut frontier = consumer(test_client(&server.uri()), Some(Duration::from_secs(60)));
        frontier.buffer = vec![10, 9, 8];

        let (story_id, _) = frontier.fetch().await.unwrap();
        assert_eq!(story_id, 8);
        assert_eq!(frontier.buffer, vec![10, 9]);
    }

    #[tokio::test]
    async fn empty_polls_hit_the_deadline() {
        let server = server_returning("[]").await;
        let mut frontier = consumer(test_client(&server.uri()), Some(Duration::from_nanos(1)));

        let err = frontier.fetch().await.unwrap_err();
        assert!(matches!(err, HearsayError::PollTimeout), "got: {err}");
    }

    #[tokio::test]
    async fn fully_filtered_poll_repolls_until_new_ids_appear() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[9, 8, 7]"))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[10, 9, 8]"))
            .mount(&server)
            .await;

        let mut frontier = consumer(test_client(&server.uri()), Some(Duration::from_secs(60)));
        frontier.buffer = vec![9];

        let (story_id, _) = frontier.fetch().await.unwrap();
        assert_eq!(story_id, 9);
        assert_eq!(frontier.buffer, vec![10]);
    }

    #[tokio::test]
    async fn client_error_propagates_without_repolling() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let mut frontier = consumer(test_client(&server.uri()), None);
        let err = frontier.fetch().await.unwrap_err();
        assert!(
            matches!(err, HearsayError::UnexpectedStatus { .. }),
            "got: {err}"
        );
    }

    #[tokio::test]
    async fn poll_sleep_is_cancellable() {
        let server = server_returning("[]").await;
        let cancel = CancellationToken::new();
        cancel.cancel();
        let mut frontier = FrontierConsumer::new(
            test_client(&server.uri()),
            Duration::from_secs(3600),
            None,
            cancel,
        );

        let err = frontier.fetch().await.unwrap_err();
        assert!(matches!(err, HearsayError::Cancelled), "got: {err}");
    }
}
