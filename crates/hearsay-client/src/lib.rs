// SPDX-FileCopyrightText: 2026 Hearsay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Retrying HTTP client for the Hacker News API.
//!
//! Provides [`HnClient`], which routes every request through a single
//! retrying GET with a fixed attempt budget, linear backoff with jitter, and
//! transient-vs-terminal status classification. Transient conditions (network
//! failures, throttling, 5xx, and the API's `null`-body "not ready yet"
//! answers) are absorbed here and never surface to callers.

use std::time::Duration;

use hearsay_core::HearsayError;
use rand::Rng;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Upper bound (exclusive) on the random jitter added to each backoff wait.
pub const MAX_BACKOFF_JITTER_MS: u64 = 250;

const RESOURCE_NEW_STORIES: &str = "newstories";
const RESOURCE_ITEM: &str = "item";

/// HTTP client for the Hacker News API.
#[derive(Debug, Clone)]
pub struct HnClient {
    client: reqwest::Client,
    base_url: String,
    api_version: String,
    backoff: Duration,
    max_attempts: u32,
    cancel: CancellationToken,
}

impl HnClient {
    /// Creates a new client.
    ///
    /// Backoff sleeps race against `cancel`, so a shutdown signal aborts an
    /// in-progress wait instead of letting it run out.
    ///
    /// # Panics
    /// Panics if `max_attempts` is zero; a client that never issues a request
    /// is a programming error, not a runtime condition.
    pub fn new(
        base_url: impl Into<String>,
        api_version: impl Into<String>,
        backoff: Duration,
        max_attempts: u32,
        http_timeout: Duration,
        cancel: CancellationToken,
    ) -> Result<Self, HearsayError> {
        assert!(max_attempts > 0, "max_attempts must be positive");

        let client = reqwest::Client::builder()
            .timeout(http_timeout)
            .build()
            .map_err(|e| HearsayError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_version: api_version.into(),
            backoff,
            max_attempts,
            cancel,
        })
    }

    /// Returns the API version this client speaks (recorded in snapshots).
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Fetches the newest story IDs, descending by recency.
    pub async fn fetch_new_ids(&self) -> Result<Vec<i64>, HearsayError> {
        let url = format!(
            "{}/{}/{}.json",
            self.base_url, self.api_version, RESOURCE_NEW_STORIES
        );
        let body = self.get(&url).await?;
        serde_json::from_str(&body).map_err(|e| HearsayError::Codec {
            source: Box::new(e),
        })
    }

    /// Fetches a single item (story or comment) by ID.
    pub async fn fetch_item<T: DeserializeOwned>(&self, id: i64) -> Result<T, HearsayError> {
        let url = format!(
            "{}/{}/{}/{}.json",
            self.base_url, self.api_version, RESOURCE_ITEM, id
        );
        let body = self.get(&url).await?;
        serde_json::from_str(&body).map_err(|e| HearsayError::Codec {
            source: Box::new(e),
        })
    }

    /// Issues a GET with the fixed attempt budget.
    ///
    /// Attempt `a` (a >= 1) waits `a * backoff + uniform(0, 250ms)` first;
    /// the first attempt goes out immediately. Transport failures count the
    /// attempt and continue. A 200 with a body of literally `null` is the
    /// API's "not ready yet" signal and is retried like a 429 or 5xx. Any
    /// other non-200 status returns immediately without consuming the
    /// remaining attempts.
    async fn get(&self, url: &str) -> Result<String, HearsayError> {
        let mut last_transport: Option<reqwest::Error> = None;

        for attempt in 0..self.max_attempts {
            if attempt > 0 {
                let delay = backoff_delay(attempt, self.backoff);
                tokio::select! {
                    _ = self.cancel.cancelled() => return Err(HearsayError::Cancelled),
                    _ = tokio::time::sleep(delay) => {}
                }
            }

            let rsp = match self.client.get(url).send().await {
                Ok(rsp) => rsp,
                Err(e) => {
                    warn!(url, attempt, error = %e, "transport error, will retry");
                    last_transport = Some(e);
                    continue;
                }
            };

            let status = rsp.status();
            let body = match rsp.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!(url, attempt, error = %e, "failed to read body, will retry");
                    last_transport = Some(e);
                    continue;
                }
            };

            match status {
                // The API returns 200 with a body of `null` both for items
                // that do not exist and for items it transiently failed to
                // load. The latter resolves on retry.
                StatusCode::OK if body == "null" => {
                    debug!(url, attempt, "null body, will retry");
                    continue;
                }
                StatusCode::OK => return Ok(body),
                StatusCode::TOO_MANY_REQUESTS => {
                    warn!(url, attempt, "throttled, will retry");
                    continue;
                }
                s if s.is_server_error() => {
                    warn!(url, attempt, status = %s, "server error, will retry");
                    continue;
                }
                s => {
                    return Err(HearsayError::UnexpectedStatus {
                        status: s.as_u16(),
                        body,
                    });
                }
            }
        }

        Err(HearsayError::MaxRetriesReached {
            source: last_transport.map(|e| Box::new(e) as _),
        })
    }
}

/// Backoff before attempt `attempt`: linear in the attempt number plus a
/// uniform jitter in `[0, 250ms)`.
fn backoff_delay(attempt: u32, backoff: Duration) -> Duration {
    let jitter = rand::thread_rng().gen_range(0..MAX_BACKOFF_JITTER_MS);
    backoff * attempt + Duration::from_millis(jitter)
}

#[cfg(test)]
mod tests {
    use hearsay_core::HnStory;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_client(base_url: &str, max_attempts: u32) -> HnClient {
        HnClient::new(
            base_url.to_string(),
            "v0",
            Duration::ZERO,
            max_attempts,
            Duration::from_secs(5),
            CancellationToken::new(),
        )
        .unwrap()
    }

    #[test]
    fn backoff_delay_is_linear_with_bounded_jitter() {
        let unit = Duration::from_millis(100);
        for attempt in 1..4u32 {
            for _ in 0..50 {
                let delay = backoff_delay(attempt, unit);
                assert!(delay >= unit * attempt, "attempt {attempt}: {delay:?}");
                assert!(
                    delay < unit * attempt + Duration::from_millis(MAX_BACKOFF_JITTER_MS),
                    "attempt {attempt}: {delay:?}"
                );
            }
        }
    }

    #[test]
    #[should_panic(expected = "max_attempts must be positive")]
    fn zero_attempt_budget_panics() {
        let _ = HnClient::new(
            "http://localhost",
            "v0",
            Duration::ZERO,
            0,
            Duration::from_secs(1),
            CancellationToken::new(),
        );
    }

    #[tokio::test]
    async fn fetch_new_ids_hits_newstories_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v0/newstories.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[10, 9, 8]"))
            .expect(1)
            .mount(&server)
            .await;

        let ids = test_client(&server.uri(), 1).fetch_new_ids().await.unwrap();
        assert_eq!(ids, vec![10, 9, 8]);
    }

    #[tokio::test]
    async fn fetch_item_hits_item_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v0/item/1.json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"id":1,"kids":[2,3]}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let story: HnStory = test_client(&server.uri(), 1).fetch_item(1).await.unwrap();
        assert_eq!(story.id, 1);
        assert_eq!(story.kids, vec![2, 3]);
    }

    #[tokio::test]
    async fn retries_null_body_then_succeeds() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[10, 9, 8]"))
            .mount(&server)
            .await;

        let ids = test_client(&server.uri(), 2).fetch_new_ids().await.unwrap();
        assert_eq!(ids, vec![10, 9, 8]);
    }

    #[tokio::test]
    async fn retries_throttling_then_succeeds() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[1]"))
            .mount(&server)
            .await;

        let ids = test_client(&server.uri(), 2).fetch_new_ids().await.unwrap();
        assert_eq!(ids, vec![1]);
    }

    #[tokio::test]
    async fn retries_server_error_then_succeeds() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[1]"))
            .mount(&server)
            .await;

        let ids = test_client(&server.uri(), 2).fetch_new_ids().await.unwrap();
        assert_eq!(ids, vec![1]);
    }

    #[tokio::test]
    async fn exhausted_budget_returns_max_retries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(2)
            .mount(&server)
            .await;

        let err = test_client(&server.uri(), 2)
            .fetch_new_ids()
            .await
            .unwrap_err();
        assert!(matches!(err, HearsayError::MaxRetriesReached { .. }), "got: {err}");
    }

    #[tokio::test]
    async fn exhausted_budget_carries_last_transport_error() {
        use std::error::Error as _;

        // Nothing listens on the reserved port, so every attempt fails at
        // the transport level before a status is seen.
        let err = test_client("http://127.0.0.1:1", 2)
            .fetch_new_ids()
            .await
            .unwrap_err();

        match err {
            HearsayError::MaxRetriesReached { .. } => {
                assert!(err.source().is_some(), "expected a transport source");
            }
            other => panic!("expected MaxRetriesReached, got: {other}"),
        }
    }

    #[tokio::test]
    async fn terminal_status_does_not_consume_attempts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
            .expect(1)
            .mount(&server)
            .await;

        let err = test_client(&server.uri(), 5)
            .fetch_new_ids()
            .await
            .unwrap_err();
        match err {
            HearsayError::UnexpectedStatus { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "missing");
            }
            other => panic!("expected UnexpectedStatus, got: {other}"),
        }
    }

    #[tokio::test]
    async fn cancellation_aborts_backoff_wait() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let cancel = CancellationToken::new();
        let client = HnClient::new(
            server.uri(),
            "v0",
            Duration::from_secs(3600),
            2,
            Duration::from_secs(5),
            cancel.clone(),
        )
        .unwrap();

        cancel.cancel();
        let err = client.fetch_new_ids().await.unwrap_err();
        assert!(matches!(err, HearsayError::Cancelled), "got: {err}");
    }
}
