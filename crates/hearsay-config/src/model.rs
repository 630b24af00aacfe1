// SPDX-FileCopyrightText: 2026 Hearsay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Hearsay ingestion worker.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

use hearsay_core::HearsayError;

/// Top-level Hearsay configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HearsayConfig {
    /// Redis message broker settings.
    #[serde(default)]
    pub broker: BrokerConfig,

    /// SQLite storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Hacker News API client settings.
    #[serde(default)]
    pub client: ClientConfig,

    /// Worker loop settings.
    #[serde(default)]
    pub worker: WorkerConfig,
}

impl HearsayConfig {
    /// Rejects values the rest of the system cannot operate on.
    pub fn validate(&self) -> Result<(), HearsayError> {
        if self.client.max_attempts == 0 {
            return Err(HearsayError::Config(
                "client.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.client.base_url.is_empty() {
            return Err(HearsayError::Config(
                "client.base_url must not be empty".to_string(),
            ));
        }
        if self.broker.url.is_empty() {
            return Err(HearsayError::Config(
                "broker.url must not be empty".to_string(),
            ));
        }
        if self.worker.dequeue_timeout_secs == 0 {
            return Err(HearsayError::Config(
                "worker.dequeue_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Redis broker configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BrokerConfig {
    /// Redis connection URL.
    #[serde(default = "default_broker_url")]
    pub url: String,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            url: default_broker_url(),
        }
    }
}

fn default_broker_url() -> String {
    "redis://127.0.0.1:6379".to_string()
}

/// SQLite storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    "hearsay.db".to_string()
}

/// Hacker News API client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Base URL of the API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API version path segment.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Base backoff between retries, in milliseconds. The n-th retry waits
    /// n times this long plus jitter.
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,

    /// Total request attempts before giving up.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Per-request HTTP timeout, in seconds.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_version: default_api_version(),
            backoff_ms: default_backoff_ms(),
            max_attempts: default_max_attempts(),
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://hacker-news.firebaseio.com".to_string()
}

fn default_api_version() -> String {
    "v0".to_string()
}

fn default_backoff_ms() -> u64 {
    1000
}

fn default_max_attempts() -> u32 {
    5
}

fn default_http_timeout_secs() -> u64 {
    10
}

/// Worker loop configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WorkerConfig {
    /// Ladder stage this worker consumes from. Unset means the worker runs
    /// the frontier consumer and feeds the ladder's first stage.
    #[serde(default)]
    pub source_stage: Option<String>,

    /// Frontier poll interval between empty ID fetches, in seconds.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Blocking dequeue timeout per attempt, in seconds.
    #[serde(default = "default_dequeue_timeout_secs")]
    pub dequeue_timeout_secs: u64,

    /// Frontier poll deadline, in seconds. Zero disables the deadline.
    #[serde(default)]
    pub poll_deadline_secs: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            source_stage: None,
            poll_interval_secs: default_poll_interval_secs(),
            dequeue_timeout_secs: default_dequeue_timeout_secs(),
            poll_deadline_secs: 0,
        }
    }
}

fn default_poll_interval_secs() -> u64 {
    30
}

fn default_dequeue_timeout_secs() -> u64 {
    30
}
