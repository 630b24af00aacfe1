// SPDX-FileCopyrightText: 2026 Hearsay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./hearsay.toml` > `~/.config/hearsay/hearsay.toml`
//! > `/etc/hearsay/hearsay.toml` with environment variable overrides via
//! `HEARSAY_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::HearsayConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/hearsay/hearsay.toml` (system-wide)
/// 3. `~/.config/hearsay/hearsay.toml` (user XDG config)
/// 4. `./hearsay.toml` (local directory)
/// 5. `HEARSAY_*` environment variables
pub fn load_config() -> Result<HearsayConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HearsayConfig::default()))
        .merge(Toml::file("/etc/hearsay/hearsay.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("hearsay/hearsay.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("hearsay.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<HearsayConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HearsayConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<HearsayConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HearsayConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `HEARSAY_WORKER_SOURCE_STAGE` must map to
/// `worker.source_stage`, not `worker.source.stage`.
fn env_provider() -> Env {
    Env::prefixed("HEARSAY_").map(|key| {
        // `key` is the env var name with prefix stripped, case preserved.
        // Example: HEARSAY_CLIENT_MAX_ATTEMPTS -> "CLIENT_MAX_ATTEMPTS"
        let key_str = key.as_str().to_ascii_lowercase();
        let mapped = key_str
            .replacen("broker_", "broker.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("client_", "client.", 1)
            .replacen("worker_", "worker.", 1);
        mapped.into()
    })
}
