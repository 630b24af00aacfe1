// SPDX-FileCopyrightText: 2026 Hearsay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration for the Hearsay ingestion worker.
//!
//! TOML files merged over compiled defaults, with `HEARSAY_` environment
//! variable overrides on top.

pub mod loader;
pub mod model;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{BrokerConfig, ClientConfig, HearsayConfig, StorageConfig, WorkerConfig};
