// SPDX-FileCopyrightText: 2026 Hearsay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability trait definitions for the hearsay pipeline.
//!
//! External collaborators (the sorted-set broker, the story repository) and
//! the worker-loop seams (consumer, producer) are all expressed as
//! `#[async_trait]` traits so they can be mocked in tests and swapped for
//! different transports.

pub mod broker;
pub mod repo;
pub mod worker;

pub use broker::Broker;
pub use repo::StoryRepo;
pub use worker::{Consumer, Fetched, Producer};
