// SPDX-FileCopyrightText: 2026 Hearsay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the hearsay ingestion pipeline.
//!
//! This crate provides the foundational error taxonomy, the Hacker News item
//! schema, and the capability traits implemented by the broker, repository,
//! and worker crates.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{BoxError, FetchKind, HearsayError};
pub use traits::{Broker, Consumer, Fetched, Producer, StoryRepo};
pub use types::{CommentModel, HnComment, HnStory, StoryModel};
