// SPDX-FileCopyrightText: 2026 Hearsay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for story snapshots.
//!
//! Every processed message yields one snapshot row per ladder stage plus its
//! comments, written atomically. Duplicates (same story, same stage) are
//! silently skipped so message re-delivery stays harmless.

pub mod database;
pub mod repo;

pub use database::Database;
pub use repo::SqliteStoryRepo;
