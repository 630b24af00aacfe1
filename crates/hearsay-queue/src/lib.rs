// SPDX-FileCopyrightText: 2026 Hearsay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistent delay queues and the escalation ladder.
//!
//! A [`DelayQueue`] is a durable priority queue over a sorted-set-capable
//! broker, keyed by ready time, with deduplicated insert and blocking
//! removal. The [`EscalationLadder`] is the fixed table of stages a story
//! moves through.

pub mod message;
pub mod queue;
pub mod redis_broker;
pub mod stage;

pub use message::ScheduledMessage;
pub use queue::DelayQueue;
pub use redis_broker::RedisBroker;
pub use stage::{
    DEFAULT_GRACE_PERIOD, EscalationLadder, NEW_STAGE_NAME, QUEUE_KEY_PREFIX, StageConfig,
};
