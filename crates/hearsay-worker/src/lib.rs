// SPDX-FileCopyrightText: 2026 Hearsay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Consumers, producers, and the worker loop.
//!
//! One process runs one sequential worker: a consumer/producer pair driven
//! by [`run_worker`]. The frontier consumer seeds the ladder's first stage;
//! story consumers move items from one stage to the next.

pub mod consumer;
pub mod frontier;
pub mod mapper;
pub mod producer;
pub mod worker;

pub use consumer::StoryConsumer;
pub use frontier::FrontierConsumer;
pub use mapper::build_story_model;
pub use producer::{MessageProducer, NopProducer};
pub use worker::run_worker;
