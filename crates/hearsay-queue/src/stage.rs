// SPDX-FileCopyrightText: 2026 Hearsay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The escalation ladder: the fixed, ordered table of re-fetch stages.
//!
//! A story enters at `new` (delay 0) and is re-fetched 15 minutes, 30
//! minutes, 1 hour, 3 hours, and finally 6 hours after creation. Changing the
//! table is a deployment-time decision, not runtime configuration.

use std::time::Duration;

/// Prefix for every stage's backing sorted-set key.
pub const QUEUE_KEY_PREFIX: &str = "ingestion-queue";

/// Grace period applied to every stage.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(60);

/// Name of the ladder's entry stage.
pub const NEW_STAGE_NAME: &str = "new";

/// Configuration of one ladder stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageConfig {
    /// Stage name, also the suffix of the backing queue key.
    pub name: String,
    /// Delay after the story's creation time before (re)fetching.
    pub fetch_delay: Duration,
    /// Length of the processing window that opens at the scheduled time.
    pub grace_period: Duration,
}

impl StageConfig {
    fn new(name: &str, fetch_delay: Duration) -> Self {
        StageConfig {
            name: name.to_string(),
            fetch_delay,
            grace_period: DEFAULT_GRACE_PERIOD,
        }
    }

    /// Key of the stage's backing collection: `ingestion-queue:<name>`.
    pub fn queue_key(&self) -> String {
        format!("{QUEUE_KEY_PREFIX}:{}", self.name)
    }
}

/// The ordered stage table.
#[derive(Debug, Clone)]
pub struct EscalationLadder {
    stages: Vec<StageConfig>,
}

impl Default for EscalationLadder {
    fn default() -> Self {
        Self::new()
    }
}

impl EscalationLadder {
    pub fn new() -> Self {
        let minutes = [
            (NEW_STAGE_NAME, 0u64),
            ("15m", 15),
            ("30m", 30),
            ("1h", 60),
            ("3h", 180),
            ("6h", 360),
        ];
        EscalationLadder {
            stages: minutes
                .iter()
                .map(|(name, m)| StageConfig::new(name, Duration::from_secs(m * 60)))
                .collect(),
        }
    }

    /// Looks up a stage by name.
    ///
    /// Returns `None` for an unknown name. For a known stage, the second
    /// element is its successor in table order, or `None` when the stage is
    /// terminal. The two "no successor" situations are therefore
    /// distinguishable.
    pub fn resolve(&self, name: &str) -> Option<(&StageConfig, Option<&StageConfig>)> {
        let idx = self.stages.iter().position(|s| s.name == name)?;
        Some((&self.stages[idx], self.stages.get(idx + 1)))
    }

    /// The entry stage (`new`, delay 0) that frontier discoveries feed.
    pub fn head(&self) -> &StageConfig {
        &self.stages[0]
    }

    pub fn stages(&self) -> &[StageConfig] {
        &self.stages
    }
}
