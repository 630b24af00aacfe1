// SPDX-FileCopyrightText: 2026 Hearsay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The worker loop: fetch, send, repeat.
//!
//! Crash-only by design: the loop recovers from exactly one condition
//! (an expired message is logged and dropped) and halts on everything else,
//! leaving restarts to an external supervisor. Cancellation is a clean halt.

use hearsay_core::{Consumer, HearsayError, Producer};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// The loop's two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkerState {
    Running,
    Halted,
}

/// Drives a consumer/producer pair until cancellation or a fatal error.
///
/// Returns `Ok(())` on clean (cancelled) shutdown; any other return is the
/// fatal error that halted the loop, which the process should exit with.
pub async fn run_worker<C, P>(
    mut consumer: C,
    producer: P,
    cancel: CancellationToken,
) -> Result<(), HearsayError>
where
    C: Consumer,
    P: Producer,
{
    let mut state = WorkerState::Running;

    while state == WorkerState::Running {
        if cancel.is_cancelled() {
            info!("cancellation requested, halting worker");
            state = WorkerState::Halted;
            continue;
        }

        let (story_id, created_at) = match consumer.fetch().await {
            Ok(fetched) => fetched,
            Err(HearsayError::MessageExpired {
                story_id,
                expired_at,
            }) => {
                warn!(story_id, %expired_at, "message missed its processing window, dropping");
                continue;
            }
            Err(HearsayError::Cancelled) => {
                info!("fetch cancelled, halting worker");
                state = WorkerState::Halted;
                continue;
            }
            Err(err) => {
                error!(error = %err, "fatal error fetching, halting worker");
                return Err(err);
            }
        };

        if let Err(err) = producer.send(story_id, created_at).await {
            error!(story_id, error = %err, "fatal error sending message, halting worker");
            return Err(err);
        }
    }

    Ok(())
}
