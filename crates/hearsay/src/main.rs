// SPDX-FileCopyrightText: 2026 Hearsay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hearsay - staged Hacker News ingestion worker.
//!
//! One process runs one worker. Without a `--stage`/`worker.source_stage`,
//! the process is the frontier worker feeding the ladder's first stage; with
//! one, it consumes that stage's queue and feeds the next. The loop is
//! crash-only: any fatal error exits the process and a supervisor restarts
//! it.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use hearsay_client::HnClient;
use hearsay_config::HearsayConfig;
use hearsay_core::{Broker, HearsayError, StoryRepo};
use hearsay_queue::{DelayQueue, EscalationLadder, RedisBroker, StageConfig};
use hearsay_storage::{Database, SqliteStoryRepo};
use hearsay_worker::{FrontierConsumer, MessageProducer, NopProducer, StoryConsumer, run_worker};

/// Hearsay - staged Hacker News ingestion worker.
#[derive(Parser, Debug)]
#[command(name = "hearsay", version, about, long_about = None)]
struct Cli {
    /// Path to a config file (skips the XDG lookup).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ladder stage to consume; overrides `worker.source_stage`.
    #[arg(long)]
    stage: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match load(&cli) {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "invalid configuration");
            std::process::exit(1);
        }
    };

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            signal_cancel.cancel();
        }
    });

    let stage = cli.stage.or_else(|| config.worker.source_stage.clone());
    if let Err(err) = run(&config, stage.as_deref(), cancel).await {
        error!(error = %err, "worker halted");
        std::process::exit(1);
    }
    info!("worker stopped cleanly");
}

fn load(cli: &Cli) -> Result<HearsayConfig, HearsayError> {
    let config = match &cli.config {
        Some(path) => hearsay_config::load_config_from_path(path),
        None => hearsay_config::load_config(),
    }
    .map_err(|e| HearsayError::Config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

async fn run(
    config: &HearsayConfig,
    stage: Option<&str>,
    cancel: CancellationToken,
) -> Result<(), HearsayError> {
    let ladder = EscalationLadder::new();

    let client = HnClient::new(
        config.client.base_url.clone(),
        config.client.api_version.clone(),
        Duration::from_millis(config.client.backoff_ms),
        config.client.max_attempts,
        Duration::from_secs(config.client.http_timeout_secs),
        cancel.clone(),
    )?;

    let broker: Arc<dyn Broker> = Arc::new(RedisBroker::connect(&config.broker.url).await?);
    let dequeue_timeout = Duration::from_secs(config.worker.dequeue_timeout_secs);
    let queue_for =
        |stage: &StageConfig| DelayQueue::new(broker.clone(), stage.clone(), dequeue_timeout);

    match stage {
        None => {
            info!(stage = %ladder.head().name, "starting frontier worker");
            let deadline = match config.worker.poll_deadline_secs {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            };
            let consumer = FrontierConsumer::new(
                client,
                Duration::from_secs(config.worker.poll_interval_secs),
                deadline,
                cancel.clone(),
            );
            let producer = MessageProducer::new(queue_for(ladder.head()));
            run_worker(consumer, producer, cancel).await
        }
        Some(name) => {
            let (stage, successor) = ladder.resolve(name).ok_or_else(|| {
                HearsayError::Config(format!("unknown ladder stage: {name}"))
            })?;
            info!(
                stage = %stage.name,
                next = successor.map(|s| s.name.as_str()).unwrap_or("none"),
                "starting stage worker"
            );

            let db = Database::open(&config.storage.database_path).await?;
            let repo: Arc<dyn StoryRepo> = Arc::new(SqliteStoryRepo::new(db));
            let consumer = StoryConsumer::new(client, queue_for(stage), repo, cancel.clone());

            match successor {
                Some(next) => {
                    let producer = MessageProducer::new(queue_for(next));
                    run_worker(consumer, producer, cancel).await
                }
                None => run_worker(consumer, NopProducer, cancel).await,
            }
        }
    }
}
