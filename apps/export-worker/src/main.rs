//! # Encore Export Worker
//!
//! Standalone consumer process for the playlist export queue. Runs next to
//! the API server; scale out by running more instances, each with a single
//! in-flight job.

use std::sync::Arc;

use anyhow::Context;

use encore_core::services::ExportWorker;
use encore_infra::database::{DatabaseConfig, DatabaseConnections, PostgresCatalog};
use encore_infra::mailer::HttpMailer;
use encore_infra::queue::{RedisExportQueue, RedisQueueConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let db_config = DatabaseConfig::from_env().context("DATABASE_URL is not set")?;
    let connections = DatabaseConnections::init(&db_config)
        .await
        .context("failed to connect to database")?;
    let catalog = Arc::new(PostgresCatalog::new(connections.main));

    let queue_config = RedisQueueConfig::from_env();
    let queue_name = queue_config.queue_name.clone();
    let queue = Arc::new(
        RedisExportQueue::new(queue_config)
            .await
            .context("failed to connect to export queue")?,
    );

    // Jobs a previous instance dequeued but never acked are put back first.
    queue.requeue_in_flight().await?;

    let mailer = Arc::new(HttpMailer::from_env().context("failed to build mail relay client")?);
    let worker = ExportWorker::new(queue, catalog, mailer);

    tracing::info!(queue = %queue_name, "Export worker running, waiting for jobs");

    worker.run().await?;
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,export_worker=debug,encore_infra=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}
