//! # Rift Analytics Main Entry Point
//!
//! Local delivery adapter: reads newline-delimited match-ready notification
//! JSON from stdin, processes them in batches, and writes one batch report
//! JSON object per batch to stdout. The production broker adapter lives
//! outside this crate and speaks the same message contract.

use std::sync::Arc;

use clap::Parser;
use migration::{Migrator, MigratorTrait};
use rift_analytics::config::ConfigLoader;
use rift_analytics::db::{health_check, init_pool};
use rift_analytics::pipeline::{MatchProcessor, MatchReadyMessage};
use rift_analytics::telemetry::init_tracing;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "rift-analytics", about = "Match analytics refinement pipeline")]
struct Cli {
    /// Apply pending schema migrations before processing.
    #[arg(long)]
    migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = ConfigLoader::new().load()?;
    init_tracing(&config)?;

    info!(profile = %config.profile, "loaded configuration");
    if let Ok(redacted_json) = config.redacted_json() {
        info!(config = %redacted_json, "effective configuration");
    }

    let db = init_pool(&config).await?;
    health_check(&db).await?;
    if cli.migrate {
        info!("applying pending migrations");
        Migrator::up(&db, None).await?;
    }

    let batch_size = config.pipeline.batch_size;
    let processor = Arc::new(MatchProcessor::new(Arc::new(db), Arc::new(config)));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut batch: Vec<MatchReadyMessage> = Vec::with_capacity(batch_size);

    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<MatchReadyMessage>(&line) {
            Ok(message) => batch.push(message),
            Err(err) => {
                warn!(error = %err, "dropping malformed notification line");
                continue;
            }
        }

        if batch.len() >= batch_size {
            flush(&processor, &mut batch).await?;
        }
    }

    // Final partial batch after stdin closes.
    flush(&processor, &mut batch).await?;

    Ok(())
}

async fn flush(
    processor: &Arc<MatchProcessor>,
    batch: &mut Vec<MatchReadyMessage>,
) -> Result<(), Box<dyn std::error::Error>> {
    if batch.is_empty() {
        return Ok(());
    }

    let report = processor.process_batch(std::mem::take(batch)).await;
    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}
