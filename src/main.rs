use std::error::Error;

use clap::Parser;
use product_store::{CollectionMode, ProductStore, StoreConfig};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;

mod cli;
mod telemetry;

use cli::{Args, Command};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env is fine; a malformed one is not.
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e.into());
        }
    }

    let subscriber = tracing_subscriber::registry()
        .with(telemetry::env_filter(telemetry::DEFAULT_FILTER))
        .with(telemetry::layer());
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => api::start().await?,
        Command::Ingest { path, fresh } => {
            let mode = if fresh {
                CollectionMode::Fresh
            } else {
                CollectionMode::Keep
            };

            let store = ProductStore::new(StoreConfig::from_env()?)?;
            let stats = match path {
                Some(path) => store.ingest_file(path, mode).await?,
                None => store.ingest_default(mode).await?,
            };
            info!(
                target: "shop_assistant",
                read = stats.read,
                skipped = stats.skipped,
                indexed = stats.indexed,
                duration_ms = stats.duration_ms,
                "ingestion finished"
            );
        }
    }

    Ok(())
}
