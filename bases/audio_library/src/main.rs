// bases/audio_library/src/main.rs
use audio_records::SqliteRecordStore;
use blob_store::ObjectBlobStore;
use clap::Parser;
use color_eyre::Result;
use config::BlobBackend;
use server::{AppState, BLOBS_ROUTE};
use std::sync::Arc;

mod config;
mod error;
mod method_override;
mod payload;
mod routes;
mod server;
mod upload;
mod views;

#[cfg(test)]
mod test_support;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "audio_library=info,tower_http=info".into()),
        )
        .init();

    // Parse CLI arguments (with environment fallbacks)
    let args = config::CliArgs::parse();
    let config = config::Config::from_args(args)?;

    let records = SqliteRecordStore::connect(&config.database_url).await?;

    let blobs = match &config.blob_backend {
        BlobBackend::S3(settings) => ObjectBlobStore::s3(settings)?,
        BlobBackend::Local { dir } => {
            tracing::warn!("Storing uploads on local disk in {}", dir.display());
            ObjectBlobStore::local(dir, BLOBS_ROUTE)?
        }
    };

    let state = AppState {
        records: Arc::new(records),
        blobs: Arc::new(blobs),
    };

    // Start HTTP server
    server::run(config, state).await?;

    Ok(())
}
