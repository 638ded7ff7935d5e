mod config;
mod feed;
mod service;

use anyhow::Result;
use config::Config;
use service::IngestService;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::load()?;

    // Create and run ingest service
    let ingest = IngestService::new(config);
    ingest.run().await
}
