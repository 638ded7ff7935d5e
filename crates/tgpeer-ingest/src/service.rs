use crate::config::Config;
use crate::feed::{parse_line, FeedLine};
use anyhow::{Context, Result};
use tgpeer_logging::LogFormat;
use tgpeer_persistence::PeerStore;
use tgpeer_types::WireUser;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::{error, info, warn};

/// Counters for one ingest run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    pub applied: usize,
    pub malformed: usize,
}

/// Ingest service - folds a wire user feed into the peer store
pub struct IngestService {
    config: Config,
}

impl IngestService {
    /// Create a new ingest service
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the ingest service
    pub async fn run(self) -> Result<()> {
        tgpeer_logging::init_logging(
            &self.config.logging.level,
            LogFormat::from_name(&self.config.logging.format),
        )?;
        info!("Starting tgpeer ingest");

        let store = PeerStore::new(&self.config.database.path)
            .await
            .context("Failed to open peer store")?;

        let shutdown = async {
            if let Err(e) = signal::ctrl_c().await {
                error!("Failed to install Ctrl+C handler: {}", e);
            }
            info!("Received shutdown signal");
        };

        tokio::select! {
            result = ingest_feed(&store, &self.config.ingest.feed, self.config.ingest.batch_size) => {
                let report = result?;
                info!(
                    "Ingest finished: {} users applied, {} malformed lines skipped, {} users stored",
                    report.applied,
                    report.malformed,
                    store.user_count().await?
                );
            }
            _ = shutdown => {
                info!("Stopping before the feed was exhausted; committed batches are kept");
            }
        }

        Ok(())
    }
}

/// Read the feed and apply it to the store in batches
pub async fn ingest_feed(store: &PeerStore, path: &str, batch_size: usize) -> Result<IngestReport> {
    let file = File::open(path)
        .await
        .with_context(|| format!("Failed to open feed {}", path))?;
    let mut lines = BufReader::new(file).lines();

    let batch_size = batch_size.max(1);
    let mut batch: Vec<WireUser> = Vec::with_capacity(batch_size);
    let mut report = IngestReport::default();
    let mut line_no = 0usize;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        match parse_line(&line) {
            FeedLine::Blank => {}
            FeedLine::User(user) => {
                batch.push(user);
                if batch.len() >= batch_size {
                    report.applied += store.apply_wire_users(&batch).await?.len();
                    batch.clear();
                }
            }
            FeedLine::Malformed(e) => {
                warn!("Skipping malformed line {} of {}: {}", line_no, path, e);
                report.malformed += 1;
            }
        }
    }

    if !batch.is_empty() {
        report.applied += store.apply_wire_users(&batch).await?.len();
    }

    Ok(report)
}
