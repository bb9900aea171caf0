use std::sync::Arc;

use stringlens::config::ServiceConfig;
use stringlens::server::Server;
use stringlens::storage::{FileRecordStore, MemoryRecordStore, SharedRecordStore};
use stringlens::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::from_env();
    telemetry::init(&config.log_filter);

    let store: SharedRecordStore = match &config.data_file {
        Some(path) => Arc::new(FileRecordStore::open(path.clone()).await?),
        None => {
            tracing::info!("no data file configured; records are kept in memory");
            Arc::new(MemoryRecordStore::new())
        }
    };

    let server = Server::start(&config.bind_addr(), store).await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    server.stop().await?;

    Ok(())
}
