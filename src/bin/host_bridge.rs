//! Headless host bridge binary for stdin/stdout JSON communication.
//!
//! Usage: `cine-host [CONFIG_PATH]`. Without a path the platform config
//! directory is searched for `cine/config.toml`.
//!
//! All tracing/diagnostic output goes to stderr so that stdout remains a
//! clean JSON protocol channel.

use std::path::PathBuf;

use cine::host::stdio::run_stdio_bridge;
use cine::CineConfig;
use cine_search::{OmdbFetcher, SearchController};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise tracing to stderr only (stdout is reserved for the JSON
    // protocol).
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("cine-host starting");

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = CineConfig::load(config_path.as_deref())
        .map_err(|e| anyhow::anyhow!("failed to load configuration: {e}"))?;

    let fetcher = OmdbFetcher::new(&config.omdb)?;
    let controller = SearchController::new(fetcher, config.pipeline)?;

    run_stdio_bridge(&controller).await.map_err(|e| {
        tracing::error!(error = %e, "cine-host exited with error");
        anyhow::anyhow!("cine-host failed: {e}")
    })?;

    tracing::info!("cine-host shut down cleanly");
    Ok(())
}
