//! Cricket pattern server - binary entry point

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use cricket_patterns::api;
use cricket_patterns::logging::init_tracing;
use cricket_patterns::{AppState, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ServerConfig::load_dotenv();
    let config = ServerConfig::from_env();
    init_tracing("cricket-server", config.log_json).context("failed to initialise logging")?;

    info!(
        version = cricket_patterns::VERSION,
        database = %config.database_path.display(),
        dedupe_balls = config.dedupe_balls,
        enforce_lifecycle = config.enforce_lifecycle,
        "starting cricket pattern server"
    );

    let state = AppState::from_config(&config)
        .with_context(|| format!("failed to open store at {}", config.database_path.display()))?;

    api::serve(Arc::new(state), &config.bind_addr)
        .await
        .with_context(|| format!("server error on {}", config.bind_addr))?;

    Ok(())
}
