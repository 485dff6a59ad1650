//! Replay a scraped ball log against a running cricket pattern server
//!
//! Usage: `ball-replay <csv> [--url URL] [--interval-ms N]`

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use cricket_patterns::config::{parse_flag, ServerConfig};
use cricket_patterns::logging::init_tracing;
use cricket_patterns::replay::{self, ReplayConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ServerConfig::load_dotenv();
    let json = std::env::var("CRICKET_LOG_JSON")
        .ok()
        .and_then(|v| parse_flag(&v))
        .unwrap_or(false);
    init_tracing("ball-replay", json).context("failed to initialise logging")?;

    let config = ReplayConfig::from_args(std::env::args().skip(1))?;

    // Finish the ball in flight, then stop
    let stop = Arc::new(AtomicBool::new(false));
    let handler_stop = Arc::clone(&stop);
    ctrlc::set_handler(move || {
        info!("interrupt received, stopping after current ball");
        handler_stop.store(true, Ordering::SeqCst);
    })
    .context("failed to install Ctrl+C handler")?;

    replay::run(&config, stop)
        .await
        .with_context(|| format!("replay of {} failed", config.csv_path.display()))?;

    Ok(())
}
