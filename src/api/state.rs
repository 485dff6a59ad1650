//! Shared application state for HTTP handlers

use std::sync::Arc;
use std::time::Instant;

use crate::config::ServerConfig;
use crate::ingest::{IngestConfig, IngestService};
use crate::store::{Store, StoreResult};

/// Shared application state
pub struct AppState {
    /// The event and pattern store
    pub store: Arc<Store>,

    /// Ingestion pipeline over `store`
    pub ingest: IngestService,

    /// Max rows returned by the live-match query
    pub live_limit: usize,

    started_at: Instant,
}

impl AppState {
    pub fn new(store: Arc<Store>, ingest_config: IngestConfig, live_limit: usize) -> Self {
        let ingest = IngestService::new(store.clone(), ingest_config);
        Self {
            store,
            ingest,
            live_limit,
            started_at: Instant::now(),
        }
    }

    /// Open the configured database and wire the services
    pub fn from_config(config: &ServerConfig) -> StoreResult<Self> {
        let store = Arc::new(Store::with_config(config.store_config())?);
        Ok(Self::new(store, config.ingest_config(), config.live_limit))
    }

    /// Seconds since the state was created
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
