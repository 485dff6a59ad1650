//! Server configuration
//!
//! Read from the environment after `.env.local` / `.env` are loaded.

use std::path::PathBuf;

use tracing::warn;

use crate::ingest::IngestConfig;
use crate::store::StoreConfig;

pub const DEFAULT_BIND: &str = "0.0.0.0:5000";
pub const DEFAULT_DB_PATH: &str = "data/cricket.sqlite";
pub const DEFAULT_LIVE_LIMIT: usize = 30;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub database_path: PathBuf,
    /// Max rows returned by the live-match query
    pub live_limit: usize,
    pub dedupe_balls: bool,
    pub enforce_lifecycle: bool,
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND.to_string(),
            database_path: PathBuf::from(DEFAULT_DB_PATH),
            live_limit: DEFAULT_LIVE_LIMIT,
            dedupe_balls: true,
            enforce_lifecycle: true,
            log_json: false,
        }
    }
}

impl ServerConfig {
    /// Load `.env.local` then `.env`; missing files are fine.
    pub fn load_dotenv() {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparseable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            bind_addr: lookup("CRICKET_BIND")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.bind_addr),
            database_path: lookup("CRICKET_DB_PATH")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            live_limit: parse_or(
                "CRICKET_LIVE_LIMIT",
                lookup("CRICKET_LIVE_LIMIT"),
                defaults.live_limit,
            )
            .max(1),
            dedupe_balls: flag_or(
                "CRICKET_DEDUPE_BALLS",
                lookup("CRICKET_DEDUPE_BALLS"),
                defaults.dedupe_balls,
            ),
            enforce_lifecycle: flag_or(
                "CRICKET_ENFORCE_LIFECYCLE",
                lookup("CRICKET_ENFORCE_LIFECYCLE"),
                defaults.enforce_lifecycle,
            ),
            log_json: flag_or("CRICKET_LOG_JSON", lookup("CRICKET_LOG_JSON"), defaults.log_json),
        }
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(&self.database_path)
    }

    pub fn ingest_config(&self) -> IngestConfig {
        IngestConfig {
            dedupe_balls: self.dedupe_balls,
            enforce_lifecycle: self.enforce_lifecycle,
        }
    }
}

fn parse_or(key: &str, raw: Option<String>, default: usize) -> usize {
    match raw {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, default, "invalid number, using default");
            default
        }),
    }
}

/// Parse a boolean flag (`true/false/1/0/yes/no/on/off`)
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn flag_or(key: &str, raw: Option<String>, default: bool) -> bool {
    match raw {
        None => default,
        Some(raw) => parse_flag(&raw).unwrap_or_else(|| {
            warn!(key, value = %raw, default, "invalid flag, using default");
            default
        }),
    }
}
