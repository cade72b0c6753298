//! Runtime configuration
//!
//! Built by the binary from command line flags and environment variables;
//! tests construct it directly.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::providers::{OpenAiConfig, SerperConfig};

/// Address the HTTP server binds by default
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// File name looked up in the default dataset locations
pub const DATASET_FILE: &str = "keywords.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: SocketAddr,
    pub dataset_path: PathBuf,
    pub openai: OpenAiConfig,
    pub serper: SerperConfig,
    /// Timeout for outbound HTTP calls; `None` waits indefinitely
    pub http_timeout: Option<Duration>,
}

/// Candidate dataset locations, most preferred first
pub fn dataset_candidates() -> Vec<PathBuf> {
    [
        // 1. Platform data directory
        dirs::data_dir().map(|p| p.join("keyword-trend-insights").join(DATASET_FILE)),
        // 2. Dot directory in the user's home
        dirs::home_dir().map(|p| p.join(".keyword_trend_insights").join(DATASET_FILE)),
        // 3. data/ under the working directory
        std::env::current_dir().ok().map(|p| p.join("data").join(DATASET_FILE)),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// First candidate that exists, else the last one so the load error names it
pub fn default_dataset_path() -> PathBuf {
    let candidates = dataset_candidates();
    candidates
        .iter()
        .find(|path| path.is_file())
        .or_else(|| candidates.last())
        .cloned()
        .unwrap_or_else(|| PathBuf::from("data").join(DATASET_FILE))
}
