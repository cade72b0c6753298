//! Main entry point for the keyword trend insights server
//!
//! Sets up logging, parses command line arguments and environment variables,
//! loads the dataset and serves the HTTP API.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use keyword_trend_insights::config::{default_dataset_path, Config, DEFAULT_BIND};
use keyword_trend_insights::providers::openai::{
    DEFAULT_MAX_TOKENS, DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL,
};
use keyword_trend_insights::providers::serper::DEFAULT_SERPER_URL;
use keyword_trend_insights::providers::{OpenAiConfig, SerperConfig};
use keyword_trend_insights::TrendInsightsServer;

/// Command line arguments for the keyword trend insights server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, env = "TREND_BIND", default_value = DEFAULT_BIND)]
    bind: SocketAddr,

    /// Path to the keyword dataset (JSON)
    /// If not provided, the first existing default location is used
    #[arg(long, env = "TREND_DATASET")]
    dataset: Option<PathBuf>,

    /// OpenAI API key; insight requests fail without it
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_OPENAI_BASE_URL)]
    openai_base_url: String,

    /// Chat model used for insights
    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_OPENAI_MODEL)]
    openai_model: String,

    /// Completion token limit per insight request
    #[arg(long, env = "OPENAI_MAX_TOKENS", default_value_t = DEFAULT_MAX_TOKENS)]
    openai_max_tokens: u32,

    /// Serper API key; web search is skipped without it
    #[arg(long, env = "SERPER_API_KEY", hide_env_values = true)]
    serper_api_key: Option<String>,

    /// Serper search endpoint
    #[arg(long, env = "SERPER_URL", default_value = DEFAULT_SERPER_URL)]
    serper_url: String,

    /// Timeout in seconds for outbound HTTP calls (0 disables it)
    #[arg(long, env = "TREND_HTTP_TIMEOUT_SECS", default_value_t = 60)]
    http_timeout_secs: u64,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> Config {
        Config {
            bind: self.bind,
            dataset_path: self.dataset.unwrap_or_else(default_dataset_path),
            openai: OpenAiConfig {
                api_key: self.openai_api_key,
                base_url: self.openai_base_url,
                model: self.openai_model,
                max_tokens: self.openai_max_tokens,
            },
            serper: SerperConfig {
                api_key: self.serper_api_key,
                endpoint: self.serper_url,
            },
            http_timeout: (self.http_timeout_secs > 0)
                .then(|| Duration::from_secs(self.http_timeout_secs)),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set up logging based on command line flags
    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("keyword_trend_insights={},tower_http={}", log_level, log_level))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting keyword trend insights server");

    let config = args.into_config();
    info!("Using dataset at: {}", config.dataset_path.display());

    let bind = config.bind;
    let server = TrendInsightsServer::from_config(&config)?;

    server.run(bind).await?;

    info!("Keyword trend insights server shutdown complete");
    Ok(())
}
