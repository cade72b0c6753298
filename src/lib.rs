//! Public library interface for the keyword trend insights server
//!
//! Exposes the growth ranking, keyword classification and AI insight
//! assembly as a library, plus the HTTP server that serves them.

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;

pub mod analytics;
pub mod config;
pub mod domain;
pub mod http;
pub mod insights;
pub mod providers;
pub mod storage;
pub mod tools;

// Re-export the main public types
pub use analytics::{AnalyticsEngine, KeywordGrowth, KeywordMetrics};
pub use config::Config;
pub use domain::*;
pub use insights::{build_insight_request, InsightError, InsightReport, InsightRequest, InsightService};
pub use storage::{DatasetError, JsonDataset, KeywordDataset};

/// Errors that can occur during server startup and operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Dataset error: {0}")]
    Dataset(#[from] storage::DatasetError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Keyword trend insights server
///
/// Owns the read-only dataset, the analytics engine and the insight service.
/// Shared across request handlers behind an `Arc`.
pub struct TrendInsightsServer {
    dataset: Box<dyn KeywordDataset>,
    analytics: AnalyticsEngine,
    insights: InsightService,
}

impl TrendInsightsServer {
    /// Create a server from an already loaded dataset and insight service
    pub fn new<D: KeywordDataset + 'static>(dataset: D, insights: InsightService) -> Self {
        Self {
            dataset: Box::new(dataset),
            analytics: AnalyticsEngine::new(),
            insights,
        }
    }

    /// Load the dataset and build the provider clients described by `config`
    pub fn from_config(config: &Config) -> Result<Self, ServerError> {
        tracing::info!("Initializing server with dataset: {}", config.dataset_path.display());

        let dataset = JsonDataset::load(&config.dataset_path)?;
        if dataset.is_empty() {
            tracing::warn!("Dataset {} contains no keywords", config.dataset_path.display());
        }

        let client = providers::http_client(config.http_timeout)?;
        let model = providers::OpenAiClient::new(client.clone(), config.openai.clone());
        let search = providers::SerperClient::new(client, config.serper.clone());
        if !search.is_configured() {
            tracing::warn!("SERPER_API_KEY not set, insights will run without web search");
        }

        let insights = InsightService::new(Arc::new(model), Arc::new(search));
        Ok(Self::new(dataset, insights))
    }

    /// Serve the HTTP API on `addr`
    ///
    /// Blocks until the listener fails or the process is stopped.
    pub async fn run(self, addr: SocketAddr) -> Result<(), ServerError> {
        tracing::info!("Starting server with {} keywords", self.dataset.len());
        http::start_server(Arc::new(self), addr).await
    }

    /// Build the router without binding a socket (useful for testing)
    pub fn router(self) -> axum::Router {
        http::create_router(Arc::new(self))
    }

    pub fn dataset(&self) -> &dyn KeywordDataset {
        self.dataset.as_ref()
    }

    pub fn analytics(&self) -> &AnalyticsEngine {
        &self.analytics
    }

    pub fn insights(&self) -> &InsightService {
        &self.insights
    }
}
