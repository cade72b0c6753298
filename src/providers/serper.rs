//! Serper web search client
//!
//! Best effort only: a missing key, a non-OK status or a transport/decode
//! failure all produce an empty summary.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::YearMonth;
use crate::providers::WebSearch;

pub const DEFAULT_SERPER_URL: &str = "https://google.serper.dev/search";

/// Number of organic results summarised per keyword
const RESULT_LIMIT: usize = 5;

#[derive(Debug, Clone)]
pub struct SerperConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
}

impl Default for SerperConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_SERPER_URL.to_string(),
        }
    }
}

/// Why a search produced no summary; logged, never returned to callers
#[derive(Error, Debug)]
enum SearchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(u16),
}

pub struct SerperClient {
    client: Client,
    config: SerperConfig,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic: Vec<OrganicResult>,
}

#[derive(Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: Option<String>,
}

/// Search phrase for a keyword in a month, e.g. "부가세 2025년 7월 트렌드 이슈"
pub fn search_query(keyword: &str, period: YearMonth) -> String {
    format!("{} {}년 {}월 트렌드 이슈", keyword, period.year(), period.month())
}

fn summarize(results: &[OrganicResult]) -> String {
    results
        .iter()
        .take(RESULT_LIMIT)
        .enumerate()
        .map(|(i, item)| {
            let block = format!("{}. {}\n{}", i + 1, item.title, item.snippet.as_deref().unwrap_or(""));
            block.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

impl SerperClient {
    pub fn new(client: Client, config: SerperConfig) -> Self {
        Self { client, config }
    }

    pub fn is_configured(&self) -> bool {
        self.config
            .api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    async fn try_search(&self, api_key: &str, query: &str) -> Result<String, SearchError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .header("X-API-KEY", api_key)
            .json(&json!({
                "q": query,
                "gl": "kr",
                "hl": "ko",
                "num": RESULT_LIMIT,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        let body: SearchResponse = response.json().await?;
        Ok(summarize(&body.organic))
    }
}

#[async_trait]
impl WebSearch for SerperClient {
    async fn search(&self, keyword: &str, period: YearMonth) -> String {
        let Some(api_key) = self.config.api_key.as_deref().filter(|k| !k.trim().is_empty()) else {
            debug!("Serper API key not set, skipping web search - keyword={}", keyword);
            return String::new();
        };

        let query = search_query(keyword, period);
        let start = std::time::Instant::now();

        match self.try_search(api_key, &query).await {
            Ok(summary) => {
                info!(
                    "Web search completed - keyword={}, duration={:.2}s, summary_length={} chars",
                    keyword,
                    start.elapsed().as_secs_f32(),
                    summary.chars().count()
                );
                summary
            }
            Err(reason) => {
                warn!("Web search unavailable, continuing without it - keyword={}, reason={}", keyword, reason);
                String::new()
            }
        }
    }
}
