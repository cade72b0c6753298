//! AI insight operation
//!
//! Accepts keyword names (resolved against the dataset) or ready-made metrics
//! payloads, assembles the request and runs it for the caller's session.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::debug;

use crate::analytics::{AnalyticsEngine, KeywordMetrics};
use crate::insights::{
    build_insight_request, InsightError, InsightReport, InsightService, DEFAULT_SESSION,
    MAX_INSIGHT_KEYWORDS,
};
use crate::storage::KeywordDataset;
use crate::tools::{resolve_period, ToolError};

/// A selected keyword: a plain name, or metrics computed by the client
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum KeywordInput {
    Name(String),
    Metrics(KeywordMetrics),
}

/// Parameters for an AI insight request
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AiInsightParams {
    pub keywords: Vec<KeywordInput>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    /// Client session; requests without one share the default session
    pub session_id: Option<String>,
}

/// Generate a comparative insight for up to three keywords
///
/// Names missing from the dataset are dropped; if nothing is left the
/// request fails validation before any external call.
pub async fn generate_ai_insight<D: KeywordDataset + ?Sized>(
    dataset: &D,
    analytics: &AnalyticsEngine,
    service: &InsightService,
    params: AiInsightParams,
) -> Result<InsightReport, ToolError> {
    if params.keywords.is_empty() {
        return Err(InsightError::Validation("Select at least one keyword".to_string()).into());
    }
    if params.keywords.len() > MAX_INSIGHT_KEYWORDS {
        return Err(InsightError::Validation(format!(
            "At most {} keywords can be compared, got {}",
            MAX_INSIGHT_KEYWORDS,
            params.keywords.len()
        ))
        .into());
    }

    let period = resolve_period(params.year, params.month)?;

    let payloads: Vec<KeywordMetrics> = params
        .keywords
        .into_iter()
        .filter_map(|input| match input {
            KeywordInput::Metrics(metrics) => Some(metrics),
            KeywordInput::Name(name) => {
                let name = name.trim();
                let series = dataset.series(name);
                if series.is_none() {
                    debug!("Skipping keyword '{}' with no data", name);
                }
                series.map(|series| analytics.keyword_metrics(name, series, period))
            }
        })
        .collect();

    if payloads.is_empty() {
        return Err(InsightError::Validation(format!(
            "None of the selected keywords has data for {}",
            period.label()
        ))
        .into());
    }

    let request = build_insight_request(&payloads, period)?;
    let session_id = params
        .session_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .unwrap_or(DEFAULT_SESSION);

    Ok(service.generate_for_session(session_id, &request).await?)
}
