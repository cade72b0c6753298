//! Trend chart and demographics operation

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::{AnalyticsEngine, DemographicsSummary, TrendPoint};
use crate::domain::{TimeRange, YearMonth};
use crate::storage::KeywordDataset;
use crate::tools::{resolve_period, split_keywords, ToolError};

/// Parameters for the trend view
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct TrendParams {
    /// Comma-separated keywords, e.g. "보험,알바"
    #[serde(default)]
    pub keywords: String,
    pub year: Option<i32>,
    pub month: Option<u32>,
    /// 6, 12 or 24 months (default 12)
    pub range: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendResponse {
    pub period: YearMonth,
    pub range: TimeRange,
    pub keywords: Vec<String>,
    pub points: Vec<TrendPoint>,
    pub demographics: DemographicsSummary,
}

/// Chart series and demographic panel for the selected keywords
pub fn keyword_trends<D: KeywordDataset + ?Sized>(
    dataset: &D,
    analytics: &AnalyticsEngine,
    params: TrendParams,
) -> Result<TrendResponse, ToolError> {
    let period = resolve_period(params.year, params.month)?;
    let range = match params.range {
        Some(months) => TimeRange::try_from(months)?,
        None => TimeRange::default(),
    };
    let keywords = split_keywords(&params.keywords);

    Ok(TrendResponse {
        period,
        range,
        points: analytics.trend_series(dataset, &keywords, period, range),
        demographics: analytics.demographics(dataset, &keywords),
        keywords,
    })
}
