//! Ranking, single-keyword growth and classification operations

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analytics::{AnalyticsEngine, DEFAULT_SELECTION, TOP_KEYWORDS};
use crate::domain::{classify, growth_for, previous_months, KeywordCategory, MonthVolume, YearMonth, TRAILING_WINDOW};
use crate::storage::KeywordDataset;
use crate::tools::{resolve_period, ToolError};

/// Parameters for the monthly ranking
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct RankingParams {
    pub year: Option<i32>,
    pub month: Option<u32>,
    /// Number of keywords to return (default 20)
    pub limit: Option<usize>,
}

/// One row of the ranking
#[derive(Debug, Clone, Serialize)]
pub struct RankedKeyword {
    pub rank: usize,
    pub keyword: String,
    pub growth: f64,
    pub volume: u64,
    pub category: KeywordCategory,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingResponse {
    pub period: YearMonth,
    /// Keywords in the dataset
    pub total: usize,
    pub ranking: Vec<RankedKeyword>,
    /// Keywords pre-selected for this month
    pub default_selection: Vec<String>,
}

/// Rank the dataset for a month and return the top of the list
pub fn keyword_ranking<D: KeywordDataset + ?Sized>(
    dataset: &D,
    analytics: &AnalyticsEngine,
    params: RankingParams,
) -> Result<RankingResponse, ToolError> {
    let period = resolve_period(params.year, params.month)?;
    let limit = params.limit.unwrap_or(TOP_KEYWORDS);
    if limit == 0 {
        return Err(ToolError::InvalidParams("limit must be at least 1".to_string()));
    }

    let full = analytics.rank_keywords(dataset, period);
    debug!("Ranked {} keywords for {}", full.len(), period);

    // nothing is pre-selected unless a full pair is available
    let default_selection = if full.len() >= DEFAULT_SELECTION {
        full.iter()
            .take(DEFAULT_SELECTION)
            .map(|item| item.keyword.clone())
            .collect()
    } else {
        Vec::new()
    };

    let ranking: Vec<RankedKeyword> = full
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, item)| RankedKeyword {
            rank: i + 1,
            category: classify(&item.keyword),
            keyword: item.keyword,
            growth: item.growth,
            volume: item.volume,
        })
        .collect();

    Ok(RankingResponse {
        period,
        total: dataset.len(),
        ranking,
        default_selection,
    })
}

/// Parameters for one keyword's growth
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GrowthParams {
    pub keyword: String,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthResponse {
    pub keyword: String,
    pub period: YearMonth,
    pub growth: f64,
    pub volume: u64,
    pub category: KeywordCategory,
    pub previous_months: Vec<MonthVolume>,
}

/// Growth record, category and trailing window for a single keyword
pub fn keyword_growth<D: KeywordDataset + ?Sized>(
    dataset: &D,
    params: GrowthParams,
) -> Result<GrowthResponse, ToolError> {
    let period = resolve_period(params.year, params.month)?;
    let keyword = params.keyword.trim();
    let series = dataset.require(keyword)?;
    let record = growth_for(series, period);

    Ok(GrowthResponse {
        keyword: keyword.to_string(),
        period,
        growth: record.growth,
        volume: record.volume,
        category: classify(keyword),
        previous_months: previous_months(series, period, TRAILING_WINDOW),
    })
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ClassifyParams {
    pub keyword: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyResponse {
    pub keyword: String,
    pub category: KeywordCategory,
    pub category_label: String,
}

/// Classify any keyword, whether or not it is in the dataset
pub fn classify_keyword(params: ClassifyParams) -> Result<ClassifyResponse, ToolError> {
    if params.keyword.trim().is_empty() {
        return Err(ToolError::InvalidParams("keyword cannot be empty".to_string()));
    }

    let category = classify(&params.keyword);
    Ok(ClassifyResponse {
        keyword: params.keyword,
        category,
        category_label: category.display_name().to_string(),
    })
}
