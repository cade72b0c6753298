//! Analytics engine for ranking keywords and building trend views
//!
//! This module turns the read-only dataset into the per-month views the
//! client needs: the growth ranking, per-keyword metrics for insight
//! requests, chart series and the demographic panel.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::domain::{
    growth_for, previous_months, KeywordSeries, MonthVolume, TimeRange, YearMonth,
    TRAILING_WINDOW,
};
use crate::storage::KeywordDataset;

/// Number of keywords the client lists for a month
pub const TOP_KEYWORDS: usize = 20;

/// Number of keywords selected by default when the month changes
pub const DEFAULT_SELECTION: usize = 2;

/// Growth of one keyword in the ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordGrowth {
    pub keyword: String,
    pub growth: f64,
    pub volume: u64,
}

/// Metrics sent with an insight request for one keyword
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeywordMetrics {
    pub keyword: String,
    pub growth: f64,
    pub volume: u64,
    /// Trailing window ending at the target month, oldest first
    pub previous_months: Vec<MonthVolume>,
}

/// Volume of one selected keyword at one chart point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordVolume {
    pub keyword: String,
    pub volume: u64,
}

/// One month on the trend chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    /// Display label, `YYYY.MM`
    pub month: String,
    /// Period key, `YYYY-MM`
    pub period: String,
    /// One entry per selected keyword, in selection order
    pub values: Vec<KeywordVolume>,
}

/// Demographics of one selected keyword
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordDemographics {
    pub keyword: String,
    pub male_percent: f64,
    pub female_percent: f64,
    pub age_groups: BTreeMap<String, f64>,
}

/// Averaged gender shares plus per-keyword details
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemographicsSummary {
    pub male_percent: f64,
    pub female_percent: f64,
    pub keywords: Vec<KeywordDemographics>,
}

/// Analytics engine over a keyword dataset
///
/// Stateless: every view is recomputed from the dataset on each call.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    /// Create a new analytics engine
    pub fn new() -> Self {
        Self {}
    }

    /// Rank every keyword by growth for `period`, highest first
    ///
    /// The sort is stable, so keywords with equal growth keep dataset order.
    /// The full ranking is returned; callers take the prefix they need.
    pub fn rank_keywords<D: KeywordDataset + ?Sized>(
        &self,
        dataset: &D,
        period: YearMonth,
    ) -> Vec<KeywordGrowth> {
        let mut ranking: Vec<KeywordGrowth> = dataset
            .entries()
            .into_iter()
            .map(|(keyword, series)| {
                let record = growth_for(series, period);
                KeywordGrowth {
                    keyword: keyword.to_string(),
                    growth: record.growth,
                    volume: record.volume,
                }
            })
            .collect();

        ranking.sort_by(|a, b| b.growth.partial_cmp(&a.growth).unwrap_or(Ordering::Equal));
        ranking
    }

    /// Growth, volume and trailing window for one keyword
    pub fn keyword_metrics(
        &self,
        keyword: &str,
        series: &KeywordSeries,
        period: YearMonth,
    ) -> KeywordMetrics {
        let record = growth_for(series, period);
        KeywordMetrics {
            keyword: keyword.to_string(),
            growth: record.growth,
            volume: record.volume,
            previous_months: previous_months(series, period, TRAILING_WINDOW),
        }
    }

    /// Metrics for each selected keyword present in the dataset, in selection order
    pub fn selection_metrics<D: KeywordDataset + ?Sized>(
        &self,
        dataset: &D,
        keywords: &[String],
        period: YearMonth,
    ) -> Vec<KeywordMetrics> {
        keywords
            .iter()
            .filter_map(|keyword| {
                dataset
                    .series(keyword)
                    .map(|series| self.keyword_metrics(keyword, series, period))
            })
            .collect()
    }

    /// Chart points for the `range` months ending at `period`, oldest first
    ///
    /// Keywords missing from the dataset read as zero volume.
    pub fn trend_series<D: KeywordDataset + ?Sized>(
        &self,
        dataset: &D,
        keywords: &[String],
        period: YearMonth,
        range: TimeRange,
    ) -> Vec<TrendPoint> {
        period
            .trailing(range.months())
            .into_iter()
            .map(|month| TrendPoint {
                month: month.label(),
                period: month.key(),
                values: keywords
                    .iter()
                    .map(|keyword| KeywordVolume {
                        keyword: keyword.clone(),
                        volume: dataset
                            .series(keyword)
                            .map(|series| series.volume_at(month))
                            .unwrap_or(0),
                    })
                    .collect(),
            })
            .collect()
    }

    /// Average gender shares over the selected keywords found in the dataset
    ///
    /// Male and female shares are averaged independently and rounded to one
    /// decimal place; with nothing to average both are 0.0.
    pub fn demographics<D: KeywordDataset + ?Sized>(
        &self,
        dataset: &D,
        keywords: &[String],
    ) -> DemographicsSummary {
        let details: Vec<KeywordDemographics> = keywords
            .iter()
            .filter_map(|keyword| {
                dataset.series(keyword).map(|series| KeywordDemographics {
                    keyword: keyword.clone(),
                    male_percent: series.male_percent,
                    female_percent: series.female_percent,
                    age_groups: series.age_groups.clone(),
                })
            })
            .collect();

        let average = |pick: fn(&KeywordDemographics) -> f64| {
            if details.is_empty() {
                0.0
            } else {
                round_one_decimal(details.iter().map(pick).sum::<f64>() / details.len() as f64)
            }
        };

        DemographicsSummary {
            male_percent: average(|d| d.male_percent),
            female_percent: average(|d| d.female_percent),
            keywords: details,
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
