//! Insight-request assembly
//!
//! Turns the caller's keyword selection into the parameter bag handed to the
//! language model, and the model's answer back into an ordered report.
//! Everything up to the provider call is pure.

pub mod parse;
pub mod prompt;
pub mod service;

pub use service::*;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::analytics::KeywordMetrics;
use crate::domain::{classify, KeywordCategory, MonthVolume, YearMonth, TRAILING_WINDOW};
use crate::providers::ProviderError;

/// Most keywords compared in one insight request
pub const MAX_INSIGHT_KEYWORDS: usize = 3;

/// Errors from building or running an insight request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InsightError {
    #[error("{0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("AI insight generation failed: {0}")]
    LanguageModel(String),

    #[error("An insight request is already in progress for this session")]
    Busy,
}

impl From<ProviderError> for InsightError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::MissingCredential(_) => InsightError::Configuration(err.to_string()),
            other => InsightError::LanguageModel(other.to_string()),
        }
    }
}

/// Parameters describing one keyword to the language model
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightParams {
    pub keyword: String,
    pub growth: f64,
    pub volume: u64,
    pub year: i32,
    pub month: u32,
    /// One-decimal percentage text, or "0" without a usable previous month
    pub month_over_month: String,
    /// e.g. "2025.06: 900건, 2025.07: 5,000건"
    pub trend_text: String,
    pub category: KeywordCategory,
}

/// One keyword of an assembled request, with the metrics it came from
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordRequest {
    pub params: InsightParams,
    pub metrics: KeywordMetrics,
}

/// A validated insight request, keywords in selection order
#[derive(Debug, Clone, PartialEq)]
pub struct InsightRequest {
    pub period: YearMonth,
    pub keywords: Vec<KeywordRequest>,
}

impl InsightRequest {
    pub fn params(&self) -> impl Iterator<Item = &InsightParams> {
        self.keywords.iter().map(|k| &k.params)
    }
}

/// Model-written analysis for one keyword
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordInsight {
    pub keyword: String,
    pub category: KeywordCategory,
    pub category_label: String,
    pub reason: String,
    pub strategy: String,
    pub metrics: KeywordMetrics,
}

/// The final insight, keywords in the caller's selection order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightReport {
    pub comparison: String,
    pub keyword_insights: Vec<KeywordInsight>,
}

/// Month-over-month change of `current` against the second-to-last window entry
pub fn month_over_month(current: u64, previous_months: &[MonthVolume]) -> String {
    let previous = previous_months
        .len()
        .checked_sub(2)
        .and_then(|i| previous_months.get(i))
        .map(|m| m.volume)
        .unwrap_or(0);

    if previous == 0 {
        return "0".to_string();
    }

    let change = (current as f64 - previous as f64) / previous as f64 * 100.0;
    format!("{:.1}", change)
}

/// Group digits in threes, e.g. 1234567 -> "1,234,567"
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Human-readable join of a trailing window
pub fn trend_text(previous_months: &[MonthVolume]) -> String {
    previous_months
        .iter()
        .map(|m| format!("{}: {}건", m.month, format_thousands(m.volume)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validate the selection and assemble one parameter bag per keyword
///
/// Categories are computed here, before any external call. Fails on an
/// empty selection, more than [`MAX_INSIGHT_KEYWORDS`], a repeated or blank
/// keyword, or a window that is not exactly [`TRAILING_WINDOW`] months.
pub fn build_insight_request(
    payloads: &[KeywordMetrics],
    period: YearMonth,
) -> Result<InsightRequest, InsightError> {
    if payloads.is_empty() {
        return Err(InsightError::Validation(
            "Select at least one keyword with data for the month".to_string(),
        ));
    }
    if payloads.len() > MAX_INSIGHT_KEYWORDS {
        return Err(InsightError::Validation(format!(
            "At most {} keywords can be compared, got {}",
            MAX_INSIGHT_KEYWORDS,
            payloads.len()
        )));
    }

    let mut seen = HashSet::new();
    let mut keywords = Vec::with_capacity(payloads.len());

    for payload in payloads {
        let keyword = payload.keyword.trim();
        if keyword.is_empty() {
            return Err(InsightError::Validation("Keyword cannot be empty".to_string()));
        }
        if !seen.insert(keyword) {
            return Err(InsightError::Validation(format!(
                "Keyword '{}' is selected more than once",
                keyword
            )));
        }
        if payload.previous_months.len() != TRAILING_WINDOW as usize {
            return Err(InsightError::Validation(format!(
                "Keyword '{}' needs {} months of history, got {}",
                keyword,
                TRAILING_WINDOW,
                payload.previous_months.len()
            )));
        }
        let expected = period.trailing(TRAILING_WINDOW);
        if let Some((got, want)) = payload
            .previous_months
            .iter()
            .zip(&expected)
            .find(|(entry, month)| entry.month != month.label())
        {
            return Err(InsightError::Validation(format!(
                "Keyword '{}' history must end at {}, found {} where {} was expected",
                keyword,
                period.label(),
                got.month,
                want.label()
            )));
        }

        let params = InsightParams {
            keyword: keyword.to_string(),
            growth: payload.growth,
            volume: payload.volume,
            year: period.year(),
            month: period.month(),
            month_over_month: month_over_month(payload.volume, &payload.previous_months),
            trend_text: trend_text(&payload.previous_months),
            category: classify(keyword),
        };

        keywords.push(KeywordRequest {
            params,
            metrics: payload.clone(),
        });
    }

    Ok(InsightRequest { period, keywords })
}
