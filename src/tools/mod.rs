//! Operations exposed by the server
//!
//! Each operation takes the dataset plus a parameters struct and returns a
//! serializable response. The HTTP layer only decodes parameters and maps
//! errors to status codes.

pub mod insight;
pub mod rank;
pub mod trend;

pub use insight::*;
pub use rank::*;
pub use trend::*;

use thiserror::Error;

use crate::domain::{DomainError, YearMonth};
use crate::insights::InsightError;
use crate::storage::DatasetError;

/// Errors returned by operations
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Insight(#[from] InsightError),
}

/// The requested month, defaulting missing parts to the current month
pub fn resolve_period(year: Option<i32>, month: Option<u32>) -> Result<YearMonth, DomainError> {
    let now = YearMonth::current();
    YearMonth::new(year.unwrap_or(now.year()), month.unwrap_or(now.month()))
}

/// Split a comma-separated keyword list, dropping blanks and repeats
pub fn split_keywords(raw: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for keyword in raw.split(',').map(str::trim).filter(|k| !k.is_empty()) {
        if !keywords.iter().any(|k| k == keyword) {
            keywords.push(keyword.to_string());
        }
    }
    keywords
}
