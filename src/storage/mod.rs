//! Dataset layer for keyword search volumes
//!
//! The dataset is read once at startup and is read-only afterwards. The
//! `KeywordDataset` trait is what the analytics and insight code depend on;
//! `JsonDataset` is the file-backed implementation.

pub mod json;

// Re-export the main dataset types
pub use json::*;

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::{DomainError, KeywordSeries};

/// Errors that can occur while loading the dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Dataset is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate keyword in dataset: {0}")]
    DuplicateKeyword(String),

    #[error("Invalid series for keyword '{keyword}': {source}")]
    InvalidSeries {
        keyword: String,
        #[source]
        source: DomainError,
    },

    #[error("Keyword not found: {0}")]
    KeywordNotFound(String),
}

/// Read access to the keyword dataset
///
/// Implementations keep keywords in insertion order; ranking ties are broken
/// by that order.
pub trait KeywordDataset: Send + Sync {
    /// Every keyword with its series, in insertion order
    fn entries(&self) -> Vec<(&str, &KeywordSeries)>;

    /// The series for one keyword
    fn series(&self, keyword: &str) -> Option<&KeywordSeries>;

    /// All keywords, in insertion order
    fn keywords(&self) -> Vec<&str> {
        self.entries().into_iter().map(|(keyword, _)| keyword).collect()
    }

    /// The series for one keyword, or `KeywordNotFound`
    fn require(&self, keyword: &str) -> Result<&KeywordSeries, DatasetError> {
        self.series(keyword)
            .ok_or_else(|| DatasetError::KeywordNotFound(keyword.to_string()))
    }

    fn len(&self) -> usize {
        self.entries().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
