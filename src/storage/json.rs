//! JSON file backed keyword dataset
//!
//! The file is a single JSON object mapping each keyword to its series:
//!
//! ```json
//! {
//!   "부가세": {
//!     "monthlyData": { "2025-06": 900, "2025-07": 5000 },
//!     "malePercent": 48.2,
//!     "femalePercent": 51.8,
//!     "ageGroups": { "30대": 41.0 }
//!   }
//! }
//! ```
//!
//! Object order is kept as the dataset's insertion order.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use tracing::{debug, info};

use crate::domain::KeywordSeries;
use crate::storage::{DatasetError, KeywordDataset};

/// In-memory dataset, loaded once and never mutated
#[derive(Debug, Clone, Default)]
pub struct JsonDataset {
    entries: Vec<(String, KeywordSeries)>,
    index: HashMap<String, usize>,
}

impl JsonDataset {
    /// Load and validate the dataset file at `path`
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let start = std::time::Instant::now();
        debug!("Loading dataset from {}", path.display());

        let raw = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_json_str(&raw)?;

        info!(
            "Dataset loaded - path={}, keywords={}, duration={:.2}s",
            path.display(),
            dataset.entries.len(),
            start.elapsed().as_secs_f32()
        );
        Ok(dataset)
    }

    /// Parse a dataset from JSON text
    pub fn from_json_str(raw: &str) -> Result<Self, DatasetError> {
        let OrderedEntries(entries) = serde_json::from_str(raw)?;
        Self::from_entries(entries)
    }

    /// Build a dataset from keyword/series pairs, keeping their order
    pub fn from_entries<I>(entries: I) -> Result<Self, DatasetError>
    where
        I: IntoIterator<Item = (String, KeywordSeries)>,
    {
        let mut dataset = Self::default();

        for (keyword, series) in entries {
            if dataset.index.contains_key(&keyword) {
                return Err(DatasetError::DuplicateKeyword(keyword));
            }
            series.validate().map_err(|source| DatasetError::InvalidSeries {
                keyword: keyword.clone(),
                source,
            })?;

            dataset.index.insert(keyword.clone(), dataset.entries.len());
            dataset.entries.push((keyword, series));
        }

        Ok(dataset)
    }
}

impl KeywordDataset for JsonDataset {
    fn entries(&self) -> Vec<(&str, &KeywordSeries)> {
        self.entries
            .iter()
            .map(|(keyword, series)| (keyword.as_str(), series))
            .collect()
    }

    fn series(&self, keyword: &str) -> Option<&KeywordSeries> {
        self.index.get(keyword).map(|i| &self.entries[*i].1)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// A JSON object read as an ordered list of entries
///
/// Duplicate keys are kept so `from_entries` can report them.
struct OrderedEntries(Vec<(String, KeywordSeries)>);

impl<'de> Deserialize<'de> for OrderedEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = OrderedEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping keywords to series")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((keyword, series)) = map.next_entry::<String, KeywordSeries>()? {
                    entries.push((keyword, series));
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}
