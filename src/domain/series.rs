//! KeywordSeries entity
//!
//! One series per keyword: its monthly search volumes plus the static
//! demographic shares reported for it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, YearMonth};

/// Historical monthly search volume and demographics for one keyword
///
/// `monthly_data` is sparse: a month that is not present had zero volume.
/// Instances are built once when the dataset loads and are read-only after.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordSeries {
    /// Search volume per calendar month
    #[serde(default)]
    pub monthly_data: BTreeMap<YearMonth, u64>,
    /// Share of male searchers, in percent
    #[serde(default)]
    pub male_percent: f64,
    /// Share of female searchers, in percent (not required to sum to 100 with male)
    #[serde(default)]
    pub female_percent: f64,
    /// Age bracket label (e.g. "30대") to percentage share
    #[serde(default)]
    pub age_groups: BTreeMap<String, f64>,
}

impl KeywordSeries {
    /// Build a series from monthly volumes with empty demographics
    pub fn from_monthly(monthly_data: BTreeMap<YearMonth, u64>) -> Self {
        Self {
            monthly_data,
            ..Self::default()
        }
    }

    /// Volume recorded for `period`, zero when absent
    pub fn volume_at(&self, period: YearMonth) -> u64 {
        self.monthly_data.get(&period).copied().unwrap_or(0)
    }

    /// Check the demographic shares are finite, non-negative percentages
    ///
    /// Volumes are unsigned and period keys are validated on parse, so only
    /// the float fields can be out of range.
    pub fn validate(&self) -> Result<(), DomainError> {
        Self::validate_percent("malePercent", self.male_percent)?;
        Self::validate_percent("femalePercent", self.female_percent)?;
        for (bracket, share) in &self.age_groups {
            Self::validate_percent(&format!("ageGroups[{}]", bracket), *share)?;
        }
        Ok(())
    }

    fn validate_percent(field: &str, value: f64) -> Result<(), DomainError> {
        if !value.is_finite() || value < 0.0 {
            return Err(DomainError::InvalidValue {
                message: format!("{} must be a non-negative percentage, got {}", field, value),
            });
        }
        Ok(())
    }
}
