//! Core types used throughout the domain layer
//!
//! This module defines the calendar-month type that keys every series, the
//! keyword category tag and the chart time ranges.

use std::fmt;

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::DomainError;

/// A validated calendar month
///
/// Ordering is chronological, so a `BTreeMap<YearMonth, _>` iterates oldest
/// first. The period key form is `YYYY-MM` and the display label is `YYYY.MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Create a month, rejecting months outside 1-12 and years that do not
    /// fit a four digit period key
    pub fn new(year: i32, month: u32) -> Result<Self, DomainError> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::InvalidMonth(month));
        }
        if !(1..=9999).contains(&year) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(DomainError::InvalidYear(year));
        }
        Ok(Self { year, month })
    }

    /// The month containing today's date (UTC)
    pub fn current() -> Self {
        Self::from_date(Utc::now().date_naive())
    }

    /// The month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parse a `YYYY-MM` period key
    pub fn parse_key(key: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidPeriodKey(key.to_string());

        let (year, month) = key.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4
            || month.len() != 2
            || !year.bytes().all(|b| b.is_ascii_digit())
            || !month.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Period key used by the dataset (`2025-07`)
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// Display label used in trend windows and charts (`2025.07`)
    pub fn label(&self) -> String {
        format!("{:04}.{:02}", self.year, self.month)
    }

    /// Step back `months` whole calendar months, rolling over year boundaries
    pub fn months_back(&self, months: u32) -> Self {
        let index = self.year as i64 * 12 + (self.month as i64 - 1) - months as i64;
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    /// The `count` months ending at (and including) this one, oldest first
    pub fn trailing(&self, count: u32) -> Vec<YearMonth> {
        (0..count).rev().map(|offset| self.months_back(offset)).collect()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.key())
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        YearMonth::parse_key(&key).map_err(serde::de::Error::custom)
    }
}

/// Coarse keyword classification used to pick the prompt guidance
///
/// Derived from string matching only; see `domain::category`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordCategory {
    /// Insurance products and coverage terms
    Insurance,
    /// Side jobs, gig work, and spending/tax pressure that pushes people toward them
    Sidejob,
    /// Anything else
    Unknown,
}

impl KeywordCategory {
    /// Wire name (`insurance`, `sidejob`, `unknown`)
    pub fn as_str(&self) -> &'static str {
        match self {
            KeywordCategory::Insurance => "insurance",
            KeywordCategory::Sidejob => "sidejob",
            KeywordCategory::Unknown => "unknown",
        }
    }

    /// Label shown next to an insight card
    pub fn display_name(&self) -> &'static str {
        match self {
            KeywordCategory::Insurance => "보험",
            KeywordCategory::Sidejob => "부업·N잡",
            KeywordCategory::Unknown => "기타",
        }
    }
}

/// Window lengths offered by the trend chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TimeRange {
    SixMonths,
    TwelveMonths,
    TwentyFourMonths,
}

impl TimeRange {
    pub fn months(&self) -> u32 {
        match self {
            TimeRange::SixMonths => 6,
            TimeRange::TwelveMonths => 12,
            TimeRange::TwentyFourMonths => 24,
        }
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        TimeRange::TwelveMonths
    }
}

impl TryFrom<u32> for TimeRange {
    type Error = DomainError;

    fn try_from(months: u32) -> Result<Self, Self::Error> {
        match months {
            6 => Ok(TimeRange::SixMonths),
            12 => Ok(TimeRange::TwelveMonths),
            24 => Ok(TimeRange::TwentyFourMonths),
            other => Err(DomainError::InvalidValue {
                message: format!("time range must be 6, 12 or 24 months, got {}", other),
            }),
        }
    }
}

impl From<TimeRange> for u32 {
    fn from(range: TimeRange) -> Self {
        range.months()
    }
}
