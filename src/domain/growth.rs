//! Growth calculation for a keyword in a given month
//!
//! Growth is the percentage deviation of the month's volume from the
//! keyword's own historical average. Only strictly positive months count
//! toward that average; a keyword with no positive month has zero growth.
//! Nothing here is cached: every call recomputes from the full series.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{KeywordSeries, YearMonth};

/// Number of months in the trailing window sent with insight requests
pub const TRAILING_WINDOW: u32 = 6;

/// Growth and raw volume of one keyword for one month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthRecord {
    /// Percentage deviation from the positive-month average
    pub growth: f64,
    /// Raw search volume for the month (0 if not recorded)
    pub volume: u64,
}

/// One month of a trailing window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MonthVolume {
    /// Display label, `YYYY.MM`
    pub month: String,
    pub volume: u64,
}

/// Mean of the strictly positive monthly volumes, or 0 if there are none
pub fn average_volume(series: &KeywordSeries) -> f64 {
    let (sum, count) = series
        .monthly_data
        .values()
        .filter(|v| **v > 0)
        .fold((0u128, 0u64), |(sum, count), v| (sum + *v as u128, count + 1));

    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

/// Growth and volume of `series` for `period`
pub fn growth_for(series: &KeywordSeries, period: YearMonth) -> GrowthRecord {
    let volume = series.volume_at(period);
    let avg = average_volume(series);

    let growth = if avg > 0.0 {
        (volume as f64 - avg) / avg * 100.0
    } else {
        0.0
    };

    GrowthRecord { growth, volume }
}

/// The `window` months ending at `period`, oldest first
///
/// Volumes are read as recorded; zero months are kept here, unlike in the
/// average.
pub fn previous_months(series: &KeywordSeries, period: YearMonth, window: u32) -> Vec<MonthVolume> {
    period
        .trailing(window)
        .into_iter()
        .map(|month| MonthVolume {
            month: month.label(),
            volume: series.volume_at(month),
        })
        .collect()
}
