//! Monthly aggregation of incident records into regular count series

use crate::error::{ForecastError, Result};
use crate::store::{IncidentRecord, LabelFilter};
use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A calendar month, the atomic time bucket for aggregation and forecasting.
///
/// Ordered by calendar identity (year, then month) and rendered as an ISO
/// `YYYY-MM` string on both the `Display` and serde boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Create a new period from a year and a 1-based month
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(ForecastError::InvalidParameter(format!(
                "Month must be between 1 and 12, got {}",
                month
            )));
        }

        Ok(Self { year, month })
    }

    /// Period containing the given timestamp
    pub fn from_datetime(timestamp: &NaiveDateTime) -> Self {
        Self {
            year: timestamp.year(),
            month: timestamp.month(),
        }
    }

    /// Year component
    pub fn year(&self) -> i32 {
        self.year
    }

    /// 1-based month component
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The following calendar month
    pub fn next(self) -> Self {
        self.plus_months(1)
    }

    /// Period shifted by `delta` calendar months (negative shifts backwards)
    pub fn plus_months(self, delta: i64) -> Self {
        let months = self.year as i64 * 12 + (self.month as i64 - 1) + delta;

        Self {
            year: months.div_euclid(12) as i32,
            month: (months.rem_euclid(12) + 1) as u32,
        }
    }

    /// Signed number of calendar months from `self` to `other`
    pub fn months_until(&self, other: &Period) -> i64 {
        (other.year as i64 * 12 + other.month as i64)
            - (self.year as i64 * 12 + self.month as i64)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        let parse = || -> Option<Period> {
            let (year, month) = s.split_once('-')?;
            let year: i32 = year.parse().ok()?;
            let month: u32 = month.parse().ok()?;
            Period::new(year, month).ok()
        };

        parse().ok_or_else(|| {
            ForecastError::Data(format!("Invalid period '{}', expected YYYY-MM", s))
        })
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Incident count for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// Calendar month
    pub period: Period,
    /// Number of incidents observed in that month
    pub count: u64,
}

/// Build a monthly count series from a filtered record collection.
///
/// Records are matched exactly on theme and neighborhood (a wildcard filter
/// skips that dimension), bucketed by the calendar month of their timestamp
/// and counted. One point is emitted per occupied month, ascending by
/// period; months with no matching records are not synthesized — apply
/// [`fill_monthly_gaps`] when a contiguous series is required.
///
/// The sum of all counts equals the number of records surviving both
/// filters. An empty result is not an error here; callers must check for
/// emptiness before evaluation.
pub fn build_series(
    records: &[IncidentRecord],
    theme_filter: &LabelFilter,
    neighborhood_filter: &LabelFilter,
) -> Vec<TimeSeriesPoint> {
    let mut buckets: BTreeMap<Period, u64> = BTreeMap::new();

    for record in records {
        if !theme_filter.matches(&record.theme) {
            continue;
        }
        if !neighborhood_filter.matches(&record.neighborhood) {
            continue;
        }

        *buckets
            .entry(Period::from_datetime(&record.timestamp))
            .or_insert(0) += 1;
    }

    buckets
        .into_iter()
        .map(|(period, count)| TimeSeriesPoint { period, count })
        .collect()
}

/// Insert zero-count points for every month missing between the first and
/// last observed period, yielding a contiguous monthly series.
///
/// Counts of occupied months are preserved unchanged. An empty input stays
/// empty.
pub fn fill_monthly_gaps(series: &[TimeSeriesPoint]) -> Vec<TimeSeriesPoint> {
    let occupied: BTreeMap<Period, u64> = series
        .iter()
        .map(|point| (point.period, point.count))
        .collect();

    let (first, last) = match (occupied.keys().next(), occupied.keys().next_back()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return Vec::new(),
    };

    let mut filled = Vec::with_capacity(first.months_until(&last) as usize + 1);
    let mut current = first;

    while current <= last {
        filled.push(TimeSeriesPoint {
            period: current,
            count: occupied.get(&current).copied().unwrap_or(0),
        });
        current = current.next();
    }

    filled
}
