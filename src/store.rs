//! Incident record store: the input boundary of the pipeline
//!
//! The pipeline only requires that each record expose a timestamp, a theme
//! label and a neighborhood label, and that a store answer `fetch` for a
//! pair of label filters. [`MemoryRecordStore`] is the reference
//! implementation; its CSV loader performs the upstream cleanup the rest of
//! the pipeline trusts (unparseable timestamps dropped, neighborhood labels
//! trimmed and uppercased, known-invalid neighborhoods excluded).

use crate::error::{ForecastError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// A single incident event. Immutable; owned by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentRecord {
    /// When the incident was registered
    pub timestamp: NaiveDateTime,
    /// Thematic category label
    pub theme: String,
    /// Neighborhood label
    pub neighborhood: String,
}

/// Exact-match label filter with a wildcard sentinel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelFilter {
    /// No filtering on this dimension
    Any,
    /// Keep only records whose label equals this value exactly
    Exact(String),
}

impl LabelFilter {
    /// Convenience constructor for an exact filter
    pub fn exact(label: impl Into<String>) -> Self {
        Self::Exact(label.into())
    }

    /// Whether the given label passes this filter
    pub fn matches(&self, label: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(expected) => expected == label,
        }
    }
}

/// Read-only source of incident records
pub trait RecordStore {
    /// Fetch all records matching the given theme and neighborhood filters
    fn fetch(&self, theme: &LabelFilter, neighborhood: &LabelFilter) -> Vec<IncidentRecord>;
}

/// Column layout and cleanup rules for loading incident records from CSV
#[derive(Debug, Clone)]
pub struct CsvSchema {
    /// Header name of the timestamp column
    pub timestamp_column: String,
    /// Header name of the theme column
    pub theme_column: String,
    /// Header name of the neighborhood column
    pub neighborhood_column: String,
    /// Field delimiter
    pub delimiter: u8,
    /// Neighborhood labels to drop entirely (compared case-insensitively
    /// after trimming)
    pub excluded_neighborhoods: Vec<String>,
}

impl Default for CsvSchema {
    fn default() -> Self {
        Self {
            timestamp_column: "timestamp".to_string(),
            theme_column: "theme".to_string(),
            neighborhood_column: "neighborhood".to_string(),
            delimiter: b',',
            excluded_neighborhoods: Vec::new(),
        }
    }
}

/// In-memory record store
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    records: Vec<IncidentRecord>,
}

impl MemoryRecordStore {
    /// Create a store over an already-cleaned record collection
    pub fn new(records: Vec<IncidentRecord>) -> Self {
        Self { records }
    }

    /// Load incident records from a CSV file.
    ///
    /// Rows whose timestamp cannot be parsed are dropped. Neighborhood
    /// labels are trimmed and uppercased; rows with an empty or excluded
    /// neighborhood are dropped. Theme labels are trimmed.
    pub fn from_csv_path<P: AsRef<Path>>(path: P, schema: &CsvSchema) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(schema.delimiter)
            .from_path(path)?;

        let headers = reader.headers()?.clone();
        let column_index = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|header| header.trim() == name)
                .ok_or_else(|| {
                    ForecastError::Data(format!("Column '{}' not found in CSV header", name))
                })
        };

        let timestamp_idx = column_index(&schema.timestamp_column)?;
        let theme_idx = column_index(&schema.theme_column)?;
        let neighborhood_idx = column_index(&schema.neighborhood_column)?;

        let mut records = Vec::new();
        let mut dropped = 0usize;

        for row in reader.records() {
            let row = row?;

            let timestamp = match row.get(timestamp_idx).and_then(parse_timestamp) {
                Some(timestamp) => timestamp,
                None => {
                    dropped += 1;
                    continue;
                }
            };

            let neighborhood = row
                .get(neighborhood_idx)
                .unwrap_or("")
                .trim()
                .to_uppercase();
            let excluded = neighborhood.is_empty()
                || schema
                    .excluded_neighborhoods
                    .iter()
                    .any(|label| label.trim().eq_ignore_ascii_case(&neighborhood));
            if excluded {
                dropped += 1;
                continue;
            }

            let theme = row.get(theme_idx).unwrap_or("").trim().to_string();

            records.push(IncidentRecord {
                timestamp,
                theme,
                neighborhood,
            });
        }

        if dropped > 0 {
            log::debug!("Dropped {} invalid rows while loading CSV", dropped);
        }

        Ok(Self::new(records))
    }

    /// All records in the store
    pub fn records(&self) -> &[IncidentRecord] {
        &self.records
    }

    /// Number of records in the store
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct theme labels, sorted ascending
    pub fn themes(&self) -> Vec<String> {
        self.distinct_labels(|record| &record.theme)
    }

    /// Distinct neighborhood labels, sorted ascending
    pub fn neighborhoods(&self) -> Vec<String> {
        self.distinct_labels(|record| &record.neighborhood)
    }

    fn distinct_labels<F>(&self, label: F) -> Vec<String>
    where
        F: Fn(&IncidentRecord) -> &String,
    {
        self.records
            .iter()
            .map(|record| label(record).clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl RecordStore for MemoryRecordStore {
    fn fetch(&self, theme: &LabelFilter, neighborhood: &LabelFilter) -> Vec<IncidentRecord> {
        self.records
            .iter()
            .filter(|record| theme.matches(&record.theme))
            .filter(|record| neighborhood.matches(&record.neighborhood))
            .cloned()
            .collect()
    }
}

/// Parse a timestamp field, trying datetime formats first and falling back
/// to date-only formats at midnight
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%d/%m/%Y %H:%M:%S"];
    for format in DATETIME_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(timestamp);
        }
    }

    const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}
