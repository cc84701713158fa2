//! # Incident Forecast
//!
//! A Rust library that turns a sparse log of incident records into a
//! monthly volume forecast with uncertainty bounds, for any combination of
//! theme and neighborhood.
//!
//! ## Features
//!
//! - Monthly aggregation of irregular per-event records (theme and
//!   neighborhood filtering, explicit zero-fill of empty months)
//! - Holdout evaluation on a chronological split (MAE, RMSE, MAPE over the
//!   held-out suffix only)
//! - Forecast assembly: full-history re-fit, non-negative clipping, and
//!   partitioning into a historical fit and a future projection that
//!   renderers can stitch without a gap
//! - Pluggable forecasters behind a fit/predict capability contract
//!   (Holt linear trend, seasonal-naive baseline)
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use incident_forecast::models::holt_linear::HoltLinear;
//! use incident_forecast::pipeline::{run_forecast, ForecastQuery};
//! use incident_forecast::store::{IncidentRecord, MemoryRecordStore};
//!
//! // Two years of synthetic records, one per month
//! let records: Vec<IncidentRecord> = (0..24i32)
//!     .map(|i| IncidentRecord {
//!         timestamp: NaiveDate::from_ymd_opt(2022 + i / 12, (i % 12 + 1) as u32, 15)
//!             .unwrap()
//!             .and_hms_opt(9, 0, 0)
//!             .unwrap(),
//!         theme: "NOISE".to_string(),
//!         neighborhood: "CENTRE".to_string(),
//!     })
//!     .collect();
//!
//! let store = MemoryRecordStore::new(records);
//! let model = HoltLinear::new(0.4, 0.2)?;
//! let bundle = run_forecast(&store, &ForecastQuery::default(), &model)?;
//!
//! println!("MAPE: {:.1}%", bundle.metrics.mape);
//! println!("First projected month: {}", bundle.projected_future[0].period);
//! # Ok::<(), incident_forecast::ForecastError>(())
//! ```

pub mod assembly;
pub mod error;
pub mod evaluation;
pub mod models;
pub mod pipeline;
pub mod series;
pub mod store;

// Re-export commonly used types
pub use crate::assembly::ForecastBundle;
pub use crate::error::ForecastError;
pub use crate::models::{FittedForecaster, ForecastPoint, Forecaster};
pub use crate::pipeline::ForecastQuery;
pub use crate::series::{Period, TimeSeriesPoint};
pub use crate::store::{IncidentRecord, LabelFilter, RecordStore};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
