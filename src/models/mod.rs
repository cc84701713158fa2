//! Forecasting models for monthly count series
//!
//! A forecaster is anything that can be fitted on an ordered monthly series
//! and then asked for point estimates with uncertainty bounds for a set of
//! requested periods. Predictions are keyed by calendar month, not by
//! positional index, so the evaluator can match them to holdout periods by
//! identity.

use crate::error::Result;
use crate::series::{Period, TimeSeriesPoint};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Point estimate with uncertainty bounds for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Calendar month the prediction refers to
    pub period: Period,
    /// Central estimate of the incident count
    pub point_estimate: f64,
    /// Lower confidence bound
    pub lower_bound: f64,
    /// Upper confidence bound
    pub upper_bound: f64,
}

/// Forecast model that can be fitted on a monthly count series
pub trait Forecaster: Debug + Clone {
    /// The type of fitted model produced
    type Fitted: FittedForecaster;

    /// Fit the model on an ordered monthly series
    fn fit(&self, series: &[TimeSeriesPoint]) -> Result<Self::Fitted>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Fitted forecast model
pub trait FittedForecaster: Debug {
    /// Predict point estimates and bounds for the requested periods, one
    /// prediction per requested period, keyed by calendar month
    fn predict(&self, periods: &[Period]) -> Result<Vec<ForecastPoint>>;

    /// Name of the model
    fn name(&self) -> &str;
}

pub mod holt_linear;
pub mod seasonal_naive;

pub(crate) mod interval;
