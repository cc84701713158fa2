//! Seasonal-naive baseline forecaster

use crate::error::{ForecastError, Result};
use crate::models::interval::{residual_std_dev, z_score};
use crate::models::{FittedForecaster, ForecastPoint, Forecaster};
use crate::series::{Period, TimeSeriesPoint};
use std::collections::BTreeMap;

const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Seasonal-naive baseline: the prediction for a month is the count
/// observed one season earlier (12 months by default), falling back to the
/// last observed count when the history is shorter than one season.
///
/// Useful as a sanity baseline for the smoothing models: anything that
/// cannot beat it on the holdout is not capturing the seasonality.
#[derive(Debug, Clone)]
pub struct SeasonalNaive {
    /// Name of the model
    name: String,
    /// Season length in months
    season_length: usize,
    /// Confidence level for prediction intervals
    confidence_level: f64,
}

/// Fitted seasonal-naive model
#[derive(Debug, Clone)]
pub struct FittedSeasonalNaive {
    /// Name of the model
    name: String,
    /// Season length in months
    season_length: usize,
    /// Observed counts per training period
    history: BTreeMap<Period, f64>,
    /// Last period the model was fitted on
    last_period: Period,
    /// Last observed count, the fallback for short histories
    last_value: f64,
    /// Residual standard deviation of the in-sample seasonal fit
    sigma: f64,
    /// Normal quantile for the configured confidence level
    z: f64,
}

impl SeasonalNaive {
    /// Create a new seasonal-naive model with the given season length
    pub fn new(season_length: usize) -> Result<Self> {
        if season_length == 0 {
            return Err(ForecastError::InvalidParameter(
                "Season length must be positive".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Seasonal naive (season={})", season_length),
            season_length,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
        })
    }

    /// Seasonal-naive model with a 12-month season
    pub fn yearly() -> Self {
        Self {
            name: "Seasonal naive (season=12)".to_string(),
            season_length: 12,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
        }
    }

    /// Set the confidence level used for prediction intervals
    pub fn with_confidence_level(mut self, confidence_level: f64) -> Result<Self> {
        z_score(confidence_level)?;
        self.confidence_level = confidence_level;
        Ok(self)
    }
}

impl Forecaster for SeasonalNaive {
    type Fitted = FittedSeasonalNaive;

    fn fit(&self, series: &[TimeSeriesPoint]) -> Result<Self::Fitted> {
        if series.is_empty() {
            return Err(ForecastError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }

        let history: BTreeMap<Period, f64> = series
            .iter()
            .map(|point| (point.period, point.count as f64))
            .collect();

        let last = series[series.len() - 1];

        // In-sample residuals of the season-ago rule, where a season-ago
        // observation exists
        let mut residuals = Vec::new();
        for point in series {
            let season_ago = point.period.plus_months(-(self.season_length as i64));
            if let Some(&previous) = history.get(&season_ago) {
                residuals.push(point.count as f64 - previous);
            }
        }

        // Histories shorter than one season fall back to the spread around
        // the mean
        let sigma = if residuals.is_empty() {
            let mean =
                series.iter().map(|p| p.count as f64).sum::<f64>() / series.len() as f64;
            let deviations: Vec<f64> =
                series.iter().map(|p| p.count as f64 - mean).collect();
            residual_std_dev(&deviations)
        } else {
            residual_std_dev(&residuals)
        };

        Ok(FittedSeasonalNaive {
            name: self.name.clone(),
            season_length: self.season_length,
            history,
            last_period: last.period,
            last_value: last.count as f64,
            sigma,
            z: z_score(self.confidence_level)?,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl FittedForecaster for FittedSeasonalNaive {
    fn predict(&self, periods: &[Period]) -> Result<Vec<ForecastPoint>> {
        let mut predictions = Vec::with_capacity(periods.len());

        for &period in periods {
            let step = self.last_period.months_until(&period);

            // Walk back whole seasons until inside the observed range
            let mut reference = period.plus_months(-(self.season_length as i64));
            while reference > self.last_period {
                reference = reference.plus_months(-(self.season_length as i64));
            }

            let point_estimate = self
                .history
                .get(&reference)
                .copied()
                .unwrap_or(self.last_value);

            let half_width = if step > 0 {
                self.z * self.sigma * (step as f64).sqrt()
            } else {
                self.z * self.sigma
            };

            predictions.push(ForecastPoint {
                period,
                point_estimate,
                lower_bound: point_estimate - half_width,
                upper_bound: point_estimate + half_width,
            });
        }

        Ok(predictions)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
