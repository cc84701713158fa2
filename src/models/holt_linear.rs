//! Holt linear (additive-trend double exponential smoothing) forecaster

use crate::error::{ForecastError, Result};
use crate::models::interval::{residual_std_dev, z_score};
use crate::models::{FittedForecaster, ForecastPoint, Forecaster};
use crate::series::{Period, TimeSeriesPoint};
use std::collections::BTreeMap;

const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Additive-trend exponential smoothing model.
///
/// Maintains a smoothed level and a smoothed trend; the h-step-ahead
/// forecast is `level + h * trend`. Prediction intervals are normal-theory
/// bounds built from the one-step-ahead training residuals, widening with
/// the square root of the forecast step. Fitting is deterministic.
#[derive(Debug, Clone)]
pub struct HoltLinear {
    /// Name of the model
    name: String,
    /// Level smoothing parameter
    alpha: f64,
    /// Trend smoothing parameter
    beta: f64,
    /// Confidence level for prediction intervals
    confidence_level: f64,
}

/// Fitted Holt linear model
#[derive(Debug, Clone)]
pub struct FittedHoltLinear {
    /// Name of the model
    name: String,
    /// Smoothed level at the end of the series
    level: f64,
    /// Smoothed trend at the end of the series
    trend: f64,
    /// Last period the model was fitted on
    last_period: Period,
    /// One-step-ahead fitted values per training period
    fitted_values: BTreeMap<Period, f64>,
    /// Residual standard deviation of the one-step-ahead fit
    sigma: f64,
    /// Normal quantile for the configured confidence level
    z: f64,
}

impl HoltLinear {
    /// Create a new Holt linear model
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        if alpha <= 0.0 || alpha >= 1.0 {
            return Err(ForecastError::InvalidParameter(
                "Alpha must be between 0 and 1".to_string(),
            ));
        }
        if beta <= 0.0 || beta >= 1.0 {
            return Err(ForecastError::InvalidParameter(
                "Beta must be between 0 and 1".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Holt linear (alpha={}, beta={})", alpha, beta),
            alpha,
            beta,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
        })
    }

    /// Set the confidence level used for prediction intervals
    pub fn with_confidence_level(mut self, confidence_level: f64) -> Result<Self> {
        // Validates the level eagerly so a bad value fails at construction
        z_score(confidence_level)?;
        self.confidence_level = confidence_level;
        Ok(self)
    }
}

impl Forecaster for HoltLinear {
    type Fitted = FittedHoltLinear;

    fn fit(&self, series: &[TimeSeriesPoint]) -> Result<Self::Fitted> {
        if series.len() < 2 {
            return Err(ForecastError::InsufficientData {
                required: 2,
                actual: series.len(),
            });
        }

        let values: Vec<f64> = series.iter().map(|point| point.count as f64).collect();

        // Initialize level with the first observation and trend with the
        // first difference
        let mut level = values[0];
        let mut trend = values[1] - values[0];

        let mut fitted_values = BTreeMap::new();
        fitted_values.insert(series[0].period, values[0]);

        let mut residuals = Vec::with_capacity(values.len() - 1);

        for t in 1..values.len() {
            let one_step_ahead = level + trend;
            fitted_values.insert(series[t].period, one_step_ahead);
            residuals.push(values[t] - one_step_ahead);

            let previous_level = level;
            level = self.alpha * values[t] + (1.0 - self.alpha) * (level + trend);
            trend = self.beta * (level - previous_level) + (1.0 - self.beta) * trend;
        }

        Ok(FittedHoltLinear {
            name: self.name.clone(),
            level,
            trend,
            last_period: series[series.len() - 1].period,
            fitted_values,
            sigma: residual_std_dev(&residuals),
            z: z_score(self.confidence_level)?,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl FittedForecaster for FittedHoltLinear {
    fn predict(&self, periods: &[Period]) -> Result<Vec<ForecastPoint>> {
        let mut predictions = Vec::with_capacity(periods.len());

        for &period in periods {
            let step = self.last_period.months_until(&period);

            let (point_estimate, half_width) = if step <= 0 {
                // In-sample: the stored one-step-ahead fitted value, or the
                // fitted line for months the training series never covered
                let estimate = self
                    .fitted_values
                    .get(&period)
                    .copied()
                    .unwrap_or_else(|| self.level + step as f64 * self.trend);
                (estimate, self.z * self.sigma)
            } else {
                let estimate = self.level + step as f64 * self.trend;
                (estimate, self.z * self.sigma * (step as f64).sqrt())
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
