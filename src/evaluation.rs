//! Holdout evaluation of forecasters on a chronological split

use crate::error::{ForecastError, Result};
use crate::models::{FittedForecaster, ForecastPoint, Forecaster};
use crate::series::{Period, TimeSeriesPoint};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Minimum number of training points required before fitting
pub const MIN_TRAINING_POINTS: usize = 2;

/// A series split into a training prefix and a held-out chronological suffix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSeries {
    /// Training prefix, everything before the holdout window
    pub training: Vec<TimeSeriesPoint>,
    /// Held-out suffix, exactly `test_size` points
    pub holdout: Vec<TimeSeriesPoint>,
}

/// Forecast accuracy over the holdout window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    /// Mean absolute error
    pub mae: f64,
    /// Root mean squared error
    pub rmse: f64,
    /// Mean absolute percentage error, in percent
    pub mape: f64,
}

impl fmt::Display for EvaluationMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Holdout evaluation:")?;
        writeln!(f, "  MAE:  {:.4}", self.mae)?;
        writeln!(f, "  RMSE: {:.4}", self.rmse)?;
        writeln!(f, "  MAPE: {:.4}%", self.mape)?;
        Ok(())
    }
}

/// Accuracy metrics of predictions against actual holdout values.
///
/// MAPE divides by `max(actual, 1)` so months with zero observed incidents
/// cannot produce a division by zero. This is a documented approximation of
/// true MAPE, kept as-is because changing it would silently alter reported
/// accuracy semantics.
pub fn holdout_accuracy(actual: &[f64], predicted: &[f64]) -> Result<EvaluationMetrics> {
    if actual.len() != predicted.len() || actual.is_empty() {
        return Err(ForecastError::InvalidParameter(
            "Actual and predicted values must have the same non-zero length".to_string(),
        ));
    }

    let n = actual.len() as f64;

    let mae = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / n;

    let mse = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>()
        / n;

    let mape = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs() / a.max(1.0))
        .sum::<f64>()
        / n
        * 100.0;

    Ok(EvaluationMetrics {
        mae,
        rmse: mse.sqrt(),
        mape,
    })
}

/// Split a series chronologically and score a forecaster against the
/// held-out suffix.
///
/// The last `test_size` points become the holdout; everything before them
/// is the training prefix. The split is never shuffled — a random split
/// would leak future information into the fit and invalidate the
/// evaluation. Requires at least [`MIN_TRAINING_POINTS`] training points.
///
/// Predictions are requested for exactly the holdout periods and matched to
/// them by calendar-month identity; extra predicted periods are discarded
/// and a missing one is a [`ForecastError::PeriodAlignment`].
///
/// The returned fitted model was trained on the prefix only. It exists for
/// inspection; the user-facing projection must come from a model re-fitted
/// on the full series (see [`crate::assembly::assemble`]).
pub fn evaluate<M: Forecaster>(
    series: &[TimeSeriesPoint],
    test_size: usize,
    model: &M,
) -> Result<(SplitSeries, EvaluationMetrics, M::Fitted)> {
    if test_size == 0 {
        return Err(ForecastError::InvalidParameter(
            "Test size must be at least 1".to_string(),
        ));
    }

    let required = test_size + MIN_TRAINING_POINTS;
    if series.len() < required {
        return Err(ForecastError::InsufficientData {
            required,
            actual: series.len(),
        });
    }

    let split_at = series.len() - test_size;
    let split = SplitSeries {
        training: series[..split_at].to_vec(),
        holdout: series[split_at..].to_vec(),
    };

    let fitted = model.fit(&split.training)?;

    let holdout_periods: Vec<Period> =
        split.holdout.iter().map(|point| point.period).collect();
    let predictions = fitted.predict(&holdout_periods)?;
    let by_period: BTreeMap<Period, ForecastPoint> = predictions
        .into_iter()
        .map(|point| (point.period, point))
        .collect();

    let mut actual = Vec::with_capacity(split.holdout.len());
    let mut predicted = Vec::with_capacity(split.holdout.len());
    for point in &split.holdout {
        let prediction = by_period.get(&point.period).ok_or_else(|| {
            ForecastError::PeriodAlignment(format!(
                "Forecaster '{}' produced no prediction for holdout period {}",
                fitted.name(),
                point.period
            ))
        })?;

        actual.push(point.count as f64);
        predicted.push(prediction.point_estimate);
    }

    let metrics = holdout_accuracy(&actual, &predicted)?;

    Ok((split, metrics, fitted))
}
