//! Forecast assembly: full-history re-fit, clipping and partitioning

use crate::error::{ForecastError, Result};
use crate::evaluation::EvaluationMetrics;
use crate::models::{FittedForecaster, ForecastPoint, Forecaster};
use crate::series::{Period, TimeSeriesPoint};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Plot-ready forecast output for one query.
///
/// Created fresh per query and never mutated afterwards. `fitted_historical`
/// covers only periods up to the last observed period; `projected_future`
/// covers only periods after it — the two partition the forecast range with
/// no overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastBundle {
    /// The observed monthly counts the forecast was built from
    pub observed: Vec<TimeSeriesPoint>,
    /// Model fit over the observed range
    pub fitted_historical: Vec<ForecastPoint>,
    /// Extrapolation past the last observed period
    pub projected_future: Vec<ForecastPoint>,
    /// Holdout accuracy of the forecaster
    pub metrics: EvaluationMetrics,
}

impl ForecastBundle {
    /// Last observed period, the boundary between the historical fit and
    /// the future projection
    pub fn cutoff(&self) -> Option<Period> {
        self.observed.last().map(|point| point.period)
    }

    /// The last historical forecast point. Renderers should prepend it to
    /// the future segment so the two lines connect without a visual gap.
    pub fn connection_point(&self) -> Option<&ForecastPoint> {
        self.fitted_historical.last()
    }
}

/// Fit a forecaster on the full observed series and assemble the
/// plot-ready bundle.
///
/// The model is fitted on the entire series, never the training-only
/// subset — a holdout-restricted fit would discard the most recent, most
/// relevant data. Predictions are requested for every period from the
/// first observed month through `horizon_periods` months past the last
/// observed month, inclusive. Each field of every prediction is clamped to
/// a floor of 0 as the last step: forecasted incident counts cannot be
/// negative.
pub fn assemble<M: Forecaster>(
    series: &[TimeSeriesPoint],
    horizon_periods: usize,
    metrics: EvaluationMetrics,
    model: &M,
) -> Result<ForecastBundle> {
    let (first, last) = match (series.first(), series.last()) {
        (Some(first), Some(last)) => (first.period, last.period),
        _ => {
            return Err(ForecastError::InsufficientData {
                required: 1,
                actual: 0,
            })
        }
    };

    let fitted = model.fit(series)?;

    let end = last.plus_months(horizon_periods as i64);
    let mut requested = Vec::with_capacity(first.months_until(&end) as usize + 1);
    let mut current = first;
    while current <= end {
        requested.push(current);
        current = current.next();
    }

    let predictions = fitted.predict(&requested)?;
    let by_period: BTreeMap<Period, ForecastPoint> = predictions
        .into_iter()
        .map(|point| (point.period, point))
        .collect();

    let mut fitted_historical = Vec::new();
    let mut projected_future = Vec::new();

    for period in requested {
        let prediction = by_period.get(&period).ok_or_else(|| {
            ForecastError::PeriodAlignment(format!(
                "Forecaster '{}' produced no prediction for period {}",
                fitted.name(),
                period
            ))
        })?;

        let clamped = ForecastPoint {
            period,
            point_estimate: prediction.point_estimate.max(0.0),
            lower_bound: prediction.lower_bound.max(0.0),
            upper_bound: prediction.upper_bound.max(0.0),
        };

        if period <= last {
            fitted_historical.push(clamped);
        } else {
            projected_future.push(clamped);
        }
    }

    Ok(ForecastBundle {
        observed: series.to_vec(),
        fitted_historical,
        projected_future,
        metrics,
    })
}
