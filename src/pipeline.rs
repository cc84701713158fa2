//! End-to-end query pipeline: fetch, build, evaluate, assemble

use crate::assembly::{assemble, ForecastBundle};
use crate::error::{ForecastError, Result};
use crate::evaluation::evaluate;
use crate::models::Forecaster;
use crate::series::{build_series, fill_monthly_gaps};
use crate::store::{LabelFilter, RecordStore};

/// Default number of future months to forecast
pub const DEFAULT_HORIZON_PERIODS: usize = 6;
/// Default number of held-out months used for evaluation
pub const DEFAULT_TEST_SIZE: usize = 6;

/// User-facing query parameters for one forecast run
#[derive(Debug, Clone)]
pub struct ForecastQuery {
    /// Theme to forecast, or the wildcard
    pub theme: LabelFilter,
    /// Neighborhood to forecast, or the wildcard
    pub neighborhood: LabelFilter,
    /// Number of future months to forecast
    pub horizon_periods: usize,
    /// Number of trailing months held out for evaluation
    pub test_size: usize,
}

impl Default for ForecastQuery {
    fn default() -> Self {
        Self {
            theme: LabelFilter::Any,
            neighborhood: LabelFilter::Any,
            horizon_periods: DEFAULT_HORIZON_PERIODS,
            test_size: DEFAULT_TEST_SIZE,
        }
    }
}

impl ForecastQuery {
    /// Reject out-of-range parameters before any data is touched
    pub fn validate(&self) -> Result<()> {
        if self.horizon_periods == 0 {
            return Err(ForecastError::InvalidParameter(
                "Horizon must be at least 1 month".to_string(),
            ));
        }
        if self.test_size == 0 {
            return Err(ForecastError::InvalidParameter(
                "Test size must be at least 1 month".to_string(),
            ));
        }

        Ok(())
    }
}

/// Run one complete build → evaluate → assemble pass for a query.
///
/// Synchronous and stateless across invocations: every call fetches a fresh
/// read-only view of the records, aggregates it into a gap-free monthly
/// series, scores the forecaster against the held-out suffix, then re-fits
/// on the full history to produce the user-facing projection. Failures are
/// value-level and scoped to this query.
pub fn run_forecast<S, M>(store: &S, query: &ForecastQuery, model: &M) -> Result<ForecastBundle>
where
    S: RecordStore + ?Sized,
    M: Forecaster,
{
    query.validate()?;

    let records = store.fetch(&query.theme, &query.neighborhood);
    log::debug!(
        "Fetched {} records for theme={:?} neighborhood={:?}",
        records.len(),
        query.theme,
        query.neighborhood
    );

    // The store already applied the query filters; aggregate everything
    // it returned
    let series = fill_monthly_gaps(&build_series(
        &records,
        &LabelFilter::Any,
        &LabelFilter::Any,
    ));
    log::debug!("Aggregated into {} monthly points", series.len());

    let (split, metrics, _holdout_fit) = match evaluate(&series, query.test_size, model) {
        Ok(outcome) => outcome,
        Err(error @ ForecastError::InsufficientData { .. }) => {
            log::warn!("Skipping forecast: {}", error);
            return Err(error);
        }
        Err(error) => return Err(error),
    };
    log::debug!(
        "Evaluated {} on {} training / {} holdout points: MAE={:.3} RMSE={:.3} MAPE={:.2}%",
        model.name(),
        split.training.len(),
        split.holdout.len(),
        metrics.mae,
        metrics.rmse,
        metrics.mape
    );

    // Final projection always comes from a full-history re-fit; the
    // holdout-restricted fit above is for scoring only
    assemble(&series, query.horizon_periods, metrics, model)
}
