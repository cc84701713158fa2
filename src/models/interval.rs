//! Shared prediction-interval arithmetic

use crate::error::{ForecastError, Result};
use statrs::distribution::{ContinuousCDF, Normal};

/// Two-sided normal quantile for the given confidence level
pub(crate) fn z_score(confidence_level: f64) -> Result<f64> {
    if confidence_level <= 0.0 || confidence_level >= 1.0 {
        return Err(ForecastError::InvalidParameter(
            "Confidence level must be between 0 and 1".to_string(),
        ));
    }

    let standard_normal = Normal::new(0.0, 1.0)
        .map_err(|e| ForecastError::InvalidParameter(e.to_string()))?;

    Ok(standard_normal.inverse_cdf(0.5 + confidence_level / 2.0))
}

/// Population standard deviation of one-step-ahead residuals; zero when no
/// residuals are available
pub(crate) fn residual_std_dev(residuals: &[f64]) -> f64 {
    if residuals.is_empty() {
        return 0.0;
    }

    let mean_square =
        residuals.iter().map(|r| r * r).sum::<f64>() / residuals.len() as f64;

    mean_square.sqrt()
}
