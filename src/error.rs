//! Error types for the incident_forecast crate

use thiserror::Error;

/// Custom error types for the incident_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The filtered series is too short for the requested split, or empty
    /// at assembly time. Recoverable: callers should surface the message
    /// and skip the forecast rather than abort.
    #[error("Insufficient data: need at least {required} monthly points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Out-of-range query parameters, rejected at the boundary before
    /// touching any data
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Predicted periods could not be matched to the requested periods by
    /// calendar-month identity. Indicates a forecaster implementation bug;
    /// fatal to the query it occurred in, never to the process.
    #[error("Period alignment error: {0}")]
    PeriodAlignment(String),

    /// Malformed input at the record-ingestion boundary
    #[error("Data error: {0}")]
    Data(String),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
