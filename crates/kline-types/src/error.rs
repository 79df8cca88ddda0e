//! Error types for kline.

use thiserror::Error;

use crate::IntervalParseError;

/// Result type alias for kline operations.
pub type Result<T> = std::result::Result<T, KlineError>;

/// Errors that can occur around the aggregation pipeline.
///
/// The pipeline itself never fails: malformed ticks are dropped and empty
/// input yields no candles. Request parameters fail with [`RequestError`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KlineError {
    /// Tick input layout could not be resolved.
    #[error("Input error: {0}")]
    Input(String),
}

/// Error for malformed request parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// A required parameter was not supplied.
    #[error("Missing required parameter: {0}")]
    Missing(&'static str),

    /// The interval label is not one of the supported widths.
    #[error(transparent)]
    Interval(#[from] IntervalParseError),

    /// The `from` bound is not an integer timestamp.
    #[error("Invalid from timestamp: {0}")]
    InvalidFrom(String),

    /// The `to` bound is not an integer timestamp.
    #[error("Invalid to timestamp: {0}")]
    InvalidTo(String),

    /// The row limit is not a non-negative integer.
    #[error("Invalid limit value: {0}")]
    InvalidLimit(String),
}
