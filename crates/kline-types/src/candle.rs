//! Finished OHLC candle.

use serde::{Deserialize, Serialize};

/// OHLC candle as handed to charting front-ends.
///
/// Serializes to the flat `{time, open, high, low, close, volume}` object most
/// charting libraries accept directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bucket start as unix seconds.
    pub time: i64,
    /// Opening price.
    pub open: f64,
    /// Highest price in the bucket.
    pub high: f64,
    /// Lowest price in the bucket.
    pub low: f64,
    /// Closing price (price of the latest tick).
    pub close: f64,
    /// Traded volume, zero when the source had none.
    #[serde(default)]
    pub volume: f64,
}

impl Candle {
    /// Creates a new candle.
    #[must_use]
    pub const fn new(time: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Creates a zero-movement candle holding `price`.
    #[must_use]
    pub const fn flat(time: i64, price: f64) -> Self {
        Self::new(time, price, price, price, price, 0.0)
    }

    /// Returns the price range (high - low).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns the body size (|close - open|).
    #[must_use]
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Returns true if this is a bullish (green) candle.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Returns true if this is a bearish (red) candle.
    #[must_use]
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// Returns true if open, high, low and close are all equal.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_flat(&self) -> bool {
        self.open == self.high && self.high == self.low && self.low == self.close
    }

    /// Returns true if open and close both lie within `[low, high]`.
    #[must_use]
    pub fn contains_body(&self) -> bool {
        self.low <= self.open.min(self.close) && self.open.max(self.close) <= self.high
    }
}
