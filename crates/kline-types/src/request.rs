//! Request parameters and the charting response envelope.

use serde::{Deserialize, Serialize};

use crate::{Candle, Interval, RequestError};

/// Default maximum number of tick rows fetched upstream.
pub const DEFAULT_LIMIT: usize = 1000;

/// Parameters describing which ticks to fetch and how to aggregate them.
///
/// `from`, `to` and `limit` only bound the upstream fetch; the aggregator
/// itself looks at nothing but the ticks and the interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KlineRequest {
    /// Upper-cased instrument symbol.
    pub symbol: String,
    /// Candle width.
    pub interval: Interval,
    /// Inclusive lower bound, unix seconds.
    pub from: Option<i64>,
    /// Exclusive upper bound, unix seconds.
    pub to: Option<i64>,
    /// Maximum number of tick rows.
    pub limit: usize,
}

impl KlineRequest {
    /// Creates a request with no time bounds and the default limit.
    #[must_use]
    pub fn new(symbol: impl AsRef<str>, interval: Interval) -> Self {
        Self {
            symbol: symbol.as_ref().to_uppercase(),
            interval,
            from: None,
            to: None,
            limit: DEFAULT_LIMIT,
        }
    }

    /// Parses a request from raw query-string values.
    ///
    /// # Errors
    ///
    /// Returns an error if `symbol` or `interval` is missing, the interval
    /// label is unknown, or a numeric parameter is not an integer.
    pub fn parse(
        symbol: Option<&str>,
        interval: Option<&str>,
        from: Option<&str>,
        to: Option<&str>,
        limit: Option<&str>,
    ) -> Result<Self, RequestError> {
        let symbol = symbol
            .filter(|s| !s.is_empty())
            .ok_or(RequestError::Missing("symbol"))?;
        let interval = interval
            .filter(|s| !s.is_empty())
            .ok_or(RequestError::Missing("interval"))?
            .parse::<Interval>()?;

        let from = from
            .map(|s| {
                s.trim()
                    .parse::<i64>()
                    .map_err(|_| RequestError::InvalidFrom(s.to_string()))
            })
            .transpose()?;
        let to = to
            .map(|s| {
                s.trim()
                    .parse::<i64>()
                    .map_err(|_| RequestError::InvalidTo(s.to_string()))
            })
            .transpose()?;
        let limit = match limit {
            Some(s) => s
                .trim()
                .parse::<usize>()
                .map_err(|_| RequestError::InvalidLimit(s.to_string()))?,
            None => DEFAULT_LIMIT,
        };

        Ok(Self {
            from,
            to,
            limit,
            ..Self::new(symbol, interval)
        })
    }

    /// Sets the time range.
    #[must_use]
    pub const fn with_range(mut self, from: Option<i64>, to: Option<i64>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// Sets the row limit.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// Candle sequence wrapped with the request it answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KlineResponse {
    /// Upper-cased instrument symbol.
    pub symbol: String,
    /// Candle width.
    pub interval: Interval,
    /// Candles in ascending time order.
    pub data: Vec<Candle>,
}

impl KlineResponse {
    /// Wraps candles for the given request.
    #[must_use]
    pub fn new(request: &KlineRequest, data: Vec<Candle>) -> Self {
        Self {
            symbol: request.symbol.clone(),
            interval: request.interval,
            data,
        }
    }
}
