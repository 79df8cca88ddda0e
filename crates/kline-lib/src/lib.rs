//! Gapless OHLC candle aggregation from irregular price ticks.
//!
//! This is a facade crate that re-exports functionality from the kline
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```
//! use kline_lib::prelude::*;
//!
//! let request = KlineRequest::parse(Some("btc"), Some("1m"), None, None, None).unwrap();
//! let candles = CandleAggregator::new(request.interval).aggregate_records([
//!     ("2024-01-01T00:00:10Z", "42000"),
//!     ("2024-01-01T00:00:40Z", "42010"),
//!     ("2024-01-01T00:03:05Z", "41990"),
//! ]);
//!
//! // Two real candles with the two empty minutes between them filled flat.
//! assert_eq!(candles.len(), 4);
//! assert_eq!(candles[3].open, candles[2].close);
//!
//! let response = KlineResponse::new(&request, candles);
//! assert_eq!(response.symbol, "BTC");
//! ```

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use kline_types::*;

// Re-export aggregation
pub use kline_aggregate::{
    Bucketer, CandleAggregator, FillSummary, RawCandle, RowLayout, aggregate, bucket_ticks,
    enforce_continuity, fill_gaps, normalize, normalize_csv, normalize_records, parse_price,
    parse_time,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use kline_format::{
    CsvFormatter, FormatError, Formatter, JsonFormatter, JsonStyle, OutputFormat,
};

#[cfg(all(feature = "format", feature = "parquet"))]
pub use kline_format::ParquetFormatter;

/// Prelude module for convenient imports.
///
/// ```
/// use kline_lib::prelude::*;
/// ```
pub mod prelude {
    pub use kline_types::{
        Candle, Interval, KlineError, KlineRequest, KlineResponse, RequestError, Result, Tick,
    };

    pub use kline_aggregate::{CandleAggregator, FillSummary, RowLayout, aggregate};

    #[cfg(feature = "format")]
    pub use kline_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat};

    #[cfg(all(feature = "format", feature = "parquet"))]
    pub use kline_format::ParquetFormatter;
}
