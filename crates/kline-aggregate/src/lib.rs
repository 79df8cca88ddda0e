//! Tick-to-candle aggregation for kline.
//!
//! This crate turns raw tick rows into a continuous, gapless OHLC series:
//!
//! - [`RowLayout`] / [`normalize_csv`] - Raw rows to [`Tick`](kline_types::Tick)s
//! - [`Bucketer`] / [`bucket_ticks`] - Ticks to per-bucket [`RawCandle`]s
//! - [`enforce_continuity`] / [`fill_gaps`] - Raw candles to the final series
//! - [`CandleAggregator`] - All three stages in order

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
mod bucket;
mod continuity;
mod normalize;

pub use aggregator::{CandleAggregator, FillSummary, aggregate};
pub use bucket::{Bucketer, RawCandle, bucket_ticks};
pub use continuity::{enforce_continuity, fill_gaps};
pub use normalize::{
    RowLayout, normalize, normalize_csv, normalize_records, parse_price, parse_time,
};
