//! Core types for the kline candle aggregator.
//!
//! This crate provides the fundamental data structures used throughout kline:
//!
//! - [`Tick`] - A single timestamped price observation
//! - [`Interval`] - Candle width (`1m` through `1d`)
//! - [`Candle`] - A finished OHLC candle
//! - [`KlineRequest`] / [`KlineResponse`] - Upstream fetch parameters and the
//!   charting envelope

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod candle;
mod error;
mod interval;
mod request;
mod tick;

pub use candle::Candle;
pub use error::{KlineError, RequestError, Result};
pub use interval::{Interval, IntervalParseError};
pub use request::{DEFAULT_LIMIT, KlineRequest, KlineResponse};
pub use tick::Tick;
