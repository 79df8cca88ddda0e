//! Candle interval definitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Candle width.
///
/// Every bucket start is aligned to a multiple of [`Interval::seconds`]
/// counted from the unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Interval {
    /// 1-minute candles.
    #[serde(rename = "1m")]
    Minute1,
    /// 3-minute candles.
    #[serde(rename = "3m")]
    Minute3,
    /// 5-minute candles.
    #[serde(rename = "5m")]
    Minute5,
    /// 15-minute candles.
    #[serde(rename = "15m")]
    Minute15,
    /// 1-hour candles.
    #[serde(rename = "1h")]
    Hour1,
    /// 4-hour candles.
    #[serde(rename = "4h")]
    Hour4,
    /// Daily candles.
    #[serde(rename = "1d")]
    Day1,
}

impl Interval {
    /// Returns the width in seconds.
    #[must_use]
    pub const fn seconds(&self) -> i64 {
        match self {
            Self::Minute1 => 60,
            Self::Minute3 => 180,
            Self::Minute5 => 300,
            Self::Minute15 => 900,
            Self::Hour1 => 3600,
            Self::Hour4 => 14400,
            Self::Day1 => 86400,
        }
    }

    /// Returns the start of the bucket containing `time`.
    ///
    /// Uses floor division, so pre-epoch timestamps still land on the bucket
    /// at or before them.
    #[must_use]
    pub const fn bucket_start(&self, time: i64) -> i64 {
        let width = self.seconds();
        time.div_euclid(width) * width
    }

    /// Returns the interval label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Minute1 => "1m",
            Self::Minute3 => "3m",
            Self::Minute5 => "5m",
            Self::Minute15 => "15m",
            Self::Hour1 => "1h",
            Self::Hour4 => "4h",
            Self::Day1 => "1d",
        }
    }

    /// Returns all supported intervals, narrowest first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Minute1,
            Self::Minute3,
            Self::Minute5,
            Self::Minute15,
            Self::Hour1,
            Self::Hour4,
            Self::Day1,
        ]
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Interval {
    type Err = IntervalParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1m" => Ok(Self::Minute1),
            "3m" => Ok(Self::Minute3),
            "5m" => Ok(Self::Minute5),
            "15m" => Ok(Self::Minute15),
            "1h" => Ok(Self::Hour1),
            "4h" => Ok(Self::Hour4),
            "1d" => Ok(Self::Day1),
            _ => Err(IntervalParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid interval label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalParseError(String);

impl std::fmt::Display for IntervalParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invalid interval '{}'. Must be one of: 1m, 3m, 5m, 15m, 1h, 4h, 1d",
            self.0
        )
    }
}

impl std::error::Error for IntervalParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_seconds() {
        assert_eq!(Interval::Minute1.seconds(), 60);
        assert_eq!(Interval::Minute3.seconds(), 180);
        assert_eq!(Interval::Hour4.seconds(), 14400);
        assert_eq!(Interval::Day1.seconds(), 86400);
    }

    #[test]
    fn test_interval_parse() {
        assert_eq!("1m".parse::<Interval>().unwrap(), Interval::Minute1);
        assert_eq!("4H".parse::<Interval>().unwrap(), Interval::Hour4);
        assert_eq!("1d".parse::<Interval>().unwrap(), Interval::Day1);
        assert!("2m".parse::<Interval>().is_err());
        assert!("m1".parse::<Interval>().is_err());
    }

    #[test]
    fn test_bucket_start() {
        assert_eq!(Interval::Minute1.bucket_start(100), 60);
        assert_eq!(Interval::Minute1.bucket_start(120), 120);
        assert_eq!(Interval::Minute5.bucket_start(1000), 900);
        assert_eq!(Interval::Minute1.bucket_start(-1), -60);
    }

    #[test]
    fn test_labels_roundtrip_through_serde() {
        for interval in Interval::all() {
            let json = serde_json::to_string(interval).unwrap();
            assert_eq!(json, format!("\"{}\"", interval.as_str()));
        }
    }

    #[test]
    fn test_all_is_sorted_by_width() {
        let widths: Vec<_> = Interval::all().iter().map(Interval::seconds).collect();
        assert!(widths.windows(2).all(|w| w[0] < w[1]));
    }
}
