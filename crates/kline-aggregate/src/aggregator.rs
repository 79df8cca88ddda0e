//! The full normalize, bucket, chain and fill pipeline.

use kline_types::{Candle, Interval, Tick};
use tracing::debug;

use crate::{
    RowLayout, bucket_ticks, enforce_continuity, fill_gaps, normalize_csv, normalize_records,
};

/// How many candles in an aggregation came from ticks and how many were
/// synthesized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillSummary {
    /// Candles backed by at least one tick.
    pub real: usize,
    /// Flat candles inserted into gaps.
    pub filled: usize,
}

impl FillSummary {
    /// Total number of candles.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.real + self.filled
    }
}

/// Batch tick-to-candle aggregator.
///
/// Holds no state between calls; every method is a pure function of its
/// input, so one aggregator can serve any number of batches.
#[derive(Debug, Clone, Copy)]
pub struct CandleAggregator {
    interval: Interval,
    layout: RowLayout,
}

impl CandleAggregator {
    /// Creates an aggregator for the given interval using the Flux CSV
    /// layout for text input.
    #[must_use]
    pub const fn new(interval: Interval) -> Self {
        Self {
            interval,
            layout: RowLayout::flux(),
        }
    }

    /// Sets the row layout used by [`Self::aggregate_csv`].
    #[must_use]
    pub const fn with_layout(mut self, layout: RowLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Returns the interval being aggregated to.
    #[must_use]
    pub const fn interval(&self) -> Interval {
        self.interval
    }

    /// Returns the row layout.
    #[must_use]
    pub const fn layout(&self) -> &RowLayout {
        &self.layout
    }

    /// Aggregates ticks in any order into a continuous, gapless series.
    #[must_use]
    pub fn aggregate(&self, ticks: Vec<Tick>) -> Vec<Candle> {
        self.aggregate_with_summary(ticks).0
    }

    /// Like [`Self::aggregate`], also reporting real and filled counts.
    #[must_use]
    pub fn aggregate_with_summary(&self, ticks: Vec<Tick>) -> (Vec<Candle>, FillSummary) {
        let raw = bucket_ticks(ticks, self.interval);
        let chained = enforce_continuity(&raw);
        let candles = fill_gaps(&chained, self.interval);

        let summary = FillSummary {
            real: chained.len(),
            filled: candles.len() - chained.len(),
        };
        debug!(
            interval = %self.interval,
            "{} candles ({} real, {} filled)",
            summary.total(),
            summary.real,
            summary.filled
        );

        (candles, summary)
    }

    /// Normalizes delimited text with the configured layout and aggregates
    /// the surviving ticks.
    #[must_use]
    pub fn aggregate_csv(&self, text: &str) -> Vec<Candle> {
        self.aggregate(normalize_csv(text, &self.layout))
    }

    /// Normalizes `(time, price)` string pairs and aggregates them.
    pub fn aggregate_records<I, T, P>(&self, rows: I) -> Vec<Candle>
    where
        I: IntoIterator<Item = (T, P)>,
        T: AsRef<str>,
        P: AsRef<str>,
    {
        self.aggregate(normalize_records(rows))
    }
}

/// Aggregates ticks into candles of the given interval.
#[must_use]
pub fn aggregate(ticks: Vec<Tick>, interval: Interval) -> Vec<Candle> {
    CandleAggregator::new(interval).aggregate(ticks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty() {
        let (candles, summary) =
            CandleAggregator::new(Interval::Minute1).aggregate_with_summary(Vec::new());
        assert!(candles.is_empty());
        assert_eq!(summary, FillSummary::default());
    }

    #[test]
    fn test_single_tick() {
        let candles = aggregate(vec![Tick::new(1000, 50.0)], Interval::Minute5);
        assert_eq!(candles, vec![Candle::flat(900, 50.0)]);
    }

    #[test]
    fn test_pipeline_chains_then_fills() {
        let ticks = vec![
            Tick::new(0, 10.0),
            Tick::new(30, 12.0),
            Tick::new(200, 9.0),
            Tick::new(230, 9.5),
        ];
        let (candles, summary) =
            CandleAggregator::new(Interval::Minute1).aggregate_with_summary(ticks);

        assert_eq!(summary, FillSummary { real: 2, filled: 2 });
        let times: Vec<_> = candles.iter().map(|c| c.time).collect();
        assert_eq!(times, vec![0, 60, 120, 180]);

        assert_eq!(candles[1], Candle::flat(60, 12.0));
        assert_eq!(candles[2], Candle::flat(120, 12.0));

        let last = candles[3];
        assert_relative_eq!(last.open, 12.0);
        assert_relative_eq!(last.high, 12.0);
        assert_relative_eq!(last.low, 9.0);
        assert_relative_eq!(last.close, 9.5);
    }

    #[test]
    fn test_aggregate_records_drops_malformed() {
        let candles = CandleAggregator::new(Interval::Minute1).aggregate_records([
            ("1970-01-01T00:01:40Z", "10"),
            ("1970-01-01T00:02:10Z", "NaN"),
            ("garbage", "12"),
            ("1970-01-01T00:02:50Z", "11"),
        ]);

        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0], Candle::flat(60, 10.0));
        assert_eq!(candles[1], Candle::new(120, 10.0, 11.0, 10.0, 11.0, 0.0));
    }

    #[test]
    fn test_aggregate_csv_with_simple_layout() {
        let text = "time,price\n1970-01-01T00:00:05Z,3\n1970-01-01T00:00:50Z,4\n";
        let candles = CandleAggregator::new(Interval::Minute1)
            .with_layout(RowLayout::simple())
            .aggregate_csv(text);
        assert_eq!(candles, vec![Candle::new(0, 3.0, 4.0, 3.0, 4.0, 0.0)]);
    }
}
