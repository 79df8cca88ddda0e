//! Interval bucketing of ticks into raw candles.

use kline_types::{Interval, Tick};

/// Unadjusted OHLC summary of the ticks in one bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawCandle {
    /// Bucket start as unix seconds.
    pub bucket_start: i64,
    /// Price of the first tick folded in.
    pub open: f64,
    /// Highest price seen.
    pub high: f64,
    /// Lowest price seen.
    pub low: f64,
    /// Price of the latest-timestamped tick.
    pub close: f64,
    /// Timestamp of the first tick folded in.
    pub first_tick_time: i64,
    /// Latest timestamp seen.
    pub last_tick_time: i64,
    /// Sum of tick volumes.
    pub volume: f64,
    /// Number of ticks folded in.
    pub tick_count: usize,
}

impl RawCandle {
    /// Opens a bucket with its first tick.
    #[must_use]
    pub fn new(bucket_start: i64, tick: &Tick) -> Self {
        Self {
            bucket_start,
            open: tick.price,
            high: tick.price,
            low: tick.price,
            close: tick.price,
            first_tick_time: tick.time,
            last_tick_time: tick.time,
            volume: tick.volume_or_zero(),
            tick_count: 1,
        }
    }

    /// Folds another tick of the same bucket.
    ///
    /// On equal timestamps the later-folded tick becomes the close.
    pub fn fold(&mut self, tick: &Tick) {
        self.high = self.high.max(tick.price);
        self.low = self.low.min(tick.price);
        if tick.time >= self.last_tick_time {
            self.close = tick.price;
            self.last_tick_time = tick.time;
        }
        self.volume += tick.volume_or_zero();
        self.tick_count += 1;
    }
}

/// Streaming bucketer over time-ordered ticks.
///
/// Holds at most one open bucket and emits it once a tick from a later
/// bucket arrives.
#[derive(Debug)]
pub struct Bucketer {
    interval: Interval,
    current: Option<RawCandle>,
}

impl Bucketer {
    /// Creates a new bucketer for the given interval.
    #[must_use]
    pub const fn new(interval: Interval) -> Self {
        Self {
            interval,
            current: None,
        }
    }

    /// Returns the interval being bucketed to.
    #[must_use]
    pub const fn interval(&self) -> Interval {
        self.interval
    }

    /// Folds a tick, returning the previous bucket if this tick closed it.
    ///
    /// # Panics
    ///
    /// Panics if the price is not finite or the tick belongs to a bucket
    /// before the open one. Both mean the caller skipped normalization or
    /// sorting.
    pub fn push(&mut self, tick: &Tick) -> Option<RawCandle> {
        assert!(
            tick.price.is_finite(),
            "non-finite price {} at t={} reached the bucketer",
            tick.price,
            tick.time
        );
        let bucket_start = self.interval.bucket_start(tick.time);

        match self.current.take() {
            Some(mut open) if open.bucket_start == bucket_start => {
                open.fold(tick);
                self.current = Some(open);
                None
            }
            Some(open) => {
                assert!(
                    bucket_start > open.bucket_start,
                    "tick at t={} arrived after bucket {} was opened; ticks must be sorted",
                    tick.time,
                    open.bucket_start
                );
                self.current = Some(RawCandle::new(bucket_start, tick));
                Some(open)
            }
            None => {
                self.current = Some(RawCandle::new(bucket_start, tick));
                None
            }
        }
    }

    /// Finishes bucketing, returning the open bucket if any.
    #[must_use]
    pub fn finish(self) -> Option<RawCandle> {
        self.current
    }
}

/// Buckets ticks in any order into raw candles ascending by bucket start.
///
/// Ticks are stably sorted by time first, so equal timestamps keep their
/// input order.
#[must_use]
pub fn bucket_ticks(mut ticks: Vec<Tick>, interval: Interval) -> Vec<RawCandle> {
    ticks.sort_by_key(|tick| tick.time);

    let mut bucketer = Bucketer::new(interval);
    let mut candles = Vec::new();

    for tick in &ticks {
        if let Some(candle) = bucketer.push(tick) {
            candles.push(candle);
        }
    }

    if let Some(candle) = bucketer.finish() {
        candles.push(candle);
    }

    candles
}
