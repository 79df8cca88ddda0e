//! Continuity enforcement and gap filling.

use kline_types::{Candle, Interval};

use crate::RawCandle;

/// Chains raw candles so each one opens at the previous close.
///
/// The first candle passes through unchanged. Every later candle takes the
/// previous *adjusted* close as its open and widens its high/low to include
/// it; its close stays the raw bucket close. Adjustments compound left to
/// right.
#[must_use]
pub fn enforce_continuity(raw: &[RawCandle]) -> Vec<Candle> {
    let mut candles = Vec::with_capacity(raw.len());
    let mut last_close: Option<f64> = None;

    for bucket in raw {
        let candle = match last_close {
            None => Candle::new(
                bucket.bucket_start,
                bucket.open,
                bucket.high,
                bucket.low,
                bucket.close,
                bucket.volume,
            ),
            Some(open) => Candle::new(
                bucket.bucket_start,
                open,
                bucket.high.max(open),
                bucket.low.min(open),
                bucket.close,
                bucket.volume,
            ),
        };
        last_close = Some(candle.close);
        candles.push(candle);
    }

    candles
}

/// Inserts flat candles for every empty bucket between consecutive candles.
///
/// A filler holds the close of the candle before the gap and carries no
/// volume. Nothing is added before the first or after the last candle.
/// Input must be ascending by time and aligned to `interval`.
#[must_use]
pub fn fill_gaps(candles: &[Candle], interval: Interval) -> Vec<Candle> {
    let width = interval.seconds();
    let mut filled = Vec::with_capacity(candles.len());
    let mut iter = candles.iter().peekable();

    while let Some(current) = iter.next() {
        filled.push(*current);

        if let Some(next) = iter.peek() {
            debug_assert!(next.time > current.time, "candles must be ascending");
            let mut time = current.time + width;
            while time < next.time {
                filled.push(Candle::flat(time, current.close));
                time += width;
            }
        }
    }

    filled
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use kline_types::Tick;

    fn raw(bucket_start: i64, open: f64, high: f64, low: f64, close: f64) -> RawCandle {
        let mut candle = RawCandle::new(bucket_start, &Tick::new(bucket_start, open));
        candle.high = high;
        candle.low = low;
        candle.close = close;
        candle
    }

    #[test]
    fn test_first_candle_unchanged() {
        let candles = enforce_continuity(&[raw(0, 10.0, 12.0, 9.0, 11.0)]);
        assert_eq!(candles, vec![Candle::new(0, 10.0, 12.0, 9.0, 11.0, 0.0)]);
    }

    #[test]
    fn test_open_follows_previous_close() {
        let candles = enforce_continuity(&[
            raw(0, 10.0, 12.0, 9.0, 11.0),
            raw(60, 15.0, 16.0, 14.0, 15.5),
            raw(120, 8.0, 9.0, 7.0, 8.5),
        ]);

        assert_relative_eq!(candles[1].open, 11.0);
        assert_relative_eq!(candles[1].low, 11.0);
        assert_relative_eq!(candles[1].high, 16.0);
        assert_relative_eq!(candles[1].close, 15.5);

        assert_relative_eq!(candles[2].open, 15.5);
        assert_relative_eq!(candles[2].high, 15.5);
        assert_relative_eq!(candles[2].low, 7.0);
        assert_relative_eq!(candles[2].close, 8.5);
    }

    #[test]
    fn test_continuity_empty() {
        assert!(enforce_continuity(&[]).is_empty());
    }

    #[test]
    fn test_fill_two_missing_buckets() {
        let candles = vec![
            Candle::new(0, 10.0, 11.0, 9.0, 10.5, 1.0),
            Candle::new(180, 10.5, 12.0, 10.5, 11.5, 1.0),
        ];
        let filled = fill_gaps(&candles, Interval::Minute1);

        assert_eq!(filled.len(), 4);
        assert_eq!(filled[1], Candle::flat(60, 10.5));
        assert_eq!(filled[2], Candle::flat(120, 10.5));
        assert_eq!(filled[3], candles[1]);
    }

    #[test]
    fn test_fill_no_gaps() {
        let candles = vec![Candle::flat(0, 1.0), Candle::flat(60, 1.0)];
        assert_eq!(fill_gaps(&candles, Interval::Minute1), candles);
    }

    #[test]
    fn test_fill_single_and_empty() {
        assert!(fill_gaps(&[], Interval::Hour1).is_empty());
        let single = vec![Candle::flat(3600, 2.0)];
        assert_eq!(fill_gaps(&single, Interval::Hour1), single);
    }
}
