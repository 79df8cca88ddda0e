//! Synthetic tick data for kline benchmarks.

use chrono::{DateTime, SecondsFormat};
use kline_lib::Tick;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Shape of a generated tick series.
#[derive(Debug, Clone, Copy)]
pub struct SeriesConfig {
    /// Number of ticks.
    pub ticks: usize,
    /// Mean spacing between ticks in seconds.
    pub spacing: i64,
    /// Every `quiet_every`-th tick is followed by an hour without data,
    /// forcing gap filling. Zero disables quiet periods.
    pub quiet_every: usize,
    /// Seed for the deterministic price walk.
    pub seed: u64,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            ticks: 10_000,
            spacing: 7,
            quiet_every: 500,
            seed: 0x5eed,
        }
    }
}

/// Generates a random-walk tick series starting at 2024-01-01T00:00:00Z.
#[must_use]
pub fn synthetic_ticks(config: &SeriesConfig) -> Vec<Tick> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut time = 1_704_067_200i64;
    let mut price = 100.0f64;
    let mut ticks = Vec::with_capacity(config.ticks);

    for i in 0..config.ticks {
        time += rng.gen_range(0..2 * config.spacing.max(1));
        if config.quiet_every > 0 && i > 0 && i % config.quiet_every == 0 {
            time += 3600;
        }
        price = (price * (1.0 + rng.gen_range(-0.001..0.001))).max(0.01);
        ticks.push(Tick::new(time, price));
    }

    ticks
}

/// Renders ticks as a Flux CSV export.
///
/// Ticks outside chrono's representable range are skipped.
#[must_use]
pub fn flux_csv(ticks: &[Tick]) -> String {
    let mut text = String::from(
        ",result,table,_start,_stop,_time,_value,_field,_measurement,category,pyth_id,symbol\n",
    );
    for tick in ticks {
        let Some(time) = DateTime::from_timestamp(tick.time, 0) else {
            continue;
        };
        text.push_str(&format!(
            ",_result,0,2024-01-01T00:00:00Z,2024-02-01T00:00:00Z,{},{},price,prices,crypto,bench,BENCH\n",
            time.to_rfc3339_opts(SecondsFormat::Secs, true),
            tick.price
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_is_deterministic() {
        let config = SeriesConfig {
            ticks: 100,
            ..Default::default()
        };
        assert_eq!(synthetic_ticks(&config), synthetic_ticks(&config));
    }

    #[test]
    fn test_flux_csv_rows() {
        let text = flux_csv(&[Tick::new(1_704_067_265, 42.5)]);
        let row = text.lines().nth(1).unwrap();
        assert!(row.contains(",2024-01-01T00:01:05Z,42.5,"));
        assert_eq!(row.split(',').count(), 12);
    }

    #[test]
    fn test_seed_changes_series() {
        let a = synthetic_ticks(&SeriesConfig {
            ticks: 20,
            seed: 1,
            ..Default::default()
        });
        let b = synthetic_ticks(&SeriesConfig {
            ticks: 20,
            seed: 2,
            ..Default::default()
        });
        assert_ne!(a, b);
    }

    #[test]
    fn test_flux_csv_normalizes_back() {
        let ticks = synthetic_ticks(&SeriesConfig {
            ticks: 50,
            ..Default::default()
        });
        let parsed = kline_lib::normalize_csv(&flux_csv(&ticks), &kline_lib::RowLayout::flux());
        assert_eq!(parsed, ticks);
    }
}
