//! Intervals command implementation.

use anyhow::Result;
use kline_lib::prelude::*;

/// List the supported candle intervals with their widths.
pub(crate) fn list_intervals() -> Result<()> {
    println!("{:<10} {:>10}", "INTERVAL", "SECONDS");
    println!("{}", "-".repeat(21));

    for interval in Interval::all() {
        println!("{:<10} {:>10}", interval.as_str(), interval.seconds());
    }

    Ok(())
}
