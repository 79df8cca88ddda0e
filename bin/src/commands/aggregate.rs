//! Aggregate command implementation.
//!
//! Reads a tick export, stands in for the upstream fetch by applying the
//! request's time range and row limit, then aggregates and writes candles.

use crate::display::write_candles;
use anyhow::{Context, Result};
use clap::Args;
use kline_lib::prelude::*;
use kline_lib::{DEFAULT_LIMIT, normalize_csv};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Arguments for `kline aggregate`.
#[derive(Args)]
pub(crate) struct AggregateArgs {
    /// Tick CSV file, or `-` to read stdin
    input: PathBuf,

    /// Candle interval (1m, 3m, 5m, 15m, 1h, 4h, 1d)
    #[arg(short, long)]
    interval: Interval,

    /// Instrument symbol for the envelope format. Defaults to the input file stem
    #[arg(short, long)]
    symbol: Option<String>,

    /// Output file path. Defaults to stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (csv, json, ndjson, envelope, parquet)
    #[arg(short, long, default_value = "csv")]
    format: OutputFormat,

    /// Only use ticks at or after this unix timestamp
    #[arg(long)]
    from: Option<i64>,

    /// Only use ticks before this unix timestamp
    #[arg(long)]
    to: Option<i64>,

    /// Maximum number of valid ticks used after range filtering, earliest first
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    limit: usize,

    /// Name of the timestamp column (default layout: Flux CSV export)
    #[arg(long)]
    time_column: Option<String>,

    /// Name of the price column
    #[arg(long)]
    price_column: Option<String>,

    /// Name of an optional volume column
    #[arg(long)]
    volume_column: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

/// Aggregate a tick export into candles.
pub(crate) fn aggregate(args: &AggregateArgs, quiet: bool) -> Result<()> {
    let text = read_input(&args.input)?;

    let symbol = args
        .symbol
        .clone()
        .or_else(|| {
            args.input
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "UNKNOWN".to_string());
    let request = KlineRequest::new(symbol, args.interval)
        .with_range(args.from, args.to)
        .with_limit(args.limit);

    let layout = resolve_layout(&text, args)?;
    let (ticks, _) = select_ticks(normalize_csv(&text, &layout), &request);
    info!(
        symbol = %request.symbol,
        interval = %request.interval,
        ticks = ticks.len(),
        "aggregating"
    );

    let (candles, summary) =
        CandleAggregator::new(request.interval).aggregate_with_summary(ticks);
    info!(
        real = summary.real,
        filled = summary.filled,
        "created {} candles",
        summary.total()
    );

    write_candles(
        &candles,
        &request,
        args.output.as_deref(),
        args.format,
        args.pretty,
    )?;

    if !quiet && let Some(output) = &args.output {
        eprintln!(
            "{} candles ({} real, {} filled) written to: {}",
            summary.total(),
            summary.real,
            summary.filled,
            output.display()
        );
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read ticks from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read ticks from {}", path.display()))
}

/// Picks the row layout: named columns when any column flag is given,
/// otherwise the Flux export layout.
fn resolve_layout(text: &str, args: &AggregateArgs) -> Result<RowLayout> {
    if args.time_column.is_none() && args.price_column.is_none() && args.volume_column.is_none()
    {
        return Ok(RowLayout::flux());
    }

    let header = text
        .lines()
        .find(|line| !line.trim().is_empty() && !line.starts_with('#'))
        .context("Input has no header line")?;

    RowLayout::from_header(
        header,
        args.time_column.as_deref().unwrap_or("_time"),
        args.price_column.as_deref().unwrap_or("_value"),
        args.volume_column.as_deref(),
    )
    .context("Failed to resolve columns")
}

/// Applies the request's time range and row limit, keeping the earliest
/// ticks. Returns the kept ticks and how many the limit cut off.
fn select_ticks(mut ticks: Vec<Tick>, request: &KlineRequest) -> (Vec<Tick>, usize) {
    ticks.retain(|tick| {
        request.from.is_none_or(|from| tick.time >= from)
            && request.to.is_none_or(|to| tick.time < to)
    });
    ticks.sort_by_key(|tick| tick.time);

    let truncated = ticks.len().saturating_sub(request.limit);
    if truncated > 0 {
        warn!(
            limit = request.limit,
            truncated, "tick limit reached, later ticks dropped (raise --limit to keep them)"
        );
        ticks.truncate(request.limit);
    }
    (ticks, truncated)
}
