//! Output writing for the kline CLI.

use anyhow::{Context, Result, bail};
use kline_lib::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write candles to `output` (or stdout) in the given format.
pub(crate) fn write_candles(
    candles: &[Candle],
    request: &KlineRequest,
    output: Option<&Path>,
    format: OutputFormat,
    pretty: bool,
) -> Result<()> {
    let writer: Box<dyn Write + Send> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None if format.is_binary() => bail!("{format} output needs --output"),
        None => Box::new(BufWriter::new(std::io::stdout())),
    };

    match format {
        OutputFormat::Csv => {
            let formatter = CsvFormatter::new();
            formatter.write_candles(candles, writer)?;
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new().with_pretty(pretty);
            formatter.write_candles(candles, writer)?;
        }
        OutputFormat::Ndjson => {
            let formatter = JsonFormatter::ndjson();
            formatter.write_candles(candles, writer)?;
        }
        OutputFormat::Envelope => {
            let response = KlineResponse::new(request, candles.to_vec());
            let formatter = JsonFormatter::new().with_pretty(pretty);
            formatter.write_response(&response, writer)?;
        }
        OutputFormat::Parquet => {
            #[cfg(feature = "parquet")]
            {
                let formatter = ParquetFormatter::new();
                formatter.write_candles(candles, writer)?;
            }
            #[cfg(not(feature = "parquet"))]
            {
                bail!("Parquet support not compiled in");
            }
        }
    }

    Ok(())
}
