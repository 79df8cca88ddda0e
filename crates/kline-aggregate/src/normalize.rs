//! Raw row to tick normalization.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use kline_types::{KlineError, Result, Tick};
use tracing::{debug, trace};

/// Timestamp formats with an explicit numeric offset.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
];

/// Offset-less or `Z`-suffixed timestamp formats, interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%MZ",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Column layout of a tabular tick source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    /// Index of the timestamp column.
    pub time_column: usize,
    /// Index of the price column.
    pub price_column: usize,
    /// Index of the optional volume column.
    pub volume_column: Option<usize>,
    /// Rows with fewer fields than this are dropped.
    pub min_columns: usize,
    /// Number of leading lines skipped before data rows.
    pub header_rows: usize,
    /// Field delimiter.
    pub delimiter: u8,
}

impl Default for RowLayout {
    fn default() -> Self {
        Self::flux()
    }
}

impl RowLayout {
    /// Layout of an InfluxDB Flux CSV export.
    ///
    /// Columns are
    /// `,result,table,_start,_stop,_time,_value,_field,_measurement,category,pyth_id,symbol`
    /// with a single header line.
    #[must_use]
    pub const fn flux() -> Self {
        Self {
            time_column: 5,
            price_column: 6,
            volume_column: None,
            min_columns: 12,
            header_rows: 1,
            delimiter: b',',
        }
    }

    /// Two-column `time,price` layout with a header line.
    #[must_use]
    pub const fn simple() -> Self {
        Self {
            time_column: 0,
            price_column: 1,
            volume_column: None,
            min_columns: 2,
            header_rows: 1,
            delimiter: b',',
        }
    }

    /// Resolves named columns against a header line.
    ///
    /// The resulting layout skips one header line and requires every row to
    /// reach the last referenced column.
    ///
    /// # Errors
    ///
    /// Returns an error if the header cannot be read or a named column is
    /// not present.
    pub fn from_header(
        header: &str,
        time_name: &str,
        price_name: &str,
        volume_name: Option<&str>,
    ) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .from_reader(header.as_bytes());
        let record = reader
            .records()
            .next()
            .ok_or_else(|| KlineError::Input("empty header".to_string()))?
            .map_err(|e| KlineError::Input(e.to_string()))?;

        let position = |name: &str| {
            record
                .iter()
                .position(|field| field.trim() == name)
                .ok_or_else(|| KlineError::Input(format!("column '{name}' not found in header")))
        };

        let time_column = position(time_name)?;
        let price_column = position(price_name)?;
        let volume_column = volume_name.map(position).transpose()?;
        let last = time_column
            .max(price_column)
            .max(volume_column.unwrap_or(0));

        Ok(Self {
            time_column,
            price_column,
            volume_column,
            min_columns: last + 1,
            header_rows: 1,
            delimiter: b',',
        })
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the volume column.
    #[must_use]
    pub const fn with_volume_column(mut self, column: usize) -> Self {
        self.volume_column = Some(column);
        if self.min_columns <= column {
            self.min_columns = column + 1;
        }
        self
    }

    /// Normalizes one parsed row into a tick.
    ///
    /// An unusable volume field leaves the tick without volume rather than
    /// dropping the row.
    #[must_use]
    pub fn normalize_record(&self, record: &StringRecord) -> Option<Tick> {
        if record.len() < self.min_columns {
            return None;
        }
        let tick = normalize(
            record.get(self.time_column)?,
            record.get(self.price_column)?,
        )?;

        let volume = self
            .volume_column
            .and_then(|column| record.get(column))
            .and_then(parse_volume);
        Some(match volume {
            Some(volume) => tick.with_volume(volume),
            None => tick,
        })
    }
}

/// Parses a timestamp into whole unix seconds.
///
/// Accepts RFC 3339, RFC 2822, ISO 8601 with basic (`+0000`) offsets or
/// minute precision, and offset-less date-times and dates (taken as UTC; a
/// bare date is midnight). Sub-second precision is truncated.
#[must_use]
pub fn parse_time(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.timestamp());
    }
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(dt.timestamp());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|dt| dt.and_utc().timestamp())
}

/// Parses a price, rejecting anything that is not a finite positive number.
#[must_use]
pub fn parse_price(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price > 0.0)
}

fn parse_volume(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|volume| volume.is_finite() && *volume >= 0.0)
}

/// Normalizes a `(time, price)` pair.
///
/// Returns `None` when either field is empty or unparseable.
#[must_use]
pub fn normalize(time: &str, price: &str) -> Option<Tick> {
    let time = parse_time(time)?;
    let price = parse_price(price)?;
    Some(Tick::new(time, price))
}

/// Normalizes `(time, price)` string pairs, dropping malformed ones.
pub fn normalize_records<I, T, P>(rows: I) -> Vec<Tick>
where
    I: IntoIterator<Item = (T, P)>,
    T: AsRef<str>,
    P: AsRef<str>,
{
    let mut dropped = 0usize;
    let ticks: Vec<Tick> = rows
        .into_iter()
        .filter_map(|(time, price)| {
            let tick = normalize(time.as_ref(), price.as_ref());
            if tick.is_none() {
                trace!(time = time.as_ref(), price = price.as_ref(), "dropped tick row");
                dropped += 1;
            }
            tick
        })
        .collect();

    debug!(kept = ticks.len(), dropped, "normalized tick records");
    ticks
}

/// Normalizes delimited text according to `layout`.
///
/// Leading `header_rows` lines are skipped, `#` annotation lines and blank
/// lines are ignored, and every other row either becomes a tick or is
/// dropped.
#[must_use]
pub fn normalize_csv(text: &str, layout: &RowLayout) -> Vec<Tick> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .delimiter(layout.delimiter)
        .from_reader(text.as_bytes());

    let mut ticks = Vec::new();
    let mut dropped = 0usize;

    for result in reader.records().skip(layout.header_rows) {
        match result
            .ok()
            .and_then(|record| layout.normalize_record(&record))
        {
            Some(tick) => ticks.push(tick),
            None => dropped += 1,
        }
    }

    debug!(kept = ticks.len(), dropped, "normalized tick rows");
    ticks
}
