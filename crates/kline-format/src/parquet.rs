//! Apache Parquet output format.

use arrow::array::{Float64Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use kline_types::Candle;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::io::Write;
use std::sync::Arc;

use crate::{FormatError, Formatter};

/// Parquet formatter.
#[derive(Debug, Clone)]
pub struct ParquetFormatter {
    /// Row group size (number of rows per group).
    row_group_size: usize,
    /// Compression codec.
    compression: Compression,
}

impl Default for ParquetFormatter {
    fn default() -> Self {
        Self {
            row_group_size: 100_000,
            compression: Compression::SNAPPY,
        }
    }
}

impl ParquetFormatter {
    /// Creates a new Parquet formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row group size.
    #[must_use]
    pub const fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Sets the compression codec.
    #[must_use]
    pub const fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Arrow schema for candles. `time` stays in unix seconds.
    fn candle_schema() -> Schema {
        Schema::new(vec![
            Field::new("time", DataType::Int64, false),
            Field::new("open", DataType::Float64, false),
            Field::new("high", DataType::Float64, false),
            Field::new("low", DataType::Float64, false),
            Field::new("close", DataType::Float64, false),
            Field::new("volume", DataType::Float64, false),
        ])
    }

    fn candles_to_batch(candles: &[Candle]) -> Result<RecordBatch, FormatError> {
        let column = |f: fn(&Candle) -> f64| Float64Array::from_iter_values(candles.iter().map(f));

        RecordBatch::try_new(
            Arc::new(Self::candle_schema()),
            vec![
                Arc::new(Int64Array::from_iter_values(candles.iter().map(|c| c.time))),
                Arc::new(column(|c| c.open)),
                Arc::new(column(|c| c.high)),
                Arc::new(column(|c| c.low)),
                Arc::new(column(|c| c.close)),
                Arc::new(column(|c| c.volume)),
            ],
        )
        .map_err(|e| FormatError::Parquet(e.to_string()))
    }
}

impl Formatter for ParquetFormatter {
    fn write_candles<W: Write + Send>(
        &self,
        candles: &[Candle],
        writer: W,
    ) -> Result<(), FormatError> {
        let schema = Arc::new(Self::candle_schema());
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut arrow_writer = ArrowWriter::try_new(writer, schema, Some(props))
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        for chunk in candles.chunks(self.row_group_size.max(1)) {
            let batch = Self::candles_to_batch(chunk)?;
            arrow_writer
                .write(&batch)
                .map_err(|e| FormatError::Parquet(e.to_string()))?;
        }

        arrow_writer
            .close()
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        Ok(())
    }

    fn extension(&self) -> &str {
        "parquet"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parquet_candles() {
        let formatter = ParquetFormatter::new().with_row_group_size(1);
        let candles = vec![Candle::flat(60, 1.5), Candle::flat(120, 1.5)];
        let mut output = Cursor::new(Vec::new());

        formatter.write_candles(&candles, &mut output).unwrap();

        // Parquet files start and end with "PAR1" magic bytes
        let data = output.into_inner();
        assert!(data.len() > 8);
        assert_eq!(&data[0..4], b"PAR1");
        assert_eq!(&data[data.len() - 4..], b"PAR1");
    }

    #[test]
    fn test_candle_schema() {
        let schema = ParquetFormatter::candle_schema();
        assert_eq!(schema.fields().len(), 6);
        assert_eq!(
            schema.field_with_name("time").unwrap().data_type(),
            &DataType::Int64
        );
        assert!(schema.field_with_name("volume").is_ok());
    }

    #[test]
    fn test_batch_columns() {
        let batch =
            ParquetFormatter::candles_to_batch(&[Candle::new(60, 1.0, 2.0, 0.5, 1.5, 3.0)])
                .unwrap();
        assert_eq!(batch.num_rows(), 1);
        assert_eq!(batch.num_columns(), 6);
    }
}
