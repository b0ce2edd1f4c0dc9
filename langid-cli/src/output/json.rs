//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use langid_core::Prediction;
use serde::Serialize;
use std::io::Write;

/// JSON formatter - outputs all records as one JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    records: Vec<RecordData>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize)]
pub struct RecordData {
    /// Where the text came from
    pub source: String,
    /// Predictions, best first
    pub predictions: Vec<Prediction>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            records: Vec::new(),
        }
    }

    /// Consume the formatter and return the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn write_record(&mut self, source: &str, predictions: &[Prediction]) -> Result<()> {
        self.records.push(RecordData {
            source: source.to_string(),
            predictions: predictions.to_vec(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.records)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
