//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use langid_core::Prediction;
use std::io::Write;

/// Tab-separated formatter: the source followed by `language<TAB>score`
/// for every prediction, one input per line
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the formatter and return the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn write_record(&mut self, source: &str, predictions: &[Prediction]) -> Result<()> {
        write!(self.writer, "{source}")?;
        for prediction in predictions {
            write!(self.writer, "\t{}\t{:.6}", prediction.language, prediction.score)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
