// ============================================================
// CSV WRITER
// ============================================================
// Serialize header and rows back to CSV text

use csv::WriterBuilder;

use crate::domain::error::{ConvertError, Result};

/// CSV writer producing in-memory text
pub struct CsvWriter {
    delimiter: u8,
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Emit a header row followed by one row per record. Quoting is
    /// minimal, so values without delimiter characters serialize back
    /// exactly as they were read.
    pub fn write(&self, header: &[&str], rows: &[Vec<String>]) -> Result<String> {
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(Vec::new());

        writer
            .write_record(header)
            .map_err(|e| ConvertError::ParseError(format!("failed to write header: {}", e)))?;
        for row in rows {
            writer
                .write_record(row)
                .map_err(|e| ConvertError::ParseError(format!("failed to write row: {}", e)))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ConvertError::ParseError(format!("failed to flush CSV: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| ConvertError::ParseError(format!("CSV output not UTF-8: {}", e)))
    }
}
