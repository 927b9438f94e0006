// ============================================================
// CSV READER
// ============================================================
// Byte decoding, delimiter probing, and row framing for input files

use csv::{ReaderBuilder, Trim};

use crate::domain::error::{ConvertError, Result};

/// Header row plus data rows, as read from one file
#[derive(Debug, Clone)]
pub struct RawCsv {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// CSV reader over in-memory text
pub struct CsvReader {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Whether to trim whitespace from values
    trim: bool,
}

impl Default for CsvReader {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
}

impl CsvReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether to trim whitespace
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Frame content into a header row and data rows
    pub fn read(&self, content: &str) -> Result<RawCsv> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| ConvertError::ParseError(format!("failed to read CSV header: {}", e)))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                ConvertError::ParseError(format!("failed to read CSV row {}: {}", index + 1, e))
            })?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(RawCsv { headers, rows })
    }
}

/// Decode raw file bytes to text. UTF-8 (with or without BOM) is taken
/// as-is; anything else falls back to Windows-1252, which also covers
/// the ISO-8859-1 exports some CPS tools produce.
pub fn decode_bytes(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xef\xbb\xbf".as_slice()).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    }
}

/// Choose between semicolon and comma by counting occurrences in the
/// header row outside quoted segments. Comma wins ties.
pub fn detect_delimiter(content: &str) -> u8 {
    let header = content.lines().next().unwrap_or("");

    let mut commas = 0usize;
    let mut semicolons = 0usize;
    let mut in_quotes = false;

    for ch in header.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => commas += 1,
            ';' if !in_quotes => semicolons += 1,
            _ => {}
        }
    }

    if semicolons > commas {
        b';'
    } else {
        b','
    }
}
