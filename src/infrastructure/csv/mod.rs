// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// CSV mechanics: decoding, delimiter probing, dialect detection,
// record parsing, and serialization

mod detector;
mod parser;
mod reader;
mod writer;

pub use detector::detect_dialect;
pub use parser::{format_mhz, parse_frequency, ParsedRecords, RecordParser};
pub use reader::{decode_bytes, detect_delimiter, CsvReader, RawCsv};
pub use writer::CsvWriter;
