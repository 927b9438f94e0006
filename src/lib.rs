// ============================================================
// OPENGD77 CONVERTER CORE
// ============================================================
// Normalization and selection engine for converting TYT/Retevis/
// Baofeng codeplug CSVs and community contact lists into the OpenGD77
// CSV schema. The core is pure in-memory: the host shell reads files,
// renders the preview, and writes the export text to disk.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::use_cases::converter::{Converter, ParseOutcome};
pub use application::use_cases::exporter::export;
pub use application::use_cases::store::{CanonicalStore, LoadOutcome};
pub use application::use_cases::validation::validate;
pub use domain::config::{ConvertConfig, MergePolicy};
pub use domain::error::{ConvertError, Result};
pub use domain::filter::RecordFilter;
pub use domain::record::{FieldValue, ParsedValue, Record, RecordId, RecordKind, RowIssue};
pub use domain::registry::{self, dialects};
pub use domain::report::{StoreCounts, ValidationReport};
pub use domain::schema::{Field, FieldType, Schema};

/// Install a default tracing subscriber. Host shells and test binaries
/// call this once; repeated calls are harmless.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();
}
