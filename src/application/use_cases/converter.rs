// ============================================================
// CONVERTER FACADE
// ============================================================
// Orchestrate decoding, dialect detection, and parsing; the surface a
// host shell binds to alongside the store, validator, and exporter

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::config::ConvertConfig;
use crate::domain::error::{ConvertError, Result};
use crate::domain::record::{Record, RecordKind, RowIssue};
use crate::domain::report::ValidationReport;

use crate::infrastructure::csv::{decode_bytes, detect_delimiter, detect_dialect, CsvReader, RecordParser};

use super::exporter;
use super::store::CanonicalStore;
use super::validation;

/// Everything one parsed file produced: the detected dialect, the
/// records (valid or not), and the per-row issues for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseOutcome {
    pub dialect: String,
    pub records: Vec<Record>,
    pub issues: Vec<RowIssue>,
}

/// Conversion facade
pub struct Converter {
    config: ConvertConfig,
}

impl Converter {
    /// Create a converter, rejecting unusable configuration up front
    pub fn new(config: ConvertConfig) -> Result<Self> {
        config.validate().map_err(ConvertError::InvalidConfig)?;
        Ok(Self { config })
    }

    /// Create with default configuration
    pub fn default_config() -> Self {
        Self {
            config: ConvertConfig::default(),
        }
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// A store wired to this converter's merge policy
    pub fn new_store(&self) -> CanonicalStore {
        CanonicalStore::with_merge_policy(self.config.merge_policy)
    }

    /// Detect the dialect of one file and parse every row. Nothing is
    /// loaded anywhere on failure; the caller feeds the outcome's
    /// records into a store.
    pub fn detect_and_parse(
        &self,
        text: &str,
        hint: Option<RecordKind>,
    ) -> Result<ParseOutcome> {
        let end = text.len().min(self.config.max_probe_bytes);
        // Fall back to the whole text when the cap splits a character
        let probe = text.get(..end).unwrap_or(text);
        let delimiter = detect_delimiter(probe);

        let raw = CsvReader::new().with_delimiter(delimiter).read(text)?;
        let schema = detect_dialect(&raw.headers, hint)?;
        let parsed = RecordParser::new(schema).parse(&raw);

        info!(
            dialect = schema.id,
            records = parsed.records.len(),
            issues = parsed.issues.len(),
            "detected and parsed file"
        );

        Ok(ParseOutcome {
            dialect: schema.id.to_string(),
            records: parsed.records,
            issues: parsed.issues,
        })
    }

    /// Same as `detect_and_parse`, starting from undecoded file bytes
    pub fn detect_and_parse_bytes(
        &self,
        bytes: &[u8],
        hint: Option<RecordKind>,
    ) -> Result<ParseOutcome> {
        let text = decode_bytes(bytes);
        self.detect_and_parse(&text, hint)
    }

    /// Hold the current selection against the firmware limits
    pub fn validate(&self, store: &CanonicalStore) -> ValidationReport {
        validation::validate(store, &self.config)
    }

    /// Export the selected records of the target dialect's kind. Runs a
    /// fresh validation first so a stale report can never unblock an
    /// over-limit contacts export.
    pub fn export(&self, store: &CanonicalStore, target_dialect: &str) -> Result<String> {
        let report = self.validate(store);
        exporter::export(store, target_dialect, &report)
    }
}
