// ============================================================
// RECORD TYPES
// ============================================================
// Canonical in-memory representation of one parsed CSV row

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::schema::canonical;

/// Kind of programming data a record carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Contact,
    Channel,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Contact => write!(f, "Contact"),
            RecordKind::Channel => write!(f, "Channel"),
        }
    }
}

/// Stable identity used for de-duplication across loaded files and as
/// the selection key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordId {
    /// DMR call id
    Contact(u32),
    /// Channel name (lowercased) plus 1-based position
    Channel { name: String, index: u32 },
    /// Fallback for rows whose natural key could not be parsed
    Unkeyed { name: String, row: u32 },
}

/// One coerced cell: the exact input text plus its typed interpretation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValue {
    /// Original text as it appeared in the source file
    pub raw: String,

    /// Typed interpretation of `raw`
    pub parsed: ParsedValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParsedValue {
    Text(String),
    Integer(i64),
    /// Frequencies are normalized to integer Hz
    FrequencyHz(u64),
    /// Canonical token of an enumerated field (e.g. "Group", "Digital")
    Choice(String),
}

impl FieldValue {
    pub fn text(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let parsed = ParsedValue::Text(raw.clone());
        Self { raw, parsed }
    }

    pub fn integer(raw: impl Into<String>, value: i64) -> Self {
        Self {
            raw: raw.into(),
            parsed: ParsedValue::Integer(value),
        }
    }

    pub fn frequency(raw: impl Into<String>, hz: u64) -> Self {
        Self {
            raw: raw.into(),
            parsed: ParsedValue::FrequencyHz(hz),
        }
    }

    pub fn choice(raw: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            parsed: ParsedValue::Choice(token.into()),
        }
    }
}

/// A per-row, non-fatal parsing problem. Collected and surfaced to the
/// caller; never aborts the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowIssue {
    /// 1-based data row (header excluded)
    pub row: u32,

    /// Column name as spelled in the source file
    pub column: String,

    pub message: String,
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}, column '{}': {}", self.row, self.column, self.message)
    }
}

/// One parsed row in canonical form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub kind: RecordKind,

    /// Dialect id of the schema that produced this record
    pub source_dialect: String,

    pub identity: RecordId,

    /// Canonical field name -> value
    pub values: HashMap<String, FieldValue>,

    pub issues: Vec<RowIssue>,

    /// False when any issue touches a required field
    pub valid: bool,
}

impl Record {
    pub fn value(&self, canonical_name: &str) -> Option<&FieldValue> {
        self.values.get(canonical_name)
    }

    /// Raw text of a canonical field, if present
    pub fn raw(&self, canonical_name: &str) -> Option<&str> {
        self.values.get(canonical_name).map(|v| v.raw.as_str())
    }

    /// Name shown in list views: contact name or channel name
    pub fn display_name(&self) -> &str {
        let slot = match self.kind {
            RecordKind::Contact => canonical::CONTACT_NAME,
            RecordKind::Channel => canonical::CHANNEL_NAME,
        };
        self.raw(slot).unwrap_or("")
    }

    /// Canonical category token: Group/Private for contacts,
    /// Analogue/Digital for channels.
    pub fn category(&self) -> Option<&str> {
        let slot = match self.kind {
            RecordKind::Contact => canonical::CALL_TYPE,
            RecordKind::Channel => canonical::CHANNEL_MODE,
        };
        match self.values.get(slot).map(|v| &v.parsed) {
            Some(ParsedValue::Choice(token)) => Some(token.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(name: &str, id: u32, call_type: &str) -> Record {
        let mut values = HashMap::new();
        values.insert(canonical::CONTACT_NAME.to_string(), FieldValue::text(name));
        values.insert(
            canonical::CALL_ID.to_string(),
            FieldValue::integer(id.to_string(), id as i64),
        );
        values.insert(
            canonical::CALL_TYPE.to_string(),
            FieldValue::choice(call_type, call_type),
        );
        Record {
            kind: RecordKind::Contact,
            source_dialect: "tyt-contacts-v1".to_string(),
            identity: RecordId::Contact(id),
            values,
            issues: Vec::new(),
            valid: true,
        }
    }

    #[test]
    fn test_display_name_and_category() {
        let rec = contact("DL1ABC Hans", 2621001, "Private");
        assert_eq!(rec.display_name(), "DL1ABC Hans");
        assert_eq!(rec.category(), Some("Private"));
    }

    #[test]
    fn test_field_value_keeps_raw_text() {
        let freq = FieldValue::frequency("145.50000", 145_500_000);
        assert_eq!(freq.raw, "145.50000");
        assert_eq!(freq.parsed, ParsedValue::FrequencyHz(145_500_000));
    }

    #[test]
    fn test_row_issue_names_row_and_column() {
        let issue = RowIssue {
            row: 3,
            column: "Call ID".to_string(),
            message: "not a number: 'abc'".to_string(),
        };
        assert_eq!(
            issue.to_string(),
            "row 3, column 'Call ID': not a number: 'abc'"
        );
    }
}
