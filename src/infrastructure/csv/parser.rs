// ============================================================
// RECORD PARSER
// ============================================================
// Schema-driven coercion of raw CSV rows into canonical records.
// One generic parser; everything dialect-specific lives in the schema
// tables plus a small per-kind normalization pass.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::reader::RawCsv;
use crate::domain::record::{FieldValue, ParsedValue, Record, RecordId, RecordKind, RowIssue};
use crate::domain::registry::dialects;
use crate::domain::schema::{canonical, tokens, Field, FieldType, Schema};

// Accepts "145.5", "145.50000", "431,0125" (comma decimals appear in
// semicolon-delimited exports) and an optional MHz suffix.
static FREQUENCY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)(?:[.,](\d+))?\s*(?:[Mm][Hh][Zz])?$").unwrap());

/// Parse a frequency token in MHz to integer Hz. Digits beyond Hz
/// resolution are dropped.
pub fn parse_frequency(raw: &str) -> Option<u64> {
    let caps = FREQUENCY_PATTERN.captures(raw.trim())?;
    let whole: u64 = caps.get(1)?.as_str().parse().ok()?;
    let mut hz = whole.checked_mul(1_000_000)?;

    if let Some(fraction) = caps.get(2) {
        let mut scale = 100_000u64;
        for digit in fraction.as_str().chars() {
            if scale == 0 {
                break;
            }
            hz += u64::from(digit.to_digit(10)?) * scale;
            scale /= 10;
        }
    }
    Some(hz)
}

/// Render integer Hz in the five-decimal MHz form the CSV dialects use
pub fn format_mhz(hz: u64) -> String {
    format!("{}.{:05}", hz / 1_000_000, (hz % 1_000_000) / 10)
}

/// All records of one file plus the flattened issue list for reporting
#[derive(Debug, Clone)]
pub struct ParsedRecords {
    pub records: Vec<Record>,
    pub issues: Vec<RowIssue>,
}

/// Generic parser for one schema
pub struct RecordParser {
    schema: &'static Schema,
}

impl RecordParser {
    pub fn new(schema: &'static Schema) -> Self {
        Self { schema }
    }

    /// Coerce every data row into a canonical record. A row that fails
    /// coercion on a required field still yields a record, flagged
    /// invalid; one bad row never aborts the file.
    pub fn parse(&self, csv: &RawCsv) -> ParsedRecords {
        // Column positions resolved once per file
        let columns: Vec<(&Field, Option<usize>)> = self
            .schema
            .fields
            .iter()
            .map(|field| {
                let position = csv
                    .headers
                    .iter()
                    .position(|h| h.trim().eq_ignore_ascii_case(field.column));
                (field, position)
            })
            .collect();

        let mut records = Vec::with_capacity(csv.rows.len());
        let mut all_issues = Vec::new();

        for (row_index, row) in csv.rows.iter().enumerate() {
            let row_no = row_index as u32 + 1;
            let mut values: HashMap<String, FieldValue> = HashMap::new();
            let mut issues: Vec<RowIssue> = Vec::new();
            let mut valid = true;

            for (field, position) in &columns {
                let raw = position
                    .and_then(|i| row.get(i))
                    .map(|v| v.trim())
                    .unwrap_or("");

                if raw.is_empty() {
                    if field.required {
                        issues.push(RowIssue {
                            row: row_no,
                            column: field.column.to_string(),
                            message: "missing value".to_string(),
                        });
                        valid = false;
                    }
                    continue;
                }

                match coerce(field, raw) {
                    Ok(value) => {
                        values.insert(field.canonical.to_string(), value);
                    }
                    Err(message) => {
                        issues.push(RowIssue {
                            row: row_no,
                            column: field.column.to_string(),
                            message,
                        });
                        if field.required {
                            valid = false;
                        }
                    }
                }
            }

            let identity = match self.schema.kind {
                RecordKind::Contact => {
                    self.finish_contact(row_no, &mut values, &mut issues, &mut valid)
                }
                RecordKind::Channel => {
                    self.finish_channel(row_no, &mut values, &mut issues, &mut valid)
                }
            };

            all_issues.extend(issues.iter().cloned());
            records.push(Record {
                kind: self.schema.kind,
                source_dialect: self.schema.id.to_string(),
                identity,
                values,
                issues,
                valid,
            });
        }

        debug!(
            dialect = self.schema.id,
            records = records.len(),
            issues = all_issues.len(),
            "parsed CSV rows"
        );

        ParsedRecords {
            records,
            issues: all_issues,
        }
    }

    /// Contact normalization: community lists compose a display name
    /// from callsign and operator name and always address privately;
    /// the call id becomes the identity when it is usable.
    fn finish_contact(
        &self,
        row_no: u32,
        values: &mut HashMap<String, FieldValue>,
        issues: &mut Vec<RowIssue>,
        valid: &mut bool,
    ) -> RecordId {
        if self.schema.id == dialects::DC9AL_CONTACTS {
            let callsign = values
                .get(canonical::CALLSIGN)
                .map(|v| v.raw.clone())
                .unwrap_or_default();
            let operator = values
                .get(canonical::OPERATOR_NAME)
                .map(|v| v.raw.clone())
                .unwrap_or_default();
            let display = compose_contact_name(&callsign, &operator);
            if !display.is_empty() {
                values.insert(canonical::CONTACT_NAME.to_string(), FieldValue::text(display));
            }
            values.insert(
                canonical::CALL_TYPE.to_string(),
                FieldValue::choice(tokens::PRIVATE, tokens::PRIVATE),
            );
        }

        match values.get(canonical::CALL_ID).map(|v| v.parsed.clone()) {
            Some(ParsedValue::Integer(id)) if id > 0 && id <= i64::from(u32::MAX) => {
                RecordId::Contact(id as u32)
            }
            Some(ParsedValue::Integer(id)) => {
                issues.push(RowIssue {
                    row: row_no,
                    column: self.column_name(canonical::CALL_ID),
                    message: format!("call id out of range: {}", id),
                });
                *valid = false;
                self.unkeyed(row_no, values)
            }
            // Missing or unparseable id was already reported during coercion
            _ => self.unkeyed(row_no, values),
        }
    }

    /// Channel normalization: assign the 1-based position (or the
    /// file's own channel number), derive bandwidth, and blank the
    /// DMR-only columns for analogue channels.
    fn finish_channel(
        &self,
        row_no: u32,
        values: &mut HashMap<String, FieldValue>,
        _issues: &mut [RowIssue],
        _valid: &mut bool,
    ) -> RecordId {
        let index = match values.get(canonical::CHANNEL_NUMBER).map(|v| &v.parsed) {
            Some(ParsedValue::Integer(n)) if *n > 0 && *n <= i64::from(u32::MAX) => *n as u32,
            _ => row_no,
        };
        values
            .entry(canonical::CHANNEL_NUMBER.to_string())
            .or_insert_with(|| FieldValue::integer(index.to_string(), i64::from(index)));

        let mode = match values.get(canonical::CHANNEL_MODE).map(|v| &v.parsed) {
            Some(ParsedValue::Choice(token)) => Some(token.clone()),
            _ => None,
        };

        match mode.as_deref() {
            Some(tokens::ANALOGUE) => {
                values
                    .entry(canonical::BANDWIDTH.to_string())
                    .or_insert_with(|| FieldValue::text("25"));
                // Colour code and timeslot mean nothing on FM
                values.remove(canonical::COLOR_CODE);
                values.remove(canonical::TIMESLOT);
            }
            Some(tokens::DIGITAL) => {
                for slot in [canonical::COLOR_CODE, canonical::TIMESLOT] {
                    if let Some(ParsedValue::Integer(n)) = values.get(slot).map(|v| &v.parsed) {
                        if *n <= 0 {
                            values.remove(slot);
                        }
                    }
                }
            }
            _ => {}
        }

        // "None" and zero are placeholder tones in the radio exports
        for slot in [canonical::RX_TONE, canonical::TX_TONE] {
            if let Some(value) = values.get(slot) {
                let raw = value.raw.trim();
                if raw.eq_ignore_ascii_case("none")
                    || matches!(raw.parse::<f64>(), Ok(v) if v == 0.0)
                {
                    values.remove(slot);
                }
            }
        }

        match values.get(canonical::CHANNEL_NAME).map(|v| v.raw.clone()) {
            Some(name) if !name.is_empty() => RecordId::Channel {
                name: name.to_lowercase(),
                index,
            },
            _ => self.unkeyed(row_no, values),
        }
    }

    fn unkeyed(&self, row_no: u32, values: &HashMap<String, FieldValue>) -> RecordId {
        let name_slot = match self.schema.kind {
            RecordKind::Contact => canonical::CONTACT_NAME,
            RecordKind::Channel => canonical::CHANNEL_NAME,
        };
        RecordId::Unkeyed {
            name: values
                .get(name_slot)
                .map(|v| v.raw.clone())
                .unwrap_or_default(),
            row: row_no,
        }
    }

    fn column_name(&self, canonical_name: &str) -> String {
        self.schema
            .field(canonical_name)
            .map(|f| f.column.to_string())
            .unwrap_or_else(|| canonical_name.to_string())
    }
}

fn coerce(field: &Field, raw: &str) -> std::result::Result<FieldValue, String> {
    match field.field_type {
        FieldType::Text => Ok(FieldValue::text(raw)),
        FieldType::Integer => raw
            .parse::<i64>()
            .map(|value| FieldValue::integer(raw, value))
            .map_err(|_| format!("not a number: '{}'", raw)),
        FieldType::Frequency => parse_frequency(raw)
            .map(|hz| FieldValue::frequency(raw, hz))
            .ok_or_else(|| format!("not a frequency: '{}'", raw)),
        FieldType::Choice(choices) => choices
            .iter()
            .find(|(token, _)| token.eq_ignore_ascii_case(raw))
            .map(|(_, canonical_token)| FieldValue::choice(raw, *canonical_token))
            .ok_or_else(|| {
                let accepted: Vec<&str> = choices.iter().map(|(token, _)| *token).collect();
                format!(
                    "unexpected value '{}' (accepted: {})",
                    raw,
                    accepted.join(", ")
                )
            }),
    }
}

/// Compose "CALLSIGN Operator Name" the way the community lists are
/// displayed, stripping characters that break downstream CSV tools.
fn compose_contact_name(callsign: &str, operator: &str) -> String {
    let combined = if operator.trim().is_empty() {
        callsign.trim().to_string()
    } else {
        format!("{} {}", callsign.trim(), operator.trim())
    };
    combined
        .replace(['"', '\''], "")
        .replace(',', " ")
        .trim()
        .to_string()
}
