// ============================================================
// SCHEMA TYPES
// ============================================================
// Declarative description of one CSV dialect: ordered columns with
// types, requiredness, and export defaults

use super::record::RecordKind;

/// Static table mapping a dialect's tokens to canonical tokens,
/// e.g. ("1", "Group") for TYT call types.
pub type ChoiceMap = [(&'static str, &'static str)];

/// Semantic type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Integer,
    /// MHz text in files, integer Hz in memory
    Frequency,
    /// Enumerated value with an explicit accepted-token set
    Choice(&'static ChoiceMap),
}

/// One column of a dialect
#[derive(Debug, Clone, Copy)]
pub struct Field {
    /// Header name as the dialect spells it
    pub column: &'static str,

    /// Vendor-neutral slot this column maps into/out of
    pub canonical: &'static str,

    pub field_type: FieldType,

    /// Required fields drive dialect detection and validity
    pub required: bool,

    /// Export filler when a record has no value for this column
    pub default: Option<&'static str>,
}

impl Field {
    pub const fn new(
        column: &'static str,
        canonical: &'static str,
        field_type: FieldType,
    ) -> Self {
        Self {
            column,
            canonical,
            field_type,
            required: false,
            default: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn default_value(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }
}

/// Ordered sequence of fields plus dialect metadata.
/// Invariant: column names are unique within a schema.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    /// Dialect id, e.g. "tyt-contacts-v1"
    pub id: &'static str,

    pub kind: RecordKind,

    /// Tie-break on detection: vendor dialects rank above community ones
    pub priority: u8,

    pub delimiter: u8,

    pub fields: &'static [Field],
}

impl Schema {
    pub fn field(&self, canonical_name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.canonical == canonical_name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.required)
    }

    /// Header row in declaration order
    pub fn header(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.column).collect()
    }
}

/// Canonical field names shared by parser, store, and exporter
pub mod canonical {
    pub const CONTACT_NAME: &str = "contact_name";
    pub const CALL_ID: &str = "call_id";
    pub const CALL_TYPE: &str = "call_type";
    pub const CALL_TONE: &str = "call_tone";
    pub const CALLSIGN: &str = "callsign";
    pub const OPERATOR_NAME: &str = "operator_name";

    pub const CHANNEL_NUMBER: &str = "channel_number";
    pub const CHANNEL_NAME: &str = "channel_name";
    pub const CHANNEL_MODE: &str = "channel_mode";
    pub const RX_FREQUENCY: &str = "rx_frequency";
    pub const TX_FREQUENCY: &str = "tx_frequency";
    pub const BANDWIDTH: &str = "bandwidth";
    pub const COLOR_CODE: &str = "color_code";
    pub const TIMESLOT: &str = "timeslot";
    pub const RX_TONE: &str = "rx_tone";
    pub const TX_TONE: &str = "tx_tone";
}

/// Canonical tokens for enumerated fields
pub mod tokens {
    pub const GROUP: &str = "Group";
    pub const PRIVATE: &str = "Private";
    pub const ANALOGUE: &str = "Analogue";
    pub const DIGITAL: &str = "Digital";
}

#[cfg(test)]
mod tests {
    use super::*;

    static TEST_FIELDS: [Field; 2] = [
        Field::new("Contact Name", canonical::CONTACT_NAME, FieldType::Text).required(),
        Field::new("Call ID", canonical::CALL_ID, FieldType::Integer).required(),
    ];

    #[test]
    fn test_field_lookup_by_canonical_name() {
        let schema = Schema {
            id: "test",
            kind: RecordKind::Contact,
            priority: 1,
            delimiter: b',',
            fields: &TEST_FIELDS,
        };
        assert_eq!(
            schema.field(canonical::CALL_ID).map(|f| f.column),
            Some("Call ID")
        );
        assert!(schema.field("no_such_slot").is_none());
        assert_eq!(schema.header(), vec!["Contact Name", "Call ID"]);
    }
}
