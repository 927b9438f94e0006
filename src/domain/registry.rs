// ============================================================
// SCHEMA REGISTRY
// ============================================================
// Static, process-wide table of every supported CSV dialect.
// Initialized once; never mutated at runtime. New dialects are added
// here as data, not as code paths.

use super::error::{ConvertError, Result};
use super::record::RecordKind;
use super::schema::{canonical, tokens, ChoiceMap, Field, FieldType, Schema};

/// Registered dialect ids
pub mod dialects {
    pub const TYT_CONTACTS: &str = "tyt-contacts-v1";
    pub const TYT_CHANNELS: &str = "tyt-channels-v1";
    pub const DC9AL_CONTACTS: &str = "dc9al-contacts";
    pub const OPENGD77_CONTACTS: &str = "opengd77-contacts";
    pub const OPENGD77_CHANNELS: &str = "opengd77-channels";
}

// TYT firmware encodes enumerations numerically; OpenGD77 spells them out.
static CALL_TYPE_TYT: &ChoiceMap = &[("1", tokens::GROUP), ("2", tokens::PRIVATE)];
static CALL_TYPE_GD77: &ChoiceMap = &[
    (tokens::GROUP, tokens::GROUP),
    (tokens::PRIVATE, tokens::PRIVATE),
];
static CHANNEL_MODE_TYT: &ChoiceMap = &[("1", tokens::ANALOGUE), ("2", tokens::DIGITAL)];
static CHANNEL_MODE_GD77: &ChoiceMap = &[
    (tokens::ANALOGUE, tokens::ANALOGUE),
    (tokens::DIGITAL, tokens::DIGITAL),
];

static TYT_CONTACT_FIELDS: &[Field] = &[
    Field::new("Contact Name", canonical::CONTACT_NAME, FieldType::Text).required(),
    Field::new("Call ID", canonical::CALL_ID, FieldType::Integer).required(),
    Field::new("Call Type", canonical::CALL_TYPE, FieldType::Choice(CALL_TYPE_TYT)).required(),
    Field::new("Call Receive Tone", canonical::CALL_TONE, FieldType::Text).required(),
];

static DC9AL_CONTACT_FIELDS: &[Field] = &[
    Field::new("Radio ID", canonical::CALL_ID, FieldType::Integer).required(),
    Field::new("Callsign", canonical::CALLSIGN, FieldType::Text).required(),
    Field::new("Name", canonical::OPERATOR_NAME, FieldType::Text),
    Field::new("City", "city", FieldType::Text),
    Field::new("State", "state", FieldType::Text),
    Field::new("Country", "country", FieldType::Text),
    Field::new("Remarks", "remarks", FieldType::Text),
];

static TYT_CHANNEL_FIELDS: &[Field] = &[
    Field::new("Channel Name", canonical::CHANNEL_NAME, FieldType::Text).required(),
    Field::new("RX Frequency(MHz)", canonical::RX_FREQUENCY, FieldType::Frequency).required(),
    Field::new("TX Frequency(MHz)", canonical::TX_FREQUENCY, FieldType::Frequency).required(),
    Field::new(
        "Channel Mode",
        canonical::CHANNEL_MODE,
        FieldType::Choice(CHANNEL_MODE_TYT),
    )
    .required(),
    Field::new("Color Code", canonical::COLOR_CODE, FieldType::Integer),
    Field::new("Repeater Slot", canonical::TIMESLOT, FieldType::Integer),
    Field::new("CTCSS/DCS Dec", canonical::RX_TONE, FieldType::Text),
    Field::new("CTCSS/DCS Enc", canonical::TX_TONE, FieldType::Text),
];

static OPENGD77_CONTACT_FIELDS: &[Field] = &[
    Field::new("Contact Name", canonical::CONTACT_NAME, FieldType::Text).required(),
    Field::new("Call ID", canonical::CALL_ID, FieldType::Integer).required(),
    Field::new("Call Type", canonical::CALL_TYPE, FieldType::Choice(CALL_TYPE_GD77)).required(),
];

// Column order matches the CPS import template. Trailing columns with no
// counterpart in the radio exports carry fixed defaults.
static OPENGD77_CHANNEL_FIELDS: &[Field] = &[
    Field::new("Channel Number", canonical::CHANNEL_NUMBER, FieldType::Integer),
    Field::new("Channel Name", canonical::CHANNEL_NAME, FieldType::Text).required(),
    Field::new(
        "Channel Type",
        canonical::CHANNEL_MODE,
        FieldType::Choice(CHANNEL_MODE_GD77),
    )
    .required(),
    Field::new("Rx Frequency", canonical::RX_FREQUENCY, FieldType::Frequency).required(),
    Field::new("Tx Frequency", canonical::TX_FREQUENCY, FieldType::Frequency).required(),
    Field::new("Bandwidth (kHz)", canonical::BANDWIDTH, FieldType::Text),
    Field::new("Colour Code", canonical::COLOR_CODE, FieldType::Integer),
    Field::new("Timeslot", canonical::TIMESLOT, FieldType::Integer),
    Field::new("Contact", "contact_ref", FieldType::Text).default_value("None"),
    Field::new("TG List", "tg_list", FieldType::Text).default_value("None"),
    Field::new("DMR ID", "dmr_id", FieldType::Text).default_value("None"),
    Field::new("TS1_TA_Tx", "ts1_ta_tx", FieldType::Text).default_value("Off"),
    Field::new("TS2_TA_Tx", "ts2_ta_tx", FieldType::Text).default_value("Off"),
    Field::new("RX Tone", canonical::RX_TONE, FieldType::Text),
    Field::new("TX Tone", canonical::TX_TONE, FieldType::Text),
    Field::new("Squelch", "squelch", FieldType::Text).default_value("Master"),
    Field::new("Power", "power", FieldType::Text).default_value("Master"),
    Field::new("Rx Only", "rx_only", FieldType::Text).default_value("No"),
    Field::new("Zone Skip", "zone_skip", FieldType::Text).default_value("No"),
    Field::new("All Skip", "all_skip", FieldType::Text).default_value("No"),
    Field::new("TOT", "tot", FieldType::Text).default_value("180"),
    Field::new("VOX", "vox", FieldType::Text).default_value("Off"),
];

// Priorities break detection ties: radio-vendor exports rank above the
// OpenGD77 template, which ranks above community lists.
static SCHEMAS: &[Schema] = &[
    Schema {
        id: dialects::TYT_CONTACTS,
        kind: RecordKind::Contact,
        priority: 10,
        delimiter: b',',
        fields: TYT_CONTACT_FIELDS,
    },
    Schema {
        id: dialects::TYT_CHANNELS,
        kind: RecordKind::Channel,
        priority: 10,
        delimiter: b',',
        fields: TYT_CHANNEL_FIELDS,
    },
    Schema {
        id: dialects::OPENGD77_CONTACTS,
        kind: RecordKind::Contact,
        priority: 6,
        delimiter: b',',
        fields: OPENGD77_CONTACT_FIELDS,
    },
    Schema {
        id: dialects::OPENGD77_CHANNELS,
        kind: RecordKind::Channel,
        priority: 6,
        delimiter: b',',
        fields: OPENGD77_CHANNEL_FIELDS,
    },
    Schema {
        id: dialects::DC9AL_CONTACTS,
        kind: RecordKind::Contact,
        priority: 5,
        delimiter: b',',
        fields: DC9AL_CONTACT_FIELDS,
    },
];

/// All registered schemas
pub fn schemas() -> impl Iterator<Item = &'static Schema> {
    SCHEMAS.iter()
}

/// Registered schemas of one kind
pub fn all_schemas(kind: RecordKind) -> impl Iterator<Item = &'static Schema> {
    SCHEMAS.iter().filter(move |s| s.kind == kind)
}

/// Look up a schema by dialect id. Failure here means the build is
/// misconfigured, not that user input was bad.
pub fn lookup(dialect_id: &str) -> Result<&'static Schema> {
    SCHEMAS
        .iter()
        .find(|s| s.id == dialect_id)
        .ok_or_else(|| ConvertError::UnknownDialect(dialect_id.to_string()))
}
