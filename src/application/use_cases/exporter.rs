// ============================================================
// EXPORTER
// ============================================================
// Serialize the selected records into a target dialect. Reads the
// store and the validation report; never mutates either, so a blocked
// export can be retried after deselecting.

use tracing::info;

use crate::domain::error::{ConvertError, Result};
use crate::domain::record::{FieldValue, ParsedValue, Record, RecordKind};
use crate::domain::registry;
use crate::domain::report::ValidationReport;
use crate::domain::schema::{Field, FieldType};
use crate::infrastructure::csv::{format_mhz, CsvWriter};

use super::store::CanonicalStore;

/// Export the selected records of the target dialect's kind, in display
/// order. Contacts export refuses while the selection exceeds the
/// firmware limit.
pub fn export(
    store: &CanonicalStore,
    target_dialect: &str,
    report: &ValidationReport,
) -> Result<String> {
    let schema = registry::lookup(target_dialect)?;

    if schema.kind == RecordKind::Contact && report.exceeded {
        return Err(ConvertError::ExportBlocked(format!(
            "{} contacts selected, limit is {}; deselect {} and retry",
            report.contact_count,
            report.contact_limit,
            report.contact_count - report.contact_limit
        )));
    }

    let header = schema.header();
    let mut rows = Vec::new();
    for record in store.selected_records(schema.kind) {
        let same_dialect = record.source_dialect == schema.id;
        let row = schema
            .fields
            .iter()
            .map(|field| render_cell(record, field, same_dialect))
            .collect();
        rows.push(row);
    }

    info!(
        dialect = schema.id,
        rows = rows.len(),
        "serialized export"
    );

    CsvWriter::new()
        .with_delimiter(schema.delimiter)
        .write(&header, &rows)
}

fn render_cell(record: &Record, field: &Field, same_dialect: bool) -> String {
    match record.value(field.canonical) {
        // Same dialect passes the original text through untouched
        Some(value) if same_dialect => value.raw.clone(),
        Some(value) => render_value(field, value),
        None => field.default.unwrap_or("").to_string(),
    }
}

/// Reverse of parse-time coercion: canonical values rendered in the
/// target dialect's representation.
fn render_value(field: &Field, value: &FieldValue) -> String {
    match (&field.field_type, &value.parsed) {
        (FieldType::Choice(choices), ParsedValue::Choice(token)) => choices
            .iter()
            .find(|(_, canonical_token)| *canonical_token == token.as_str())
            .map(|(dialect_token, _)| dialect_token.to_string())
            .unwrap_or_else(|| value.raw.clone()),
        (FieldType::Frequency, ParsedValue::FrequencyHz(hz)) => format_mhz(*hz),
        (FieldType::Integer, ParsedValue::Integer(n)) => n.to_string(),
        _ => value.raw.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::validation::validate;
    use crate::domain::config::ConvertConfig;
    use crate::domain::filter::RecordFilter;
    use crate::domain::registry::dialects;
    use crate::infrastructure::csv::{CsvReader, RecordParser};

    const TYT_CONTACTS: &str = "\
Contact Name,Call ID,Call Type,Call Receive Tone
Local,9,1,No
DL1ABC Hans,2621001,2,No
Regional,8,1,No
";

    const TYT_CHANNELS: &str = "\
Channel Name,RX Frequency(MHz),TX Frequency(MHz),Channel Mode,Color Code,Repeater Slot,CTCSS/DCS Enc
Simplex FM,145.50000,145.50000,1,1,1,None
DB0XYZ,439.57500,431.97500,2,1,2,0
";

    fn load_all(store: &mut CanonicalStore, dialect: &str, text: &str) {
        let raw = CsvReader::new().read(text).unwrap();
        let parsed = RecordParser::new(registry::lookup(dialect).unwrap()).parse(&raw);
        store.load(parsed.records);
        for kind in [RecordKind::Contact, RecordKind::Channel] {
            store.select_all_visible(kind, &RecordFilter::all());
        }
    }

    fn clean_report() -> ValidationReport {
        ValidationReport {
            contact_count: 0,
            contact_limit: 1024,
            exceeded: false,
            invalid_selected_count: 0,
            issues: Vec::new(),
        }
    }

    #[test]
    fn test_tyt_contacts_to_opengd77() {
        let mut store = CanonicalStore::new();
        load_all(&mut store, dialects::TYT_CONTACTS, TYT_CONTACTS);

        let report = validate(&store, &ConvertConfig::default());
        let text = export(&store, dialects::OPENGD77_CONTACTS, &report).unwrap();

        assert_eq!(
            text,
            "Contact Name,Call ID,Call Type\n\
             Local,9,Group\n\
             DL1ABC Hans,2621001,Private\n\
             Regional,8,Group\n"
        );
    }

    #[test]
    fn test_same_dialect_round_trip_is_byte_identical() {
        let input = "Contact Name,Call ID,Call Type\n\
                     Local,9,Group\n\
                     DL1ABC Hans,2621001,Private\n";
        let mut store = CanonicalStore::new();
        load_all(&mut store, dialects::OPENGD77_CONTACTS, input);

        let text = export(&store, dialects::OPENGD77_CONTACTS, &clean_report()).unwrap();
        assert_eq!(text, input);
    }

    #[test]
    fn test_channel_export_fills_fixed_columns() {
        let mut store = CanonicalStore::new();
        load_all(&mut store, dialects::TYT_CHANNELS, TYT_CHANNELS);

        let report = validate(&store, &ConvertConfig::default());
        let text = export(&store, dialects::OPENGD77_CHANNELS, &report).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "Channel Number,Channel Name,Channel Type,Rx Frequency,Tx Frequency,\
             Bandwidth (kHz),Colour Code,Timeslot,Contact,TG List,DMR ID,TS1_TA_Tx,\
             TS2_TA_Tx,RX Tone,TX Tone,Squelch,Power,Rx Only,Zone Skip,All Skip,TOT,VOX"
        );
        assert_eq!(
            lines[1],
            "1,Simplex FM,Analogue,145.50000,145.50000,25,,,None,None,None,Off,Off,,,\
             Master,Master,No,No,No,180,Off"
        );
        assert_eq!(
            lines[2],
            "2,DB0XYZ,Digital,439.57500,431.97500,,1,2,None,None,None,Off,Off,,,\
             Master,Master,No,No,No,180,Off"
        );
    }

    #[test]
    fn test_export_is_deterministic() {
        let mut store = CanonicalStore::new();
        load_all(&mut store, dialects::TYT_CHANNELS, TYT_CHANNELS);

        let report = validate(&store, &ConvertConfig::default());
        let first = export(&store, dialects::OPENGD77_CHANNELS, &report).unwrap();
        let second = export(&store, dialects::OPENGD77_CHANNELS, &report).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_contacts_export_blocked_while_over_limit() {
        let mut store = CanonicalStore::new();
        load_all(&mut store, dialects::TYT_CONTACTS, TYT_CONTACTS);

        let report = ValidationReport {
            contact_count: 1030,
            contact_limit: 1024,
            exceeded: true,
            invalid_selected_count: 0,
            issues: Vec::new(),
        };
        let result = export(&store, dialects::OPENGD77_CONTACTS, &report);
        assert!(matches!(result, Err(ConvertError::ExportBlocked(_))));

        // The store is untouched; deselecting and retrying works
        let counts = store.counts(RecordKind::Contact, &RecordFilter::all());
        assert_eq!(counts.total, 3);
    }

    #[test]
    fn test_channel_export_ignores_contact_limit() {
        let mut store = CanonicalStore::new();
        load_all(&mut store, dialects::TYT_CHANNELS, TYT_CHANNELS);

        let report = ValidationReport {
            contact_count: 1030,
            contact_limit: 1024,
            exceeded: true,
            invalid_selected_count: 0,
            issues: Vec::new(),
        };
        assert!(export(&store, dialects::OPENGD77_CHANNELS, &report).is_ok());
    }

    #[test]
    fn test_empty_selection_exports_header_only() {
        let store = CanonicalStore::new();
        let text = export(&store, dialects::OPENGD77_CONTACTS, &clean_report()).unwrap();
        assert_eq!(text, "Contact Name,Call ID,Call Type\n");
    }

    #[test]
    fn test_unknown_target_dialect_fails() {
        let store = CanonicalStore::new();
        let result = export(&store, "yaesu-contacts", &clean_report());
        assert!(matches!(result, Err(ConvertError::UnknownDialect(_))));
    }

    #[test]
    fn test_export_skips_unselected_records() {
        let mut store = CanonicalStore::new();
        load_all(&mut store, dialects::TYT_CONTACTS, TYT_CONTACTS);
        store.deselect_all(RecordKind::Contact);
        store.set_selected(&[crate::domain::record::RecordId::Contact(8)], true);

        let report = validate(&store, &ConvertConfig::default());
        let text = export(&store, dialects::OPENGD77_CONTACTS, &report).unwrap();
        assert_eq!(text, "Contact Name,Call ID,Call Type\nRegional,8,Group\n");
    }
}
