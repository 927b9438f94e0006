// ============================================================
// LIMIT & VALIDATION ENGINE
// ============================================================
// Pure read-only report over the current selection. Intended to run
// after every selection change; it never mutates the store and never
// blocks selection. Only the exporter acts on `exceeded`.

use tracing::warn;

use crate::domain::config::ConvertConfig;
use crate::domain::record::RecordKind;
use crate::domain::report::ValidationReport;

use super::store::CanonicalStore;

/// Hold the selected records against the firmware limits and surface
/// the parse issues of everything currently selected.
pub fn validate(store: &CanonicalStore, config: &ConvertConfig) -> ValidationReport {
    let contact_count = store
        .selected_records(RecordKind::Contact)
        .count();
    let exceeded = contact_count > config.contact_limit;

    let mut invalid_selected_count = 0;
    let mut issues = Vec::new();
    for kind in [RecordKind::Contact, RecordKind::Channel] {
        for record in store.selected_records(kind) {
            if record.valid {
                continue;
            }
            invalid_selected_count += 1;
            for issue in &record.issues {
                issues.push(format!("{} '{}': {}", kind, record.display_name(), issue));
            }
        }
    }

    if exceeded {
        warn!(
            selected = contact_count,
            limit = config.contact_limit,
            "selected contacts exceed the firmware limit"
        );
    }

    ValidationReport {
        contact_count,
        contact_limit: config.contact_limit,
        exceeded,
        invalid_selected_count,
        issues,
    }
}
