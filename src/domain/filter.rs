// ============================================================
// RECORD FILTER
// ============================================================
// Visibility predicate for list views. Filtering only changes what is
// visible, never what is selected.

use serde::{Deserialize, Serialize};

use super::record::Record;
use super::schema::canonical;

/// Free-text plus optional categorical match, both case-insensitive
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordFilter {
    /// Substring matched against display fields (name, call id, callsign)
    pub search: Option<String>,

    /// Canonical category token: "Group"/"Private" or "Analogue"/"Digital"
    pub category: Option<String>,
}

impl RecordFilter {
    /// Matches every record
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn matches(&self, record: &Record) -> bool {
        if let Some(category) = &self.category {
            match record.category() {
                Some(token) if token.eq_ignore_ascii_case(category) => {}
                _ => return false,
            }
        }

        if let Some(search) = &self.search {
            let needle = search.trim().to_lowercase();
            if !needle.is_empty() {
                let mut haystack = record.display_name().to_lowercase();
                for slot in [canonical::CALL_ID, canonical::CALLSIGN] {
                    if let Some(raw) = record.raw(slot) {
                        haystack.push('\n');
                        haystack.push_str(&raw.to_lowercase());
                    }
                }
                if !haystack.contains(&needle) {
                    return false;
                }
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::{FieldValue, RecordId, RecordKind};
    use std::collections::HashMap;

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
    fn test_empty_filter_matches_everything() {
        let rec = contact("DM0ABC", 26201, "Group");
        assert!(RecordFilter::all().matches(&rec));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let rec = contact("OE1XYZ Franz", 2321004, "Private");
        assert!(RecordFilter::all().with_search("franz").matches(&rec));
        assert!(RecordFilter::all().with_search("OE1xyz").matches(&rec));
        assert!(!RecordFilter::all().with_search("hamburg").matches(&rec));
    }

    #[test]
    fn test_search_matches_call_id() {
        let rec = contact("DL5XY", 2625123, "Private");
        assert!(RecordFilter::all().with_search("2625").matches(&rec));
    }

    #[test]
    fn test_category_filter() {
        let group = contact("Regional", 8, "Group");
        let private = contact("DL5XY", 2625123, "Private");
        let filter = RecordFilter::all().with_category("Group");
        assert!(filter.matches(&group));
        assert!(!filter.matches(&private));
    }

    #[test]
    fn test_search_and_category_compose() {
        let rec = contact("Regional TG8", 8, "Group");
        let filter = RecordFilter::all()
            .with_search("tg8")
            .with_category("group");
        assert!(filter.matches(&rec));
        let filter = RecordFilter::all()
            .with_search("tg8")
            .with_category("Private");
        assert!(!filter.matches(&rec));
    }
}
