// ============================================================
// CANONICAL STORE
// ============================================================
// Owns every parsed record and the selection state for one session.
// Selection is an id set fully independent of any filter: filtering
// changes what is visible, never what is selected.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::config::MergePolicy;
use crate::domain::filter::RecordFilter;
use crate::domain::record::{Record, RecordId, RecordKind};
use crate::domain::report::StoreCounts;

/// What one `load` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOutcome {
    /// Records appended as new entries
    pub added: usize,
    /// Records that hit an existing identity and were merged per policy
    pub merged: usize,
}

/// In-memory record collection with stable display order and an
/// independent selection set. Single logical owner per session; no
/// interior mutability, no background work.
#[derive(Debug, Default)]
pub struct CanonicalStore {
    records: Vec<Record>,
    positions: HashMap<(RecordKind, RecordId), usize>,
    selected: HashSet<RecordId>,
    merge_policy: MergePolicy,
}

impl CanonicalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_merge_policy(merge_policy: MergePolicy) -> Self {
        Self {
            merge_policy,
            ..Self::default()
        }
    }

    /// Append parsed records. A record whose identity is already present
    /// merges per policy: LastWins replaces the stored record in its
    /// existing display slot, FirstWins drops the newcomer. Selection of
    /// a replaced identity is preserved.
    pub fn load(&mut self, records: Vec<Record>) -> LoadOutcome {
        let mut outcome = LoadOutcome { added: 0, merged: 0 };

        for record in records {
            let key = (record.kind, record.identity.clone());
            match self.positions.get(&key) {
                Some(&position) => {
                    if self.merge_policy == MergePolicy::LastWins {
                        self.records[position] = record;
                    }
                    outcome.merged += 1;
                }
                None => {
                    self.positions.insert(key, self.records.len());
                    self.records.push(record);
                    outcome.added += 1;
                }
            }
        }

        info!(
            added = outcome.added,
            merged = outcome.merged,
            total = self.records.len(),
            "loaded records into store"
        );
        outcome
    }

    /// All records of a kind, in display order
    pub fn records(&self, kind: RecordKind) -> impl Iterator<Item = &Record> {
        self.records.iter().filter(move |r| r.kind == kind)
    }

    /// Non-mutating filtered view in display order. Restartable: call
    /// again to iterate again.
    pub fn filter<'a>(
        &'a self,
        kind: RecordKind,
        filter: &'a RecordFilter,
    ) -> impl Iterator<Item = &'a Record> + 'a {
        self.records(kind).filter(move |r| filter.matches(r))
    }

    pub fn is_selected(&self, identity: &RecordId) -> bool {
        self.selected.contains(identity)
    }

    /// Flip one record's selection. Identities not present in the store
    /// are ignored.
    pub fn toggle_selected(&mut self, identity: &RecordId) {
        if !self.contains(identity) {
            return;
        }
        if !self.selected.remove(identity) {
            self.selected.insert(identity.clone());
        }
    }

    /// Idempotent bulk selection update
    pub fn set_selected(&mut self, identities: &[RecordId], selected: bool) {
        for identity in identities {
            if selected {
                if self.contains(identity) {
                    self.selected.insert(identity.clone());
                }
            } else {
                self.selected.remove(identity);
            }
        }
    }

    /// Add exactly the records the filter currently matches to the
    /// selection. Previously selected but now-invisible records stay
    /// selected.
    pub fn select_all_visible(&mut self, kind: RecordKind, filter: &RecordFilter) {
        let visible: Vec<RecordId> = self
            .filter(kind, filter)
            .map(|r| r.identity.clone())
            .collect();
        for identity in visible {
            self.selected.insert(identity);
        }
    }

    /// Remove exactly the records the filter currently matches from the
    /// selection
    pub fn deselect_all_visible(&mut self, kind: RecordKind, filter: &RecordFilter) {
        let visible: Vec<RecordId> = self
            .filter(kind, filter)
            .map(|r| r.identity.clone())
            .collect();
        for identity in &visible {
            self.selected.remove(identity);
        }
    }

    /// Clear the whole selection for a kind, visible or not
    pub fn deselect_all(&mut self, kind: RecordKind) {
        let ids: Vec<RecordId> = self.records(kind).map(|r| r.identity.clone()).collect();
        for identity in &ids {
            self.selected.remove(identity);
        }
    }

    /// Drop all records and selection state
    pub fn clear(&mut self) {
        self.records.clear();
        self.positions.clear();
        self.selected.clear();
    }

    /// Counts under the given filter, recomputed in one pass
    pub fn counts(&self, kind: RecordKind, filter: &RecordFilter) -> StoreCounts {
        let mut counts = StoreCounts {
            total: 0,
            visible: 0,
            selected: 0,
            selected_visible: 0,
        };
        for record in self.records(kind) {
            counts.total += 1;
            let visible = filter.matches(record);
            let selected = self.selected.contains(&record.identity);
            if visible {
                counts.visible += 1;
            }
            if selected {
                counts.selected += 1;
            }
            if visible && selected {
                counts.selected_visible += 1;
            }
        }
        counts
    }

    /// Selected records of a kind in display order; this is the export
    /// order.
    pub fn selected_records(&self, kind: RecordKind) -> impl Iterator<Item = &Record> {
        self.records(kind)
            .filter(|r| self.selected.contains(&r.identity))
    }

    fn contains(&self, identity: &RecordId) -> bool {
        self.positions
            .contains_key(&(RecordKind::Contact, identity.clone()))
            || self
                .positions
                .contains_key(&(RecordKind::Channel, identity.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::FieldValue;
    use crate::domain::schema::canonical;
    use std::collections::HashMap as Map;

    fn contact(name: &str, id: u32, call_type: &str) -> Record {
        let mut values = Map::new();
        values.insert(canonical::CONTACT_NAME.to_string(), FieldValue::text(name));
        values.insert(
            canonical::CALL_ID.to_string(),
            FieldValue::integer(id.to_string(), i64::from(id)),
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

    fn sample() -> Vec<Record> {
        vec![
            contact("Local", 9, "Group"),
            contact("DL1ABC Hans", 2621001, "Private"),
            contact("DL2DEF Karl", 2621002, "Private"),
        ]
    }

    #[test]
    fn test_loading_same_file_twice_is_idempotent() {
        let mut store = CanonicalStore::new();
        store.load(sample());
        let first = store.counts(RecordKind::Contact, &RecordFilter::all());

        let outcome = store.load(sample());
        let second = store.counts(RecordKind::Contact, &RecordFilter::all());

        assert_eq!(first.total, 3);
        assert_eq!(second.total, 3);
        assert_eq!(outcome.added, 0);
        assert_eq!(outcome.merged, 3);
    }

    #[test]
    fn test_last_wins_keeps_second_name_in_first_slot() {
        let mut store = CanonicalStore::new();
        store.load(vec![contact("Old Name", 100, "Private"), contact("B", 200, "Private")]);
        store.load(vec![contact("New Name", 100, "Private")]);

        let names: Vec<&str> = store
            .records(RecordKind::Contact)
            .map(|r| r.display_name())
            .collect();
        assert_eq!(names, vec!["New Name", "B"]);
    }

    #[test]
    fn test_first_wins_drops_newcomer() {
        let mut store = CanonicalStore::with_merge_policy(MergePolicy::FirstWins);
        store.load(vec![contact("Old Name", 100, "Private")]);
        store.load(vec![contact("New Name", 100, "Private")]);

        let names: Vec<&str> = store
            .records(RecordKind::Contact)
            .map(|r| r.display_name())
            .collect();
        assert_eq!(names, vec!["Old Name"]);
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let mut store = CanonicalStore::new();
        store.load(sample());
        let id = RecordId::Contact(9);

        store.toggle_selected(&id);
        assert!(store.is_selected(&id));
        store.toggle_selected(&id);
        assert!(!store.is_selected(&id));
    }

    #[test]
    fn test_toggle_unknown_identity_is_ignored() {
        let mut store = CanonicalStore::new();
        store.load(sample());
        store.toggle_selected(&RecordId::Contact(424242));
        assert_eq!(store.counts(RecordKind::Contact, &RecordFilter::all()).selected, 0);
    }

    #[test]
    fn test_filtering_never_changes_selection() {
        let mut store = CanonicalStore::new();
        store.load(sample());
        store.select_all_visible(RecordKind::Contact, &RecordFilter::all());

        let narrowed = RecordFilter::all().with_search("hans");
        let counts = store.counts(RecordKind::Contact, &narrowed);
        assert_eq!(counts.selected, 3);
        assert_eq!(counts.visible, 1);
        assert_eq!(counts.selected_visible, 1);
    }

    #[test]
    fn test_select_all_visible_only_touches_matches() {
        let mut store = CanonicalStore::new();
        store.load(sample());

        let private = RecordFilter::all().with_category("Private");
        store.select_all_visible(RecordKind::Contact, &private);

        assert!(!store.is_selected(&RecordId::Contact(9)));
        assert!(store.is_selected(&RecordId::Contact(2621001)));
        assert!(store.is_selected(&RecordId::Contact(2621002)));
    }

    #[test]
    fn test_deselect_all_visible_spares_invisible_selection() {
        let mut store = CanonicalStore::new();
        store.load(sample());
        store.select_all_visible(RecordKind::Contact, &RecordFilter::all());

        let private = RecordFilter::all().with_category("Private");
        store.deselect_all_visible(RecordKind::Contact, &private);

        assert!(store.is_selected(&RecordId::Contact(9)));
        assert!(!store.is_selected(&RecordId::Contact(2621001)));
    }

    #[test]
    fn test_deselect_all_clears_regardless_of_filter() {
        let mut store = CanonicalStore::new();
        store.load(sample());
        store.select_all_visible(RecordKind::Contact, &RecordFilter::all());

        store.deselect_all(RecordKind::Contact);
        let counts = store.counts(RecordKind::Contact, &RecordFilter::all());
        assert_eq!(counts.selected, 0);
    }

    #[test]
    fn test_selected_never_exceeds_total() {
        let mut store = CanonicalStore::new();
        store.load(sample());
        let all: Vec<RecordId> = (0u32..10).map(RecordId::Contact).collect();
        store.set_selected(&all, true);
        store.select_all_visible(RecordKind::Contact, &RecordFilter::all());
        store.load(sample());

        let counts = store.counts(RecordKind::Contact, &RecordFilter::all());
        assert!(counts.selected <= counts.total);
        assert!(counts.selected_visible <= counts.visible);
    }

    #[test]
    fn test_selection_survives_last_wins_replacement() {
        let mut store = CanonicalStore::new();
        store.load(vec![contact("Old", 100, "Private")]);
        store.toggle_selected(&RecordId::Contact(100));

        store.load(vec![contact("New", 100, "Private")]);
        assert!(store.is_selected(&RecordId::Contact(100)));
        assert_eq!(
            store
                .selected_records(RecordKind::Contact)
                .next()
                .map(|r| r.display_name()),
            Some("New")
        );
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut store = CanonicalStore::new();
        store.load(sample());
        store.select_all_visible(RecordKind::Contact, &RecordFilter::all());
        store.clear();

        let counts = store.counts(RecordKind::Contact, &RecordFilter::all());
        assert_eq!(counts.total, 0);
        assert_eq!(counts.selected, 0);
    }
}
