// ============================================================
// REPORT TYPES
// ============================================================
// Read-only outputs of the counts query and the limit engine

use serde::{Deserialize, Serialize};

/// Per-kind record counts under the currently active filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreCounts {
    pub total: usize,
    pub visible: usize,
    pub selected: usize,
    /// Selected records also matched by the active filter
    pub selected_visible: usize,
}

/// Result of running the limit and validation rules over the current
/// selection. Never blocks anything by itself; the exporter consults
/// `exceeded` before writing contacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Selected contacts
    pub contact_count: usize,

    /// Firmware limit the count is held against
    pub contact_limit: usize,

    /// True when contact_count > contact_limit
    pub exceeded: bool,

    /// Selected records (any kind) carrying parse issues
    pub invalid_selected_count: usize,

    /// Human-readable issue lines naming row and column
    pub issues: Vec<String>,
}

impl ValidationReport {
    /// One-line summary for status displays
    pub fn summary(&self) -> String {
        let mut line = format!(
            "{}/{} contacts selected",
            self.contact_count, self.contact_limit
        );
        if self.exceeded {
            line.push_str(&format!(
                " ({} over limit)",
                self.contact_count - self.contact_limit
            ));
        }
        if self.invalid_selected_count > 0 {
            line.push_str(&format!(
                ", {} selected records have issues",
                self.invalid_selected_count
            ));
        }
        line
    }
}
