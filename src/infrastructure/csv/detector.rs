// ============================================================
// DIALECT DETECTOR
// ============================================================
// Scored header match over the schema registry. Adding a dialect is a
// registry change; nothing here is radio-specific.

use std::collections::HashSet;

use crate::domain::error::{ConvertError, Result};
use crate::domain::record::RecordKind;
use crate::domain::registry;
use crate::domain::schema::Schema;

/// Pick the schema whose required columns best cover the header row.
///
/// Every candidate (restricted by `hint` when given) is scored by the
/// fraction of its required columns present in the header,
/// case-insensitive and trimmed. The best score wins, ties go to the
/// higher-priority dialect, and the winner must cover all of its
/// required columns or the header is rejected.
pub fn detect_dialect(headers: &[String], hint: Option<RecordKind>) -> Result<&'static Schema> {
    let present: HashSet<String> = headers
        .iter()
        .map(|h| h.trim().to_lowercase())
        .filter(|h| !h.is_empty())
        .collect();

    let mut best: Option<(&'static Schema, f64)> = None;

    for schema in registry::schemas() {
        if let Some(kind) = hint {
            if schema.kind != kind {
                continue;
            }
        }

        let required: Vec<_> = schema.required_fields().collect();
        if required.is_empty() {
            continue;
        }
        let matched = required
            .iter()
            .filter(|f| present.contains(&f.column.to_lowercase()))
            .count();
        let score = matched as f64 / required.len() as f64;

        let better = match best {
            None => true,
            Some((current, current_score)) => {
                score > current_score
                    || (score == current_score && schema.priority > current.priority)
            }
        };
        if better {
            best = Some((schema, score));
        }
    }

    match best {
        Some((schema, score)) if score >= 1.0 => Ok(schema),
        _ => Err(ConvertError::UnrecognizedFormat(headers.join(","))),
    }
}
