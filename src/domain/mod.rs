// ============================================================
// DOMAIN LAYER
// ============================================================
// Core types and value objects for codeplug conversion
// No I/O, no async

pub mod config;
pub mod error;
pub mod filter;
pub mod record;
pub mod registry;
pub mod report;
pub mod schema;

pub use config::{ConvertConfig, MergePolicy};
pub use error::{ConvertError, Result};
pub use filter::RecordFilter;
pub use record::{FieldValue, ParsedValue, Record, RecordId, RecordKind, RowIssue};
pub use report::{StoreCounts, ValidationReport};
pub use schema::{Field, FieldType, Schema};
