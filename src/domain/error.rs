use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ConvertError {
    /// Header row matched no registered schema. Carries the header text so
    /// the caller can point the user at the offending file.
    UnrecognizedFormat(String),
    /// A dialect id was requested that is not in the registry. This is a
    /// build misconfiguration, not a user-facing condition.
    UnknownDialect(String),
    ParseError(String),
    ExportBlocked(String),
    InvalidConfig(String),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::UnrecognizedFormat(header) => {
                write!(f, "Unrecognized CSV format (header: {})", header)
            }
            ConvertError::UnknownDialect(id) => write!(f, "Unknown dialect: {}", id),
            ConvertError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConvertError::ExportBlocked(msg) => write!(f, "Export blocked: {}", msg),
            ConvertError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConvertError {}

impl From<csv::Error> for ConvertError {
    fn from(err: csv::Error) -> Self {
        ConvertError::ParseError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
