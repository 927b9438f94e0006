// ============================================================
// CONVERSION CONFIGURATION
// ============================================================
// Tunable limits and policies for the conversion core

use serde::{Deserialize, Serialize};

/// What happens when a loaded record shares its identity with one
/// already in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MergePolicy {
    /// The newer record replaces the older one, keeping its display slot
    LastWins,
    /// The newer record is dropped
    FirstWins,
}

impl Default for MergePolicy {
    fn default() -> Self {
        MergePolicy::LastWins
    }
}

/// Configuration for the conversion core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Firmware contact limit (default: 1024)
    pub contact_limit: usize,

    /// Duplicate-identity precedence across loaded files
    pub merge_policy: MergePolicy,

    /// Bytes of input sampled when probing the delimiter (default: 4096)
    pub max_probe_bytes: usize,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            contact_limit: 1024,
            merge_policy: MergePolicy::default(),
            max_probe_bytes: 4096,
        }
    }
}

impl ConvertConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.contact_limit == 0 {
            return Err("contact_limit must be > 0".to_string());
        }
        if self.max_probe_bytes == 0 {
            return Err("max_probe_bytes must be > 0".to_string());
        }
        Ok(())
    }
}
