//! Polyphone dictionary and tone table.
//!
//! `PolyphonicDictionary` maps a character to its variant slots, each slot a
//! list of parsed context patterns. `ToneTable` maps a character to the tone
//! of its default reading. Both are built once and shared read-only.

mod entry;
mod json;
mod pattern;
mod snapshot;
mod tone;

pub use entry::{DictEntry, VariantSlot, SUB_PATTERN_SEPARATOR};
pub use pattern::{Pattern, ANCHOR};
pub use snapshot::{is_snapshot, CompiledTables};
pub use tone::ToneTable;

use std::collections::HashMap;
use std::io;

use serde::{Deserialize, Serialize};

/// Error type for loading dictionaries, tone tables and compiled snapshots.
#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("dictionary is improperly formatted or missing key \"data\"")]
    MissingData,

    #[error("key must be a single character: {0:?}")]
    InvalidKey(String),

    #[error("invalid entry for {ch}: {reason}")]
    InvalidEntry { ch: char, reason: String },

    #[error("invalid tone for {key:?}: {value} (expected 1..=5)")]
    InvalidTone { key: String, value: String },

    #[error("invalid header (too short)")]
    InvalidHeader,

    #[error("invalid magic bytes (expected ZYDX)")]
    InvalidMagic,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("checksum mismatch: header {expected:08x}, payload {actual:08x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("serialization error: {0}")]
    Serialize(bincode::Error),

    #[error("deserialization error: {0}")]
    Deserialize(bincode::Error),
}

/// Character → polyphone profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolyphonicDictionary {
    entries: HashMap<char, DictEntry>,
}

impl PolyphonicDictionary {
    pub fn new(entries: HashMap<char, DictEntry>) -> Self {
        Self { entries }
    }

    /// Parse the JSON resource (`{"data": {"字": {"s": 1, "v": [...]}}}`).
    pub fn from_json_str(json: &str) -> Result<Self, DictError> {
        Ok(Self::new(json::parse_dictionary(json)?))
    }

    pub fn get(&self, ch: char) -> Option<&DictEntry> {
        self.entries.get(&ch)
    }

    /// True if `ch` has an entry, with or without variants.
    pub fn contains(&self, ch: char) -> bool {
        self.entries.contains_key(&ch)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries that carry at least one variant slot.
    pub fn polyphonic_count(&self) -> usize {
        self.entries.values().filter(|e| e.is_polyphonic()).count()
    }

    /// Total number of parsed patterns across all entries.
    pub fn pattern_count(&self) -> usize {
        self.entries
            .values()
            .flat_map(|e| e.variants.iter())
            .map(|slot| slot.patterns.len())
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &DictEntry)> {
        self.entries.iter().map(|(c, e)| (*c, e))
    }
}

impl FromIterator<(char, DictEntry)> for PolyphonicDictionary {
    fn from_iter<I: IntoIterator<Item = (char, DictEntry)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
