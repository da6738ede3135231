use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{json, DictError};

/// Character → tone (1..=5) of its default reading.
///
/// Only consulted to inspect a neighbour before a sandhi word; it never
/// decides how the neighbour itself is rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToneTable {
    tones: HashMap<char, u8>,
}

impl ToneTable {
    pub fn new(tones: HashMap<char, u8>) -> Self {
        Self { tones }
    }

    /// Parse a JSON object of `"字": tone` pairs.
    pub fn from_json_str(json: &str) -> Result<Self, DictError> {
        Ok(Self::new(json::parse_tones(json)?))
    }

    /// Tone of `ch`, or `None` when unknown.
    pub fn tone(&self, ch: char) -> Option<u8> {
        self.tones.get(&ch).copied()
    }

    pub fn len(&self) -> usize {
        self.tones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tones.is_empty()
    }
}

impl FromIterator<(char, u8)> for ToneTable {
    fn from_iter<I: IntoIterator<Item = (char, u8)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
