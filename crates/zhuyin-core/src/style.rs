//! Style sets: which pronunciation variant a character is rendered with.
//!
//! The text form follows the font's OpenType stylistic-set names: `0000` for
//! the default reading and `ss01`, `ss02`, ... for the alternates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::unicode::{MARKER_BASE, MAX_MARKED_VARIANT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StyleSet {
    /// The dictionary's nominal reading. Rendered without a marker.
    #[default]
    Default,
    /// Alternate reading `n` (`n >= 1`), i.e. variant slot `n` of the entry.
    Variant(u8),
}

impl StyleSet {
    pub const SS01: StyleSet = StyleSet::Variant(1);
    pub const SS02: StyleSet = StyleSet::Variant(2);
    pub const SS03: StyleSet = StyleSet::Variant(3);

    /// Style for a dictionary variant slot. Slot 0 is the default reading.
    pub fn from_slot(slot: usize) -> Self {
        match slot {
            0 => StyleSet::Default,
            n => StyleSet::Variant(u8::try_from(n).unwrap_or(u8::MAX)),
        }
    }

    pub fn is_default(self) -> bool {
        self == StyleSet::Default
    }

    /// Marker code point appended after the character, if the font has one.
    pub fn marker(self) -> Option<char> {
        match self {
            StyleSet::Variant(n) if (1..=MAX_MARKED_VARIANT).contains(&n) => {
                char::from_u32(MARKER_BASE + n as u32)
            }
            _ => None,
        }
    }
}

impl fmt::Display for StyleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleSet::Default => f.write_str("0000"),
            StyleSet::Variant(n) => write!(f, "ss{n:02}"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid style set: {0:?} (expected \"0000\" or \"ssNN\")")]
pub struct StyleParseError(String);

impl FromStr for StyleSet {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "0000" {
            return Ok(StyleSet::Default);
        }
        let n: u8 = s
            .strip_prefix("ss")
            .filter(|digits| digits.len() == 2)
            .and_then(|digits| digits.parse().ok())
            .ok_or_else(|| StyleParseError(s.to_string()))?;
        // The source pair table writes the default as `ss00`.
        Ok(StyleSet::from_slot(n as usize))
    }
}

impl Serialize for StyleSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StyleSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
