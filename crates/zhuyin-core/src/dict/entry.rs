use serde::{Deserialize, Serialize};

use super::pattern::Pattern;

/// Separator between alternative sub-patterns of one variant slot.
pub const SUB_PATTERN_SEPARATOR: char = '/';

/// All context rules that select one pronunciation variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSlot {
    pub patterns: Vec<Pattern>,
    /// The source string had an empty sub-pattern, marking this slot as the
    /// explicit fallback reading.
    pub is_default: bool,
}

impl VariantSlot {
    /// Parse a `/`-separated slot string.
    ///
    /// Returns the slot and the sub-patterns that were dropped because they
    /// did not contain exactly one anchor.
    pub fn parse(src: &str) -> (Self, Vec<String>) {
        let mut slot = VariantSlot::default();
        let mut rejected = Vec::new();
        for sub in src.split(SUB_PATTERN_SEPARATOR) {
            if sub.is_empty() {
                slot.is_default = true;
                continue;
            }
            match Pattern::parse(sub) {
                Some(p) => slot.patterns.push(p),
                None => rejected.push(sub.to_string()),
            }
        }
        (slot, rejected)
    }
}

/// A character's polyphone profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictEntry {
    /// Default tone index as stored in the source data (`s`).
    pub default_tone: i64,
    /// Variant slots in priority order. Slot 0 is the nominal reading.
    pub variants: Vec<VariantSlot>,
    /// Source flag (`f`); carried through unchanged.
    pub flag: bool,
}

impl DictEntry {
    /// Build an entry from source slot strings, dropping malformed patterns.
    pub fn from_sources<S: AsRef<str>>(default_tone: i64, sources: &[S], flag: bool) -> Self {
        let variants = sources
            .iter()
            .map(|s| VariantSlot::parse(s.as_ref()).0)
            .collect();
        Self {
            default_tone,
            variants,
            flag,
        }
    }

    pub fn is_polyphonic(&self) -> bool {
        !self.variants.is_empty()
    }

    /// Slot used when no pattern matches: the last slot marked as default,
    /// or slot 0.
    pub fn fallback_slot(&self) -> usize {
        self.variants
            .iter()
            .rposition(|slot| slot.is_default)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_slot() {
        let (slot, rejected) = VariantSlot::parse("銀*/*業//行列");
        assert_eq!(slot.patterns.len(), 2);
        assert!(slot.is_default);
        assert_eq!(rejected, vec!["行列".to_string()]);
    }

    #[test]
    fn empty_slot_is_default() {
        let (slot, rejected) = VariantSlot::parse("");
        assert!(slot.patterns.is_empty());
        assert!(slot.is_default);
        assert!(rejected.is_empty());
    }

    #[test]
    fn fallback_slot_prefers_last_default() {
        let entry = DictEntry::from_sources(1, &["*身", "", "寶*/"], false);
        assert_eq!(entry.fallback_slot(), 2);

        let entry = DictEntry::from_sources(1, &["*身", "寶*"], false);
        assert_eq!(entry.fallback_slot(), 0);
    }
}
