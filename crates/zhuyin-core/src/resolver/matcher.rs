//! Context pattern matching for dictionary characters with variants.
//!
//! Preceding-context patterns (`前*`, `前*後`) are tried before
//! following-context ones (`*後`), so a character with both kinds resolves
//! by what comes before it.

use crate::dict::{DictEntry, PolyphonicDictionary};
use crate::style::StyleSet;
use crate::unicode::is_hanzi;

use super::tables::{is_de_phrase, ZHU_COMPOUND};
use super::{Cursor, ResolvedChar, Rule, Step};

const DE: char = '地';
const ZHU: char = '著';

/// Variant slot chosen for the character at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Selection {
    pub slot: usize,
    pub consume_next: bool,
    pub suppress_fusion: bool,
    pub rule: Rule,
}

impl Selection {
    fn new(slot: usize, consume_next: bool, suppress_fusion: bool, rule: Rule) -> Self {
        Self {
            slot,
            consume_next,
            suppress_fusion,
            rule,
        }
    }
}

pub(crate) fn select(
    cursor: &Cursor<'_>,
    entry: &DictEntry,
    dict: &PolyphonicDictionary,
) -> Selection {
    let ch = cursor.current();
    let prev_hanzi = cursor.prev().is_some_and(is_hanzi);
    let next = cursor.next().filter(|&c| is_hanzi(c));

    if !prev_hanzi && next.is_none() {
        return Selection::new(0, false, true, Rule::Standalone);
    }

    if ch == DE {
        let particle = cursor
            .phrase_ending_here(3)
            .is_some_and(|phrase| is_de_phrase(&phrase));
        return Selection::new(usize::from(particle), false, true, Rule::DeParticle);
    }

    if ch == ZHU && entry.variants.len() >= 2 && cursor.starts_with(ZHU_COMPOUND) {
        return Selection::new(1, false, false, Rule::Copyright);
    }

    let preceding_pass = prev_hanzi && !cursor.suppressed;
    if preceding_pass {
        for (slot, variant) in entry.variants.iter().enumerate() {
            let hit = variant
                .patterns
                .iter()
                .filter(|p| p.needs_preceding())
                .any(|p| p.matches(cursor.text, cursor.index));
            if hit {
                return Selection::new(slot, false, true, Rule::PrecedingPattern);
            }
        }
    }

    if let Some(next) = next {
        for (slot, variant) in entry.variants.iter().enumerate() {
            let hit = variant
                .patterns
                .iter()
                .filter(|p| !p.needs_preceding())
                .any(|p| p.matches(cursor.text, cursor.index));
            if hit {
                // A following dictionary character resolves itself.
                return if dict.contains(next) {
                    Selection::new(slot, false, false, Rule::FollowingPattern)
                } else {
                    Selection::new(slot, true, true, Rule::FollowingPattern)
                };
            }
        }
    }

    // The default slot only counts when a pass actually scanned the slots.
    let slot = if preceding_pass || next.is_some() {
        entry.fallback_slot()
    } else {
        0
    };
    Selection::new(slot, false, false, Rule::FallbackSlot)
}

pub(super) fn resolve(
    cursor: &Cursor<'_>,
    entry: &DictEntry,
    dict: &PolyphonicDictionary,
) -> Step {
    let selection = select(cursor, entry, dict);
    let mut resolved = vec![ResolvedChar {
        ch: cursor.current(),
        style: StyleSet::from_slot(selection.slot),
    }];
    if selection.consume_next {
        resolved.extend(cursor.next().map(ResolvedChar::plain));
    }
    Step {
        resolved,
        suppress_fusion: selection.suppress_fusion,
        rule: selection.rule,
    }
}
