//! Tone sandhi for 一 and 不.
//!
//! 一 (yi1) becomes yi2 before a fourth tone and yi4 before the other
//! tones, except in ordinals, before measure words and in reduplications.
//! 不 (bu4) becomes bu2 before a fourth tone.

use crate::dict::ToneTable;
use crate::style::StyleSet;

use super::tables::{
    find_exception, BU_EXCEPTIONS, SANDHI_IDIOMS, YI_CITATION_SUCCESSORS, YI_EXCEPTIONS,
    YI_ORDINAL_PREDECESSORS, YI_REDUPLICATION_TRIGGERS,
};
use super::{Cursor, ResolvedChar, Rule, Step};

pub(crate) const YI: char = '一';
pub(crate) const BU: char = '不';

pub(crate) fn is_sandhi_char(ch: char) -> bool {
    ch == YI || ch == BU
}

/// Decision for a single 一 or 不.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Outcome {
    pub style: StyleSet,
    /// Emit the next character with the default style as part of this step.
    pub consume_next: bool,
    pub suppress_fusion: bool,
}

impl Outcome {
    const fn new(style: StyleSet, consume_next: bool, suppress_fusion: bool) -> Self {
        Self {
            style,
            consume_next,
            suppress_fusion,
        }
    }
}

/// Rules for 一, checked in order.
pub(crate) fn yi(
    prev: Option<char>,
    next: Option<char>,
    next_tone: Option<u8>,
    suppressed: bool,
) -> Outcome {
    if !suppressed && prev.map_or(true, |p| YI_ORDINAL_PREDECESSORS.contains(&p)) {
        return Outcome::new(StyleSet::Default, false, true);
    }
    let Some(next) = next else {
        return Outcome::new(StyleSet::Default, true, true);
    };
    if let Some(e) = find_exception(YI_EXCEPTIONS, next) {
        return Outcome::new(e.style, e.consume_next, e.suppress_fusion);
    }
    if YI_CITATION_SUCCESSORS.contains(&next) {
        return Outcome::new(StyleSet::Default, true, true);
    }
    if prev == Some(next) || YI_REDUPLICATION_TRIGGERS.contains(&next) {
        return Outcome::new(StyleSet::Default, true, true);
    }
    match next_tone {
        Some(1..=3) => Outcome::new(StyleSet::SS02, true, true),
        Some(4) => Outcome::new(StyleSet::SS01, true, true),
        _ => Outcome::new(StyleSet::Default, false, true),
    }
}

/// Rules for 不.
pub(crate) fn bu(next: Option<char>, next_tone: Option<u8>) -> Outcome {
    if let Some(e) = next.and_then(|n| find_exception(BU_EXCEPTIONS, n)) {
        return Outcome::new(e.style, e.consume_next, e.suppress_fusion);
    }
    match next_tone {
        Some(4) => Outcome::new(StyleSet::SS01, true, true),
        _ => Outcome::new(StyleSet::Default, false, true),
    }
}

fn idiom(cursor: &Cursor<'_>) -> Option<Step> {
    let idiom = SANDHI_IDIOMS
        .iter()
        .find(|idiom| cursor.starts_with(idiom.text))?;
    let resolved = idiom
        .text
        .chars()
        .zip(idiom.styles)
        .map(|(ch, &style)| ResolvedChar { ch, style })
        .collect();
    Some(Step {
        resolved,
        suppress_fusion: idiom.suppress_fusion,
        rule: Rule::SandhiIdiom,
    })
}

pub(super) fn resolve(cursor: &Cursor<'_>, tones: &ToneTable) -> Step {
    if let Some(step) = idiom(cursor) {
        return step;
    }

    let ch = cursor.current();
    let next = cursor.next();
    let next_tone = next.and_then(|n| tones.tone(n));
    let outcome = if ch == YI {
        yi(cursor.prev(), next, next_tone, cursor.suppressed)
    } else {
        bu(next, next_tone)
    };

    let mut resolved = vec![ResolvedChar {
        ch,
        style: outcome.style,
    }];
    if outcome.consume_next {
        resolved.extend(next.map(ResolvedChar::plain));
    }
    Step {
        resolved,
        suppress_fusion: outcome.suppress_fusion,
        rule: Rule::Sandhi,
    }
}
