//! Polyphone and tone-sandhi resolution.
//!
//! The resolver walks the text left to right. Each step handles the
//! character at the cursor and may consume up to three following characters
//! (idioms, reduplicated pairs, pattern collocations). A step can also block
//! context fusion for the step after it: the next character is then not
//! matched against patterns that look backwards.

mod explain;
mod matcher;
mod pairs;
mod sandhi;
pub(crate) mod tables;
#[cfg(test)]
pub(crate) mod testutil;
#[cfg(test)]
mod tests;

pub use explain::{format_text, ExplainedChar, Explanation};

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, debug_span};

use crate::dict::{PolyphonicDictionary, ToneTable};
use crate::encode::encode;
use crate::style::StyleSet;
use crate::unicode::is_hanzi;

/// One input character with the variant it should be rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedChar {
    pub ch: char,
    pub style: StyleSet,
}

impl ResolvedChar {
    pub fn plain(ch: char) -> Self {
        Self {
            ch,
            style: StyleSet::Default,
        }
    }
}

/// Which rule produced a step. Reported by `explain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    NonHanzi,
    SandhiIdiom,
    Sandhi,
    SpecialPair,
    Standalone,
    DeParticle,
    Copyright,
    PrecedingPattern,
    FollowingPattern,
    FallbackSlot,
    NoVariants,
    Unlisted,
}

impl Rule {
    pub fn as_str(self) -> &'static str {
        match self {
            Rule::NonHanzi => "non_hanzi",
            Rule::SandhiIdiom => "sandhi_idiom",
            Rule::Sandhi => "sandhi",
            Rule::SpecialPair => "special_pair",
            Rule::Standalone => "standalone",
            Rule::DeParticle => "de_particle",
            Rule::Copyright => "copyright",
            Rule::PrecedingPattern => "preceding_pattern",
            Rule::FollowingPattern => "following_pattern",
            Rule::FallbackSlot => "fallback_slot",
            Rule::NoVariants => "no_variants",
            Rule::Unlisted => "unlisted",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of one resolution step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Step {
    /// The character at the cursor followed by any consumed characters.
    pub resolved: Vec<ResolvedChar>,
    /// Block preceding-context matching for the next step.
    pub suppress_fusion: bool,
    pub rule: Rule,
}

impl Step {
    pub(crate) fn single(ch: char, style: StyleSet, suppress_fusion: bool, rule: Rule) -> Self {
        Self {
            resolved: vec![ResolvedChar { ch, style }],
            suppress_fusion,
            rule,
        }
    }

    /// Number of input characters this step covers (always at least one).
    pub(crate) fn consumed(&self) -> usize {
        self.resolved.len()
    }
}

/// Read-only view of the text around the character being resolved.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cursor<'a> {
    pub text: &'a [char],
    pub index: usize,
    /// The previous step blocked context fusion.
    pub suppressed: bool,
}

impl<'a> Cursor<'a> {
    pub(crate) fn current(&self) -> char {
        self.text[self.index]
    }

    pub(crate) fn prev(&self) -> Option<char> {
        self.index.checked_sub(1).map(|i| self.text[i])
    }

    pub(crate) fn next(&self) -> Option<char> {
        self.peek(1)
    }

    /// Character `offset` positions after the cursor.
    pub(crate) fn peek(&self, offset: usize) -> Option<char> {
        self.text.get(self.index + offset).copied()
    }

    /// True if the text starting at the cursor begins with `s`.
    pub(crate) fn starts_with(&self, s: &str) -> bool {
        self.matches_at(0, s)
    }

    /// True if the text `offset` positions after the cursor begins with `s`.
    pub(crate) fn matches_at(&self, offset: usize, s: &str) -> bool {
        let rest = self.text.get(self.index + offset..).unwrap_or(&[]);
        let mut rest = rest.iter();
        s.chars().all(|c| rest.next() == Some(&c))
    }

    /// The `len` characters ending at the cursor, if the text has them.
    pub(crate) fn phrase_ending_here(&self, len: usize) -> Option<String> {
        let start = (self.index + 1).checked_sub(len)?;
        Some(self.text[start..=self.index].iter().collect())
    }
}

/// Resolves text against a loaded dictionary and tone table.
///
/// Cheap to clone; the tables are shared.
#[derive(Debug, Clone)]
pub struct Resolver {
    dict: Arc<PolyphonicDictionary>,
    tones: Arc<ToneTable>,
}

impl Resolver {
    pub fn new(dict: Arc<PolyphonicDictionary>, tones: Arc<ToneTable>) -> Self {
        Self { dict, tones }
    }

    pub fn dictionary(&self) -> &PolyphonicDictionary {
        &self.dict
    }

    pub fn tones(&self) -> &ToneTable {
        &self.tones
    }

    /// Resolve every character of `text`, in input order.
    pub fn resolve(&self, text: &str) -> Vec<ResolvedChar> {
        let chars: Vec<char> = text.chars().collect();
        let mut out = Vec::with_capacity(chars.len());
        for step in self.walk(&chars) {
            out.extend(step.resolved);
        }
        out
    }

    /// Resolve and encode `text` with variant markers.
    pub fn annotate(&self, text: &str) -> String {
        encode(&self.resolve(text))
    }

    /// Resolve `text` and report which rule decided each character.
    pub fn explain(&self, text: &str) -> Explanation {
        let chars: Vec<char> = text.chars().collect();
        explain::build(text, self.walk(&chars))
    }

    pub(crate) fn walk(&self, text: &[char]) -> Vec<Step> {
        let _span = debug_span!("resolve", chars = text.len()).entered();
        let mut steps = Vec::new();
        let mut index = 0;
        let mut suppressed = false;
        while index < text.len() {
            let cursor = Cursor {
                text,
                index,
                suppressed,
            };
            let step = self.step(&cursor);
            debug!(
                index,
                ch = %cursor.current(),
                rule = %step.rule,
                consumed = step.consumed(),
                suppress = step.suppress_fusion,
                "step"
            );
            index += step.consumed();
            suppressed = step.suppress_fusion;
            steps.push(step);
        }
        steps
    }

    fn step(&self, cursor: &Cursor<'_>) -> Step {
        let ch = cursor.current();
        if !is_hanzi(ch) {
            return Step::single(ch, StyleSet::Default, true, Rule::NonHanzi);
        }
        if sandhi::is_sandhi_char(ch) {
            return sandhi::resolve(cursor, &self.tones);
        }

        let Some(entry) = self.dict.get(ch) else {
            let suppress = cursor
                .prev()
                .is_some_and(|prev| tables::is_duo_collocation(prev, ch));
            return Step::single(ch, StyleSet::Default, suppress, Rule::Unlisted);
        };

        if let Some(step) = pairs::resolve(cursor) {
            return step;
        }
        if entry.is_polyphonic() {
            return matcher::resolve(cursor, entry, &self.dict);
        }
        Step::single(ch, StyleSet::Default, false, Rule::NoVariants)
    }
}
