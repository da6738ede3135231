use serde::{Deserialize, Serialize};

/// Anchor placeholder in the source pattern strings.
pub const ANCHOR: char = '*';

/// One context rule: literal characters around the anchor position.
///
/// `"前*"` requires 前 immediately before the character, `"*作權"` requires
/// 作權 immediately after it. Parsed once at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    before: Vec<char>,
    after: Vec<char>,
}

impl Pattern {
    /// Parse a single sub-pattern. Returns `None` unless the string contains
    /// exactly one anchor.
    pub fn parse(src: &str) -> Option<Self> {
        let mut parts = src.split(ANCHOR);
        let before = parts.next()?;
        let after = parts.next()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self {
            before: before.chars().collect(),
            after: after.chars().collect(),
        })
    }

    /// Offset of the anchor within the pattern.
    pub fn anchor(&self) -> usize {
        self.before.len()
    }

    /// Width of the matching window in characters.
    pub fn width(&self) -> usize {
        self.before.len() + 1 + self.after.len()
    }

    /// True when the pattern needs at least one character of preceding context.
    pub fn needs_preceding(&self) -> bool {
        !self.before.is_empty()
    }

    /// Match against `text` with the anchor at `index`.
    ///
    /// Windows that fall outside the text never match.
    pub fn matches(&self, text: &[char], index: usize) -> bool {
        let Some(start) = index.checked_sub(self.before.len()) else {
            return false;
        };
        let end = index + 1 + self.after.len();
        if end > text.len() {
            return false;
        }
        text[start..index] == self.before[..] && text[index + 1..end] == self.after[..]
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let before: String = self.before.iter().collect();
        let after: String = self.after.iter().collect();
        write!(f, "{before}{ANCHOR}{after}")
    }
}
