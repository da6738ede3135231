//! Marker encoding for fonts that select pronunciation variants.

use crate::resolver::ResolvedChar;
use crate::unicode::is_marker;

/// Render resolved characters as text, appending a variant-selector code
/// point after every character whose style has one.
pub fn encode(resolved: &[ResolvedChar]) -> String {
    let mut out = String::with_capacity(resolved.len() * 4);
    for rc in resolved {
        out.push(rc.ch);
        if let Some(marker) = rc.style.marker() {
            out.push(marker);
        }
    }
    out
}

/// Remove every variant-selector marker from `text`.
pub fn strip_markers(text: &str) -> String {
    text.chars().filter(|&c| !is_marker(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleSet;

    fn rc(ch: char, style: StyleSet) -> ResolvedChar {
        ResolvedChar { ch, style }
    }

    #[test]
    fn default_has_no_marker() {
        let s = encode(&[rc('行', StyleSet::Default), rc('a', StyleSet::Default)]);
        assert_eq!(s, "行a");
    }

    #[test]
    fn variants_append_marker() {
        let s = encode(&[rc('銀', StyleSet::Default), rc('行', StyleSet::SS01)]);
        assert_eq!(s, "銀行\u{E01E1}");

        let s = encode(&[rc('長', StyleSet::Variant(5))]);
        assert_eq!(s, "長\u{E01E5}");
    }

    #[test]
    fn variant_beyond_marker_range_is_plain() {
        let s = encode(&[rc('長', StyleSet::Variant(6))]);
        assert_eq!(s, "長");
    }

    #[test]
    fn strip_round_trip() {
        let resolved = [
            rc('一', StyleSet::SS01),
            rc('定', StyleSet::Default),
            rc('!', StyleSet::Default),
        ];
        assert_eq!(strip_markers(&encode(&resolved)), "一定!");
    }

    #[test]
    fn strip_keeps_other_private_use() {
        assert_eq!(strip_markers("a\u{E01E0}b\u{E01E6}"), "a\u{E01E0}b\u{E01E6}");
        assert_eq!(strip_markers(""), "");
    }
}
