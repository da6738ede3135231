//! Character classification for the annotated script.

/// First code point of the marker block read by the phonetic font.
/// `ss01` maps to `MARKER_BASE + 1`.
pub const MARKER_BASE: u32 = 0xE01E0;

/// Highest variant index that has a marker glyph.
pub const MAX_MARKED_VARIANT: u8 = 5;

/// Core CJK ideographs (U+4E00..U+9FA5).
///
/// Extension blocks and compatibility ideographs are treated as foreign
/// text: the polyphone data never covers them, and they must not act as
/// phonetic context for their neighbours.
pub fn is_hanzi(c: char) -> bool {
    ('\u{4E00}'..='\u{9FA5}').contains(&c)
}

/// Check whether `c` is one of the variant markers emitted by the encoder.
pub fn is_marker(c: char) -> bool {
    let cp = c as u32;
    cp > MARKER_BASE && cp <= MARKER_BASE + MAX_MARKED_VARIANT as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_hanzi() {
        assert!(is_hanzi('一'));
        assert!(is_hanzi('龥'));
        assert!(is_hanzi('行'));
        assert!(!is_hanzi('。'));
        assert!(!is_hanzi('a'));
        assert!(!is_hanzi('ㄅ'));
        assert!(!is_hanzi('\u{3400}'));
        assert!(!is_hanzi('\u{9FA6}'));
    }

    #[test]
    fn test_is_marker() {
        assert!(!is_marker('\u{E01E0}'));
        assert!(is_marker('\u{E01E1}'));
        assert!(is_marker('\u{E01E5}'));
        assert!(!is_marker('\u{E01E6}'));
        assert!(!is_marker('行'));
    }
}
