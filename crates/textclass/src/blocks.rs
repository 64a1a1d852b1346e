#![forbid(unsafe_code)]

//! Unicode block lookup for the "probably Latin" heuristic.
//!
//! Block boundaries are hardcoded. The indexing fallback only needs to know
//! whether a code point lives in one of a dozen Latin-adjacent blocks.
//!
//! # Example
//!
//! ```
//! use textclass::blocks::{UnicodeBlock, is_probably_latin};
//!
//! assert_eq!(UnicodeBlock::of('é'), UnicodeBlock::Latin1Supplement);
//! assert!(is_probably_latin('ẞ'));
//! assert!(!is_probably_latin('Ж'));
//! ```

// ---------------------------------------------------------------------------
// UnicodeBlock enum
// ---------------------------------------------------------------------------

/// Unicode block of a code point, restricted to the blocks this crate
/// reasons about. Everything else is [`UnicodeBlock::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum UnicodeBlock {
    /// U+0000..U+007F.
    BasicLatin = 0,
    /// U+0080..U+00FF.
    Latin1Supplement,
    /// U+0100..U+017F.
    LatinExtendedA,
    /// U+0180..U+024F.
    LatinExtendedB,
    /// U+0250..U+02AF.
    IpaExtensions,
    /// U+02B0..U+02FF.
    SpacingModifierLetters,
    /// U+0300..U+036F.
    CombiningDiacriticalMarks,
    /// U+0370..U+03FF.
    GreekAndCoptic,
    /// U+0400..U+04FF.
    Cyrillic,
    /// U+1D00..U+1D7F.
    PhoneticExtensions,
    /// U+1E00..U+1EFF.
    LatinExtendedAdditional,
    /// U+2070..U+209F.
    SuperscriptsAndSubscripts,
    /// U+2150..U+218F.
    NumberForms,
    /// U+FB00..U+FB4F.
    AlphabeticPresentationForms,
    /// U+FF00..U+FFEF.
    HalfwidthAndFullwidthForms,
    /// Any block not listed above.
    Other,
}

impl UnicodeBlock {
    /// Classify a character by block-range lookup.
    #[inline]
    pub const fn of(c: char) -> Self {
        match c as u32 {
            0x0000..=0x007F => Self::BasicLatin,
            0x0080..=0x00FF => Self::Latin1Supplement,
            0x0100..=0x017F => Self::LatinExtendedA,
            0x0180..=0x024F => Self::LatinExtendedB,
            0x0250..=0x02AF => Self::IpaExtensions,
            0x02B0..=0x02FF => Self::SpacingModifierLetters,
            0x0300..=0x036F => Self::CombiningDiacriticalMarks,
            0x0370..=0x03FF => Self::GreekAndCoptic,
            0x0400..=0x04FF => Self::Cyrillic,
            0x1D00..=0x1D7F => Self::PhoneticExtensions,
            0x1E00..=0x1EFF => Self::LatinExtendedAdditional,
            0x2070..=0x209F => Self::SuperscriptsAndSubscripts,
            0x2150..=0x218F => Self::NumberForms,
            0xFB00..=0xFB4F => Self::AlphabeticPresentationForms,
            0xFF00..=0xFFEF => Self::HalfwidthAndFullwidthForms,
            _ => Self::Other,
        }
    }

    /// Whether text in this block plausibly reduces to a Latin letter.
    ///
    /// This is the allow-list consulted by the indexing fallback before it
    /// pays for a transliteration pass.
    #[inline]
    pub const fn is_probably_latin(self) -> bool {
        matches!(
            self,
            Self::BasicLatin
                | Self::Latin1Supplement
                | Self::LatinExtendedA
                | Self::LatinExtendedB
                | Self::LatinExtendedAdditional
                | Self::IpaExtensions
                | Self::SpacingModifierLetters
                | Self::PhoneticExtensions
                | Self::SuperscriptsAndSubscripts
                | Self::NumberForms
                | Self::AlphabeticPresentationForms
                | Self::HalfwidthAndFullwidthForms
        )
    }

    /// Human-readable block name (Unicode property value alias style).
    pub const fn name(self) -> &'static str {
        match self {
            Self::BasicLatin => "Basic Latin",
            Self::Latin1Supplement => "Latin-1 Supplement",
            Self::LatinExtendedA => "Latin Extended-A",
            Self::LatinExtendedB => "Latin Extended-B",
            Self::IpaExtensions => "IPA Extensions",
            Self::SpacingModifierLetters => "Spacing Modifier Letters",
            Self::CombiningDiacriticalMarks => "Combining Diacritical Marks",
            Self::GreekAndCoptic => "Greek and Coptic",
            Self::Cyrillic => "Cyrillic",
            Self::PhoneticExtensions => "Phonetic Extensions",
            Self::LatinExtendedAdditional => "Latin Extended Additional",
            Self::SuperscriptsAndSubscripts => "Superscripts and Subscripts",
            Self::NumberForms => "Number Forms",
            Self::AlphabeticPresentationForms => "Alphabetic Presentation Forms",
            Self::HalfwidthAndFullwidthForms => "Halfwidth and Fullwidth Forms",
            Self::Other => "Other",
        }
    }
}

/// Shorthand for `UnicodeBlock::of(c).is_probably_latin()`.
#[inline]
pub const fn is_probably_latin(c: char) -> bool {
    UnicodeBlock::of(c).is_probably_latin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_is_basic_latin() {
        for c in ['A', 'z', '0', ' ', '~'] {
            assert_eq!(UnicodeBlock::of(c), UnicodeBlock::BasicLatin, "char {c:?}");
        }
    }

    #[test]
    fn block_boundaries() {
        assert_eq!(UnicodeBlock::of('\u{007F}'), UnicodeBlock::BasicLatin);
        assert_eq!(UnicodeBlock::of('\u{0080}'), UnicodeBlock::Latin1Supplement);
        assert_eq!(UnicodeBlock::of('\u{017F}'), UnicodeBlock::LatinExtendedA);
        assert_eq!(UnicodeBlock::of('\u{0180}'), UnicodeBlock::LatinExtendedB);
        assert_eq!(UnicodeBlock::of('\u{02AF}'), UnicodeBlock::IpaExtensions);
        assert_eq!(
            UnicodeBlock::of('\u{02B0}'),
            UnicodeBlock::SpacingModifierLetters
        );
        assert_eq!(
            UnicodeBlock::of('\u{0301}'),
            UnicodeBlock::CombiningDiacriticalMarks
        );
        assert_eq!(
            UnicodeBlock::of('\u{FFEF}'),
            UnicodeBlock::HalfwidthAndFullwidthForms
        );
        assert_eq!(UnicodeBlock::of('\u{FFF0}'), UnicodeBlock::Other);
    }

    #[test]
    fn allow_list_membership() {
        assert!(is_probably_latin('é'));
        assert!(is_probably_latin('Ł'));
        assert!(is_probably_latin('ǅ'));
        assert!(is_probably_latin('ɐ'));
        assert!(is_probably_latin('ᴀ'));
        assert!(is_probably_latin('Ṩ'));
        assert!(is_probably_latin('ⁿ'));
        assert!(is_probably_latin('Ⅻ'));
        assert!(is_probably_latin('ﬁ'));
        assert!(is_probably_latin('Ａ'));
    }

    #[test]
    fn non_latin_scripts_rejected() {
        for c in ['Ω', 'Ж', 'א', 'ع', '中', 'あ', '한', '\u{0301}', '😀'] {
            assert!(!is_probably_latin(c), "char {c:?}");
        }
    }

    #[test]
    fn names_are_distinct() {
        let all = [
            UnicodeBlock::BasicLatin,
            UnicodeBlock::Latin1Supplement,
            UnicodeBlock::LatinExtendedA,
            UnicodeBlock::LatinExtendedB,
            UnicodeBlock::IpaExtensions,
            UnicodeBlock::SpacingModifierLetters,
            UnicodeBlock::CombiningDiacriticalMarks,
            UnicodeBlock::GreekAndCoptic,
            UnicodeBlock::Cyrillic,
            UnicodeBlock::PhoneticExtensions,
            UnicodeBlock::LatinExtendedAdditional,
            UnicodeBlock::SuperscriptsAndSubscripts,
            UnicodeBlock::NumberForms,
            UnicodeBlock::AlphabeticPresentationForms,
            UnicodeBlock::HalfwidthAndFullwidthForms,
            UnicodeBlock::Other,
        ];
        let mut names: Vec<_> = all.iter().map(|b| b.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), all.len());
    }
}
