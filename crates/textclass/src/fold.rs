#![forbid(unsafe_code)]

//! Static reduction tables used when no transliteration engine is compiled
//! in.
//!
//! Two independent folds:
//!
//! - [`fold_latin`] strips Latin decorations (accents, ligatures, modifier
//!   and fullwidth forms) to plain ASCII;
//! - [`fold_script`] romanizes Greek and Cyrillic letters.
//!
//! Both write into a caller-supplied buffer and return `false` for
//! characters they do not know, leaving the decision of what to do with
//! them to the caller. Letter case is preserved.

// ---------------------------------------------------------------------------
// Latin decorations
// ---------------------------------------------------------------------------

/// U+00C0..=U+00FF.
const LATIN1_LETTERS: [&str; 64] = [
    "A", "A", "A", "A", "A", "A", "AE", "C", // C0
    "E", "E", "E", "E", "I", "I", "I", "I", // C8
    "D", "N", "O", "O", "O", "O", "O", "", // D0 (D7 is the multiplication sign)
    "O", "U", "U", "U", "U", "Y", "TH", "ss", // D8
    "a", "a", "a", "a", "a", "a", "ae", "c", // E0
    "e", "e", "e", "e", "i", "i", "i", "i", // E8
    "d", "n", "o", "o", "o", "o", "o", "", // F0 (F7 is the division sign)
    "o", "u", "u", "u", "u", "y", "th", "y", // F8
];

/// U+0100..=U+017F.
const LATIN_EXT_A: [&str; 128] = [
    "A", "a", "A", "a", "A", "a", // 0100
    "C", "c", "C", "c", "C", "c", "C", "c", // 0106
    "D", "d", "D", "d", // 010E
    "E", "e", "E", "e", "E", "e", "E", "e", "E", "e", // 0112
    "G", "g", "G", "g", "G", "g", "G", "g", // 011C
    "H", "h", "H", "h", // 0124
    "I", "i", "I", "i", "I", "i", "I", "i", "I", "i", // 0128
    "IJ", "ij", "J", "j", // 0132
    "K", "k", "k", // 0136
    "L", "l", "L", "l", "L", "l", "L", "l", "L", "l", // 0139
    "N", "n", "N", "n", "N", "n", "n", "N", "n", // 0143
    "O", "o", "O", "o", "O", "o", "OE", "oe", // 014C
    "R", "r", "R", "r", "R", "r", // 0154
    "S", "s", "S", "s", "S", "s", "S", "s", // 015A
    "T", "t", "T", "t", "T", "t", // 0162
    "U", "u", "U", "u", "U", "u", "U", "u", "U", "u", "U", "u", // 0168
    "W", "w", "Y", "y", "Y", // 0174
    "Z", "z", "Z", "z", "Z", "z", "s", // 0179
];

/// Base letters of U+1E00..=U+1E95 and U+1EA0..=U+1EB7, one entry per run
/// of upper/lower pairs.
const LATIN_EXT_ADDITIONAL_PAIRS: [(u32, char); 25] = [
    (0x1E00, 'a'),
    (0x1E02, 'b'),
    (0x1E08, 'c'),
    (0x1E0A, 'd'),
    (0x1E14, 'e'),
    (0x1E1E, 'f'),
    (0x1E20, 'g'),
    (0x1E22, 'h'),
    (0x1E2C, 'i'),
    (0x1E30, 'k'),
    (0x1E36, 'l'),
    (0x1E3E, 'm'),
    (0x1E44, 'n'),
    (0x1E4C, 'o'),
    (0x1E54, 'p'),
    (0x1E58, 'r'),
    (0x1E60, 's'),
    (0x1E6A, 't'),
    (0x1E72, 'u'),
    (0x1E7C, 'v'),
    (0x1E80, 'w'),
    (0x1E8A, 'x'),
    (0x1E8E, 'y'),
    (0x1E90, 'z'),
    // Vietnamese block.
    (0x1EA0, 'a'),
];

/// Vietnamese tail of Latin Extended Additional, after U+1EB8.
const VIETNAMESE_TAIL: [(u32, char); 4] = [
    (0x1EC8, 'i'),
    (0x1ECC, 'o'),
    (0x1EE4, 'u'),
    (0x1EF2, 'y'),
];

const ROMAN_NUMERALS: [&str; 16] = [
    "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII", "L", "C", "D", "M",
];

fn push_cased(out: &mut String, base: char, upper: bool) {
    if upper {
        out.push(base.to_ascii_uppercase());
    } else {
        out.push(base);
    }
}

/// Find the pair-table entry covering `cp` and push its base letter.
/// Even offsets are uppercase, odd offsets lowercase.
fn push_paired(out: &mut String, table: &[(u32, char)], cp: u32) -> bool {
    match table.iter().rev().find(|(start, _)| *start <= cp) {
        Some(&(start, base)) => {
            push_cased(out, base, (cp - start) % 2 == 0);
            true
        }
        None => false,
    }
}

fn latin_ext_b(cp: u32) -> Option<&'static str> {
    Some(match cp {
        0x0180 => "b",
        0x0181 => "B",
        0x0186 | 0x019F => "O",
        0x0187 => "C",
        0x0188 => "c",
        0x0189 | 0x018A => "D",
        0x0191 => "F",
        0x0192 => "f",
        0x0193 => "G",
        0x0197 => "I",
        0x0198 => "K",
        0x0199 => "k",
        0x019A => "l",
        0x019D => "N",
        0x019E => "n",
        0x01A0 => "O",
        0x01A1 => "o",
        0x01A4 => "P",
        0x01A5 => "p",
        0x01AB => "t",
        0x01AC | 0x01AE => "T",
        0x01AD => "t",
        0x01AF => "U",
        0x01B0 => "u",
        0x01B2 => "V",
        0x01B3 => "Y",
        0x01B4 => "y",
        0x01B5 => "Z",
        0x01B6 => "z",
        0x01C4 | 0x01F1 => "DZ",
        0x01C5 | 0x01F2 => "Dz",
        0x01C6 | 0x01F3 => "dz",
        0x01C7 => "LJ",
        0x01C8 => "Lj",
        0x01C9 => "lj",
        0x01CA => "NJ",
        0x01CB => "Nj",
        0x01CC => "nj",
        0x01F0 => "j",
        0x01E2 | 0x01FC => "AE",
        0x01E3 | 0x01FD => "ae",
        _ => return None,
    })
}

/// Pair ranges of Latin Extended-B (U+01CD..=U+021F).
const LATIN_EXT_B_PAIRS: [(u32, u32, char); 21] = [
    (0x01CD, 0x01CE, 'a'),
    (0x01CF, 0x01D0, 'i'),
    (0x01D1, 0x01D2, 'o'),
    (0x01D3, 0x01DC, 'u'),
    (0x01DE, 0x01E1, 'a'),
    (0x01E4, 0x01E7, 'g'),
    (0x01E8, 0x01E9, 'k'),
    (0x01EA, 0x01ED, 'o'),
    (0x01F4, 0x01F5, 'g'),
    (0x01F8, 0x01F9, 'n'),
    (0x01FA, 0x01FB, 'a'),
    (0x01FE, 0x01FF, 'o'),
    (0x0200, 0x0203, 'a'),
    (0x0204, 0x0207, 'e'),
    (0x0208, 0x020B, 'i'),
    (0x020C, 0x020F, 'o'),
    (0x0210, 0x0213, 'r'),
    (0x0214, 0x0217, 'u'),
    (0x0218, 0x0219, 's'),
    (0x021A, 0x021B, 't'),
    (0x021E, 0x021F, 'h'),
];

fn latin_ext_b_pair(cp: u32) -> Option<(char, bool)> {
    // U+0226..=U+0233 alternates a/e/o/o/o/o/y; handle it explicitly.
    if (0x0226..=0x0233).contains(&cp) {
        let base = match cp {
            0x0226 | 0x0227 => 'a',
            0x0228 | 0x0229 => 'e',
            0x022A..=0x0231 => 'o',
            _ => 'y',
        };
        return Some((base, cp % 2 == 0));
    }
    LATIN_EXT_B_PAIRS
        .iter()
        .find(|(lo, hi, _)| (*lo..=*hi).contains(&cp))
        .map(|&(lo, _, base)| (base, (cp - lo) % 2 == 0))
}

/// Lowercase-only phonetic and modifier letters that have an obvious base.
fn phonetic(cp: u32) -> Option<char> {
    Some(match cp {
        0x0250 | 0x0251 | 0x1D00 | 0x1D43 | 0x2090 => 'a',
        0x0253 | 0x0299 | 0x1D47 => 'b',
        0x0254 | 0x0275 | 0x1D0F | 0x1D52 | 0x2092 => 'o',
        0x0256 | 0x0257 | 0x1D05 | 0x1D48 => 'd',
        0x0259 | 0x025B | 0x1D07 | 0x1D49 | 0x2091 => 'e',
        0x0260 | 0x0261 | 0x0262 | 0x1D4D => 'g',
        0x0266 | 0x029C | 0x02B0 | 0x2095 => 'h',
        0x0268 | 0x026A | 0x1D62 | 0x2071 => 'i',
        0x02B2 | 0x1D0A => 'j',
        0x1D0B | 0x1D4F | 0x2096 => 'k',
        0x026B | 0x029F | 0x02E1 | 0x2097 => 'l',
        0x026F | 0x0271 | 0x1D0D | 0x1D50 | 0x2098 => 'm',
        0x0272 | 0x0273 | 0x0274 | 0x207F | 0x2099 => 'n',
        0x1D18 | 0x1D56 | 0x209A => 'p',
        0x027C..=0x027E | 0x0280 | 0x02B3 | 0x1D63 => 'r',
        0x0282 | 0x02E2 | 0x209B => 's',
        0x0288 | 0x1D1B | 0x1D57 | 0x209C => 't',
        0x0289 | 0x1D1C | 0x1D58 | 0x1D64 => 'u',
        0x028B | 0x1D20 | 0x1D5B | 0x1D65 => 'v',
        0x02B7 | 0x1D21 => 'w',
        0x02E3 | 0x2093 => 'x',
        0x028F | 0x02B8 => 'y',
        0x0290 | 0x0291 | 0x1D22 => 'z',
        0x1D04 => 'c',
        _ => return None,
    })
}

/// Uppercase modifier letters U+1D2C..=U+1D42.
fn modifier_capital(cp: u32) -> Option<char> {
    Some(match cp {
        0x1D2C => 'A',
        0x1D2E => 'B',
        0x1D30 => 'D',
        0x1D31 => 'E',
        0x1D33 => 'G',
        0x1D34 => 'H',
        0x1D35 => 'I',
        0x1D36 => 'J',
        0x1D37 => 'K',
        0x1D38 => 'L',
        0x1D39 => 'M',
        0x1D3A => 'N',
        0x1D3C => 'O',
        0x1D3E => 'P',
        0x1D3F => 'R',
        0x1D40 => 'T',
        0x1D41 => 'U',
        0x1D42 => 'W',
        _ => return None,
    })
}

/// Reduce one Latin-decorated character to ASCII.
///
/// ASCII input is copied through. Combining diacritical marks are dropped
/// (they count as handled). Returns `false` if `c` is not known.
pub fn fold_latin(c: char, out: &mut String) -> bool {
    let cp = c as u32;
    match cp {
        0x0000..=0x007F => out.push(c),
        0x00AA => out.push('a'),
        0x00B2 => out.push('2'),
        0x00B3 => out.push('3'),
        0x00B5 => out.push('u'),
        0x00B9 => out.push('1'),
        0x00BA => out.push('o'),
        0x00BC => out.push_str("1/4"),
        0x00BD => out.push_str("1/2"),
        0x00BE => out.push_str("3/4"),
        0x00C0..=0x00FF => {
            let folded = LATIN1_LETTERS[(cp - 0x00C0) as usize];
            if folded.is_empty() {
                return false;
            }
            out.push_str(folded);
        }
        0x0100..=0x017F => out.push_str(LATIN_EXT_A[(cp - 0x0100) as usize]),
        0x0180..=0x024F => {
            if let Some(folded) = latin_ext_b(cp) {
                out.push_str(folded);
            } else if let Some((base, upper)) = latin_ext_b_pair(cp) {
                push_cased(out, base, upper);
            } else {
                return false;
            }
        }
        0x0300..=0x036F => {}
        0x1E00..=0x1E95 | 0x1EA0..=0x1EB7 => {
            return push_paired(out, &LATIN_EXT_ADDITIONAL_PAIRS, cp);
        }
        0x1EB8..=0x1EC7 => push_cased(out, 'e', cp % 2 == 0),
        0x1EC8..=0x1EF9 => return push_paired(out, &VIETNAMESE_TAIL, cp),
        0x1E96 => out.push('h'),
        0x1E97 => out.push('t'),
        0x1E98 => out.push('w'),
        0x1E99 => out.push('y'),
        0x1E9A => out.push('a'),
        0x1E9B => out.push('s'),
        0x1E9E => out.push_str("SS"),
        0x1D2C..=0x1D42 => match modifier_capital(cp) {
            Some(base) => out.push(base),
            None => return false,
        },
        0x2070 => out.push('0'),
        0x2074..=0x2079 => out.push(char::from(b'0' + (cp - 0x2070) as u8)),
        0x2080..=0x2089 => out.push(char::from(b'0' + (cp - 0x2080) as u8)),
        0x2153 => out.push_str("1/3"),
        0x2154 => out.push_str("2/3"),
        0x2160..=0x216F => out.push_str(ROMAN_NUMERALS[(cp - 0x2160) as usize]),
        0x2170..=0x217F => {
            out.push_str(&ROMAN_NUMERALS[(cp - 0x2170) as usize].to_ascii_lowercase());
        }
        0xFB00 => out.push_str("ff"),
        0xFB01 => out.push_str("fi"),
        0xFB02 => out.push_str("fl"),
        0xFB03 => out.push_str("ffi"),
        0xFB04 => out.push_str("ffl"),
        0xFB05 | 0xFB06 => out.push_str("st"),
        0xFF01..=0xFF5E => match char::from_u32(cp - 0xFEE0) {
            Some(ascii) => out.push(ascii),
            None => return false,
        },
        _ => match phonetic(cp) {
            Some(base) => out.push(base),
            None => return false,
        },
    }
    true
}

// ---------------------------------------------------------------------------
// Greek and Cyrillic
// ---------------------------------------------------------------------------

fn greek_capital(c: char) -> Option<&'static str> {
    Some(match c {
        'Α' | 'Ά' => "A",
        'Β' => "V",
        'Γ' => "G",
        'Δ' => "D",
        'Ε' | 'Έ' => "E",
        'Ζ' => "Z",
        'Η' | 'Ή' | 'Ι' | 'Ί' | 'Ϊ' => "I",
        'Θ' => "Th",
        'Κ' => "K",
        'Λ' => "L",
        'Μ' => "M",
        'Ν' => "N",
        'Ξ' => "X",
        'Ο' | 'Ό' | 'Ω' | 'Ώ' => "O",
        'Π' => "P",
        'Ρ' => "R",
        'Σ' => "S",
        'Τ' => "T",
        'Υ' | 'Ύ' | 'Ϋ' => "Y",
        'Φ' => "F",
        'Χ' => "Ch",
        'Ψ' => "Ps",
        _ => return None,
    })
}

fn cyrillic_capital(c: char) -> Option<&'static str> {
    Some(match c {
        'А' => "A",
        'Б' => "B",
        'В' => "V",
        'Г' | 'Ґ' => "G",
        'Д' => "D",
        'Е' | 'Э' => "E",
        'Ё' => "Yo",
        'Є' => "Ye",
        'Ж' => "Zh",
        'З' => "Z",
        'И' | 'І' => "I",
        'Ї' => "Yi",
        'Й' | 'Ы' => "Y",
        'Ј' => "J",
        'К' => "K",
        'Л' => "L",
        'Љ' => "Lj",
        'М' => "M",
        'Н' => "N",
        'Њ' => "Nj",
        'О' => "O",
        'П' => "P",
        'Р' => "R",
        'С' => "S",
        'Т' => "T",
        'Ћ' => "C",
        'Ђ' => "Dj",
        'У' | 'Ў' => "U",
        'Ф' => "F",
        'Х' => "Kh",
        'Ц' => "Ts",
        'Ч' => "Ch",
        'Џ' => "Dz",
        'Ш' => "Sh",
        'Щ' => "Shch",
        'Ъ' | 'Ь' => "",
        'Ю' => "Yu",
        'Я' => "Ya",
        _ => return None,
    })
}

/// Romanize one Greek or Cyrillic letter. Returns `false` for anything
/// else, including Latin text.
pub fn fold_script(c: char, out: &mut String) -> bool {
    let lower = c.is_lowercase();
    // Both scripts case-map one-to-one (final sigma included).
    let capital = if lower {
        c.to_uppercase().next().unwrap_or(c)
    } else {
        c
    };
    let Some(roman) = greek_capital(capital).or_else(|| cyrillic_capital(capital)) else {
        return false;
    };
    if lower {
        out.push_str(&roman.to_ascii_lowercase());
    } else {
        out.push_str(roman);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fold_str(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for c in s.chars() {
            if !fold_script(c, &mut out) && !fold_latin(c, &mut out) {
                out.push(c);
            }
        }
        out
    }

    fn latin(c: char) -> Option<String> {
        let mut out = String::new();
        fold_latin(c, &mut out).then_some(out)
    }

    #[test]
    fn latin1_accents() {
        assert_eq!(latin('É').as_deref(), Some("E"));
        assert_eq!(latin('ë').as_deref(), Some("e"));
        assert_eq!(latin('Ø').as_deref(), Some("O"));
        assert_eq!(latin('ß').as_deref(), Some("ss"));
        assert_eq!(latin('Þ').as_deref(), Some("TH"));
        assert_eq!(latin('ÿ').as_deref(), Some("y"));
        assert_eq!(latin('×'), None);
        assert_eq!(latin('÷'), None);
    }

    #[test]
    fn latin_extended_a_alignment() {
        assert_eq!(latin('Ā').as_deref(), Some("A"));
        assert_eq!(latin('č').as_deref(), Some("c"));
        assert_eq!(latin('Đ').as_deref(), Some("D"));
        assert_eq!(latin('ı').as_deref(), Some("i"));
        assert_eq!(latin('Ĳ').as_deref(), Some("IJ"));
        assert_eq!(latin('ĸ').as_deref(), Some("k"));
        assert_eq!(latin('Ł').as_deref(), Some("L"));
        assert_eq!(latin('ŉ').as_deref(), Some("n"));
        assert_eq!(latin('Ŋ').as_deref(), Some("N"));
        assert_eq!(latin('Œ').as_deref(), Some("OE"));
        assert_eq!(latin('š').as_deref(), Some("s"));
        assert_eq!(latin('ű').as_deref(), Some("u"));
        assert_eq!(latin('Ÿ').as_deref(), Some("Y"));
        assert_eq!(latin('Ž').as_deref(), Some("Z"));
        assert_eq!(latin('ſ').as_deref(), Some("s"));
    }

    #[test]
    fn latin_extended_b() {
        assert_eq!(latin('ǅ').as_deref(), Some("Dz"));
        assert_eq!(latin('Ǔ').as_deref(), Some("U"));
        assert_eq!(latin('ǜ').as_deref(), Some("u"));
        assert_eq!(latin('ș').as_deref(), Some("s"));
        assert_eq!(latin('Ț').as_deref(), Some("T"));
        assert_eq!(latin('ȳ').as_deref(), Some("y"));
        assert_eq!(latin('Ȯ').as_deref(), Some("O"));
    }

    #[test]
    fn latin_extended_additional() {
        assert_eq!(latin('Ḁ').as_deref(), Some("A"));
        assert_eq!(latin('ḃ').as_deref(), Some("b"));
        assert_eq!(latin('Ṩ').as_deref(), Some("S"));
        assert_eq!(latin('ẕ').as_deref(), Some("z"));
        assert_eq!(latin('Ạ').as_deref(), Some("A"));
        assert_eq!(latin('ặ').as_deref(), Some("a"));
        assert_eq!(latin('Ế').as_deref(), Some("E"));
        assert_eq!(latin('ị').as_deref(), Some("i"));
        assert_eq!(latin('Ợ').as_deref(), Some("O"));
        assert_eq!(latin('ự').as_deref(), Some("u"));
        assert_eq!(latin('ỹ').as_deref(), Some("y"));
        assert_eq!(latin('ẞ').as_deref(), Some("SS"));
    }

    #[test]
    fn forms_and_modifiers() {
        assert_eq!(latin('ﬁ').as_deref(), Some("fi"));
        assert_eq!(latin('Ａ').as_deref(), Some("A"));
        assert_eq!(latin('ｚ').as_deref(), Some("z"));
        assert_eq!(latin('Ⅻ').as_deref(), Some("XII"));
        assert_eq!(latin('ⅳ').as_deref(), Some("iv"));
        assert_eq!(latin('⁵').as_deref(), Some("5"));
        assert_eq!(latin('₉').as_deref(), Some("9"));
        assert_eq!(latin('ⁿ').as_deref(), Some("n"));
        assert_eq!(latin('ᴬ').as_deref(), Some("A"));
        assert_eq!(latin('ɐ').as_deref(), Some("a"));
        assert_eq!(latin('\u{0301}').as_deref(), Some(""));
    }

    #[test]
    fn unknown_characters_declined() {
        for c in ['中', 'Ж', '😀', '\u{2000}'] {
            assert_eq!(latin(c), None, "char {c:?}");
        }
    }

    #[test]
    fn script_romanization_preserves_case() {
        assert_eq!(fold_str("Жанна"), "Zhanna");
        assert_eq!(fold_str("ЩУКА"), "ShchUKA");
        assert_eq!(fold_str("Θεός"), "Theos");
        assert_eq!(fold_str("Ωμέγα"), "Omega");
    }

    #[test]
    fn unknown_characters_pass_through() {
        assert_eq!(fold_str("Zoë 中"), "Zoe 中");
        assert_eq!(fold_str("Éowyn"), "Eowyn");
    }
}
