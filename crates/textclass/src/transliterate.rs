#![forbid(unsafe_code)]

//! Transliteration: reduce arbitrary text to a Latin/ASCII approximation.
//!
//! A [`Transliterator`] runs a [`Recipe`], a chain of steps written in the
//! familiar transform-id syntax:
//!
//! ```text
//! Any-Latin; Latin-ASCII; Any-Lower; [^ 0-9a-z] Remove
//! ```
//!
//! The recipe is fixed at construction. Which engine performs the
//! `Any-Latin` and `Latin-ASCII` steps depends on the probed
//! [`CapabilityChoice`]:
//!
//! ```text
//!   NativeHighFidelity → any_ascii tables (all scripts)
//!       ↓ (feature off or forced)
//!   NativeBasic → NFKD + mark stripping, fold tables for the rest
//!       ↓
//!   Fallback → fold tables only (Latin decorations, Greek, Cyrillic)
//! ```
//!
//! No tier is an identity transform: the fallback still strips accents and
//! romanizes Greek and Cyrillic.
//!
//! # Example
//!
//! ```
//! use textclass::transliteration;
//!
//! let t = transliteration(None);
//! assert_eq!(t.transliterate("Zoë Ångström!"), "zoe angstrom");
//! ```

use std::fmt;
use std::sync::{Arc, OnceLock};

#[cfg(feature = "normalization")]
use unicode_normalization::UnicodeNormalization;

use crate::blocks::is_probably_latin;
use crate::capability::{CapabilityChoice, CapabilityProbe, ServiceKind};
use crate::config::ClassifierConfig;
use crate::error::{ClassifyError, Result};
use crate::fold::{fold_latin, fold_script};

/// Recipe id used when none is configured.
pub const DEFAULT_RECIPE: &str = "Any-Latin; Latin-ASCII; Any-Lower; [^ 0-9a-z] Remove";

static DEFAULT_TRANSLITERATOR: OnceLock<Arc<Transliterator>> = OnceLock::new();

// ---------------------------------------------------------------------------
// Recipe
// ---------------------------------------------------------------------------

/// One transform in a recipe chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Romanize non-Latin scripts.
    AnyLatin,
    /// Reduce decorated Latin to ASCII.
    LatinAscii,
    /// Lowercase.
    Lower,
    /// Uppercase.
    Upper,
    /// Canonical decomposition.
    #[cfg(feature = "normalization")]
    Nfd,
    /// Compatibility decomposition.
    #[cfg(feature = "normalization")]
    Nfkd,
    /// Drop nonspacing combining marks.
    RemoveMarks,
    /// Drop everything outside `[ 0-9a-z]`.
    KeepAsciiAlnum,
    /// Identity.
    Null,
}

impl Step {
    /// Canonical id of the step.
    pub const fn id(self) -> &'static str {
        match self {
            Self::AnyLatin => "Any-Latin",
            Self::LatinAscii => "Latin-ASCII",
            Self::Lower => "Any-Lower",
            Self::Upper => "Any-Upper",
            #[cfg(feature = "normalization")]
            Self::Nfd => "NFD",
            #[cfg(feature = "normalization")]
            Self::Nfkd => "NFKD",
            Self::RemoveMarks => "[:Nonspacing Mark:] Remove",
            Self::KeepAsciiAlnum => "[^ 0-9a-z] Remove",
            Self::Null => "Null",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        // Filters are matched with collapsed whitespace; names ignore case.
        let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        let name = collapsed.as_str();
        let eq = |s: &str| name.eq_ignore_ascii_case(s);

        if eq("Any-Latin") || eq("Latin") {
            Some(Self::AnyLatin)
        } else if eq("Latin-ASCII") {
            Some(Self::LatinAscii)
        } else if eq("Any-Lower") || eq("Lower") {
            Some(Self::Lower)
        } else if eq("Any-Upper") || eq("Upper") {
            Some(Self::Upper)
        } else if eq("[:Nonspacing Mark:] Remove") || eq("[:Mn:] Remove") {
            Some(Self::RemoveMarks)
        } else if name == "[^ 0-9a-z] Remove" {
            Some(Self::KeepAsciiAlnum)
        } else if eq("Null") || eq("Any-Null") {
            Some(Self::Null)
        } else {
            Self::parse_normalization(name)
        }
    }

    #[cfg(feature = "normalization")]
    fn parse_normalization(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("NFD") {
            Some(Self::Nfd)
        } else if name.eq_ignore_ascii_case("NFKD") {
            Some(Self::Nfkd)
        } else {
            None
        }
    }

    #[cfg(not(feature = "normalization"))]
    fn parse_normalization(_name: &str) -> Option<Self> {
        None
    }
}

/// An immutable chain of transliteration steps.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Recipe {
    steps: Vec<Step>,
}

impl Recipe {
    /// Parse a `;`-separated recipe id.
    pub fn parse(id: &str) -> Result<Self> {
        let steps = id
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|raw| {
                Step::parse(raw).ok_or_else(|| ClassifyError::UnknownRecipeStep {
                    recipe: id.to_owned(),
                    step: raw.to_owned(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if steps.is_empty() {
            return Err(ClassifyError::UnknownRecipeStep {
                recipe: id.to_owned(),
                step: String::new(),
            });
        }
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Canonical id; parses back to an equal recipe.
    pub fn id(&self) -> String {
        self.steps
            .iter()
            .map(|step| step.id())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl Default for Recipe {
    fn default() -> Self {
        Self {
            steps: vec![
                Step::AnyLatin,
                Step::LatinAscii,
                Step::Lower,
                Step::KeepAsciiAlnum,
            ],
        }
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

// ---------------------------------------------------------------------------
// Transliterator
// ---------------------------------------------------------------------------

/// Runs a recipe on the backend chosen at construction.
///
/// Holds no mutable state, so one instance is shared process-wide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transliterator {
    recipe: Recipe,
    choice: CapabilityChoice,
}

impl Transliterator {
    /// Build a transliterator for `id` (or the configured default recipe).
    ///
    /// An unparseable id is logged and replaced by the default recipe.
    pub fn new(id: Option<&str>, config: &ClassifierConfig) -> Self {
        let choice = CapabilityProbe::new(config).probe(ServiceKind::Transliteration);
        let id = id.unwrap_or(config.default_recipe.as_str());
        let recipe = Recipe::parse(id).unwrap_or_else(|err| {
            tracing::warn!(message = "textclass.recipe.rejected", recipe = id, %err);
            Recipe::default()
        });
        Self::with_recipe(recipe, choice)
    }

    /// Build with an explicit recipe and backend tier.
    pub fn with_recipe(recipe: Recipe, choice: CapabilityChoice) -> Self {
        Self { recipe, choice }
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn choice(&self) -> CapabilityChoice {
        self.choice
    }

    /// Run the recipe over `s`. Total: never fails.
    pub fn transliterate(&self, s: &str) -> String {
        let mut text = s.to_owned();
        for &step in &self.recipe.steps {
            text = self.apply(step, &text);
        }
        text
    }

    fn apply(&self, step: Step, text: &str) -> String {
        match step {
            Step::AnyLatin => self.any_latin(text),
            Step::LatinAscii => self.latin_ascii(text),
            Step::Lower => text.to_lowercase(),
            Step::Upper => text.to_uppercase(),
            #[cfg(feature = "normalization")]
            Step::Nfd => text.nfd().collect(),
            #[cfg(feature = "normalization")]
            Step::Nfkd => text.nfkd().collect(),
            Step::RemoveMarks => text.chars().filter(|&c| !is_nonspacing_mark(c)).collect(),
            Step::KeepAsciiAlnum => text
                .chars()
                .filter(|&c| c == ' ' || c.is_ascii_digit() || c.is_ascii_lowercase())
                .collect(),
            Step::Null => text.to_owned(),
        }
    }

    fn any_latin(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            if c.is_ascii() || is_probably_latin(c) || is_nonspacing_mark(c) {
                out.push(c);
                continue;
            }
            match self.choice {
                #[cfg(feature = "translit")]
                CapabilityChoice::NativeHighFidelity if is_letter_like(c) => {
                    out.push_str(any_ascii::any_ascii_char(c));
                }
                _ => {
                    if !fold_script(c, &mut out) {
                        out.push(c);
                    }
                }
            }
        }
        out
    }

    fn latin_ascii(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            if c.is_ascii() {
                out.push(c);
                continue;
            }
            if !(is_probably_latin(c) || is_nonspacing_mark(c)) {
                out.push(c);
                continue;
            }
            match self.choice {
                // Symbols are left for the filter step, as on the other tiers.
                #[cfg(feature = "translit")]
                CapabilityChoice::NativeHighFidelity if is_letter_like(c) => {
                    out.push_str(any_ascii::any_ascii_char(c));
                }
                #[cfg(feature = "translit")]
                CapabilityChoice::NativeHighFidelity => out.push(c),
                #[cfg(feature = "normalization")]
                CapabilityChoice::NativeBasic => decompose_to_ascii(c, &mut out),
                _ => {
                    if !fold_latin(c, &mut out) {
                        out.push(c);
                    }
                }
            }
        }
        out
    }
}

#[cfg(feature = "normalization")]
fn decompose_to_ascii(c: char, out: &mut String) {
    // `µ` decomposes to Greek `μ`; keep such letters in Latin via the table.
    let mut leaves_latin = false;
    unicode_normalization::char::decompose_compatible(c, |d| {
        leaves_latin |= !d.is_ascii() && !is_probably_latin(d) && !is_nonspacing_mark(d);
    });
    if leaves_latin && fold_latin(c, out) {
        return;
    }
    unicode_normalization::char::decompose_compatible(c, |d| {
        if d.is_ascii() {
            out.push(d);
        } else if !is_nonspacing_mark(d) && !fold_latin(d, out) && !fold_script(d, out) {
            out.push(d);
        }
    });
}

/// Letters, numbers and marks; what `any_ascii` may romanize.
#[cfg(feature = "translit")]
fn is_letter_like(c: char) -> bool {
    c.is_alphanumeric() || is_nonspacing_mark(c)
}

#[cfg(feature = "normalization")]
fn is_nonspacing_mark(c: char) -> bool {
    unicode_normalization::char::is_combining_mark(c)
}

#[cfg(not(feature = "normalization"))]
fn is_nonspacing_mark(c: char) -> bool {
    matches!(
        c as u32,
        0x0300..=0x036F | 0x1AB0..=0x1AFF | 0x1DC0..=0x1DFF | 0x20D0..=0x20FF | 0xFE20..=0xFE2F
    )
}

// ---------------------------------------------------------------------------
// Process-wide access
// ---------------------------------------------------------------------------

/// The transliteration service.
///
/// `None` returns the process-wide default instance, built on first use
/// under [`ClassifierConfig::global`] and shared afterwards. `Some(id)`
/// builds a fresh instance for that recipe.
pub fn transliteration(id: Option<&str>) -> Arc<Transliterator> {
    match id {
        None => Arc::clone(DEFAULT_TRANSLITERATOR.get_or_init(|| {
            Arc::new(Transliterator::new(None, ClassifierConfig::global()))
        })),
        Some(id) => Arc::new(Transliterator::new(Some(id), ClassifierConfig::global())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn every_tier() -> Vec<Transliterator> {
        let mut tiers = vec![Transliterator::with_recipe(
            Recipe::default(),
            CapabilityChoice::Fallback,
        )];
        if cfg!(feature = "normalization") {
            tiers.push(Transliterator::with_recipe(
                Recipe::default(),
                CapabilityChoice::NativeBasic,
            ));
        }
        if cfg!(feature = "translit") {
            tiers.push(Transliterator::with_recipe(
                Recipe::default(),
                CapabilityChoice::NativeHighFidelity,
            ));
        }
        tiers
    }

    #[test]
    fn default_recipe_parses_to_default() {
        assert_eq!(Recipe::parse(DEFAULT_RECIPE).unwrap(), Recipe::default());
        assert_eq!(Recipe::default().id(), DEFAULT_RECIPE);
    }

    #[test]
    fn recipe_parse_is_lenient_about_spacing_and_case() {
        let recipe = Recipe::parse(" latin-ascii ;any-lower;  [^ 0-9a-z]   Remove ; ").unwrap();
        assert_eq!(
            recipe.steps(),
            &[Step::LatinAscii, Step::Lower, Step::KeepAsciiAlnum]
        );
    }

    #[test]
    fn recipe_parse_rejects_unknown_steps() {
        let err = Recipe::parse("Any-Latin; Klingon-Latin").unwrap_err();
        assert!(matches!(
            err,
            ClassifyError::UnknownRecipeStep { ref step, .. } if step == "Klingon-Latin"
        ));
        assert!(Recipe::parse("").is_err());
        assert!(Recipe::parse(" ; ").is_err());
    }

    #[test]
    fn every_tier_strips_accents() {
        for t in every_tier() {
            assert_eq!(t.transliterate("Éowyn"), "eowyn", "tier {}", t.choice());
            assert_eq!(t.transliterate("Zoë"), "zoe", "tier {}", t.choice());
            assert_eq!(t.transliterate("Ångström"), "angstrom", "tier {}", t.choice());
            assert_eq!(t.transliterate("Łódź"), "lodz", "tier {}", t.choice());
        }
    }

    #[test]
    fn every_tier_romanizes_cyrillic_and_greek() {
        for t in every_tier() {
            assert_eq!(t.transliterate("Москва"), "moskva", "tier {}", t.choice());
            assert_eq!(t.transliterate("Αθήνα").chars().next(), Some('a'));
        }
    }

    #[test]
    fn residue_is_removed() {
        for t in every_tier() {
            assert_eq!(t.transliterate("R2-D2 & C-3PO!"), "r2d2  c3po", "tier {}", t.choice());
            assert_eq!(t.transliterate(""), "");
        }
    }

    #[test]
    fn every_tier_leaves_latin_symbols_to_the_filter() {
        for t in every_tier() {
            for s in ["£", "¥", "°", "§", "¶", "¢", "©", "±"] {
                assert_eq!(t.transliterate(s), "", "{s:?} on tier {}", t.choice());
            }
            assert_eq!(t.transliterate("£5 voucher"), "5 voucher");
        }
    }

    #[test]
    fn every_tier_agrees_on_micro_sign() {
        for t in every_tier() {
            assert_eq!(t.transliterate("µTorrent"), "utorrent", "tier {}", t.choice());
        }
    }

    #[test]
    fn fallback_is_not_identity() {
        let t = Transliterator::with_recipe(Recipe::default(), CapabilityChoice::Fallback);
        let input = "Ça ß";
        assert_ne!(t.transliterate(input), input);
        assert_eq!(t.transliterate(input), "ca ss");
    }

    #[cfg(feature = "translit")]
    #[test]
    fn high_fidelity_covers_cjk() {
        let t = Transliterator::with_recipe(Recipe::default(), CapabilityChoice::NativeHighFidelity);
        assert!(!t.transliterate("北京").is_empty());
    }

    #[test]
    fn fallback_leaves_unknown_scripts_for_the_filter() {
        let t = Transliterator::with_recipe(Recipe::default(), CapabilityChoice::Fallback);
        assert_eq!(t.transliterate("北京"), "");
    }

    #[test]
    fn custom_recipe_keeps_case() {
        let recipe = Recipe::parse("Latin-ASCII").unwrap();
        let t = Transliterator::with_recipe(recipe, CapabilityChoice::Fallback);
        assert_eq!(t.transliterate("Ærøskøbing"), "AEroskobing");
    }

    #[test]
    fn remove_marks_step() {
        let recipe = Recipe::parse("[:Mn:] Remove").unwrap();
        let t = Transliterator::with_recipe(recipe, CapabilityChoice::Fallback);
        assert_eq!(t.transliterate("e\u{0301}a\u{0308}"), "ea");
    }

    #[cfg(feature = "normalization")]
    #[test]
    fn nfd_then_strip_is_accent_removal() {
        let recipe = Recipe::parse("NFD; [:Nonspacing Mark:] Remove").unwrap();
        let t = Transliterator::with_recipe(recipe, CapabilityChoice::Fallback);
        assert_eq!(t.transliterate("Crème brûlée"), "Creme brulee");
    }

    #[traced_test]
    #[test]
    fn bad_recipe_falls_back_to_default() {
        let config = ClassifierConfig::default();
        let t = Transliterator::new(Some("Any-Klingon"), &config);
        assert_eq!(t.recipe(), &Recipe::default());
        assert!(logs_contain("textclass.recipe.rejected"));
    }

    #[test]
    fn default_instance_is_shared() {
        let a = transliteration(None);
        let b = transliteration(None);
        assert!(Arc::ptr_eq(&a, &b));
        let custom = transliteration(Some("Any-Upper"));
        assert!(!Arc::ptr_eq(&a, &custom));
        assert_eq!(custom.transliterate("abc"), "ABC");
    }
}
