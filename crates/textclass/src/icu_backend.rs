#![forbid(unsafe_code)]

//! ICU4X-backed collation and alphabetic indexing (feature `icu`).
//!
//! Collators are built from compiled-in CLDR data, so construction only fails
//! for locales the data cannot resolve. Callers translate failures into a
//! fallback backend; nothing here is surfaced to users of the crate.

use std::cmp::Ordering;

use icu_collator::options::{CollatorOptions, Strength};
use icu_collator::{Collator, CollatorBorrowed, CollatorPreferences};
use icu_locale_core::Locale as IcuLocale;

use crate::blocks::is_probably_latin;
use crate::capability::ServiceKind;
use crate::error::{ClassifyError, Result};
use crate::indexing::BucketLabel;
use crate::locale::Locale;

pub(crate) type NativeCollator = CollatorBorrowed<'static>;

fn options(strength: Strength) -> CollatorOptions {
    let mut options = CollatorOptions::default();
    options.strength = Some(strength);
    options
}

/// Root collator, used by the capability probe.
pub(crate) fn root_collator() -> Result<NativeCollator> {
    Collator::try_new(CollatorPreferences::default(), options(Strength::Tertiary))
        .map_err(|e| ClassifyError::unavailable(ServiceKind::Ordering, e.to_string()))
}

/// Collator for `locale` at `strength`.
pub(crate) fn collator_for(
    locale: &Locale,
    strength: Strength,
    service: ServiceKind,
) -> Result<NativeCollator> {
    let tag = locale.language_tag();
    let icu_locale = IcuLocale::try_from_str(&tag)
        .map_err(|e| ClassifyError::unavailable(service, format!("{tag}: {e}")))?;
    Collator::try_new(CollatorPreferences::from(&icu_locale), options(strength))
        .map_err(|e| ClassifyError::unavailable(service, format!("{tag}: {e}")))
}

pub(crate) fn tertiary_collator(locale: &Locale) -> Result<NativeCollator> {
    collator_for(locale, Strength::Tertiary, ServiceKind::Ordering)
}

// ---------------------------------------------------------------------------
// AlphabeticIndex
// ---------------------------------------------------------------------------

/// Letters some locales treat as separate index entries after (or among)
/// A-Z.
fn exemplar_extras(language: &str) -> &'static [char] {
    match language {
        "sv" | "fi" => &['Å', 'Ä', 'Ö'],
        "da" | "nb" | "nn" | "no" => &['Æ', 'Ø', 'Å'],
        "es" => &['Ñ'],
        "pl" => &['Ą', 'Ć', 'Ę', 'Ł', 'Ń', 'Ó', 'Ś', 'Ź', 'Ż'],
        "cs" | "sk" => &['Č', 'Ř', 'Š', 'Ž'],
        "tr" | "az" => &['Ç', 'Ğ', 'İ', 'Ö', 'Ş', 'Ü'],
        "is" => &['Á', 'Ð', 'É', 'Í', 'Ó', 'Ú', 'Ý', 'Þ', 'Æ', 'Ö'],
        "et" => &['Š', 'Ž', 'Õ', 'Ä', 'Ö', 'Ü'],
        _ => &[],
    }
}

/// Collator-driven alphabetic index over the locale's Latin exemplar
/// letters.
///
/// A string belongs to the last label that collates at or before it at
/// primary strength. Strings before the first label (digits, punctuation)
/// and strings starting outside the Latin blocks go to `#`.
pub(crate) struct AlphabeticIndex {
    collator: NativeCollator,
    /// Sorted by `collator`; primary-equal duplicates removed.
    labels: Vec<(char, String)>,
}

impl AlphabeticIndex {
    pub(crate) fn for_locale(locale: &Locale) -> Result<Self> {
        let collator = collator_for(locale, Strength::Primary, ServiceKind::Indexing)?;

        let mut labels: Vec<(char, String)> = ('A'..='Z')
            .chain(exemplar_extras(locale.language()).iter().copied())
            .map(|c| (c, c.to_string()))
            .collect();
        labels.sort_by(|a, b| collator.compare(&a.1, &b.1));
        // A tailored letter that is primary-equal to its base adds nothing.
        labels.dedup_by(|later, earlier| collator.compare(&later.1, &earlier.1) == Ordering::Equal);

        Ok(Self { collator, labels })
    }

    pub(crate) fn label_for(&self, s: &str) -> BucketLabel {
        let Some(first) = s.chars().next() else {
            return BucketLabel::Other;
        };
        if !is_probably_latin(first) {
            return BucketLabel::Other;
        }
        let idx = self
            .labels
            .partition_point(|(_, label)| self.collator.compare(label, s) != Ordering::Greater);
        match idx.checked_sub(1).and_then(|i| self.labels.get(i)) {
            Some(&(letter, _)) => BucketLabel::Letter(letter),
            None => BucketLabel::Other,
        }
    }
}
