#![forbid(unsafe_code)]

//! Locale-aware string ordering.
//!
//! An [`OrderingService`] is bound to one locale and one backend for its
//! whole life. Build a fresh one per sort: native collators are not assumed
//! to be thread-safe, and the active locale may change between sorts.
//!
//! # Bulk sorting
//!
//! [`OrderingService::sort_by`] computes one [`CollationKey`] per item up
//! front, sorts `(index, key)` pairs with a stable sort, then moves the items
//! into the resulting order. Key derivation dominates the cost of a
//! collation-based sort, so it runs exactly `n` times instead of
//! `O(n log n)`.
//!
//! # Example
//!
//! ```
//! use textclass::locale::Locale;
//! use textclass::ordering::OrderingService;
//!
//! let ordering = OrderingService::for_locale(&Locale::new("en", None));
//! let sorted = ordering.sort_by(vec!["pear", "Apple", "banana"], |s| *s);
//! assert_eq!(sorted, vec!["Apple", "banana", "pear"]);
//! ```

use std::cmp::Ordering;

#[cfg(feature = "icu")]
use crate::icu_backend::{self, NativeCollator};

use crate::capability::{CapabilityChoice, CapabilityProbe, ServiceKind};
use crate::config::ClassifierConfig;
use crate::locale::Locale;

// ---------------------------------------------------------------------------
// CollationKey
// ---------------------------------------------------------------------------

/// Opaque ordering token for one string.
///
/// Keys only compare meaningfully through the [`OrderingService`] that
/// produced them, via [`OrderingService::compare_keys`]. Comparing two keys
/// never re-runs collation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollationKey(KeyRepr);

#[derive(Debug, Clone, PartialEq, Eq)]
enum KeyRepr {
    /// The string itself, compared by code point.
    Raw(String),
    /// Accent- and case-folded primary key, original string as tie-break.
    #[cfg(feature = "normalization")]
    Folded { primary: String, original: String },
    /// Collator sort-key bytes, original string as tie-break.
    #[cfg(feature = "icu")]
    Sort { bytes: Vec<u8>, original: String },
}

#[cfg(any(feature = "normalization", feature = "icu"))]
impl KeyRepr {
    /// Orders keys of different representations; only reached when keys
    /// from different instances are mixed.
    fn rank(&self) -> u8 {
        match self {
            Self::Raw(_) => 0,
            #[cfg(feature = "normalization")]
            Self::Folded { .. } => 1,
            #[cfg(feature = "icu")]
            Self::Sort { .. } => 2,
        }
    }
}

// ---------------------------------------------------------------------------
// OrderingService
// ---------------------------------------------------------------------------

enum Backend {
    #[cfg(feature = "icu")]
    Collator(Box<NativeCollator>),
    #[cfg(feature = "normalization")]
    Folded,
    Codepoint,
}

/// Comparator and stable bulk sort for one locale.
pub struct OrderingService {
    locale: Locale,
    choice: CapabilityChoice,
    backend: Backend,
}

impl std::fmt::Debug for OrderingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderingService")
            .field("locale", &self.locale)
            .field("choice", &self.choice)
            .finish()
    }
}

impl OrderingService {
    /// Build under the process-wide configuration.
    pub fn for_locale(locale: &Locale) -> Self {
        Self::new(locale, ClassifierConfig::global())
    }

    pub fn new(locale: &Locale, config: &ClassifierConfig) -> Self {
        let probed = CapabilityProbe::new(config).probe(ServiceKind::Ordering);
        Self::with_choice(locale, probed)
    }

    /// Build on a specific tier, degrading to code point order if that tier
    /// cannot serve `locale`.
    pub fn with_choice(locale: &Locale, choice: CapabilityChoice) -> Self {
        let (choice, backend) = match choice {
            #[cfg(feature = "icu")]
            CapabilityChoice::NativeHighFidelity => match icu_backend::tertiary_collator(locale) {
                Ok(collator) => (choice, Backend::Collator(Box::new(collator))),
                Err(err) => {
                    tracing::debug!(
                        message = "textclass.ordering.fallback",
                        locale = %locale,
                        %err
                    );
                    (CapabilityChoice::Fallback, Backend::Codepoint)
                }
            },
            #[cfg(feature = "normalization")]
            CapabilityChoice::NativeBasic => (choice, Backend::Folded),
            _ => (CapabilityChoice::Fallback, Backend::Codepoint),
        };
        Self {
            locale: locale.clone(),
            choice,
            backend,
        }
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// The tier actually serving this instance.
    pub fn choice(&self) -> CapabilityChoice {
        self.choice
    }

    /// Compare two strings in this locale's order.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.backend {
            #[cfg(feature = "icu")]
            Backend::Collator(collator) => collator.compare(a, b).then_with(|| a.cmp(b)),
            #[cfg(feature = "normalization")]
            Backend::Folded => fold_key(a).cmp(&fold_key(b)).then_with(|| a.cmp(b)),
            Backend::Codepoint => a.cmp(b),
        }
    }

    /// Derive the ordering token for `s`.
    pub fn collation_key(&self, s: &str) -> CollationKey {
        match &self.backend {
            #[cfg(feature = "icu")]
            Backend::Collator(collator) => {
                let mut bytes = Vec::new();
                let Ok(()) = collator.write_sort_key_to(s, &mut bytes);
                CollationKey(KeyRepr::Sort {
                    bytes,
                    original: s.to_owned(),
                })
            }
            #[cfg(feature = "normalization")]
            Backend::Folded => CollationKey(KeyRepr::Folded {
                primary: fold_key(s),
                original: s.to_owned(),
            }),
            _ => CollationKey(KeyRepr::Raw(s.to_owned())),
        }
    }

    /// Compare two keys produced by this instance.
    ///
    /// Agrees with [`OrderingService::compare`] on the source strings.
    pub fn compare_keys(&self, a: &CollationKey, b: &CollationKey) -> Ordering {
        match (&a.0, &b.0) {
            (KeyRepr::Raw(a), KeyRepr::Raw(b)) => a.cmp(b),
            #[cfg(feature = "normalization")]
            (
                KeyRepr::Folded {
                    primary: pa,
                    original: oa,
                },
                KeyRepr::Folded {
                    primary: pb,
                    original: ob,
                },
            ) => pa.cmp(pb).then_with(|| oa.cmp(ob)),
            #[cfg(feature = "icu")]
            (
                KeyRepr::Sort {
                    bytes: ba,
                    original: oa,
                },
                KeyRepr::Sort {
                    bytes: bb,
                    original: ob,
                },
            ) => ba.cmp(bb).then_with(|| oa.cmp(ob)),
            #[cfg(any(feature = "normalization", feature = "icu"))]
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }

    /// Stable sort of `items` by `key_of`, calling `key_of` once per item.
    pub fn sort_by<T, F>(&self, items: impl IntoIterator<Item = T>, mut key_of: F) -> Vec<T>
    where
        F: FnMut(&T) -> &str,
    {
        let items: Vec<T> = items.into_iter().collect();
        let mut keyed: Vec<(usize, CollationKey)> = items
            .iter()
            .enumerate()
            .map(|(idx, item)| (idx, self.collation_key(key_of(item))))
            .collect();

        // `sort_by` is stable: equal keys keep input order.
        keyed.sort_by(|a, b| self.compare_keys(&a.1, &b.1));

        let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
        keyed
            .into_iter()
            .filter_map(|(idx, _)| slots[idx].take())
            .collect()
    }
}

/// Primary key for the folded backend: compatibility-decomposed, marks
/// removed, residual Latin decorations folded, lowercased.
#[cfg(feature = "normalization")]
fn fold_key(s: &str) -> String {
    use crate::blocks::is_probably_latin;
    use crate::fold::fold_latin;

    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        unicode_normalization::char::decompose_compatible(c, |d| {
            if unicode_normalization::char::is_combining_mark(d) {
                return;
            }
            if d.is_ascii() || !is_probably_latin(d) || !fold_latin(d, &mut out) {
                out.push(d);
            }
        });
    }
    out.to_lowercase()
}
