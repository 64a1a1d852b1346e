#![forbid(unsafe_code)]

//! Alphabetic bucketing: one display label per string.
//!
//! # Fallback algorithm
//!
//! Without a native alphabetic index, the label of `s` is derived from its
//! first code point `c`:
//!
//! 1. empty string → `#`
//! 2. decimal digit → `#`
//! 3. ASCII letter → that letter, uppercased
//! 4. `c` in a Latin-adjacent Unicode block → transliterate `c` alone with
//!    the process-wide transliterator and classify the result again
//! 5. anything else → `#`
//!
//! Step 4 shrinks the input to a single code point each round, so it settles
//! after one or two rounds for any sane recipe. It is still capped at
//! [`ClassifierConfig::max_label_depth`] rounds, and a transliteration that
//! echoes its input ends the search with `#`.
//!
//! # Example
//!
//! ```
//! use textclass::indexing::{BucketLabel, IndexingService};
//! use textclass::locale::Locale;
//!
//! let index = IndexingService::for_locale(&Locale::new("en", None));
//! assert_eq!(index.label_for("Éowyn"), BucketLabel::Letter('E'));
//! assert_eq!(index.label_for("3rd").as_char(), '#');
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::blocks::{UnicodeBlock, is_probably_latin};
use crate::capability::{CapabilityChoice, CapabilityProbe, ServiceKind};
use crate::config::ClassifierConfig;
use crate::locale::Locale;
use crate::ordering::OrderingService;
use crate::transliterate::{Transliterator, transliteration};

#[cfg(feature = "icu")]
use crate::icu_backend::AlphabeticIndex;

// ---------------------------------------------------------------------------
// BucketLabel
// ---------------------------------------------------------------------------

/// Display bucket of a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketLabel {
    /// A single letter bucket.
    Letter(char),
    /// The generic `#` bucket.
    Other,
}

impl BucketLabel {
    /// Character shown for [`BucketLabel::Other`].
    pub const SENTINEL: char = '#';

    #[inline]
    pub const fn as_char(self) -> char {
        match self {
            Self::Letter(c) => c,
            Self::Other => Self::SENTINEL,
        }
    }

    #[inline]
    pub const fn is_other(self) -> bool {
        matches!(self, Self::Other)
    }
}

impl fmt::Display for BucketLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// ---------------------------------------------------------------------------
// IndexingService
// ---------------------------------------------------------------------------

enum Backend {
    #[cfg(feature = "icu")]
    Native(Box<AlphabeticIndex>),
    Heuristic {
        transliterator: Arc<Transliterator>,
        max_depth: u8,
    },
}

/// Bucket-label classifier for one locale.
///
/// Build a fresh instance per classification batch.
pub struct IndexingService {
    locale: Locale,
    choice: CapabilityChoice,
    /// Tier used to order buckets in [`IndexingService::group`].
    ordering_choice: CapabilityChoice,
    backend: Backend,
}

impl fmt::Debug for IndexingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexingService")
            .field("locale", &self.locale)
            .field("choice", &self.choice)
            .finish()
    }
}

impl IndexingService {
    /// Build under the process-wide configuration.
    pub fn for_locale(locale: &Locale) -> Self {
        Self::new(locale, ClassifierConfig::global())
    }

    pub fn new(locale: &Locale, config: &ClassifierConfig) -> Self {
        let probe = CapabilityProbe::new(config);
        let probed = probe.probe(ServiceKind::Indexing);
        let service = match probed {
            #[cfg(feature = "icu")]
            CapabilityChoice::NativeHighFidelity => match AlphabeticIndex::for_locale(locale) {
                Ok(index) => Self {
                    locale: locale.clone(),
                    choice: probed,
                    ordering_choice: CapabilityChoice::Fallback,
                    backend: Backend::Native(Box::new(index)),
                },
                Err(err) => {
                    tracing::debug!(
                        message = "textclass.indexing.fallback",
                        locale = %locale,
                        %err
                    );
                    Self::heuristic(locale, transliteration(None), config.max_label_depth)
                }
            },
            _ => Self::heuristic(locale, transliteration(None), config.max_label_depth),
        };
        Self {
            ordering_choice: probe.probe(ServiceKind::Ordering),
            ..service
        }
    }

    /// Build the fallback classifier around an explicit transliterator.
    ///
    /// Buckets from [`IndexingService::group`] are then ordered by code
    /// point; heuristic labels are plain ASCII letters.
    pub fn heuristic(locale: &Locale, transliterator: Arc<Transliterator>, max_depth: u8) -> Self {
        Self {
            locale: locale.clone(),
            choice: CapabilityChoice::Fallback,
            ordering_choice: CapabilityChoice::Fallback,
            backend: Backend::Heuristic {
                transliterator,
                max_depth: max_depth.max(1),
            },
        }
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn choice(&self) -> CapabilityChoice {
        self.choice
    }

    /// Bucket label of `s`. Total and deterministic.
    pub fn label_for(&self, s: &str) -> BucketLabel {
        match &self.backend {
            #[cfg(feature = "icu")]
            Backend::Native(index) => index.label_for(s),
            Backend::Heuristic {
                transliterator,
                max_depth,
            } => heuristic_label(s, transliterator, *max_depth),
        }
    }

    /// Group `items` into buckets.
    ///
    /// Letter buckets come first in this locale's order, the `#` bucket
    /// last. Each bucket keeps input order.
    pub fn group<T, F>(
        &self,
        items: impl IntoIterator<Item = T>,
        mut key_of: F,
    ) -> Vec<(BucketLabel, Vec<T>)>
    where
        F: FnMut(&T) -> &str,
    {
        let mut buckets: Vec<(BucketLabel, Vec<T>)> = Vec::new();
        let mut slot_of: HashMap<BucketLabel, usize> = HashMap::new();
        for item in items {
            let label = self.label_for(key_of(&item));
            let slot = *slot_of.entry(label).or_insert_with(|| {
                buckets.push((label, Vec::new()));
                buckets.len() - 1
            });
            buckets[slot].1.push(item);
        }

        let ordering = OrderingService::with_choice(&self.locale, self.ordering_choice);
        let mut label_text = [0u8; 4];
        let mut other_text = [0u8; 4];
        buckets.sort_by(|(a, _), (b, _)| match (a, b) {
            (BucketLabel::Other, BucketLabel::Other) => std::cmp::Ordering::Equal,
            (BucketLabel::Other, _) => std::cmp::Ordering::Greater,
            (_, BucketLabel::Other) => std::cmp::Ordering::Less,
            (BucketLabel::Letter(x), BucketLabel::Letter(y)) => {
                let x = x.encode_utf8(&mut label_text);
                let y = y.encode_utf8(&mut other_text);
                ordering.compare(x, y)
            }
        });
        buckets
    }
}

fn heuristic_label(s: &str, transliterator: &Transliterator, max_depth: u8) -> BucketLabel {
    let mut current: Cow<'_, str> = Cow::Borrowed(s);
    let mut rounds = 0u8;
    loop {
        let Some(c) = current.chars().next() else {
            return BucketLabel::Other;
        };
        // Non-ASCII decimal digits never reach a letter: fullwidth digits
        // transliterate to ASCII digits, other scripts are not Latin.
        if c.is_ascii_digit() {
            return BucketLabel::Other;
        }
        if c.is_ascii_uppercase() {
            return BucketLabel::Letter(c);
        }
        if c.is_ascii_lowercase() {
            return BucketLabel::Letter(c.to_ascii_uppercase());
        }
        if !is_probably_latin(c) {
            return BucketLabel::Other;
        }
        if rounds >= max_depth {
            tracing::debug!(
                message = "textclass.index.depth_exhausted",
                input = s,
                rounds,
                block = UnicodeBlock::of(c).name()
            );
            return BucketLabel::Other;
        }

        let single = &current[..c.len_utf8()];
        let reduced = transliterator.transliterate(single);
        if reduced == single {
            return BucketLabel::Other;
        }
        current = Cow::Owned(reduced);
        rounds += 1;
    }
}
