#![forbid(unsafe_code)]

//! Locale-aware text classification.
//!
//! Three services answer three questions about user-visible strings:
//!
//! - [`ordering::OrderingService`]: in what order should these strings be
//!   listed for a locale?
//! - [`indexing::IndexingService`]: under which letter should a string be
//!   filed in an alphabetic index?
//! - [`transliterate::Transliterator`]: what is a plain-ASCII rendition of a
//!   string?
//!
//! Each service probes once, at construction, for a native backend (see
//! [`capability`]) and otherwise runs a deterministic fallback. Callers never
//! see which tier is active unless they ask via `choice()`.
//!
//! # Features
//!
//! | Feature | Enables |
//! |---|---|
//! | `normalization` (default) | NFKD-based ordering and transliteration tiers |
//! | `translit` (default) | `any_ascii` transliteration |
//! | `icu` | ICU4X collation and the collator-driven alphabetic index |
//! | `config` | TOML/JSON loading of [`config::ClassifierConfig`] |
//!
//! # Example
//!
//! ```
//! let locale = textclass::locale_for("en-US").unwrap_or_default();
//! let sorted = textclass::sort_with_locale(vec!["pear", "Apple"], |s| *s, &locale);
//! assert_eq!(sorted, vec!["Apple", "pear"]);
//!
//! let index = textclass::indexing_for(&locale);
//! assert_eq!(index.label_for("Éowyn").as_char(), 'E');
//! ```

pub mod blocks;
pub mod capability;
pub mod config;
pub mod error;
pub mod fold;
#[cfg(feature = "icu")]
mod icu_backend;
pub mod indexing;
pub mod locale;
pub mod ordering;
pub mod transliterate;

pub use capability::{CapabilityChoice, CapabilityProbe, CapabilityReport, ServiceKind};
pub use config::{ClassifierConfig, ForceFallback};
pub use error::{ClassifyError, Result};
pub use indexing::{BucketLabel, IndexingService};
pub use locale::{Locale, LocaleSource, current_locale, locale_for};
pub use ordering::{CollationKey, OrderingService};
pub use transliterate::{Recipe, Transliterator, transliteration};

/// Fresh ordering service for `locale`.
pub fn ordering_for(locale: &Locale) -> OrderingService {
    OrderingService::for_locale(locale)
}

/// Stable locale-aware sort of `items` by `key_of`.
pub fn sort_with_locale<T, F>(
    items: impl IntoIterator<Item = T>,
    key_of: F,
    locale: &Locale,
) -> Vec<T>
where
    F: FnMut(&T) -> &str,
{
    ordering_for(locale).sort_by(items, key_of)
}

/// Fresh indexing service for `locale`.
pub fn indexing_for(locale: &Locale) -> IndexingService {
    IndexingService::for_locale(locale)
}
