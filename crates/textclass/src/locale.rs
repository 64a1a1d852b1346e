#![forbid(unsafe_code)]

//! Locale values, BCP-47-style tag conversion, and the current-locale
//! collaborator.
//!
//! Only the language, script, and region subtags are modelled. Variants and
//! extensions are accepted when well-formed but dropped, so
//! `Locale -> tag -> Locale` round-trips while `tag -> Locale -> tag` may
//! shorten the tag.
//!
//! # Example
//!
//! ```
//! use textclass::locale::{Locale, locale_for};
//!
//! let locale = Locale::new("pt", Some("BR"));
//! assert_eq!(locale.language_tag(), "pt-BR");
//! assert_eq!(locale_for("pt_br"), Some(locale));
//! assert_eq!(locale_for("not a tag"), None);
//! ```

use std::fmt;
use std::str::FromStr;

use icu_locale_core::Locale as IcuLocale;
use icu_locale_core::subtags::{Language, Region, Script};

use crate::error::{ClassifyError, Result};

/// Language used when neither the caller nor the environment names one.
pub const DEFAULT_LANGUAGE: &str = "en";

// ---------------------------------------------------------------------------
// Locale
// ---------------------------------------------------------------------------

/// A language with optional script and region.
///
/// Subtags are stored in canonical case: language lowercase, script
/// titlecase, region uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    script: Option<String>,
    region: Option<String>,
}

impl Locale {
    /// Build a locale from a language and optional region.
    ///
    /// Inputs are case-normalized but otherwise taken as given; use
    /// [`locale_for`] to validate untrusted strings.
    pub fn new(language: &str, region: Option<&str>) -> Self {
        Self {
            language: canonical_language(language),
            script: None,
            region: region.map(canonical_region),
        }
    }

    /// Attach a four-letter script subtag.
    #[must_use]
    pub fn with_script(mut self, script: &str) -> Self {
        self.script = Some(canonical_script(script));
        self
    }

    /// The platform default locale.
    pub fn platform_default() -> Self {
        Self::new(DEFAULT_LANGUAGE, None)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Canonical tag, e.g. `en`, `en-US`, `sr-Latn-RS`.
    pub fn language_tag(&self) -> String {
        let mut tag = self.language.clone();
        for subtag in [&self.script, &self.region].into_iter().flatten() {
            tag.push('-');
            tag.push_str(subtag);
        }
        tag
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::platform_default()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.language_tag())
    }
}

impl FromStr for Locale {
    type Err = ClassifyError;

    fn from_str(s: &str) -> Result<Self> {
        parse_language_tag(s)
    }
}

// ---------------------------------------------------------------------------
// Tag parsing
// ---------------------------------------------------------------------------

/// Convert a tag to a locale, or `None` if the tag is malformed.
pub fn locale_for(tag: &str) -> Option<Locale> {
    match parse_language_tag(tag) {
        Ok(locale) => Some(locale),
        Err(err) => {
            tracing::trace!(message = "textclass.locale.rejected", %err);
            None
        }
    }
}

/// Strict parser behind [`locale_for`]. Accepts `-` or `_` separators.
pub fn parse_language_tag(tag: &str) -> Result<Locale> {
    if tag.is_empty() {
        return Err(ClassifyError::malformed_tag(tag));
    }
    let parsed = IcuLocale::try_from_str(&tag.replace('_', "-"))
        .map_err(|_| ClassifyError::malformed_tag(tag))?;
    let id = parsed.id;
    // Variants and extensions are validated by the parser but not modelled.
    Ok(Locale {
        language: id.language.as_str().to_owned(),
        script: id.script.map(|s| s.as_str().to_owned()),
        region: id.region.map(|r| r.as_str().to_owned()),
    })
}

fn canonical_language(s: &str) -> String {
    Language::try_from_str(s)
        .map(|l| l.as_str().to_owned())
        .unwrap_or_else(|_| s.to_ascii_lowercase())
}

fn canonical_script(s: &str) -> String {
    Script::try_from_str(s)
        .map(|sc| sc.as_str().to_owned())
        .unwrap_or_else(|_| s.to_owned())
}

fn canonical_region(s: &str) -> String {
    Region::try_from_str(s)
        .map(|r| r.as_str().to_owned())
        .unwrap_or_else(|_| s.to_ascii_uppercase())
}

// ---------------------------------------------------------------------------
// Current-locale collaborator
// ---------------------------------------------------------------------------

/// Source of the application's current locale.
///
/// Implementations are best-effort: `None` means "unknown", and callers
/// substitute [`Locale::platform_default`].
pub trait LocaleSource {
    fn current_locale(&self) -> Option<Locale>;
}

/// Reads the POSIX locale environment (`LC_ALL`, then `LC_COLLATE`, then
/// `LANG`).
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvLocaleSource;

const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_COLLATE", "LANG"];

impl EnvLocaleSource {
    /// Resolve the locale from variables read through `lookup`.
    ///
    /// The first non-empty variable wins, even if it does not parse.
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Option<Locale> {
        let value = LOCALE_ENV_VARS
            .iter()
            .filter_map(|&key| lookup(key))
            .find(|v| !v.is_empty())?;
        parse_posix_locale(&value)
    }
}

impl LocaleSource for EnvLocaleSource {
    fn current_locale(&self) -> Option<Locale> {
        Self::resolve(|key| std::env::var(key).ok())
    }
}

/// Always reports the same locale. Useful for tests and for hosts that
/// resolve the locale elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLocaleSource(pub Locale);

impl LocaleSource for FixedLocaleSource {
    fn current_locale(&self) -> Option<Locale> {
        Some(self.0.clone())
    }
}

/// Parse a POSIX locale name such as `de_DE.UTF-8@euro`.
///
/// `C` and `POSIX` carry no language and yield `None`.
pub fn parse_posix_locale(value: &str) -> Option<Locale> {
    let name = value.split(['.', '@']).next().unwrap_or_default();
    if name.is_empty() || name == "C" || name == "POSIX" {
        return None;
    }
    locale_for(name)
}

/// The current locale from `source`, or the platform default.
pub fn current_locale_from(source: &dyn LocaleSource) -> Locale {
    source
        .current_locale()
        .unwrap_or_else(Locale::platform_default)
}

/// The current locale from the process environment, or the platform default.
pub fn current_locale() -> Locale {
    current_locale_from(&EnvLocaleSource)
}
