#![forbid(unsafe_code)]

//! Classifier configuration.
//!
//! [`ClassifierConfig::default()`] reproduces the built-in behavior exactly.
//! A process installs at most one configuration with
//! [`ClassifierConfig::install`]; if nothing is installed, the first service
//! construction reads the environment via [`ClassifierConfig::from_env`].
//!
//! # Environment
//!
//! | Variable | Effect |
//! |---|---|
//! | `TEXTCLASS_FORCE_FALLBACK` | comma list of `ordering`, `indexing`, `transliteration`, or `all` |
//! | `TEXTCLASS_RECIPE` | default transliteration recipe id |
//! | `TEXTCLASS_MAX_LABEL_DEPTH` | indexing recursion cap (1..=16) |
//!
//! # Loading (feature `config`)
//!
//! ```toml
//! default_recipe = "Any-Latin; Latin-ASCII; Any-Lower"
//! max_label_depth = 4
//!
//! [force_fallback]
//! ordering = true
//! ```

#[cfg(feature = "config")]
use std::path::Path;
use std::sync::OnceLock;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::capability::ServiceKind;
use crate::error::{ClassifyError, Result};
use crate::transliterate::{DEFAULT_RECIPE, Recipe};

/// Default recursion cap for the indexing fallback.
pub const DEFAULT_MAX_LABEL_DEPTH: u8 = 4;

const MAX_LABEL_DEPTH_LIMIT: u8 = 16;

static GLOBAL: OnceLock<ClassifierConfig> = OnceLock::new();

// ---------------------------------------------------------------------------
// ClassifierConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ClassifierConfig {
    /// Services pinned to their hand-built fallback regardless of what is
    /// compiled in.
    pub force_fallback: ForceFallback,

    /// Recipe id used by the process-wide transliterator.
    pub default_recipe: String,

    /// Maximum transliterate-and-retry rounds in the indexing fallback.
    pub max_label_depth: u8,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            force_fallback: ForceFallback::default(),
            default_recipe: DEFAULT_RECIPE.to_owned(),
            max_label_depth: DEFAULT_MAX_LABEL_DEPTH,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ForceFallback {
    pub ordering: bool,
    pub indexing: bool,
    pub transliteration: bool,
}

impl ForceFallback {
    pub const ALL: Self = Self {
        ordering: true,
        indexing: true,
        transliteration: true,
    };

    #[must_use]
    pub const fn is_forced(&self, kind: ServiceKind) -> bool {
        match kind {
            ServiceKind::Ordering => self.ordering,
            ServiceKind::Indexing => self.indexing,
            ServiceKind::Transliteration => self.transliteration,
        }
    }

    fn set(&mut self, kind: ServiceKind) {
        match kind {
            ServiceKind::Ordering => self.ordering = true,
            ServiceKind::Indexing => self.indexing = true,
            ServiceKind::Transliteration => self.transliteration = true,
        }
    }
}

impl ClassifierConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Apply `TEXTCLASS_*` overrides read through `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(list) = lookup("TEXTCLASS_FORCE_FALLBACK") {
            for item in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                if item.eq_ignore_ascii_case("all") {
                    self.force_fallback = ForceFallback::ALL;
                } else if let Some(kind) = ServiceKind::from_name(item) {
                    self.force_fallback.set(kind);
                } else {
                    tracing::warn!(
                        message = "textclass.config.ignored",
                        key = "TEXTCLASS_FORCE_FALLBACK",
                        value = item
                    );
                }
            }
        }

        if let Some(recipe) = lookup("TEXTCLASS_RECIPE").filter(|s| !s.trim().is_empty()) {
            self.default_recipe = recipe;
        }

        if let Some(raw) = lookup("TEXTCLASS_MAX_LABEL_DEPTH") {
            match raw.trim().parse::<u8>() {
                Ok(depth) if (1..=MAX_LABEL_DEPTH_LIMIT).contains(&depth) => {
                    self.max_label_depth = depth;
                }
                _ => tracing::warn!(
                    message = "textclass.config.ignored",
                    key = "TEXTCLASS_MAX_LABEL_DEPTH",
                    value = raw.as_str()
                ),
            }
        }
    }

    /// Validate all parameters.
    ///
    /// Returns a list of problems; empty means the config is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !(1..=MAX_LABEL_DEPTH_LIMIT).contains(&self.max_label_depth) {
            errors.push(format!(
                "max_label_depth must be in 1..={MAX_LABEL_DEPTH_LIMIT}, got {}",
                self.max_label_depth
            ));
        }
        if let Err(err) = Recipe::parse(&self.default_recipe) {
            errors.push(format!("default_recipe: {err}"));
        }

        errors
    }

    /// Install `self` as the process-wide configuration.
    ///
    /// Fails if a configuration was already installed or lazily initialized
    /// by an earlier service construction.
    pub fn install(self) -> Result<()> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(ClassifyError::Config {
                message: errors.join("; "),
            });
        }
        GLOBAL.set(self).map_err(|_| ClassifyError::Config {
            message: "configuration already initialized".to_owned(),
        })
    }

    /// The process-wide configuration, initialized from the environment on
    /// first access.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::from_env)
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| ClassifyError::Config {
            message: format!("TOML parse error: {e}"),
        })?;
        config.checked()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_toml_str(&read(path.as_ref())?)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s).map_err(|e| ClassifyError::Config {
            message: format!("JSON parse error: {e}"),
        })?;
        config.checked()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_str(&read(path.as_ref())?)
    }

    #[cfg(feature = "config")]
    fn checked(self) -> Result<Self> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ClassifyError::Config {
                message: errors.join("; "),
            })
        }
    }
}

#[cfg(feature = "config")]
fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| ClassifyError::Config {
        message: format!("I/O error reading {}: {e}", path.display()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn default_is_valid() {
        assert!(ClassifierConfig::default().validate().is_empty());
    }

    #[test]
    fn env_force_fallback_list() {
        let mut config = ClassifierConfig::default();
        config.apply_env(lookup(&[("TEXTCLASS_FORCE_FALLBACK", "ordering, Transliteration")]));
        assert!(config.force_fallback.is_forced(ServiceKind::Ordering));
        assert!(config.force_fallback.is_forced(ServiceKind::Transliteration));
        assert!(!config.force_fallback.is_forced(ServiceKind::Indexing));
    }

    #[test]
    fn env_force_fallback_all() {
        let mut config = ClassifierConfig::default();
        config.apply_env(lookup(&[("TEXTCLASS_FORCE_FALLBACK", "all")]));
        assert_eq!(config.force_fallback, ForceFallback::ALL);
    }

    #[test]
    fn env_bad_values_ignored() {
        let mut config = ClassifierConfig::default();
        config.apply_env(lookup(&[
            ("TEXTCLASS_FORCE_FALLBACK", "bogus"),
            ("TEXTCLASS_MAX_LABEL_DEPTH", "99"),
            ("TEXTCLASS_RECIPE", "   "),
        ]));
        assert_eq!(config, ClassifierConfig::default());
    }

    #[test]
    fn env_recipe_and_depth() {
        let mut config = ClassifierConfig::default();
        config.apply_env(lookup(&[
            ("TEXTCLASS_RECIPE", "Latin-ASCII"),
            ("TEXTCLASS_MAX_LABEL_DEPTH", "2"),
        ]));
        assert_eq!(config.default_recipe, "Latin-ASCII");
        assert_eq!(config.max_label_depth, 2);
    }

    #[test]
    fn validate_reports_each_problem() {
        let config = ClassifierConfig {
            max_label_depth: 0,
            default_recipe: "Klingon-Latin".to_owned(),
            ..ClassifierConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 2, "{errors:?}");
        assert!(errors[0].contains("max_label_depth"));
        assert!(errors[1].contains("default_recipe"));
    }

    #[test]
    fn install_rejects_invalid() {
        let config = ClassifierConfig {
            max_label_depth: 0,
            ..ClassifierConfig::default()
        };
        assert!(matches!(config.install(), Err(ClassifyError::Config { .. })));
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_partial_document() {
        let config = ClassifierConfig::from_toml_str(
            "max_label_depth = 3\n[force_fallback]\nindexing = true\n",
        )
        .unwrap();
        assert_eq!(config.max_label_depth, 3);
        assert!(config.force_fallback.indexing);
        assert!(!config.force_fallback.ordering);
        assert_eq!(config.default_recipe, DEFAULT_RECIPE);
    }

    #[cfg(feature = "config")]
    #[test]
    fn json_rejects_bad_recipe() {
        let err = ClassifierConfig::from_json_str(r#"{"default_recipe": "Nope"}"#).unwrap_err();
        assert!(err.to_string().contains("default_recipe"));
    }
}
