#![forbid(unsafe_code)]

//! Capability probing: which backend serves each classification service.
//!
//! # Contract
//!
//! - **Never fails**: a missing or broken native backend yields
//!   [`CapabilityChoice::Fallback`].
//! - **Deterministic order**: the configuration gate is checked first
//!   (cheapest), then each compiled-in native tier is resolved from highest
//!   fidelity down, and only then is the fallback selected.
//! - **Fixed per instance**: services probe once at construction and keep the
//!   answer for their whole lifetime.
//!
//! # Backends
//!
//! | Service | `NativeHighFidelity` | `NativeBasic` | `Fallback` |
//! |---|---|---|---|
//! | Ordering | ICU4X collator (`icu`) | NFKD fold keys (`normalization`) | code point order |
//! | Indexing | collator alphabetic index (`icu`) | none | block heuristic + transliteration |
//! | Transliteration | `any_ascii` (`translit`) | NFKD + fold table (`normalization`) | fold table |

use std::fmt;

use crate::config::ClassifierConfig;
use crate::error::{ClassifyError, Result};

// ---------------------------------------------------------------------------
// ServiceKind / CapabilityChoice
// ---------------------------------------------------------------------------

/// The three classification services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    Ordering,
    Indexing,
    Transliteration,
}

impl ServiceKind {
    pub const ALL: [Self; 3] = [Self::Ordering, Self::Indexing, Self::Transliteration];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Ordering => "ordering",
            Self::Indexing => "indexing",
            Self::Transliteration => "transliteration",
        }
    }

    /// Case-insensitive inverse of [`ServiceKind::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which backend tier a service instance runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CapabilityChoice {
    NativeHighFidelity,
    NativeBasic,
    Fallback,
}

impl CapabilityChoice {
    /// Whether a native backend was selected.
    #[inline]
    pub const fn is_native(self) -> bool {
        !matches!(self, Self::Fallback)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::NativeHighFidelity => "native-high-fidelity",
            Self::NativeBasic => "native-basic",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for CapabilityChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// CapabilityProbe
// ---------------------------------------------------------------------------

/// Resolved choice for every service, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityReport {
    pub ordering: CapabilityChoice,
    pub indexing: CapabilityChoice,
    pub transliteration: CapabilityChoice,
}

/// Backend detection under a given configuration.
#[derive(Debug, Clone, Copy)]
pub struct CapabilityProbe<'a> {
    config: &'a ClassifierConfig,
}

impl CapabilityProbe<'static> {
    /// Probe under the process-wide configuration.
    pub fn global() -> Self {
        Self::new(ClassifierConfig::global())
    }
}

impl<'a> CapabilityProbe<'a> {
    pub fn new(config: &'a ClassifierConfig) -> Self {
        Self { config }
    }

    /// Resolve the backend tier for `kind`.
    pub fn probe(&self, kind: ServiceKind) -> CapabilityChoice {
        if self.config.force_fallback.is_forced(kind) {
            tracing::debug!(
                message = "textclass.probe",
                service = kind.name(),
                choice = CapabilityChoice::Fallback.name(),
                reason = "forced by configuration"
            );
            return CapabilityChoice::Fallback;
        }

        for tier in [CapabilityChoice::NativeHighFidelity, CapabilityChoice::NativeBasic] {
            match resolve(kind, tier) {
                Ok(()) => {
                    tracing::debug!(
                        message = "textclass.probe",
                        service = kind.name(),
                        choice = tier.name()
                    );
                    return tier;
                }
                Err(err) => {
                    tracing::trace!(message = "textclass.probe.skip", tier = tier.name(), %err);
                }
            }
        }

        tracing::debug!(
            message = "textclass.probe",
            service = kind.name(),
            choice = CapabilityChoice::Fallback.name(),
            reason = "no native backend"
        );
        CapabilityChoice::Fallback
    }

    pub fn report(&self) -> CapabilityReport {
        CapabilityReport {
            ordering: self.probe(ServiceKind::Ordering),
            indexing: self.probe(ServiceKind::Indexing),
            transliteration: self.probe(ServiceKind::Transliteration),
        }
    }
}

/// Try to bring up the backend for `(kind, tier)`.
fn resolve(kind: ServiceKind, tier: CapabilityChoice) -> Result<()> {
    match (kind, tier) {
        (ServiceKind::Ordering | ServiceKind::Indexing, CapabilityChoice::NativeHighFidelity) => {
            resolve_collator(kind)
        }
        (ServiceKind::Ordering, CapabilityChoice::NativeBasic) => {
            compiled(kind, cfg!(feature = "normalization"), "normalization")
        }
        (ServiceKind::Transliteration, CapabilityChoice::NativeHighFidelity) => {
            compiled(kind, cfg!(feature = "translit"), "translit")
        }
        (ServiceKind::Transliteration, CapabilityChoice::NativeBasic) => {
            compiled(kind, cfg!(feature = "normalization"), "normalization")
        }
        (ServiceKind::Indexing, CapabilityChoice::NativeBasic) => Err(ClassifyError::unavailable(
            kind,
            "no basic alphabetic index backend",
        )),
        (_, CapabilityChoice::Fallback) => Ok(()),
    }
}

fn compiled(kind: ServiceKind, enabled: bool, feature: &str) -> Result<()> {
    if enabled {
        Ok(())
    } else {
        Err(ClassifyError::unavailable(
            kind,
            format!("feature `{feature}` not compiled in"),
        ))
    }
}

#[cfg(feature = "icu")]
fn resolve_collator(kind: ServiceKind) -> Result<()> {
    crate::icu_backend::root_collator()
        .map(drop)
        .map_err(|e| ClassifyError::unavailable(kind, e.to_string()))
}

#[cfg(not(feature = "icu"))]
fn resolve_collator(kind: ServiceKind) -> Result<()> {
    compiled(kind, false, "icu")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ForceFallback;
    use tracing_test::traced_test;

    #[test]
    fn service_names_round_trip() {
        for kind in ServiceKind::ALL {
            assert_eq!(ServiceKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ServiceKind::from_name("ORDERING"), Some(ServiceKind::Ordering));
        assert_eq!(ServiceKind::from_name("sorting"), None);
    }

    #[test]
    fn forced_fallback_wins() {
        let config = ClassifierConfig {
            force_fallback: ForceFallback::ALL,
            ..ClassifierConfig::default()
        };
        let report = CapabilityProbe::new(&config).report();
        assert_eq!(report.ordering, CapabilityChoice::Fallback);
        assert_eq!(report.indexing, CapabilityChoice::Fallback);
        assert_eq!(report.transliteration, CapabilityChoice::Fallback);
    }

    #[test]
    fn probe_is_deterministic() {
        let config = ClassifierConfig::default();
        let probe = CapabilityProbe::new(&config);
        for kind in ServiceKind::ALL {
            assert_eq!(probe.probe(kind), probe.probe(kind));
        }
    }

    #[test]
    fn indexing_has_no_basic_tier() {
        let config = ClassifierConfig::default();
        let choice = CapabilityProbe::new(&config).probe(ServiceKind::Indexing);
        assert_ne!(choice, CapabilityChoice::NativeBasic);
        assert_eq!(choice.is_native(), cfg!(feature = "icu"));
    }

    #[cfg(feature = "translit")]
    #[test]
    fn translit_feature_selects_high_fidelity() {
        let config = ClassifierConfig::default();
        assert_eq!(
            CapabilityProbe::new(&config).probe(ServiceKind::Transliteration),
            CapabilityChoice::NativeHighFidelity
        );
    }

    #[cfg(all(feature = "normalization", not(feature = "icu")))]
    #[test]
    fn ordering_without_icu_is_basic() {
        let config = ClassifierConfig::default();
        assert_eq!(
            CapabilityProbe::new(&config).probe(ServiceKind::Ordering),
            CapabilityChoice::NativeBasic
        );
    }

    #[traced_test]
    #[test]
    fn probe_logs_choice() {
        let config = ClassifierConfig {
            force_fallback: ForceFallback {
                ordering: true,
                ..ForceFallback::default()
            },
            ..ClassifierConfig::default()
        };
        CapabilityProbe::new(&config).probe(ServiceKind::Ordering);
        assert!(logs_contain("textclass.probe"));
        assert!(logs_contain("forced by configuration"));
    }
}
