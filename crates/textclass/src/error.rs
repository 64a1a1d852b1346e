#![forbid(unsafe_code)]

//! Internal error taxonomy.
//!
//! None of these escape the public classification operations: capability
//! errors select a fallback backend, tag errors become `None`, recipe errors
//! fall back to the default recipe. They exist so internal code can use `?`.

use thiserror::Error;

use crate::capability::ServiceKind;

pub type Result<T> = std::result::Result<T, ClassifyError>;

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("native backend unavailable for {service}: {reason}")]
    CapabilityUnavailable {
        service: ServiceKind,
        reason: String,
    },

    #[error("malformed language tag: {tag:?}")]
    MalformedLanguageTag { tag: String },

    #[error("unknown transliteration step {step:?} in recipe {recipe:?}")]
    UnknownRecipeStep { recipe: String, step: String },

    #[error("invalid configuration: {message}")]
    Config { message: String },
}

impl ClassifyError {
    #[must_use]
    pub fn unavailable(service: ServiceKind, reason: impl Into<String>) -> Self {
        Self::CapabilityUnavailable {
            service,
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn malformed_tag(tag: impl Into<String>) -> Self {
        Self::MalformedLanguageTag { tag: tag.into() }
    }
}
