//! Error types for gridmodel-core.

use crate::color::ColorParseError;
use thiserror::Error;

/// Errors raised while building core values from external input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Color string could not be parsed.
    #[error("color: {0}")]
    Color(#[from] ColorParseError),

    /// A name did not match any known variant.
    #[error("unknown {kind}: {value:?}")]
    UnknownVariant {
        /// What was being parsed
        kind: &'static str,
        /// The rejected input
        value: String,
    },
}

impl CoreError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.to_string(),
        }
    }
}
