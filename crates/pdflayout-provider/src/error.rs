//! Error types for primitive providers.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Provides [`ProviderError`]
//! that wraps provider-specific failures and converts them to [`LayoutError`].

use pdflayout_core::LayoutError;
use thiserror::Error;

/// Error type for primitive provider operations.
///
/// Wraps provider-specific errors and provides conversion to [`LayoutError`]
/// for unified error handling across the library.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The engine failed a query it is required to answer.
    #[error("provider contract violation: {0}")]
    Contract(String),

    /// A page, glyph, object, or link index does not exist.
    #[error("{kind} {index} not found")]
    Missing {
        /// What was looked up (e.g. "page").
        kind: &'static str,
        index: usize,
    },

    /// A core library error.
    #[error(transparent)]
    Core(#[from] LayoutError),
}

impl From<ProviderError> for LayoutError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Contract(msg) => LayoutError::Provider(msg),
            ProviderError::Missing { .. } => LayoutError::Provider(err.to_string()),
            ProviderError::Core(e) => e,
        }
    }
}
