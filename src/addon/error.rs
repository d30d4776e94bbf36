//! Errors reported by the facade.

use std::sync::Arc;

use thiserror::Error;

use crate::config::ResolveError;

/// Phase that produced an [`AddonError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Running the resolver.
    Load,
    /// Looking up a name on the resolved namespace.
    Lookup,
}

/// Error type for facade access.
#[derive(Debug, Clone, Error)]
pub enum AddonError {
    /// Resolution failed; the original error is kept as the source.
    #[error("Addon configuration is unavailable: loading it failed")]
    Unavailable {
        /// The error captured on the first (and only) resolution attempt
        #[source]
        source: Arc<ResolveError>,
    },

    /// The namespace has no attribute with this name.
    #[error("Addon has no attribute '{name}'")]
    AttributeNotFound {
        /// Requested name
        name: String,
    },
}

impl AddonError {
    /// Returns the phase that produced this error.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self {
            Self::Unavailable { .. } => Phase::Load,
            Self::AttributeNotFound { .. } => Phase::Lookup,
        }
    }

    /// Returns the underlying resolution error, if any.
    #[must_use]
    pub fn resolve_error(&self) -> Option<&ResolveError> {
        match self {
            Self::Unavailable { source } => Some(source),
            Self::AttributeNotFound { .. } => None,
        }
    }
}
