//! Errors produced by the typed merge layer.
//!
//! The value-level merge is infallible; only conversions between caller types
//! and JSON trees can fail.

use thiserror::Error;

/// Errors raised while converting typed values to and from JSON trees.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DefaultsError {
    /// A value could not be serialised into a JSON tree.
    #[error("failed to serialise {what} into a JSON tree: {source}")]
    Serialize {
        /// Which side of the merge failed, such as `"defaults"` or `"target"`.
        what: &'static str,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// The merged tree does not decode into the defaults type.
    #[error("merged value does not match the defaults type: {source}")]
    Deserialize {
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}

impl DefaultsError {
    /// Build a [`DefaultsError::Serialize`] for the named side of the merge.
    #[must_use]
    pub const fn serialize(what: &'static str, source: serde_json::Error) -> Self {
        Self::Serialize { what, source }
    }

    /// Build a [`DefaultsError::Deserialize`].
    #[must_use]
    pub const fn deserialize(source: serde_json::Error) -> Self {
        Self::Deserialize { source }
    }
}
