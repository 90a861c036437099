//! Extensions for mapping serde failures to `DefaultsResult` concisely.
//!
//! These helpers replace repeated
//! `.map_err(|e| Arc::new(DefaultsError::…(e)))` chains around
//! `serde_json::to_value` and `serde_json::from_value`.

use std::sync::Arc;

use crate::{DefaultsError, DefaultsResult};

/// Attach merge context to `Result<T, serde_json::Error>`.
pub(crate) trait JsonResultExt<T> {
    /// Map an encoding failure for the named side of the merge.
    fn encoding(self, what: &'static str) -> DefaultsResult<T>;

    /// Map a decoding failure of the merged tree.
    fn decoding(self) -> DefaultsResult<T>;
}

impl<T> JsonResultExt<T> for Result<T, serde_json::Error> {
    fn encoding(self, what: &'static str) -> DefaultsResult<T> {
        self.map_err(|e| Arc::new(DefaultsError::serialize(what, e)))
    }

    fn decoding(self) -> DefaultsResult<T> {
        self.map_err(|e| Arc::new(DefaultsError::deserialize(e)))
    }
}
