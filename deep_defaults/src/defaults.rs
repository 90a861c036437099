//! Reusable defaults bundled with a replacer.

use serde_json::Value;

use crate::{Patch, Replacer, merge};

/// Fixed defaults and an optional fixed replacer, applied to many targets.
///
/// ```rust
/// use deep_defaults::{Defaults, Patch};
/// use serde_json::json;
///
/// let defaults = Defaults::new(json!({"foo": 13, "baz": [1, 2, 3]}));
/// let merged = defaults.apply(&Patch::from(json!({"foo": -1})));
/// assert_eq!(merged, json!({"foo": -1, "baz": [1, 2, 3]}));
/// ```
#[derive(Clone, Debug)]
pub struct Defaults {
    defaults: Value,
    replacer: Option<Replacer>,
}

impl Defaults {
    /// Store `defaults` without a replacer.
    #[must_use]
    pub const fn new(defaults: Value) -> Self {
        Self {
            defaults,
            replacer: None,
        }
    }

    /// Store `defaults` together with the replacer used when a call supplies
    /// none.
    #[must_use]
    pub const fn with_replacer(defaults: Value, replacer: Replacer) -> Self {
        Self {
            defaults,
            replacer: Some(replacer),
        }
    }

    /// Returns the stored defaults.
    #[must_use]
    pub const fn defaults(&self) -> &Value {
        &self.defaults
    }

    /// Returns the stored replacer.
    #[must_use]
    pub const fn replacer(&self) -> Option<&Replacer> {
        self.replacer.as_ref()
    }

    /// Merge `target` over the stored defaults using the stored replacer.
    #[must_use]
    pub fn apply(&self, target: &Patch) -> Value {
        self.apply_with(target, None)
    }

    /// Merge `target` over the stored defaults.
    ///
    /// A supplied `replacer` takes the place of the stored one for this call;
    /// the two are never combined.
    #[must_use]
    pub fn apply_with(&self, target: &Patch, replacer: Option<&Replacer>) -> Value {
        merge(&self.defaults, target, replacer.or(self.replacer.as_ref()))
    }
}

impl From<Value> for Defaults {
    fn from(defaults: Value) -> Self {
        Self::new(defaults)
    }
}
