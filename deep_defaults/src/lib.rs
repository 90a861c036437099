//! Deep structural merging of partial values over defaults.
//!
//! The crate combines a *defaults* tree with a partial *target* tree of the
//! same shape. Every entry present in the target overrides the default, absent
//! entries fall back to the default, and nested objects and arrays are merged
//! recursively instead of being replaced wholesale. An optional [`Replacer`]
//! lets callers decide how individual fields are combined.
//!
//! Values are represented as [`serde_json::Value`] trees. Targets use
//! [`Patch`], which can additionally express an entry that is present but
//! explicitly unset.
//!
//! # Example
//!
//! ```rust
//! use deep_defaults::{Patch, Replacer, merge};
//! use serde_json::{Value, json};
//!
//! let defaults = json!({
//!     "id": 1,
//!     "type": "post",
//!     "content": {"title": "A", "body": "B"},
//! });
//! let target = Patch::from(json!({
//!     "id": 2,
//!     "type": "tweet",
//!     "content": {"body": "C"},
//! }));
//! let replacer = Replacer::fields([(
//!     "type",
//!     Replacer::func(|default, target| match target.as_scalar() {
//!         Some(Value::String(kind)) if kind == "tweet" => json!("twot"),
//!         _ => target.overlay(default.unwrap_or(&Value::Null)),
//!     }),
//! )]);
//!
//! let merged = merge(&defaults, &target, Some(&replacer));
//! assert_eq!(
//!     merged,
//!     json!({"id": 2, "type": "twot", "content": {"title": "A", "body": "C"}})
//! );
//! ```
//!
//! Shape mismatches are never errors: a target scalar where the defaults hold
//! an object simply replaces the object. Owned JSON trees cannot be cyclic, so
//! recursion always terminates.

pub use deep_defaults_macros::DeepPartial;

mod defaults;
mod error;
mod key;
mod merge;
mod patch;
mod replacer;
mod result_ext;
mod typed;

pub use defaults::Defaults;
pub use error::DefaultsError;
pub use key::Key;
pub use merge::merge;
pub use patch::Patch;
pub use replacer::{ReplaceFn, Replacer};
pub use typed::{DeepPartial, TypedDefaults, merge_typed};

/// Result alias used by the typed layer.
///
/// Errors are reference counted so results can be cloned and shared between
/// callers that apply the same defaults.
pub type DefaultsResult<T> = Result<T, std::sync::Arc<DefaultsError>>;

/// Re-exports used by code generated with `#[derive(DeepPartial)]`.
#[doc(hidden)]
pub mod __private {
    pub use serde;
}
