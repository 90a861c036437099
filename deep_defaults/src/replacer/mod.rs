//! Per-field replacers.
//!
//! A [`Replacer`] customises how individual entries are combined. A function
//! replacer owns the whole subtree at its key; a nested replacer mirrors the
//! shape of the defaults and is consulted again when the merge recurses.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::{Key, Patch};

/// Signature of a replacer function.
///
/// The first argument is the current value at the key, `None` when the
/// defaults have no entry there. The second is the target's entry, which may
/// be [`Patch::Unset`]. The return value is stored at the key verbatim.
pub type ReplaceFn = dyn Fn(Option<&Value>, &Patch) -> Value + Send + Sync;

/// Replacer tree consulted at each key the target enumerates.
#[derive(Clone)]
pub enum Replacer {
    /// Function that computes the merged value. At the top level of a merge it
    /// applies to every key the target enumerates.
    Func(Arc<ReplaceFn>),
    /// Replacers keyed by field name.
    Fields(BTreeMap<String, Replacer>),
    /// Replacers keyed by position; `None` leaves that position to the
    /// structural merge.
    Items(Vec<Option<Replacer>>),
}

impl Replacer {
    /// Wrap a closure as a function replacer.
    ///
    /// ```rust
    /// use deep_defaults::{Patch, Replacer, merge};
    /// use serde_json::{Value, json};
    ///
    /// let double = Replacer::func(|default, target| {
    ///     let base = target.overlay(default.unwrap_or(&Value::Null));
    ///     json!(base.as_i64().unwrap_or_default() * 2)
    /// });
    /// let merged = merge(&json!({"id": 1}), &Patch::from(json!({"id": 4})), Some(&double));
    /// assert_eq!(merged, json!({"id": 8}));
    /// ```
    #[must_use]
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(Option<&Value>, &Patch) -> Value + Send + Sync + 'static,
    {
        Self::Func(Arc::new(f))
    }

    /// Build a keyed replacer from `(field, replacer)` pairs.
    #[must_use]
    pub fn fields<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Self)>,
        K: Into<String>,
    {
        Self::Fields(
            entries
                .into_iter()
                .map(|(name, replacer)| (name.into(), replacer))
                .collect(),
        )
    }

    /// Build a positional replacer; `None` entries are holes.
    #[must_use]
    pub fn items<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = Option<Self>>,
    {
        Self::Items(entries.into_iter().collect())
    }

    /// Returns the replacer that applies at `key`.
    ///
    /// A function applies to every key. Keyed and positional replacers are
    /// looked up at `key`, treating canonical decimal field names and indices
    /// as interchangeable.
    #[must_use]
    pub fn resolve(&self, key: Key<'_>) -> Option<&Self> {
        match (self, key) {
            (Self::Func(_), _) => Some(self),
            (Self::Fields(fields), Key::Field(name)) => fields.get(name),
            (Self::Fields(fields), Key::Index(index)) => fields.get(&index.to_string()),
            (Self::Items(items), _) => key
                .as_index()
                .and_then(|index| items.get(index))
                .and_then(Option::as_ref),
        }
    }

    /// Returns the function when this replacer is [`Replacer::Func`].
    #[must_use]
    pub fn as_func(&self) -> Option<&ReplaceFn> {
        match self {
            Self::Func(f) => Some(f.as_ref()),
            Self::Fields(_) | Self::Items(_) => None,
        }
    }
}

impl fmt::Debug for Replacer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Func(_) => f.write_str("Func(..)"),
            Self::Fields(fields) => f.debug_map().entries(fields.iter()).finish(),
            Self::Items(items) => f.debug_list().entries(items.iter()).finish(),
        }
    }
}
