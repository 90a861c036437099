//! Partial target trees.
//!
//! A [`Patch`] mirrors the shape of a JSON tree but every entry is optional.
//! An entry missing from a [`Patch::Map`] or beyond the end of a
//! [`Patch::Seq`] means "inherit the default". [`Patch::Unset`] marks an entry
//! that is present yet carries no value: structural merging skips it, but a
//! replacer function registered for that entry still fires.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::result_ext::JsonResultExt;
use crate::{DefaultsResult, Key, merge};

/// Partial value applied over a defaults tree.
///
/// Build patches from JSON with [`Patch::from`], from any serialisable type
/// with [`Patch::from_serialize`], or by hand with [`Patch::map`] and
/// [`Patch::seq`].
///
/// ```rust
/// use deep_defaults::{Patch, merge};
/// use serde_json::json;
///
/// let target = Patch::seq([Patch::unset(), Patch::from(json!("y"))]);
/// assert_eq!(merge(&json!(["a", "b"]), &target, None), json!(["a", "y"]));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Patch {
    /// Present entry without a value.
    #[default]
    Unset,
    /// Leaf value, including `null`. Scalars override whatever the defaults
    /// hold at the same position.
    Scalar(Value),
    /// Keyed container merged field by field, visited sorted by name.
    Map(BTreeMap<String, Patch>),
    /// Index-keyed container merged position by position.
    Seq(Vec<Patch>),
}

impl Patch {
    /// Returns an unset entry.
    #[must_use]
    pub const fn unset() -> Self {
        Self::Unset
    }

    /// Build a keyed patch from `(name, patch)` pairs.
    #[must_use]
    pub fn map<I, K, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: Into<Self>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(name, patch)| (name.into(), patch.into()))
                .collect(),
        )
    }

    /// Build a positional patch.
    #[must_use]
    pub fn seq<I, P>(items: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Self>,
    {
        Self::Seq(items.into_iter().map(Into::into).collect())
    }

    /// Serialise `value` and convert the resulting tree into a patch.
    ///
    /// Fields serde skips, such as `None` fields marked
    /// `skip_serializing_if = "Option::is_none"`, become absent keys.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DefaultsError::Serialize`] when `value` cannot be
    /// represented as JSON.
    pub fn from_serialize<T>(value: &T) -> DefaultsResult<Self>
    where
        T: Serialize + ?Sized,
    {
        serde_json::to_value(value).encoding("target").map(Self::from)
    }

    /// Returns `true` for [`Patch::Unset`].
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Returns `true` for [`Patch::Map`] and [`Patch::Seq`].
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::Map(_) | Self::Seq(_))
    }

    /// Returns the scalar held by this entry.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<&Value> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::Unset | Self::Map(_) | Self::Seq(_) => None,
        }
    }

    /// Returns the entry stored under `name` in a keyed patch.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Self> {
        match self {
            Self::Map(fields) => fields.get(name),
            Self::Unset | Self::Scalar(_) | Self::Seq(_) => None,
        }
    }

    /// Returns the entry at `index` in a positional patch.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Self> {
        match self {
            Self::Seq(items) => items.get(index),
            Self::Unset | Self::Scalar(_) | Self::Map(_) => None,
        }
    }

    /// Iterates over the entries this patch enumerates.
    ///
    /// Fields come sorted by name and positions in ascending order.
    ///
    /// Scalars and unset entries enumerate nothing.
    pub fn entries(&self) -> impl Iterator<Item = (Key<'_>, &Self)> {
        let fields = match self {
            Self::Map(fields) => Some(
                fields
                    .iter()
                    .map(|(name, patch)| (Key::Field(name.as_str()), patch)),
            ),
            Self::Unset | Self::Scalar(_) | Self::Seq(_) => None,
        };
        let items = match self {
            Self::Seq(items) => Some(
                items
                    .iter()
                    .enumerate()
                    .map(|(index, patch)| (Key::Index(index), patch)),
            ),
            Self::Unset | Self::Scalar(_) | Self::Map(_) => None,
        };
        fields.into_iter().flatten().chain(items.into_iter().flatten())
    }

    /// Materialise the patch as a plain JSON value.
    ///
    /// Returns `None` for [`Patch::Unset`]. Unset fields are dropped from
    /// maps; unset positions become `null` because arrays cannot hold holes.
    #[must_use]
    pub fn to_value(&self) -> Option<Value> {
        match self {
            Self::Unset => None,
            Self::Scalar(value) => Some(value.clone()),
            Self::Map(fields) => Some(Value::Object(
                fields
                    .iter()
                    .filter_map(|(name, patch)| patch.to_value().map(|value| (name.clone(), value)))
                    .collect::<Map<String, Value>>(),
            )),
            Self::Seq(items) => Some(Value::Array(
                items
                    .iter()
                    .map(|patch| patch.to_value().unwrap_or(Value::Null))
                    .collect(),
            )),
        }
    }

    /// Resolve this patch over `default`, the `target ?? default` idiom.
    ///
    /// Containers are merged into `default` without replacers, scalars win
    /// outright, and an unset entry yields `default`.
    ///
    /// ```rust
    /// use deep_defaults::Patch;
    /// use serde_json::json;
    ///
    /// let partial = Patch::from(json!({"body": "naww"}));
    /// let full = json!({"title": "Bloggg", "body": "A sample blog post."});
    /// assert_eq!(partial.overlay(&full), json!({"title": "Bloggg", "body": "naww"}));
    /// assert_eq!(Patch::unset().overlay(&json!(42)), json!(42));
    /// ```
    #[must_use]
    pub fn overlay(&self, default: &Value) -> Value {
        match self {
            Self::Unset => default.clone(),
            Self::Scalar(value) => value.clone(),
            Self::Map(_) | Self::Seq(_) => merge(default, self, None),
        }
    }
}

impl From<Value> for Patch {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self::Map(
                fields
                    .into_iter()
                    .map(|(name, value)| (name, Self::from(value)))
                    .collect(),
            ),
            Value::Array(items) => Self::Seq(items.into_iter().map(Self::from).collect()),
            scalar @ (Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)) => {
                Self::Scalar(scalar)
            }
        }
    }
}

impl From<Option<Value>> for Patch {
    fn from(value: Option<Value>) -> Self {
        value.map_or(Self::Unset, Self::from)
    }
}
