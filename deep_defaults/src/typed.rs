//! Typed merging through serde.
//!
//! Typed defaults are serialised into JSON trees, merged with [`merge`], and
//! decoded back into the defaults type. Partial targets are any serialisable
//! value whose present fields mirror the defaults; the usual source is the
//! companion struct generated by `#[derive(DeepPartial)]`.

use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::result_ext::JsonResultExt;
use crate::{Defaults, DefaultsResult, Patch, Replacer, merge};

/// Types with a companion partial type where every field is optional.
///
/// Implement it with `#[derive(DeepPartial)]`. Fields annotated
/// `#[deep_partial(nested)]` take the nested type's own partial, so overrides
/// can be expressed at any depth.
///
/// ```rust
/// use deep_defaults::{DeepPartial, TypedDefaults};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize, DeepPartial)]
/// struct Location {
///     city: String,
///     zip: u32,
/// }
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize, DeepPartial)]
/// struct Person {
///     name: String,
///     #[deep_partial(nested)]
///     location: Location,
/// }
///
/// let defaults = TypedDefaults::new(&Person {
///     name: "John Doe".into(),
///     location: Location { city: "Denver".into(), zip: 80211 },
/// })?;
/// let person = defaults.apply(&PersonPartial {
///     location: Some(LocationPartial { zip: Some(80220), ..Default::default() }),
///     ..Default::default()
/// })?;
/// assert_eq!(person.location.city, "Denver");
/// assert_eq!(person.location.zip, 80220);
/// # Ok::<_, std::sync::Arc<deep_defaults::DefaultsError>>(())
/// ```
pub trait DeepPartial {
    /// Companion type with every field optional.
    type Partial: Serialize + DeserializeOwned + Default;
}

/// Merge a typed partial `target` over typed `defaults`.
///
/// # Errors
///
/// Returns [`crate::DefaultsError::Serialize`] when either side cannot be
/// serialised and [`crate::DefaultsError::Deserialize`] when the merged tree
/// does not decode into `T`, for example because a target field holds a value
/// of the wrong type.
pub fn merge_typed<T, P>(defaults: &T, target: &P, replacer: Option<&Replacer>) -> DefaultsResult<T>
where
    T: Serialize + DeserializeOwned,
    P: Serialize + ?Sized,
{
    let base = to_tree("defaults", defaults)?;
    let patch = Patch::from_serialize(target)?;
    decode(merge(&base, &patch, replacer))
}

/// Typed counterpart of [`Defaults`].
///
/// The defaults are serialised once on construction and decoded again for
/// every merge, so each result is an independent value.
pub struct TypedDefaults<T> {
    inner: Defaults,
    marker: PhantomData<fn() -> T>,
}

impl<T> TypedDefaults<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Store `defaults` without a replacer.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DefaultsError::Serialize`] when `defaults` cannot be
    /// serialised.
    pub fn new(defaults: &T) -> DefaultsResult<Self> {
        Ok(Self::from_untyped(Defaults::new(to_tree("defaults", defaults)?)))
    }

    /// Store `defaults` together with a replacer used when a call supplies
    /// none.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DefaultsError::Serialize`] when `defaults` cannot be
    /// serialised.
    pub fn with_replacer(defaults: &T, replacer: Replacer) -> DefaultsResult<Self> {
        let tree = to_tree("defaults", defaults)?;
        Ok(Self::from_untyped(Defaults::with_replacer(tree, replacer)))
    }

    const fn from_untyped(inner: Defaults) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }

    /// Decode a fresh copy of the stored defaults.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DefaultsError::Deserialize`] when `T` does not
    /// round-trip through JSON.
    pub fn defaults(&self) -> DefaultsResult<T> {
        decode(self.inner.defaults().clone())
    }

    /// Returns the stored replacer.
    #[must_use]
    pub const fn replacer(&self) -> Option<&Replacer> {
        self.inner.replacer()
    }

    /// Returns the untyped view of the stored defaults.
    #[must_use]
    pub const fn as_untyped(&self) -> &Defaults {
        &self.inner
    }

    /// Merge any serialisable partial `target` over the stored defaults.
    ///
    /// A supplied `replacer` takes the place of the stored one for this call.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DefaultsError::Serialize`] when `target` cannot be
    /// serialised and [`crate::DefaultsError::Deserialize`] when the merged
    /// tree does not decode into `T`.
    pub fn apply_with<P>(&self, target: &P, replacer: Option<&Replacer>) -> DefaultsResult<T>
    where
        P: Serialize + ?Sized,
    {
        let patch = Patch::from_serialize(target)?;
        decode(self.inner.apply_with(&patch, replacer))
    }
}

impl<T> TypedDefaults<T>
where
    T: DeepPartial + Serialize + DeserializeOwned,
{
    /// Merge the generated partial of `T` over the stored defaults using the
    /// stored replacer.
    ///
    /// # Errors
    ///
    /// See [`TypedDefaults::apply_with`].
    pub fn apply(&self, target: &T::Partial) -> DefaultsResult<T> {
        self.apply_with(target, None)
    }
}

impl<T> Clone for TypedDefaults<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for TypedDefaults<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedDefaults")
            .field("type", &std::any::type_name::<T>())
            .field("defaults", self.inner.defaults())
            .field("replacer", &self.inner.replacer())
            .finish()
    }
}

fn to_tree<T>(what: &'static str, value: &T) -> DefaultsResult<Value>
where
    T: Serialize + ?Sized,
{
    serde_json::to_value(value).encoding(what).inspect_err(|err| {
        debug!(what, error = %err, "serialisation failed");
    })
}

fn decode<T: DeserializeOwned>(tree: Value) -> DefaultsResult<T> {
    debug!(type_name = std::any::type_name::<T>(), "decoding merged tree");
    serde_json::from_value(tree).decoding()
}
