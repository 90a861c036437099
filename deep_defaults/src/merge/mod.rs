//! Recursive merge of a partial target over a defaults tree.

use serde_json::{Map, Value};
use tracing::trace;

use crate::{Key, Patch, Replacer};

/// Merge `target` over a copy of `defaults`, consulting `replacer` per key.
///
/// For every entry the target enumerates:
///
/// 1. A function replacer resolved for the key wins outright. It receives the
///    current value and the target entry, even when that entry is
///    [`Patch::Unset`], and its return value is stored.
/// 2. Otherwise an unset entry keeps the default.
/// 3. Otherwise, when both sides are containers, the merge recurses with the
///    nested replacer for the key.
/// 4. Otherwise the target's value replaces the default.
///
/// Entries the target does not enumerate are left untouched and never reach
/// a replacer. Sequences merge position by position; writing past the end
/// extends the sequence and pads any gap with `null`.
///
/// Sequences are treated as mappings from index to element, so containers of
/// different kinds still merge. A keyed target over a sequence writes its
/// canonical decimal keys into those positions; if any key is not an index,
/// the sequence becomes an object keyed by `"0"`, `"1"` and so on first. A
/// positional target over an object writes under the decimal names.
///
/// A scalar or unset target enumerates nothing, so the result equals
/// `defaults`. A container target over a scalar default starts from an empty
/// container of the target's kind.
///
/// `defaults` is never modified.
///
/// # Examples
///
/// ```rust
/// use deep_defaults::{Patch, merge};
/// use serde_json::json;
///
/// let defaults = json!({"foo": 13, "bar": {"quz": false, "qux": "yes"}});
/// let merged = merge(&defaults, &Patch::from(json!({"bar": {"quz": true}})), None);
/// assert_eq!(merged, json!({"foo": 13, "bar": {"quz": true, "qux": "yes"}}));
/// ```
#[must_use]
pub fn merge(defaults: &Value, target: &Patch, replacer: Option<&Replacer>) -> Value {
    let mut result = defaults.clone();
    merge_into(&mut result, target, replacer);
    result
}

/// Apply `target` to `result` in place.
fn merge_into(result: &mut Value, target: &Patch, replacer: Option<&Replacer>) {
    if !target.is_container() {
        return;
    }
    *result = match std::mem::take(result) {
        Value::Object(mut fields) => {
            merge_fields(&mut fields, target, replacer);
            Value::Object(fields)
        }
        Value::Array(mut items) if addresses_positions(target) => {
            merge_positions(&mut items, target, replacer);
            Value::Array(items)
        }
        Value::Array(items) => {
            trace!("named keys over an array; keying elements by index");
            let mut fields = items
                .into_iter()
                .enumerate()
                .map(|(index, item)| (index.to_string(), item))
                .collect();
            merge_fields(&mut fields, target, replacer);
            Value::Object(fields)
        }
        base => {
            trace!(%base, "defaults are not a container; starting from an empty one");
            if matches!(target, Patch::Seq(_)) {
                let mut items = Vec::new();
                merge_positions(&mut items, target, replacer);
                Value::Array(items)
            } else {
                let mut fields = Map::new();
                merge_fields(&mut fields, target, replacer);
                Value::Object(fields)
            }
        }
    };
}

/// Walk `target` over a keyed container. Positions land under their decimal
/// names.
fn merge_fields(fields: &mut Map<String, Value>, target: &Patch, replacer: Option<&Replacer>) {
    for (key, patch) in target.entries() {
        let name = match key {
            Key::Field(name) => name.to_owned(),
            Key::Index(index) => index.to_string(),
        };
        if let Some(value) = merge_entry(fields.get_mut(&name), key, patch, replacer) {
            fields.insert(name, value);
        }
    }
}

/// Walk `target` over a positional container. Every key must address an
/// index; see [`addresses_positions`].
fn merge_positions(items: &mut Vec<Value>, target: &Patch, replacer: Option<&Replacer>) {
    for (key, patch) in target.entries() {
        let Some(index) = key.as_index() else {
            continue;
        };
        if let Some(value) = merge_entry(items.get_mut(index), key, patch, replacer) {
            assign_index(items, index, value);
        }
    }
}

/// Returns `true` when every key of `target` names a sequence position.
fn addresses_positions(target: &Patch) -> bool {
    target.entries().all(|(key, _)| key.as_index().is_some())
}

/// Merge a single entry, returning the value to store when the slot must be
/// overwritten. Nested containers are merged in place and yield `None`.
fn merge_entry(
    current: Option<&mut Value>,
    key: Key<'_>,
    patch: &Patch,
    replacer: Option<&Replacer>,
) -> Option<Value> {
    let resolved = replacer.and_then(|r| r.resolve(key));
    if let Some(f) = resolved.and_then(Replacer::as_func) {
        trace!(%key, "replacer function fired");
        return Some(f(current.as_deref(), patch));
    }

    match (current, patch) {
        (_, Patch::Unset) => {
            trace!(%key, "target entry unset; keeping default");
            None
        }
        (Some(existing), Patch::Map(_) | Patch::Seq(_)) if is_container(existing) => {
            trace!(%key, "merging nested container");
            merge_into(existing, patch, resolved);
            None
        }
        (existing, _) => {
            if existing.is_some_and(|value| is_container(value) != patch.is_container()) {
                trace!(%key, "shape mismatch; target overrides default");
            }
            patch.to_value()
        }
    }
}

const fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

fn assign_index(items: &mut Vec<Value>, index: usize, value: Value) {
    if let Some(slot) = items.get_mut(index) {
        *slot = value;
        return;
    }
    items.resize(index, Value::Null);
    items.push(value);
}
