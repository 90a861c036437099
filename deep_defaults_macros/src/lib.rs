//! Procedural macros for `deep_defaults`.
//!
//! The [`DeepPartial`] derive generates a companion struct whose fields are
//! all optional, together with an implementation of
//! `deep_defaults::DeepPartial` pointing at it. Serialising the companion
//! skips `None` fields, so only the fields a caller sets override the
//! defaults.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `deep_defaults::DeepPartial`.
///
/// Struct attributes:
/// - `#[deep_partial(name = "Ident")]` renames the generated struct, which
///   otherwise is `<Struct>Partial`.
/// - `#[deep_partial(derive(Trait, ...))]` adds derives to the generated
///   struct on top of `Default`, `Serialize` and `Deserialize`.
///
/// Field attributes:
/// - `#[deep_partial(nested)]` uses the field type's own partial instead of
///   the field type itself.
///
/// `#[serde(rename_all = "...")]` on the struct and `#[serde(rename = "...")]`
/// on fields are forwarded so both structs serialise to the same keys.
#[proc_macro_derive(DeepPartial, attributes(deep_partial))]
pub fn derive_deep_partial(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive::expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
