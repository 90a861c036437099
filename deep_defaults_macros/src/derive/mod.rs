//! Expansion of the `DeepPartial` derive.

pub(crate) mod generate;
pub(crate) mod parse;

use proc_macro2::TokenStream;
use syn::DeriveInput;

/// Parse `input` and emit the partial struct plus the trait implementation.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse::parse_input(input)?;
    Ok(generate::generate(&parsed))
}
