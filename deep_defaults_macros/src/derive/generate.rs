//! Token generation for the `DeepPartial` derive macro.
//!
//! The generated struct mirrors the annotated one with every field wrapped in
//! `Option`. Generated code reaches serde through `deep_defaults` so callers
//! do not need a direct serde dependency with matching features.

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{PartialField, PartialInput};

/// Emit the partial struct and its `DeepPartial` implementation.
pub(crate) fn generate(input: &PartialInput) -> TokenStream {
    let partial_struct = generate_partial_struct(input);
    let trait_impl = generate_trait_impl(input);
    quote! {
        #partial_struct
        #trait_impl
    }
}

/// Generate the companion struct with optional fields.
pub(crate) fn generate_partial_struct(input: &PartialInput) -> TokenStream {
    let PartialInput {
        ident,
        vis,
        partial_ident,
        derives,
        rename_all,
        fields,
    } = input;
    let doc = format!("Partial overrides for `{ident}`; `None` fields keep their defaults.");
    let rename_all = rename_all
        .as_ref()
        .map(|lit| quote! { #[serde(rename_all = #lit)] });
    let fields = fields.iter().map(generate_field);
    quote! {
        #[doc = #doc]
        #[derive(
            ::core::default::Default,
            ::deep_defaults::__private::serde::Serialize,
            ::deep_defaults::__private::serde::Deserialize,
            #( #derives, )*
        )]
        #[serde(crate = "::deep_defaults::__private::serde")]
        #rename_all
        #vis struct #partial_ident {
            #( #fields, )*
        }
    }
}

/// Generate a single optional field.
pub(crate) fn generate_field(field: &PartialField) -> TokenStream {
    let PartialField {
        ident,
        vis,
        ty,
        nested,
        rename,
    } = field;
    let doc = format!("Override for `{ident}`.");
    let inner = if *nested {
        quote! { <#ty as ::deep_defaults::DeepPartial>::Partial }
    } else {
        quote! { #ty }
    };
    let rename = rename
        .as_ref()
        .map(|lit| quote! { #[serde(rename = #lit)] });
    quote! {
        #[doc = #doc]
        #[serde(default, skip_serializing_if = "::core::option::Option::is_none")]
        #rename
        #vis #ident: ::core::option::Option<#inner>
    }
}

fn generate_trait_impl(input: &PartialInput) -> TokenStream {
    let PartialInput {
        ident,
        partial_ident,
        ..
    } = input;
    quote! {
        impl ::deep_defaults::DeepPartial for #ident {
            type Partial = #partial_ident;
        }
    }
}
