//! Input parsing for the `DeepPartial` derive macro.
//!
//! The struct identifier, its fields, and every attribute the generator needs
//! are gathered in one pass so invalid input fails fast with a spanned error.

use syn::{
    Attribute, Data, DeriveInput, Expr, Fields, Ident, LitStr, Path, Token, Type, Visibility,
    meta::ParseNestedMeta, parenthesized,
};

/// Everything the generator needs to know about the annotated struct.
pub(crate) struct PartialInput {
    pub ident: Ident,
    pub vis: Visibility,
    pub partial_ident: Ident,
    pub derives: Vec<Path>,
    pub rename_all: Option<LitStr>,
    pub fields: Vec<PartialField>,
}

/// A single named field of the annotated struct.
pub(crate) struct PartialField {
    pub ident: Ident,
    pub vis: Visibility,
    pub ty: Type,
    pub nested: bool,
    pub rename: Option<LitStr>,
}

#[derive(Default)]
struct StructAttrs {
    name: Option<Ident>,
    derives: Vec<Path>,
}

/// Gathers information from the user-provided struct.
///
/// Only non-generic structs with named fields are accepted.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<PartialInput> {
    let ident = input.ident.clone();
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            Fields::Unnamed(_) | Fields::Unit => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "DeepPartial requires named fields",
                ));
            }
        },
        Data::Enum(_) | Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                &ident,
                "DeepPartial can only be derived for structs",
            ));
        }
    };
    if !input.generics.params.is_empty() || input.generics.where_clause.is_some() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "DeepPartial does not support generic structs",
        ));
    }

    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let mut fields = Vec::with_capacity(named.len());
    for field in named {
        let Some(field_ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        fields.push(PartialField {
            ident: field_ident,
            vis: field.vis.clone(),
            ty: field.ty.clone(),
            nested: parse_nested_flag(&field.attrs)?,
            rename: serde_string(&field.attrs, "rename")?,
        });
    }

    let partial_ident = struct_attrs
        .name
        .unwrap_or_else(|| quote::format_ident!("{}Partial", ident));
    Ok(PartialInput {
        vis: input.vis.clone(),
        partial_ident,
        derives: struct_attrs.derives,
        rename_all: serde_string(&input.attrs, "rename_all")?,
        fields,
        ident,
    })
}

/// Iterate all `#[deep_partial(...)]` attributes and apply a callback.
fn parse_deep_partial<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("deep_partial")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_deep_partial(attrs, |meta| {
        if meta.path.is_ident("name") {
            let lit = meta.value()?.parse::<LitStr>()?;
            out.name = Some(lit.parse::<Ident>()?);
            Ok(())
        } else if meta.path.is_ident("derive") {
            meta.parse_nested_meta(|nested| {
                out.derives.push(nested.path.clone());
                Ok(())
            })
        } else if meta.path.is_ident("nested") {
            Err(meta.error("`nested` applies to fields, not structs"))
        } else {
            Err(meta.error("unknown deep_partial attribute; expected `name` or `derive`"))
        }
    })?;
    Ok(out)
}

fn parse_nested_flag(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut nested = false;
    parse_deep_partial(attrs, |meta| {
        if meta.path.is_ident("nested") {
            nested = true;
            Ok(())
        } else {
            Err(meta.error("unknown deep_partial field attribute; expected `nested`"))
        }
    })?;
    Ok(nested)
}

/// Returns the string value of `#[serde(<key> = "...")]`, if present.
///
/// Other serde keys are skipped. List forms such as
/// `rename(serialize = "...")` are skipped as well.
pub(crate) fn serde_string(attrs: &[Attribute], key: &str) -> syn::Result<Option<LitStr>> {
    let mut out = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(key) && meta.input.peek(Token![=]) {
                out = Some(meta.value()?.parse::<LitStr>()?);
                Ok(())
            } else {
                discard_unknown(&meta)
            }
        })?;
    }
    Ok(out)
}

/// Consumes an unrecognised key-value or list without recording it.
fn discard_unknown(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}
