//! Implementation of the `#[derive(Searchable)]` macro.
//!
//! This macro generates an implementation of the `Searchable` trait and
//! attribute path constants for type-safe specification building.

use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, Ident, Result};

use super::attrs::parse_search_attrs;

/// Main implementation of the Searchable derive macro.
pub fn searchable_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(Error::new(
            input.generics.span(),
            "Searchable cannot be derived for generic structs",
        ));
    }

    // Ensure we have a struct with named fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Searchable can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Searchable can only be derived for structs",
            ))
        }
    };

    let mut registrations: Vec<TokenStream> = Vec::new();
    let mut path_constants: Vec<TokenStream> = Vec::new();
    let mut const_names: HashSet<String> = HashSet::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let search_attrs = parse_search_attrs(&field.attrs)?;
        if search_attrs.skip {
            continue;
        }

        let span = if search_attrs.rename.is_some() {
            search_attrs.span
        } else {
            field_name.span()
        };
        let path = search_attrs
            .rename
            .unwrap_or_else(|| field_name.to_string());
        if path.is_empty() || path.split('.').any(str::is_empty) {
            return Err(Error::new(
                span,
                format!("'{path}' is not a valid attribute path"),
            ));
        }

        let screaming = to_screaming_snake_case(&path);
        let const_name = syn::parse_str::<Ident>(&screaming).map_err(|_| {
            Error::new(
                span,
                format!("'{path}' does not produce a valid constant name ({screaming})"),
            )
        })?;
        if !const_names.insert(screaming.clone()) {
            return Err(Error::new(
                span,
                format!("'{path}' collides with another field on constant {screaming}"),
            ));
        }
        path_constants.push(quote! {
            /// Attribute path constant for type-safe specifications.
            pub const #const_name: &'static str = #path;
        });

        let register = if search_attrs.nested {
            quote! { nested }
        } else {
            quote! { attribute }
        };
        registrations.push(quote! {
            let shape = shape.#register(
                #path,
                |entity: &Self| &entity.#field_name,
                |entity: &mut Self| &mut entity.#field_name,
            )?;
        });
    }

    let entity_name = struct_name.to_string();

    let expanded = quote! {
        impl #struct_name {
            #(#path_constants)*
        }

        impl ::searchspec_memory::Searchable for #struct_name {
            fn shape() -> ::searchspec_memory::Result<::searchspec_memory::EntityShape<Self>> {
                let shape = ::searchspec_memory::EntityShape::new(#entity_name);
                #(#registrations)*
                ::core::result::Result::Ok(shape)
            }
        }
    };

    Ok(expanded)
}

/// Convert an attribute path to SCREAMING_SNAKE_CASE.
///
/// Dots of nested paths become underscores.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if matches!(c, '_' | '-' | '.') {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = true;
        }
    }

    result
}
