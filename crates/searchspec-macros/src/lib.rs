//! Proc macros for searchspec.
//!
//! # Derive Macros
//!
//! - [`Searchable`] - Register a struct's fields as searchable attributes
//!   for the in-memory backend

mod searchable;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `searchspec_memory::Searchable` for a struct with named fields.
///
/// Every field is registered under its own name unless marked otherwise.
/// Field types must implement `searchspec_memory::Attribute` (strings,
/// numbers, booleans, `Timestamp`, `Option` of those, or hand-written enum
/// impls); `nested` fields must implement `Searchable` and `Clone`.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `skip` | Exclude this field from the shape |
/// | `rename = "..."` | Register under a custom path |
/// | `nested` | Mount the field's own shape under the field's path |
///
/// # Generated Code
///
/// The macro generates:
///
/// 1. Path constants (e.g., `Person::NAME`, `Person::SKILL`)
/// 2. An implementation of `Searchable::shape()` chaining one
///    `EntityShape::attribute` or `EntityShape::nested` call per field
///
/// # Example
///
/// ```ignore
/// use searchspec_memory::Searchable;
///
/// #[derive(Clone, Default, Searchable)]
/// struct Skill {
///     name: String,
/// }
///
/// #[derive(Clone, Default, Searchable)]
/// struct Person {
///     #[search(rename = "full_name")]
///     name: String,
///     age: Option<u32>,
///     #[search(nested)]
///     skill: Skill,
///     #[search(skip)]
///     cache: Vec<u8>,
/// }
///
/// assert_eq!(Person::FULL_NAME, "full_name");
/// ```
#[proc_macro_derive(Searchable, attributes(search))]
pub fn searchable_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    searchable::searchable_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
