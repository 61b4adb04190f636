//! Implementation of the `#[derive(Searchable)]` macro.
//!
//! Generates an `EntityShape` registration and attribute path constants
//! from a struct's named fields.

mod attrs;
mod derive;

pub use derive::searchable_derive_impl;
