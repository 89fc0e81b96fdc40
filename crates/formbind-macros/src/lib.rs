//! # formbind-macros
//!
//! Procedural macros for formbind. Provides `#[derive(Model)]`, which builds
//! the static property table a binder uses to read and write a model type.
//!
//! This crate is independent of the other formbind crates because proc-macro
//! crates cannot depend on crates that use them. Generated code refers to
//! `::formbind_core` by absolute path unless `#[bind(crate = "...")]` names
//! another path.

mod model;
mod string_list;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `formbind_core::model::Model` for a struct with named fields.
///
/// # Container attributes
///
/// - `#[bind(name = "...")]` overrides the type name used in error messages.
/// - `#[bind(crate = "...")]` sets the path to `formbind_core`.
///
/// # Field attributes
///
/// - `#[bind(rename = "...")]` exposes the field under another property name.
/// - `#[bind(skip)]` leaves the field out of the property table.
/// - `#[bind(data_source("A", "B"))]` or `#[bind(data_source = ["A", "B"])]`
///   declares a static candidate list for the property.
///
/// # Example
///
/// ```ignore
/// #[derive(Default, Model)]
/// struct Order {
///     reference: String,
///     #[bind(data_source("Post", "Courier"))]
///     carrier: String,
///     #[bind(skip)]
///     cache: Vec<u8>,
/// }
/// ```
#[proc_macro_derive(Model, attributes(bind))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    model::derive_model_impl(input).into()
}
