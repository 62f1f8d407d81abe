//! Procedural macros for the atlas-enrich crate
//!
//! This crate provides the derive used to declare the fixed set of fields an
//! enrichment pass adds to a record.

use proc_macro::TokenStream;

mod field_set;
mod utils;

/// Derive macro for enrichment field sets
///
/// Generates an implementation of `crate::models::FieldSet` listing the
/// serialized names of every field, an optional provenance literal and a
/// `null_fields` method reporting which `Option` fields are currently `None`.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(FieldSet)]
/// #[field_set(provenance = "Natural Earth (country centroid)")]
/// struct CountryGeo {
///     country_latitude: Option<f64>,
///
///     #[field_set(name = "region_un")]
///     region: Option<String>,
/// }
/// ```
#[proc_macro_derive(FieldSet, attributes(field_set))]
pub fn derive_field_set(input: TokenStream) -> TokenStream {
    field_set::process_derive_field_set(input)
}
