//! FieldSet derive macro implementation
//!
//! This module contains the implementation of the FieldSet derive macro,
//! which declares the names of the fields an enrichment extension adds to a
//! record and reports which of them are null.

use darling::{ast, FromDeriveInput, FromField};
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

use crate::utils;

/// Receiver for the struct that derives FieldSet
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(field_set), supports(struct_named))]
struct FieldSetReceiver {
    /// The struct identifier
    ident: syn::Ident,
    /// Literal tag identifying the source of the attached fields
    #[darling(default)]
    provenance: Option<String>,
    /// The struct data with parsed fields
    data: ast::Data<(), FieldSetFieldReceiver>,
}

/// Receiver for the fields in the struct
#[derive(Debug, FromField)]
#[darling(attributes(field_set))]
struct FieldSetFieldReceiver {
    /// The field identifier
    ident: Option<syn::Ident>,
    /// The field type
    ty: syn::Type,
    /// Serialized name, when it differs from the identifier
    #[darling(default, rename = "name")]
    field_name: Option<String>,
}

impl FieldSetFieldReceiver {
    fn output_name(&self) -> Option<String> {
        let ident = self.ident.as_ref()?;
        Some(
            self.field_name
                .clone()
                .unwrap_or_else(|| ident.to_string().trim_start_matches("r#").to_string()),
        )
    }
}

/// Process the FieldSet derive macro
pub fn process_derive_field_set(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let receiver = match FieldSetReceiver::from_derive_input(&input) {
        Ok(receiver) => receiver,
        Err(err) => return err.write_errors().into(),
    };

    let ast::Data::Struct(fields) = &receiver.data else {
        unreachable!("Darling ensures this is a struct")
    };

    TokenStream::from(generate_field_set_impl(&receiver, fields))
}

/// Generate the FieldSet implementation
fn generate_field_set_impl(
    receiver: &FieldSetReceiver,
    fields: &ast::Fields<FieldSetFieldReceiver>,
) -> proc_macro2::TokenStream {
    let struct_name = &receiver.ident;

    let names = fields
        .iter()
        .filter_map(FieldSetFieldReceiver::output_name)
        .collect::<Vec<_>>();

    // Only Option fields can ever be null
    let null_checks = fields.iter().filter_map(|field| {
        let ident = field.ident.as_ref()?;
        if !utils::is_option_type(&field.ty) {
            return None;
        }
        let name = field.output_name()?;
        Some(quote! {
            if self.#ident.is_none() {
                nulls.push(#name);
            }
        })
    });

    let provenance = match &receiver.provenance {
        Some(tag) => quote! { ::core::option::Option::Some(#tag) },
        None => quote! { ::core::option::Option::None },
    };

    quote! {
        impl crate::models::FieldSet for #struct_name {
            const FIELD_NAMES: &'static [&'static str] = &[#(#names),*];
            const PROVENANCE: ::core::option::Option<&'static str> = #provenance;

            #[allow(unused_mut)]
            fn null_fields(&self) -> ::std::vec::Vec<&'static str> {
                let mut nulls = ::std::vec::Vec::new();
                #(#null_checks)*
                nulls
            }
        }
    }
}
