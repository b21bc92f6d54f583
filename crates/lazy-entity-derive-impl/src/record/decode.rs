// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `Record` and `Decode` impl generation.
//!
//! Each field reads its wire key first and falls back to the declared name,
//! so a payload renamed upstream by the owning entity decodes the same way.
//! The generated projection uses the same lookup and keys its output by
//! declared name.

use proc_macro2::{Literal, TokenStream};
use quote::quote;

use super::parse::RecordDef;

/// Generate `impl Record` and `impl Decode`.
pub fn generate(record: &RecordDef) -> TokenStream {
    let ident = &record.ident;
    let (impl_generics, ty_generics, where_clause) = record.generics.split_for_impl();
    let names: Vec<_> = record.fields.iter().map(|field| &field.name).collect();

    let renamed = (!record.renamed.is_empty()).then(|| {
        let len = Literal::usize_unsuffixed(record.renamed.len());
        let pairs = record
            .renamed
            .iter()
            .map(|(wire, declared)| quote! { (#wire, #declared) });
        quote! {
            fn renamed() -> ::lazy_entity_core::Renamed {
                let pairs: [(&'static str, &'static str); #len] = [#(#pairs),*];
                ::lazy_entity_core::Renamed::from_pairs(pairs)
            }
        }
    });

    let lookup = |name: &String| {
        if record.renamed.is_empty() {
            quote! { map.get(#name) }
        } else {
            quote! { map.get(renamed.to_wire(#name)).or_else(|| map.get(#name)) }
        }
    };
    let fields = record.fields.iter().map(|field| {
        let field_ident = &field.ident;
        let ty = &field.ty;
        let name = &field.name;
        let lookup = lookup(name);
        quote! {
            #field_ident: <#ty as ::lazy_entity_core::Decode>::decode(#lookup)
                .map_err(|mismatch| mismatch.at(#name))?
        }
    });
    let projections = record.fields.iter().map(|field| {
        let ty = &field.ty;
        let name = &field.name;
        let lookup = lookup(name);
        quote! {
            if let ::std::option::Option::Some(value) = #lookup {
                fields.insert(
                    ::std::string::String::from(#name),
                    <#ty as ::lazy_entity_core::Decode>::project(value)
                );
            }
        }
    });
    let bind_renamed = (!record.renamed.is_empty()).then(|| {
        quote! { let renamed = <Self as ::lazy_entity_core::Record>::renamed(); }
    });

    quote! {
        impl #impl_generics ::lazy_entity_core::Record for #ident #ty_generics #where_clause {
            const FIELDS: &'static [&'static str] = &[#(#names),*];

            #renamed

            fn from_payload(
                map: &::lazy_entity_core::serde_json::Map<
                    ::std::string::String,
                    ::lazy_entity_core::serde_json::Value
                >
            ) -> ::std::result::Result<Self, ::lazy_entity_core::Mismatch> {
                #bind_renamed
                ::std::result::Result::Ok(Self {
                    #(#fields),*
                })
            }

            fn project_fields(
                map: &::lazy_entity_core::serde_json::Map<
                    ::std::string::String,
                    ::lazy_entity_core::serde_json::Value
                >
            ) -> ::lazy_entity_core::serde_json::Map<
                ::std::string::String,
                ::lazy_entity_core::serde_json::Value
            > {
                #bind_renamed
                let mut fields = ::lazy_entity_core::serde_json::Map::new();
                #(#projections)*
                fields
            }
        }

        impl #impl_generics ::lazy_entity_core::Decode for #ident #ty_generics #where_clause {
            fn decode(
                value: ::std::option::Option<&::lazy_entity_core::serde_json::Value>
            ) -> ::std::result::Result<Self, ::lazy_entity_core::Mismatch> {
                ::lazy_entity_core::decode_record(value)
            }

            fn project(
                value: &::lazy_entity_core::serde_json::Value
            ) -> ::lazy_entity_core::serde_json::Value {
                ::lazy_entity_core::project_record::<Self>(value)
            }
        }
    }
}
