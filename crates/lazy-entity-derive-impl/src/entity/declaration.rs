// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `Declaration` and `Entity` impl generation.
//!
//! The delta carries only what the struct itself declares. Inheritance is
//! expressed through `ancestry` (parent chain plus own delta) and through
//! hooks delegating to the parent when not overridden.

use proc_macro2::{Literal, TokenStream};
use quote::quote;

use super::parse::EntityDef;

/// Generate the `Declaration` and `Entity` impls.
pub fn generate(entity: &EntityDef) -> TokenStream {
    let ident = &entity.ident;
    let name = ident.to_string();
    let delta = delta(entity);
    let ancestry = ancestry(entity);
    let clean = clean(entity);
    let reshape = reshape(entity);

    let data = match (&entity.record, &entity.parent) {
        (Some(record), _) => quote! { #record },
        (None, Some(parent)) => quote! { <#parent as ::lazy_entity_core::Entity>::Data },
        (None, None) => unreachable!("checked while parsing")
    };
    let query = match (&entity.query, &entity.parent) {
        (Some(query), _) => quote! { #query },
        (None, Some(parent)) => quote! { <#parent as ::lazy_entity_core::Entity>::Query },
        (None, None) => quote! { ::lazy_entity_core::NoQuery }
    };

    quote! {
        impl ::lazy_entity_core::Declaration for #ident {
            const NAME: &'static str = #name;

            fn delta() -> ::lazy_entity_core::MetaDelta {
                #delta
            }

            #ancestry
            #clean
            #reshape
        }

        impl ::lazy_entity_core::Entity for #ident {
            type Data = #data;
            type Query = #query;
        }
    }
}

fn str_array(values: &[String]) -> TokenStream {
    let len = Literal::usize_unsuffixed(values.len());
    quote! {
        {
            let values: [&'static str; #len] = [#(#values),*];
            values
        }
    }
}

fn delta(entity: &EntityDef) -> TokenStream {
    let rules = (!entity.rules.is_empty()).then(|| {
        let rules = entity.rules.iter().map(|rule| {
            let endpoint = &rule.endpoint;
            let params = str_array(rule.params.as_slice());
            quote! { .rule(#endpoint, #params) }
        });
        quote! {
            let delta = delta.rules(::lazy_entity_core::Rules::new() #(#rules)*);
        }
    });

    let renamed = (!entity.renamed.is_empty()).then(|| {
        let len = Literal::usize_unsuffixed(entity.renamed.len());
        let pairs = entity
            .renamed
            .iter()
            .map(|(wire, declared)| quote! { (#wire, #declared) });
        quote! {
            let delta = delta.renamed({
                let pairs: [(&'static str, &'static str); #len] = [#(#pairs),*];
                ::lazy_entity_core::Renamed::from_pairs(pairs)
            });
        }
    });

    let validate = entity.validate.iter().map(|(field, allowed)| {
        let allowed = str_array(allowed);
        quote! {
            let delta = delta.validate(#field, #allowed);
        }
    });

    let allow_query = entity.allow_query.map(|allow| {
        quote! {
            let delta = delta.allow_query(#allow);
        }
    });

    quote! {
        let delta = ::lazy_entity_core::MetaDelta::new();
        #rules
        #renamed
        #(#validate)*
        #allow_query
        delta
    }
}

fn ancestry(entity: &EntityDef) -> Option<TokenStream> {
    let parent = entity.parent.as_ref()?;
    Some(quote! {
        fn ancestry() -> ::std::vec::Vec<::lazy_entity_core::MetaDelta> {
            let mut chain = <#parent as ::lazy_entity_core::Declaration>::ancestry();
            chain.push(<Self as ::lazy_entity_core::Declaration>::delta());
            chain
        }
    })
}

fn clean(entity: &EntityDef) -> Option<TokenStream> {
    let body = match (&entity.clean, &entity.parent) {
        (Some(hook), _) => quote! { #hook(params, meta) },
        (None, Some(parent)) => {
            quote! { <#parent as ::lazy_entity_core::Declaration>::clean(params, meta) }
        }
        (None, None) => return None
    };
    Some(quote! {
        fn clean(
            params: &::lazy_entity_core::Params,
            meta: &::lazy_entity_core::Meta
        ) -> ::std::result::Result<(), ::lazy_entity_core::Error> {
            #body
        }
    })
}

fn reshape(entity: &EntityDef) -> Option<TokenStream> {
    let body = match (&entity.reshape, &entity.parent) {
        (Some(hook), _) => quote! { #hook(payload) },
        (None, Some(parent)) => {
            quote! { <#parent as ::lazy_entity_core::Declaration>::reshape(payload) }
        }
        (None, None) => return None
    };
    Some(quote! {
        fn reshape(
            payload: ::lazy_entity_core::serde_json::Value
        ) -> ::std::result::Result<::lazy_entity_core::serde_json::Value, ::lazy_entity_core::Error> {
            #body
        }
    })
}
