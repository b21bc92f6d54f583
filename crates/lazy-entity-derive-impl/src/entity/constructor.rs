// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Inherent `new` constructor generation.
//!
//! ```rust,ignore
//! impl DivisionLeague {
//!     pub fn new(
//!         client: &Client,
//!         queue: Option<&str>,
//!         tier: Option<&str>,
//!         division: Option<&str>
//!     ) -> Result<Lazy<Self>, Error>;
//! }
//! ```

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::EntityDef;

/// Generate the constructor binding the declared params.
pub fn generate(entity: &EntityDef) -> TokenStream {
    let ident = &entity.ident;
    let vis = &entity.vis;
    let args = entity.params.iter().map(|(_, arg)| arg);
    let params = if entity.params.is_empty() {
        quote! { ::lazy_entity_core::Params::new() }
    } else {
        let pairs = entity
            .params
            .iter()
            .map(|(name, arg)| quote! { (#name, #arg) });
        quote! { ::lazy_entity_core::Params::from_pairs([#(#pairs),*]) }
    };
    let doc = format!(
        "Bind a new unresolved `{}`. Arguments left `None` are not bound.",
        ident
    );

    quote! {
        impl #ident {
            #[doc = #doc]
            ///
            /// No I/O happens until the first read.
            ///
            /// # Errors
            ///
            /// Fails if the declaration's rules are ambiguous or the client's
            /// default platform is not allowed.
            #vis fn new(
                client: &::lazy_entity_core::Client,
                #(#args: ::std::option::Option<&str>),*
            ) -> ::std::result::Result<::lazy_entity_core::Lazy<Self>, ::lazy_entity_core::Error> {
                ::lazy_entity_core::Lazy::bind(client, #params)
            }
        }
    }
}
