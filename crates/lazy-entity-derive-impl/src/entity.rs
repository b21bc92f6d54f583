// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity derive macro implementation.
//!
//! # Architecture
//!
//! ```text
//! entity.rs (orchestrator)
//! │
//! ├── parse/          → Attribute parsing (EntityDef, RuleDef, StrList)
//! ├── declaration.rs  → impl Declaration + impl Entity
//! └── constructor.rs  → inherent `new(client, ..)` binding params
//! ```

mod constructor;
mod declaration;
pub mod parse;

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

use self::parse::EntityDef;

/// Main entry point for the Entity derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match EntityDef::from_derive_input(&input) {
        Ok(entity) => generate(&entity),
        Err(err) => err.write_errors().into()
    }
}

fn generate(entity: &EntityDef) -> TokenStream {
    let declaration = declaration::generate(entity);
    let constructor = constructor::generate(entity);

    let expanded = quote! {
        #declaration
        #constructor
    };

    expanded.into()
}
