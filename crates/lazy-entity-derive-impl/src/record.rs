// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Record derive macro implementation.
//!
//! ```text
//! record.rs (orchestrator)
//! │
//! ├── parse.rs   → RecordDef, RecordField
//! └── decode.rs  → impl Record + impl Decode
//! ```

mod decode;
mod parse;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

use self::parse::RecordDef;

/// Main entry point for the Record derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match RecordDef::from_derive_input(&input) {
        Ok(record) => decode::generate(&record).into(),
        Err(err) => err.write_errors().into()
    }
}
