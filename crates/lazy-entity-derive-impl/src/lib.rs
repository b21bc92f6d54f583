// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

//! # Attribute Quick Reference
//!
//! ## Records `#[record(...)]`
//!
//! ```rust,ignore
//! #[derive(Record)]
//! #[record(renamed(queue_type = "queue"))] // Optional: wire key -> field name
//! pub struct SummonerLeagueEntryData {
//!     pub queue: String,
//!     pub tier:  Option<String>,
//! }
//! ```
//!
//! ## Entities `#[entity(...)]`
//!
//! ```rust,ignore
//! #[derive(Entity)]
//! #[entity(
//!     record = "LeagueData",                                  // Record populated on resolution
//!     parent = "ApexLeague",                                  // Inherit rules, renames, hooks
//!     rule(endpoint = "league_v4_master_league", params("queue")),
//!     renamed(league_id = "id"),                              // Wire field -> record field
//!     validate(queue("RANKED_SOLO_5x5", "RANKED_FLEX_SR")),   // Allowed values per param
//!     allow_query,                                            // Accept extra query params
//!     query = "DivisionQuery",                                // Query param type
//!     clean = "check_queue",                                  // fn(&Params, &Meta) -> Result<(), Error>
//!     reshape = "wrap_entries",                               // fn(Value) -> Result<Value, Error>
//!     params("queue")                                         // Arguments of the generated `new`
//! )]
//! pub struct MasterLeague;
//! ```
//!
//! # Generated Code
//!
//! | Derive | Generates |
//! |--------|-----------|
//! | `Record` | `impl Record` (field list, renames, payload decoding) and `impl Decode` |
//! | `Entity` | `impl Declaration`, `impl Entity` and an inherent `new` constructor |

mod entity;
mod record;

use proc_macro::TokenStream;

/// Derive macro for typed payload records.
///
/// Every named field is decoded from the payload key of the same name,
/// after the record's `renamed` mapping. Field types must implement
/// `Decode`; nested records do so through this derive.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive(input)
}

/// Derive macro for lazily resolved entity declarations.
///
/// Applies to unit structs. The struct is a marker; instances are
/// `Lazy<Self>` values created through the generated `new`.
///
/// Two rules requiring the same parameter set are rejected at compile time.
/// Rule sets assembled through `parent` are checked again when the
/// declaration is first registered with a client.
#[proc_macro_derive(Entity, attributes(entity))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    entity::derive(input)
}
