// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Core engine for lazy-entity.
//!
//! Entities are declarations: which record they populate, which endpoint
//! rules they answer to, how fields are renamed, and which parameter values
//! are valid. This crate turns those declarations into deferred network
//! calls.
//!
//! # Overview
//!
//! - [`Meta`] / [`MetaDelta`] — per-declaration configuration merged along
//!   the ancestor chain
//! - [`resolve_endpoint`] — picks the single rule matching the bound params
//! - [`Lazy`] — binds params without I/O, resolves once on first read
//! - [`pipeline`] — clean, rename and reshape around the call
//! - [`Record`] / [`Decode`] — typed field population from payloads
//! - [`Fetch`] — the networking collaborator seam
//! - [`Client`] — transport, configuration and declaration registry
//!
//! # Usage
//!
//! Most users should use `lazy-entity` directly, which re-exports this crate
//! together with the derive macros. For manual declarations:
//!
//! ```rust,ignore
//! use lazy_entity_core::prelude::*;
//!
//! struct ChallengerLeague;
//!
//! impl Declaration for ChallengerLeague {
//!     const NAME: &'static str = "ChallengerLeague";
//!
//!     fn delta() -> MetaDelta {
//!         MetaDelta::new().rules(Rules::new().rule("league_v4_challenger_league", ["queue"]))
//!     }
//! }
//!
//! impl Entity for ChallengerLeague {
//!     type Data = LeagueData;
//!     type Query = NoQuery;
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod declaration;
pub mod error;
pub mod fetch;
pub mod lazy;
pub mod meta;
pub mod params;
pub mod pipeline;
pub mod prelude;
pub mod record;
pub mod rename;
pub mod rules;

/// Re-export async_trait for transport implementations.
pub use async_trait::async_trait;
pub use client::Client;
pub use config::ClientConfig;
pub use declaration::{Declaration, Entity, validate_sets, wrap_list};
pub use error::{Error, Mismatch, TransportError};
pub use fetch::{Fetch, MemoryFetch};
pub use lazy::{Lazy, Phase, Resolved};
pub use meta::{Meta, MetaDelta, Rules};
pub use params::{NoQuery, Params, QueryParams, positive};
pub use pipeline::Request;
pub use record::{Decode, Listing, Record, decode_record, project_record};
pub use rename::Renamed;
pub use rules::{Endpoint, resolve_endpoint};
/// Re-export serde_json for generated code.
pub use serde_json;
