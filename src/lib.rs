// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

//! # lazy-entity
//!
//! One crate, all features. Re-exports:
//! - [`Record`](macro@Record) and [`Entity`](macro@Entity) derive macros
//!   from `lazy-entity-derive-impl`
//! - Everything from `lazy-entity-core` ([`Client`], [`Lazy`], [`Meta`],
//!   [`Error`], [`MemoryFetch`], ...)
//! - The [`lol`] declaration set (feature `lol`, on by default)
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lazy_entity::{Client, ClientConfig, MemoryFetch, lol::ChallengerLeague};
//!
//! let client = Client::with_config(MemoryFetch::new(), ClientConfig::new().default_platform("na1"));
//! let league = ChallengerLeague::new(&client, Some("RANKED_SOLO_5x5"))?;
//!
//! // Nothing has been fetched yet.
//! let top = league.resolve().await?;
//! println!("{} entries", top.entries.len());
//! ```

pub use lazy_entity_core::*;
pub use lazy_entity_derive_impl::{Entity, Record};

#[cfg(feature = "lol")]
#[cfg_attr(docsrs, doc(cfg(feature = "lol")))]
pub mod lol;
