// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lazy_entity_core::prelude::*;
//! ```

pub use crate::{
    Client, ClientConfig, Declaration, Entity, Error, Fetch, Lazy, Listing, Meta, MetaDelta,
    NoQuery, Params, Phase, QueryParams, Record, Renamed, Request, Resolved, Rules,
    TransportError, async_trait
};
