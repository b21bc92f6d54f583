// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity declarations: meta deltas, ancestry and pipeline hooks.
//!
//! Inheritance is explicit. A declaration lists its ancestor chain of
//! [`MetaDelta`]s (root first) and chooses, per hook, whether to use its own
//! implementation or its parent's. `#[derive(Entity)]` writes all of this
//! from attributes:
//!
//! ```rust,ignore
//! #[derive(Entity)]
//! #[entity(
//!     parent = "ApexLeague",
//!     rule(endpoint = "league_v4_challenger_league", params("queue")),
//!     params("queue")
//! )]
//! pub struct ChallengerLeague;
//! ```

use serde_json::Value;

use crate::{
    error::Error,
    meta::{Meta, MetaDelta},
    params::{Params, QueryParams},
    record::Record
};

/// Meta and hook configuration of one declaration level.
pub trait Declaration: Send + Sync + 'static {
    /// Declaration name used in errors and logs.
    const NAME: &'static str;

    /// Keys this level redeclares.
    fn delta() -> MetaDelta;

    /// Deltas of the whole ancestor chain, root first, ending with
    /// [`Declaration::delta`].
    fn ancestry() -> Vec<MetaDelta> {
        vec![Self::delta()]
    }

    /// Pre-fetch validation of the bound path parameters.
    ///
    /// Runs after rule selection and before any network call.
    fn clean(params: &Params, meta: &Meta) -> Result<(), Error> {
        validate_sets(params, meta)
    }

    /// Post-fetch restructuring of the renamed payload into declared fields.
    fn reshape(payload: Value) -> Result<Value, Error> {
        Ok(payload)
    }
}

/// A fetchable declaration with typed data and query options.
pub trait Entity: Declaration {
    /// Data populated on resolution.
    type Data: Record;

    /// Optional query options accepted by `with_query`.
    type Query: QueryParams;
}

/// Default clean: every bound parameter with a validation set must be in it.
pub fn validate_sets(params: &Params, meta: &Meta) -> Result<(), Error> {
    for (name, value) in params.iter() {
        if let Some(allowed) = meta.allowed(name)
            && !allowed.iter().any(|a| a == value)
        {
            return Err(Error::invalid(
                name,
                value,
                format!("expected one of [{}]", allowed.join(", "))
            ));
        }
    }
    Ok(())
}

/// Wrap a bare list payload under a single declared field.
///
/// Mapping payloads pass through untouched.
pub fn wrap_list(field: &str, payload: Value) -> Value {
    match payload {
        Value::Array(items) => {
            let mut map = serde_json::Map::new();
            map.insert(field.to_string(), Value::Array(items));
            Value::Object(map)
        }
        other => other
    }
}
