// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Request/response transformation around the network call.
//!
//! ```text
//! prepare:  rule ─▶ clean ─▶ rename query (declared → wire, camelCase)
//!                                   │
//!                              fetch(request)
//!                                   │
//! populate: snake_case keys ─▶ renamed (wire → declared) ─▶ reshape
//!           ─▶ backfill bound params ─▶ Record::from_payload ─▶ project
//! ```
//!
//! Both halves are pure: everything that can fail before the call fails in
//! [`prepare`], so a rejected request never reaches the transport.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::{
    declaration::Entity,
    error::{Error, Mismatch},
    meta::Meta,
    params::Params,
    record::{Record, kind_of},
    rename::{snake_keys, wire_param},
    rules::resolve_endpoint
};

/// Outgoing call handed to the networking collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Endpoint key, e.g. `league_v4_challenger_league`.
    pub endpoint: String,
    /// Routing platform, e.g. `na1`.
    pub platform: Option<String>,
    /// Path parameter values in rule order.
    pub path:     Vec<String>,
    /// Query parameters keyed by wire name.
    pub query:    BTreeMap<String, String>
}

/// Select the endpoint, run `clean`, and build the outgoing request.
pub fn prepare<E: Entity>(
    meta: &Meta,
    params: &Params,
    query: &[(&'static str, String)],
    platform: Option<&str>
) -> Result<Request, Error> {
    let endpoint = resolve_endpoint(E::NAME, params, meta.rules())?;
    E::clean(params, meta)?;

    let query = query
        .iter()
        .map(|(name, value)| (wire_param(meta.renamed(), name), value.clone()))
        .collect();

    Ok(Request {
        endpoint: endpoint.key,
        platform: platform.map(str::to_string),
        path: endpoint.path,
        query
    })
}

/// Fully transformed response: typed data plus the declared field mapping.
#[derive(Debug)]
pub struct Populated<D> {
    /// Typed data.
    pub data:   D,
    /// Declared fields by declared name, nested records included.
    pub fields: Map<String, Value>
}

/// Turn a raw payload into the entity's declared data.
pub fn populate<E: Entity>(
    meta: &Meta,
    params: &Params,
    raw: Value
) -> Result<Populated<E::Data>, Error> {
    let mismatch = |mismatch: Mismatch| Error::SchemaMismatch {
        entity: E::NAME,
        mismatch
    };

    let renamed = match snake_keys(raw) {
        Value::Object(map) => Value::Object(meta.renamed().incoming(map)),
        other => other
    };

    let mut fields = match E::reshape(renamed)? {
        Value::Object(map) => map,
        other => return Err(mismatch(Mismatch::new("object", kind_of(Some(&other)))))
    };

    for (name, value) in params.iter() {
        if E::Data::declares(name) && !fields.contains_key(name) {
            fields.insert(name.to_string(), Value::String(value.to_string()));
        }
    }

    let data = E::Data::from_payload(&fields).map_err(mismatch)?;
    let fields = E::Data::project_fields(&fields);

    Ok(Populated {
        data,
        fields
    })
}
