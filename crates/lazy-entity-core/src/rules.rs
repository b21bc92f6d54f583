// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Endpoint selection from bound path parameters.
//!
//! A rule matches when its required parameter names equal the bound names as
//! a set. The matched rule's declared order drives positional path
//! substitution, so values are returned in that order.

use std::collections::BTreeSet;

use tracing::debug;

use crate::{error::Error, meta::Rules, params::Params};

/// Endpoint chosen for a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Endpoint key understood by the networking collaborator.
    pub key:  String,
    /// Path parameter values in the rule's declared order.
    pub path: Vec<String>
}

/// Select the single rule matching the bound parameters.
///
/// # Errors
///
/// - [`Error::NoMatchingRule`] when no rule requires exactly the bound set
/// - [`Error::AmbiguousRule`] when several do
pub fn resolve_endpoint(
    entity: &'static str,
    params: &Params,
    rules: &Rules
) -> Result<Endpoint, Error> {
    let bound: BTreeSet<&str> = params.iter().map(|(name, _)| name).collect();

    let matching: Vec<(&str, &[String])> = rules
        .iter()
        .filter(|(_, required)| {
            required.len() == bound.len()
                && required.iter().map(String::as_str).collect::<BTreeSet<_>>() == bound
        })
        .collect();

    match matching.as_slice() {
        [] => Err(Error::NoMatchingRule {
            entity,
            bound: bound.into_iter().map(str::to_string).collect()
        }),
        [(key, required)] => {
            debug!(entity, endpoint = key, "rule selected");
            let path = required
                .iter()
                .filter_map(|name| params.get(name))
                .map(str::to_string)
                .collect();
            Ok(Endpoint {
                key: (*key).to_string(),
                path
            })
        }
        many => Err(Error::AmbiguousRule {
            entity,
            endpoints: many.iter().map(|(key, _)| (*key).to_string()).collect()
        })
    }
}
