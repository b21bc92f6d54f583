// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field renaming between the wire and declared names.
//!
//! The remote service speaks camelCase while declarations use snake_case.
//! Casing is normalized first; [`Renamed`] then maps the remaining wire names
//! that differ from the declared ones (e.g. `league_id` on the wire is `id`
//! on a `League`).
//!
//! ```text
//! incoming: leagueId ──snake──▶ league_id ──renamed──▶ id
//! outgoing: id ──renamed⁻¹──▶ league_id ──camel──▶ leagueId
//! ```

use std::collections::BTreeMap;

use convert_case::{Case, Casing};
use serde_json::{Map, Value};

/// Bidirectional mapping of wire field names to declared field names.
///
/// Both sides are stored so lookups in either direction are a single map
/// access. Names without an entry pass through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Renamed {
    to_declared: BTreeMap<String, String>,
    to_wire:     BTreeMap<String, String>
}

impl Renamed {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(wire, declared)` pairs.
    pub fn from_pairs<I, W, D>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (W, D)>,
        W: Into<String>,
        D: Into<String>
    {
        let mut renamed = Self::default();
        for (wire, declared) in pairs {
            renamed.insert(wire, declared);
        }
        renamed
    }

    /// Add one `wire -> declared` pair.
    pub fn insert(&mut self, wire: impl Into<String>, declared: impl Into<String>) {
        let wire = wire.into();
        let declared = declared.into();
        self.to_wire.insert(declared.clone(), wire.clone());
        self.to_declared.insert(wire, declared);
    }

    /// Declared name for a wire name.
    pub fn to_declared<'a>(&'a self, wire: &'a str) -> &'a str {
        self.to_declared.get(wire).map_or(wire, String::as_str)
    }

    /// Wire name for a declared name.
    pub fn to_wire<'a>(&'a self, declared: &'a str) -> &'a str {
        self.to_wire.get(declared).map_or(declared, String::as_str)
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.to_declared.len()
    }

    /// Check if the mapping has no pairs.
    pub fn is_empty(&self) -> bool {
        self.to_declared.is_empty()
    }

    /// Iterate `(wire, declared)` pairs in wire-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.to_declared
            .iter()
            .map(|(w, d)| (w.as_str(), d.as_str()))
    }

    /// Rename the keys of a response mapping to declared names.
    ///
    /// When a payload carries both the wire key and the declared key of one
    /// pair, the value under the wire key wins and the other is dropped.
    pub fn incoming(&self, map: Map<String, Value>) -> Map<String, Value> {
        if self.is_empty() {
            return map;
        }
        let (wire, plain): (Vec<_>, Vec<_>) = map
            .into_iter()
            .partition(|(key, _)| self.to_declared.contains_key(key));
        let mut out: Map<String, Value> = plain.into_iter().collect();
        for (key, value) in wire {
            out.insert(self.to_declared(&key).to_string(), value);
        }
        out
    }
}

/// Convert every object key in a payload to snake_case, recursively.
pub fn snake_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key.to_case(Case::Snake), snake_keys(value)))
                .collect()
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(snake_keys).collect()),
        other => other
    }
}

/// Wire spelling of an outgoing parameter name.
pub fn wire_param(renamed: &Renamed, declared: &str) -> String {
    renamed.to_wire(declared).to_case(Case::Camel)
}
