// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! String list and rule attribute values.

use std::collections::BTreeSet;

use darling::{FromMeta, ast::NestedMeta};

/// List of string literals, as in `params("queue", "tier")`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrList(Vec<String>);

impl StrList {
    /// Values in written order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Iterate values in written order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Take the values.
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl FromMeta for StrList {
    fn from_list(items: &[NestedMeta]) -> darling::Result<Self> {
        let mut errors = darling::Error::accumulator();
        let values = items
            .iter()
            .filter_map(|item| {
                errors.handle(match item {
                    NestedMeta::Lit(syn::Lit::Str(value)) => Ok(value.value()),
                    NestedMeta::Lit(other) => Err(darling::Error::unexpected_lit_type(other)),
                    NestedMeta::Meta(meta) => {
                        Err(darling::Error::custom("expected a string literal").with_span(meta))
                    }
                })
            })
            .collect();
        errors.finish_with(Self(values))
    }
}

/// One `rule(endpoint = "..", params(..))` entry.
#[derive(Debug, Clone, FromMeta)]
pub struct RuleDef {
    /// Endpoint key passed to the transport.
    pub endpoint: String,

    /// Parameters the endpoint requires.
    #[darling(default)]
    pub params: StrList
}

impl RuleDef {
    /// Parameters as an order-independent set.
    pub fn param_set(&self) -> BTreeSet<&str> {
        self.params.iter().map(String::as_str).collect()
    }

    /// First parameter listed more than once.
    pub fn repeated_param(&self) -> Option<&str> {
        let mut seen = BTreeSet::new();
        self.params
            .iter()
            .map(String::as_str)
            .find(|name| !seen.insert(*name))
    }
}
