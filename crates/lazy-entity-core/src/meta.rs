// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Per-declaration configuration and its inheritance merge.
//!
//! Each declaration contributes a [`MetaDelta`]: only the keys it redeclares.
//! The effective [`Meta`] is the fold of every delta along the ancestor chain,
//! root first.
//!
//! # Merge Rules
//!
//! | Key | Declared by child | Not declared |
//! |-----|-------------------|--------------|
//! | `rules` | whole mapping replaced | inherited |
//! | `renamed` | whole mapping replaced | inherited |
//! | validation sets | replaced per field | inherited per field |
//! | `allow_query` | replaced | inherited (root: `false`) |

use std::collections::{BTreeMap, BTreeSet};

use crate::{error::Error, rename::Renamed};

/// Endpoint rules: endpoint key to ordered required parameter names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rules(BTreeMap<String, Vec<String>>);

impl Rules {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule.
    ///
    /// Redeclaring an endpoint replaces its parameters. A parameter listed
    /// twice is kept once, in first position.
    #[must_use]
    pub fn rule<I, S>(mut self, endpoint: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>
    {
        let mut names: Vec<String> = Vec::new();
        for name in params.into_iter().map(Into::into) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        self.0.insert(endpoint.into(), names);
        self
    }

    /// Iterate `(endpoint, params)` in endpoint order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Parameter names of an endpoint.
    pub fn get(&self, endpoint: &str) -> Option<&[String]> {
        self.0.get(endpoint).map(Vec::as_slice)
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no rules are declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Endpoint groups whose parameter sets collide.
    ///
    /// Each returned group has two or more endpoints requiring the same
    /// set of parameter names.
    pub fn collisions(&self) -> Vec<Vec<String>> {
        let mut by_set: BTreeMap<BTreeSet<&str>, Vec<String>> = BTreeMap::new();
        for (endpoint, params) in &self.0 {
            let set = params.iter().map(String::as_str).collect();
            by_set.entry(set).or_default().push(endpoint.clone());
        }
        by_set.into_values().filter(|group| group.len() > 1).collect()
    }
}

/// Keys redeclared by one level of the declaration hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaDelta {
    rules:       Option<Rules>,
    renamed:     Option<Renamed>,
    validation:  BTreeMap<String, Vec<String>>,
    allow_query: Option<bool>
}

impl MetaDelta {
    /// Delta that redeclares nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Redeclare `rules`.
    #[must_use]
    pub fn rules(mut self, rules: Rules) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Redeclare `renamed`.
    #[must_use]
    pub fn renamed(mut self, renamed: Renamed) -> Self {
        self.renamed = Some(renamed);
        self
    }

    /// Redeclare the validation set of one field.
    #[must_use]
    pub fn validate<I, S>(mut self, field: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>
    {
        self.validation
            .insert(field.into(), allowed.into_iter().map(Into::into).collect());
        self
    }

    /// Redeclare `allow_query`.
    #[must_use]
    pub const fn allow_query(mut self, allow: bool) -> Self {
        self.allow_query = Some(allow);
        self
    }

    /// Combine two consecutive deltas into one.
    ///
    /// `base.merge(&a.then(&b)) == base.merge(&a).merge(&b)` for any `base`.
    #[must_use]
    pub fn then(&self, child: &Self) -> Self {
        let mut validation = self.validation.clone();
        validation.extend(child.validation.clone());
        Self {
            rules: child.rules.clone().or_else(|| self.rules.clone()),
            renamed: child.renamed.clone().or_else(|| self.renamed.clone()),
            validation,
            allow_query: child.allow_query.or(self.allow_query)
        }
    }
}

/// Resolved configuration of a declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Meta {
    rules:       Rules,
    renamed:     Renamed,
    validation:  BTreeMap<String, Vec<String>>,
    allow_query: bool
}

impl Meta {
    /// Merge a child's delta over this (parent) meta.
    ///
    /// Never fails; keys the child does not declare are inherited verbatim.
    #[must_use]
    pub fn merge(&self, delta: &MetaDelta) -> Self {
        let mut validation = self.validation.clone();
        validation.extend(delta.validation.clone());
        Self {
            rules: delta.rules.clone().unwrap_or_else(|| self.rules.clone()),
            renamed: delta
                .renamed
                .clone()
                .unwrap_or_else(|| self.renamed.clone()),
            validation,
            allow_query: delta.allow_query.unwrap_or(self.allow_query)
        }
    }

    /// Fold an ancestor chain, root first.
    pub fn from_chain<'a, I>(chain: I) -> Self
    where
        I: IntoIterator<Item = &'a MetaDelta>
    {
        chain
            .into_iter()
            .fold(Self::default(), |meta, delta| meta.merge(delta))
    }

    /// Check the rule set for parameter sets shared by several endpoints.
    pub fn check(&self, entity: &'static str) -> Result<(), Error> {
        match self.rules.collisions().into_iter().next() {
            Some(endpoints) => Err(Error::AmbiguousRule {
                entity,
                endpoints
            }),
            None => Ok(())
        }
    }

    /// Endpoint rules.
    pub const fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Wire/declared renames.
    pub const fn renamed(&self) -> &Renamed {
        &self.renamed
    }

    /// Allowed values for a field, if it has a validation set.
    pub fn allowed(&self, field: &str) -> Option<&[String]> {
        self.validation.get(field).map(Vec::as_slice)
    }

    /// Iterate validation sets in field order.
    pub fn validation_sets(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.validation
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Whether optional query parameters may be attached.
    pub const fn allow_query(&self) -> bool {
        self.allow_query
    }
}
