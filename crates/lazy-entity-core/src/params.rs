// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Path and query parameters bound to an entity.
//!
//! Path parameters take part in rule selection; query parameters never do.
//! Constructor arguments that are `None` are dropped at bind time, so the
//! bound set is exactly the set of names the caller supplied.

use std::collections::BTreeMap;

use crate::error::Error;

/// Path parameters bound at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from optional named arguments, keeping only the present ones.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lazy_entity_core::Params;
    ///
    /// let params = Params::from_pairs([("queue", Some("RANKED_SOLO_5x5")), ("id", None)]);
    /// assert_eq!(params.names(), ["queue"]);
    /// ```
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<String>,
        V: Into<String>
    {
        Self(
            pairs
                .into_iter()
                .filter_map(|(k, v)| v.map(|v| (k.into(), v.into())))
                .collect()
        )
    }

    /// Bind one parameter.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Value of a bound parameter.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Check if a parameter is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Bound parameter names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    /// Iterate `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of bound parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Typed optional query options of an entity.
///
/// Each option validates on its own; a rejected option never reaches the
/// instance.
pub trait QueryParams: Send + Sync + 'static {
    /// Check every present option.
    fn validate(&self) -> Result<(), Error>;

    /// Present options as `(declared_name, value)` pairs.
    fn pairs(&self) -> Vec<(&'static str, String)>;
}

/// Query options of entities that accept none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoQuery;

impl QueryParams for NoQuery {
    fn validate(&self) -> Result<(), Error> {
        Ok(())
    }

    fn pairs(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// Check that an integer option is strictly positive.
pub fn positive(name: &str, value: i64) -> Result<(), Error> {
    if value > 0 {
        Ok(())
    } else {
        Err(Error::invalid(name, value.to_string(), "must be greater than 0"))
    }
}
