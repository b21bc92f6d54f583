// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity-level attribute parsing.
//!
//! [`EntityAttrs`] is the raw darling view of `#[entity(...)]`;
//! [`EntityDef`] is the checked definition consumed by the generators.
//!
//! # Supported Attributes
//!
//! | Attribute | Required | Default | Description |
//! |-----------|----------|---------|-------------|
//! | `record` | Unless `parent` | parent's record | Record type populated on resolution |
//! | `parent` | No | none | Declaration inherited from |
//! | `query` | No | parent's, else `NoQuery` | Query parameter type |
//! | `rule(endpoint, params(..))` | No | inherited | Endpoint rule, repeatable |
//! | `renamed(wire = "field")` | No | inherited | Field renames |
//! | `validate(param(..))` | No | inherited | Allowed values per param |
//! | `allow_query` | No | inherited | Accept query params |
//! | `clean` | No | parent's | Parameter check hook |
//! | `reshape` | No | parent's | Payload reshape hook |
//! | `params(..)` | No | none | Arguments of the generated `new` |

mod list;

use std::collections::{BTreeSet, HashMap};

use darling::FromDeriveInput;
use syn::{DeriveInput, Ident, Path, Visibility};

pub use self::list::{RuleDef, StrList};

/// Raw `#[entity(...)]` attributes as parsed by darling.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(entity), supports(struct_unit))]
pub struct EntityAttrs {
    /// Struct identifier.
    pub ident: Ident,

    /// Struct visibility, reused for the constructor.
    pub vis: Visibility,

    /// Record type populated on resolution.
    #[darling(default)]
    pub record: Option<Path>,

    /// Declaration this one inherits from.
    #[darling(default)]
    pub parent: Option<Path>,

    /// Query parameter type.
    #[darling(default)]
    pub query: Option<Path>,

    /// Endpoint rules, in declaration order.
    #[darling(multiple, rename = "rule")]
    pub rules: Vec<RuleDef>,

    /// Wire field name to record field name.
    #[darling(default)]
    pub renamed: HashMap<String, String>,

    /// Allowed values per parameter.
    #[darling(default)]
    pub validate: HashMap<String, StrList>,

    /// Whether query params are accepted.
    #[darling(default)]
    pub allow_query: Option<bool>,

    /// Parameter check hook overriding the inherited one.
    #[darling(default)]
    pub clean: Option<Path>,

    /// Payload reshape hook overriding the inherited one.
    #[darling(default)]
    pub reshape: Option<Path>,

    /// Constructor arguments.
    #[darling(default)]
    pub params: StrList
}

/// Checked entity definition.
#[derive(Debug)]
pub struct EntityDef {
    /// Struct identifier.
    pub ident:       Ident,
    /// Struct visibility.
    pub vis:         Visibility,
    /// Explicit record type.
    pub record:      Option<Path>,
    /// Parent declaration.
    pub parent:      Option<Path>,
    /// Explicit query type.
    pub query:       Option<Path>,
    /// Rules in declaration order.
    pub rules:       Vec<RuleDef>,
    /// Renames sorted by wire name.
    pub renamed:     Vec<(String, String)>,
    /// Validation sets sorted by parameter.
    pub validate:    Vec<(String, Vec<String>)>,
    /// Explicit `allow_query` setting.
    pub allow_query: Option<bool>,
    /// Parameter check hook.
    pub clean:       Option<Path>,
    /// Payload reshape hook.
    pub reshape:     Option<Path>,
    /// Constructor arguments with their identifiers.
    pub params:      Vec<(String, Ident)>
}

impl EntityDef {
    /// Parse and check an entity definition.
    ///
    /// # Errors
    ///
    /// - attribute syntax errors reported by darling
    /// - neither `record` nor `parent` given
    /// - two rules with the same endpoint or the same parameter set
    /// - a rule listing one parameter twice
    /// - constructor arguments that are not identifiers or repeat
    pub fn from_derive_input(input: &DeriveInput) -> darling::Result<Self> {
        let attrs = EntityAttrs::from_derive_input(input)?;
        let mut errors = darling::Error::accumulator();

        if attrs.record.is_none() && attrs.parent.is_none() {
            errors.push(
                darling::Error::custom("Entity requires `record = \"..\"` or `parent = \"..\"`")
                    .with_span(&attrs.ident)
            );
        }

        for (index, rule) in attrs.rules.iter().enumerate() {
            let earlier = &attrs.rules[..index];
            if earlier.iter().any(|other| other.endpoint == rule.endpoint) {
                errors.push(
                    darling::Error::custom(format!("rule `{}` declared twice", rule.endpoint))
                        .with_span(&attrs.ident)
                );
                continue;
            }
            if let Some(name) = rule.repeated_param() {
                errors.push(
                    darling::Error::custom(format!(
                        "rule `{}` lists parameter `{}` twice",
                        rule.endpoint, name
                    ))
                    .with_span(&attrs.ident)
                );
            }
            let set = rule.param_set();
            if let Some(other) = earlier
                .iter()
                .find(|other| other.param_set() == set)
            {
                errors.push(
                    darling::Error::custom(format!(
                        "rules `{}` and `{}` require the same parameters",
                        other.endpoint, rule.endpoint
                    ))
                    .with_span(&attrs.ident)
                );
            }
        }

        let mut seen = BTreeSet::new();
        let mut params = Vec::with_capacity(attrs.params.len());
        for name in attrs.params.iter() {
            if !seen.insert(name.as_str()) {
                errors.push(
                    darling::Error::custom(format!("parameter `{}` listed twice", name))
                        .with_span(&attrs.ident)
                );
                continue;
            }
            match syn::parse_str::<Ident>(name) {
                Ok(ident) => params.push((name.clone(), ident)),
                Err(_) => errors.push(
                    darling::Error::custom(format!("parameter `{}` is not an identifier", name))
                        .with_span(&attrs.ident)
                )
            }
        }

        let mut renamed: Vec<_> = attrs.renamed.into_iter().collect();
        renamed.sort();
        let mut validate: Vec<_> = attrs
            .validate
            .into_iter()
            .map(|(field, allowed)| (field, allowed.into_inner()))
            .collect();
        validate.sort();

        errors.finish_with(Self {
            ident: attrs.ident,
            vis: attrs.vis,
            record: attrs.record,
            parent: attrs.parent,
            query: attrs.query,
            rules: attrs.rules,
            renamed,
            validate,
            allow_query: attrs.allow_query,
            clean: attrs.clean,
            reshape: attrs.reshape,
            params
        })
    }
}
