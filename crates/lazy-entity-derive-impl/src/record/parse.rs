// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Record attribute parsing.

use std::collections::HashMap;

use darling::{FromDeriveInput, FromField, ast::Data, util::Ignored};
use syn::{DeriveInput, Generics, Ident, Type, ext::IdentExt};

#[derive(Debug, FromField)]
struct FieldAttrs {
    ident: Option<Ident>,
    ty:    Type
}

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(record), supports(struct_named))]
struct RecordAttrs {
    ident:    Ident,
    generics: Generics,
    data:     Data<Ignored, FieldAttrs>,
    #[darling(default)]
    renamed:  HashMap<String, String>
}

/// One record field.
#[derive(Debug)]
pub struct RecordField {
    /// Field identifier as written.
    pub ident: Ident,
    /// Field name without the raw prefix.
    pub name:  String,
    /// Field type.
    pub ty:    Type
}

/// Parsed `#[derive(Record)]` input.
#[derive(Debug)]
pub struct RecordDef {
    /// Struct identifier.
    pub ident:    Ident,
    /// Struct generics.
    pub generics: Generics,
    /// Fields in declaration order.
    pub fields:   Vec<RecordField>,
    /// Renames sorted by wire name.
    pub renamed:  Vec<(String, String)>
}

impl RecordDef {
    /// Parse a record definition.
    ///
    /// # Errors
    ///
    /// Attribute syntax errors, non-struct inputs and renames targeting a
    /// field the struct does not declare.
    pub fn from_derive_input(input: &DeriveInput) -> darling::Result<Self> {
        let attrs = RecordAttrs::from_derive_input(input)?;
        let mut errors = darling::Error::accumulator();

        let fields: Vec<RecordField> = attrs
            .data
            .take_struct()
            .map(|fields| fields.fields)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|field| {
                let ident = field.ident?;
                Some(RecordField {
                    name: ident.unraw().to_string(),
                    ident,
                    ty: field.ty
                })
            })
            .collect();

        let mut renamed: Vec<_> = attrs.renamed.into_iter().collect();
        renamed.sort();
        for (wire, declared) in &renamed {
            if !fields.iter().any(|field| &field.name == declared) {
                errors.push(
                    darling::Error::custom(format!(
                        "`{}` is renamed to `{}`, which is not a field",
                        wire, declared
                    ))
                    .with_span(&attrs.ident)
                );
            }
        }

        errors.finish_with(Self {
            ident: attrs.ident,
            generics: attrs.generics,
            fields,
            renamed
        })
    }
}
