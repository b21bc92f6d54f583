// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error types for entity construction and resolution.
//!
//! Every failure the engine can report is a variant of [`Error`]. Transport
//! failures are carried verbatim as [`TransportError`], and payload decoding
//! failures start life as a [`Mismatch`] with a field path before being
//! lifted into [`Error::SchemaMismatch`].

use std::{fmt, sync::Arc};

type SharedError = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Failure reported by the networking collaborator.
///
/// The engine never retries on its own; this value is surfaced to the caller
/// unchanged. Clones share the underlying cause.
#[derive(Debug, Clone)]
pub struct TransportError {
    status:  Option<u16>,
    message: String,
    source:  Option<SharedError>
}

impl TransportError {
    /// Create a transport error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status:  None,
            message: message.into(),
            source:  None
        }
    }

    /// Create a transport error for a response status code.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status:  Some(status),
            message: message.into(),
            source:  None
        }
    }

    /// Attach the underlying cause.
    #[must_use]
    pub fn with_source(
        mut self,
        source: impl std::error::Error + Send + Sync + 'static
    ) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    /// Status code reported by the remote service, if any.
    pub const fn status_code(&self) -> Option<u16> {
        self.status
    }

    /// Human readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (status {})", self.message, status),
            None => write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Payload shape error raised while decoding a record.
///
/// `path` is built from the innermost failure outwards, so a failure in
/// `entries[3].mini_series.wins` reads naturally once rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    path:     Vec<String>,
    expected: &'static str,
    found:    String
}

impl Mismatch {
    /// Create a mismatch for a value of the wrong shape.
    pub fn new(expected: &'static str, found: impl Into<String>) -> Self {
        Self {
            path: Vec::new(),
            expected,
            found: found.into()
        }
    }

    /// Prefix the path with a field name.
    #[must_use]
    pub fn at(mut self, field: &str) -> Self {
        self.path.insert(0, field.to_string());
        self
    }

    /// Prefix the path with a sequence index.
    #[must_use]
    pub fn at_index(mut self, index: usize) -> Self {
        match self.path.first_mut() {
            Some(first) if first.starts_with('[') => first.insert_str(0, &format!("[{}]", index)),
            _ => self.path.insert(0, format!("[{}]", index))
        }
        self
    }

    /// Rendered field path, e.g. `entries[2].mini_series.wins`.
    pub fn path(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            if !out.is_empty() && !segment.starts_with('[') {
                out.push('.');
            }
            out.push_str(segment);
        }
        out
    }

    /// Expected type name.
    pub const fn expected(&self) -> &'static str {
        self.expected
    }

    /// Short description of what was actually found.
    pub fn found(&self) -> &str {
        &self.found
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path();
        if path.is_empty() {
            write!(f, "expected {}, found {}", self.expected, self.found)
        } else {
            write!(f, "`{}`: expected {}, found {}", path, self.expected, self.found)
        }
    }
}

impl std::error::Error for Mismatch {}

/// Error type for all entity operations.
///
/// Cloneable so readers that joined a failed resolution all receive it.
#[derive(Debug, Clone)]
pub enum Error {
    /// A path or query parameter failed its validation set or range check.
    InvalidParameter {
        /// Parameter name.
        name:   String,
        /// Offending value.
        value:  String,
        /// Why the value was rejected.
        reason: String
    },

    /// The bound parameters match no declared rule.
    NoMatchingRule {
        /// Entity declaration name.
        entity: &'static str,
        /// Names of the bound path parameters.
        bound:  Vec<String>
    },

    /// More than one rule matches the same parameter set.
    ///
    /// Always a declaration defect.
    AmbiguousRule {
        /// Entity declaration name.
        entity:    &'static str,
        /// Endpoint keys sharing the parameter set.
        endpoints: Vec<String>
    },

    /// Read of a field the entity does not declare.
    UnknownField {
        /// Entity declaration name.
        entity: &'static str,
        /// Requested field.
        field:  String
    },

    /// An optional capability is not available on this entity.
    UnsupportedOperation {
        /// Entity declaration name.
        entity:    &'static str,
        /// Operation that was attempted.
        operation: &'static str
    },

    /// The transformed payload does not fit the declared fields.
    SchemaMismatch {
        /// Entity declaration name.
        entity:   &'static str,
        /// Decode failure with field path.
        mismatch: Mismatch
    },

    /// Failure reported by the networking collaborator.
    Transport(TransportError)
}

impl Error {
    /// Shorthand for [`Error::InvalidParameter`].
    pub fn invalid(
        name: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>
    ) -> Self {
        Self::InvalidParameter {
            name:   name.into(),
            value:  value.into(),
            reason: reason.into()
        }
    }

    /// Shorthand for [`Error::UnsupportedOperation`].
    pub const fn unsupported(entity: &'static str, operation: &'static str) -> Self {
        Self::UnsupportedOperation {
            entity,
            operation
        }
    }

    /// Check if this is a parameter validation error.
    pub const fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }

    /// Check if this is a rule selection error (no match or ambiguous).
    pub const fn is_rule(&self) -> bool {
        matches!(self, Self::NoMatchingRule { .. } | Self::AmbiguousRule { .. })
    }

    /// Check if this is an unknown field error.
    pub const fn is_unknown_field(&self) -> bool {
        matches!(self, Self::UnknownField { .. })
    }

    /// Check if this is an unsupported operation error.
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedOperation { .. })
    }

    /// Check if this is a schema mismatch error.
    pub const fn is_schema_mismatch(&self) -> bool {
        matches!(self, Self::SchemaMismatch { .. })
    }

    /// Check if this is a transport error.
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if the error points at the declaration rather than the input.
    ///
    /// Declaration defects should be fixed in code, never retried.
    pub const fn is_declaration_defect(&self) -> bool {
        matches!(self, Self::AmbiguousRule { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                name,
                value,
                reason
            } => write!(f, "invalid parameter `{}` = '{}': {}", name, value, reason),
            Self::NoMatchingRule {
                entity,
                bound
            } => write!(f, "no rule of {} matches parameters [{}]", entity, bound.join(", ")),
            Self::AmbiguousRule {
                entity,
                endpoints
            } => write!(
                f,
                "ambiguous rules on {}: [{}] share one parameter set",
                entity,
                endpoints.join(", ")
            ),
            Self::UnknownField {
                entity,
                field
            } => write!(f, "{} has no field `{}`", entity, field),
            Self::UnsupportedOperation {
                entity,
                operation
            } => write!(f, "{} does not support `{}`", entity, operation),
            Self::SchemaMismatch {
                entity,
                mismatch
            } => write!(f, "schema mismatch in {}: {}", entity, mismatch),
            Self::Transport(e) => write!(f, "transport error: {}", e)
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SchemaMismatch {
                mismatch, ..
            } => Some(mismatch),
            Self::Transport(e) => Some(e),
            _ => None
        }
    }
}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        Self::Transport(err)
    }
}
