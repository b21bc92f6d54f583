// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Client configuration.
//!
//! [`ClientConfig`] deserializes from any serde format with every field
//! optional, so a host can embed it in its own settings file:
//!
//! ```toml
//! [entities]
//! default_platform = "na1"
//! platforms = ["na1", "euw1", "kr"]
//! trace_payloads = false
//! ```

use serde::Deserialize;

use crate::error::Error;

/// Settings shared by every entity bound through one client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Platform used when an entity is bound without one.
    pub default_platform: Option<String>,

    /// Accepted platforms. Empty accepts any.
    pub platforms: Vec<String>,

    /// Log raw payloads at `TRACE` level.
    pub trace_payloads: bool
}

impl ClientConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default platform.
    #[must_use]
    pub fn default_platform(mut self, platform: impl Into<String>) -> Self {
        self.default_platform = Some(platform.into());
        self
    }

    /// Restrict accepted platforms.
    #[must_use]
    pub fn platforms<I, S>(mut self, platforms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>
    {
        self.platforms = platforms.into_iter().map(Into::into).collect();
        self
    }

    /// Toggle raw payload tracing.
    #[must_use]
    pub const fn trace_payloads(mut self, on: bool) -> Self {
        self.trace_payloads = on;
        self
    }

    /// Check a platform against the accepted list.
    pub fn check_platform(&self, platform: &str) -> Result<(), Error> {
        if self.platforms.is_empty() || self.platforms.iter().any(|p| p == platform) {
            Ok(())
        } else {
            Err(Error::invalid(
                "platform",
                platform,
                format!("expected one of [{}]", self.platforms.join(", "))
            ))
        }
    }
}
