// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Client handle and declaration registry.
//!
//! A [`Client`] owns the networking collaborator, the configuration and the
//! resolved [`Meta`] of every declaration bound through it. Registration
//! folds the ancestor chain once and rejects rule sets where two endpoints
//! share a parameter set, so a malformed declaration fails on first use
//! instead of on some later lookup.

use std::{any::TypeId, collections::HashMap, fmt, sync::Arc};

use parking_lot::RwLock;
use tracing::debug;

use crate::{
    config::ClientConfig,
    declaration::{Declaration, Entity},
    error::Error,
    fetch::Fetch,
    lazy::Lazy,
    meta::Meta,
    params::Params
};

struct Inner {
    fetch:    Arc<dyn Fetch>,
    config:   ClientConfig,
    registry: RwLock<HashMap<TypeId, Arc<Meta>>>
}

/// Shared entry point for binding entities.
///
/// Cloning is cheap; clones share the transport and the registry.
///
/// # Example
///
/// ```rust,ignore
/// let client = Client::with_config(transport, ClientConfig::new().default_platform("na1"));
/// let league = ChallengerLeague::new(&client, Some("RANKED_SOLO_5x5"))?;
/// let top = league.resolve().await?;
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<Inner>
}

impl Client {
    /// Create a client with the default configuration.
    pub fn new(fetch: impl Fetch + 'static) -> Self {
        Self::with_config(fetch, ClientConfig::default())
    }

    /// Create a client with an explicit configuration.
    pub fn with_config(fetch: impl Fetch + 'static, config: ClientConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                fetch: Arc::new(fetch),
                config,
                registry: RwLock::new(HashMap::new())
            })
        }
    }

    /// Client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Resolve and validate the meta of a declaration, caching the result.
    ///
    /// # Errors
    ///
    /// [`Error::AmbiguousRule`] if two rules require the same parameter set.
    pub fn register<D: Declaration>(&self) -> Result<Arc<Meta>, Error> {
        let id = TypeId::of::<D>();
        if let Some(meta) = self.inner.registry.read().get(&id) {
            return Ok(Arc::clone(meta));
        }

        let meta = Meta::from_chain(&D::ancestry());
        meta.check(D::NAME)?;
        debug!(entity = D::NAME, rules = meta.rules().len(), "declaration registered");

        let meta = Arc::new(meta);
        Ok(Arc::clone(
            self.inner.registry.write().entry(id).or_insert(meta)
        ))
    }

    /// Bind path parameters to a new unresolved entity.
    pub fn bind<E: Entity>(&self, params: Params) -> Result<Lazy<E>, Error> {
        Lazy::bind(self, params)
    }

    pub(crate) fn fetcher(&self) -> &dyn Fetch {
        self.inner.fetch.as_ref()
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.inner.config)
            .field("registered", &self.inner.registry.read().len())
            .finish_non_exhaustive()
    }
}
