// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Networking collaborator seam.
//!
//! The engine only knows [`Fetch`]: one call per resolution, returning a raw
//! payload or a [`TransportError`]. HTTP, retries, caching and rate limiting
//! all live behind it.
//!
//! [`MemoryFetch`] is an in-memory implementation with canned responses,
//! used by the test suite and handy for offline hosts.

use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::{error::TransportError, pipeline::Request};

/// Networking collaborator called once per resolution.
///
/// # Example
///
/// ```rust,ignore
/// struct Http(reqwest::Client);
///
/// #[async_trait]
/// impl Fetch for Http {
///     async fn fetch(&self, request: &Request) -> Result<Value, TransportError> {
///         let url = routes::url(&request.endpoint, request.platform.as_deref(), &request.path)?;
///         // ...
///     }
/// }
/// ```
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Perform the call described by `request`.
    async fn fetch(&self, request: &Request) -> Result<Value, TransportError>;
}

#[async_trait]
impl<F: Fetch + ?Sized> Fetch for Arc<F> {
    async fn fetch(&self, request: &Request) -> Result<Value, TransportError> {
        (**self).fetch(request).await
    }
}

#[derive(Debug, Clone)]
enum Canned {
    Payload(Value),
    Failure {
        status:  Option<u16>,
        message: String
    }
}

type Key = (String, Vec<String>);

/// In-memory transport serving canned payloads by endpoint and path.
///
/// Every call is recorded, including calls that fail or are cancelled
/// during the configured delay.
#[derive(Debug, Default)]
pub struct MemoryFetch {
    canned:   HashMap<Key, Canned>,
    requests: Mutex<Vec<Request>>,
    delay:    Option<Duration>
}

impl MemoryFetch {
    /// Create a transport with no canned responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `payload` for `endpoint` called with `path`.
    #[must_use]
    pub fn respond(mut self, endpoint: &str, path: &[&str], payload: Value) -> Self {
        self.canned
            .insert(key(endpoint, path), Canned::Payload(payload));
        self
    }

    /// Fail calls to `endpoint` with `path`.
    #[must_use]
    pub fn fail(
        mut self,
        endpoint: &str,
        path: &[&str],
        status: Option<u16>,
        message: impl Into<String>
    ) -> Self {
        self.canned.insert(
            key(endpoint, path),
            Canned::Failure {
                status,
                message: message.into()
            }
        );
        self
    }

    /// Wait this long before answering each call.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of calls received so far.
    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }

    /// Copies of every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().clone()
    }
}

fn key(endpoint: &str, path: &[&str]) -> Key {
    (
        endpoint.to_string(),
        path.iter().map(|p| (*p).to_string()).collect()
    )
}

#[async_trait]
impl Fetch for MemoryFetch {
    async fn fetch(&self, request: &Request) -> Result<Value, TransportError> {
        self.requests.lock().push(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self
            .canned
            .get(&(request.endpoint.clone(), request.path.clone()))
        {
            Some(Canned::Payload(payload)) => Ok(payload.clone()),
            Some(Canned::Failure {
                status: Some(status),
                message
            }) => Err(TransportError::status(*status, message.clone())),
            Some(Canned::Failure {
                status: None,
                message
            }) => Err(TransportError::new(message.clone())),
            None => Err(TransportError::status(
                404,
                format!("no response for {} {:?}", request.endpoint, request.path)
            ))
        }
    }
}
