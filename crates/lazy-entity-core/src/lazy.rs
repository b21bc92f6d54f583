// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Lazy attribute binding and the resolve-once state machine.
//!
//! # Lifecycle
//!
//! ```text
//!              first read                fetch + populate ok
//! Unresolved ─────────────▶ Resolving ─────────────────────▶ Resolved
//!      ▲                        │
//!      └────────────────────────┘
//!        error, cancellation or timeout
//! ```
//!
//! Binding never performs I/O. The first read of any field runs the whole
//! pipeline and caches every declared field. Concurrent readers of the same
//! instance queue on a per-instance gate and pick up the outcome of the
//! attempt they joined instead of issuing a second call; a failure is
//! handed to every joined reader and only later reads retry. Dropping the
//! resolving future resets the instance to `Unresolved`, so a later read
//! retries.

use std::{fmt, marker::PhantomData, ops::Deref, sync::Arc};

use parking_lot::Mutex;
use serde_json::{Map, Value};
use tracing::{Span, debug, field, instrument, trace, warn};

use crate::{
    client::Client,
    declaration::Entity,
    error::Error,
    meta::Meta,
    params::{Params, QueryParams},
    pipeline::{populate, prepare},
    record::{Listing, Record}
};

/// Observable resolution state of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Bound but not fetched.
    Unresolved,
    /// A resolution is in flight.
    Resolving,
    /// Fields are populated.
    Resolved
}

/// Populated data of a resolved entity.
///
/// Derefs to the typed data; [`Resolved::fields`] exposes the same values as
/// a declared-name mapping.
#[derive(Debug)]
pub struct Resolved<D> {
    data:   D,
    fields: Map<String, Value>
}

impl<D> Resolved<D> {
    /// Typed data.
    pub const fn data(&self) -> &D {
        &self.data
    }

    /// Declared fields by name.
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// One declared field, `None` if the payload left it absent.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

impl<D> Deref for Resolved<D> {
    type Target = D;

    fn deref(&self) -> &D {
        &self.data
    }
}

enum State<D> {
    Unresolved,
    Resolving,
    Resolved(Arc<Resolved<D>>)
}

/// Resolution state plus the outcome of the latest attempt.
///
/// `generation` advances every time an attempt ends. A reader that saw an
/// older generation before queueing on the gate joined that attempt and
/// takes its `failure` instead of calling again.
struct Slot<D> {
    state:      State<D>,
    generation: u64,
    failure:    Option<Error>
}

impl<D> Slot<D> {
    const fn new() -> Self {
        Self {
            state:      State::Unresolved,
            generation: 0,
            failure:    None
        }
    }
}

/// Marks an instance `Resolving` and rolls back to `Unresolved` unless
/// finished.
struct Attempt<'a, D> {
    slot: &'a Mutex<Slot<D>>,
    done: bool
}

impl<'a, D> Attempt<'a, D> {
    fn begin(slot: &'a Mutex<Slot<D>>) -> Self {
        slot.lock().state = State::Resolving;
        Self {
            slot,
            done: false
        }
    }

    fn finish(mut self, resolved: Resolved<D>) -> Arc<Resolved<D>> {
        let resolved = Arc::new(resolved);
        let mut slot = self.slot.lock();
        slot.state = State::Resolved(Arc::clone(&resolved));
        slot.generation += 1;
        slot.failure = None;
        self.done = true;
        resolved
    }

    fn fail(mut self, error: Error) -> Error {
        let mut slot = self.slot.lock();
        slot.state = State::Unresolved;
        slot.generation += 1;
        slot.failure = Some(error.clone());
        self.done = true;
        error
    }
}

impl<D> Drop for Attempt<'_, D> {
    fn drop(&mut self) {
        if !self.done {
            let mut slot = self.slot.lock();
            slot.state = State::Unresolved;
            slot.generation += 1;
            slot.failure = None;
        }
    }
}

/// An entity bound to path parameters, resolved on first read.
pub struct Lazy<E: Entity> {
    client:   Client,
    meta:     Arc<Meta>,
    params:   Params,
    query:    Vec<(&'static str, String)>,
    platform: Option<String>,
    slot:     Mutex<Slot<E::Data>>,
    gate:     tokio::sync::Mutex<()>,
    _entity:  PhantomData<fn() -> E>
}

impl<E: Entity> Lazy<E> {
    /// Bind path parameters without fetching.
    ///
    /// Registers `E` with the client on first use.
    ///
    /// # Errors
    ///
    /// - [`Error::AmbiguousRule`] if the declaration is malformed
    /// - [`Error::InvalidParameter`] if the client's default platform is
    ///   not accepted
    pub fn bind(client: &Client, params: Params) -> Result<Self, Error> {
        let meta = client.register::<E>()?;
        let platform = client.config().default_platform.clone();
        if let Some(platform) = &platform {
            client.config().check_platform(platform)?;
        }
        trace!(entity = E::NAME, params = ?params.names(), "bound");
        Ok(Self {
            client: client.clone(),
            meta,
            params,
            query: Vec::new(),
            platform,
            slot: Mutex::new(Slot::new()),
            gate: tokio::sync::Mutex::new(()),
            _entity: PhantomData
        })
    }

    /// Route this entity to another platform.
    ///
    /// A different platform is a different lookup, so any cached result is
    /// discarded.
    pub fn with_platform(mut self, platform: impl Into<String>) -> Result<Self, Error> {
        let platform = platform.into();
        self.client.config().check_platform(&platform)?;
        self.platform = Some(platform);
        self.slot = Mutex::new(Slot::new());
        Ok(self)
    }

    /// Attach optional query parameters.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedOperation`] if the declaration does not allow
    ///   queries, or the entity is already resolved
    /// - [`Error::InvalidParameter`] if an option is out of range; the
    ///   instance is left untouched
    pub fn with_query(&mut self, query: E::Query) -> Result<&mut Self, Error> {
        if !self.meta.allow_query() {
            return Err(Error::unsupported(E::NAME, "with_query"));
        }
        if self.phase() != Phase::Unresolved {
            return Err(Error::unsupported(E::NAME, "with_query after resolution"));
        }
        query.validate()?;
        self.query = query.pairs();
        Ok(self)
    }

    /// Current resolution state.
    pub fn phase(&self) -> Phase {
        match &self.slot.lock().state {
            State::Unresolved => Phase::Unresolved,
            State::Resolving => Phase::Resolving,
            State::Resolved(_) => Phase::Resolved
        }
    }

    /// Cached result, if resolved.
    pub fn cached(&self) -> Option<Arc<Resolved<E::Data>>> {
        match &self.slot.lock().state {
            State::Resolved(resolved) => Some(Arc::clone(resolved)),
            _ => None
        }
    }

    /// Resolve the entity, or return the cached result.
    ///
    /// At most one network call is made per instance at a time. Concurrent
    /// callers wait for the in-flight attempt and share its outcome, success
    /// or failure; only reads started after a failure call again.
    #[instrument(skip(self), fields(entity = E::NAME, endpoint = field::Empty))]
    pub async fn resolve(&self) -> Result<Arc<Resolved<E::Data>>, Error> {
        let seen = {
            let slot = self.slot.lock();
            if let State::Resolved(resolved) = &slot.state {
                return Ok(Arc::clone(resolved));
            }
            slot.generation
        };

        let _gate = self.gate.lock().await;
        {
            let slot = self.slot.lock();
            if let State::Resolved(resolved) = &slot.state {
                debug!("joined in-flight resolution");
                return Ok(Arc::clone(resolved));
            }
            if let Some(error) = slot.failure.as_ref().filter(|_| slot.generation != seen) {
                debug!(error = %error, "joined failed resolution");
                return Err(error.clone());
            }
        }

        let attempt = Attempt::begin(&self.slot);
        match self.run().await {
            Ok(resolved) => Ok(attempt.finish(resolved)),
            Err(error) => Err(attempt.fail(error))
        }
    }

    async fn run(&self) -> Result<Resolved<E::Data>, Error> {
        let request = prepare::<E>(
            &self.meta,
            &self.params,
            &self.query,
            self.platform.as_deref()
        )?;
        Span::current().record("endpoint", request.endpoint.as_str());

        let raw = self
            .client
            .fetcher()
            .fetch(&request)
            .await
            .map_err(|e| {
                warn!(error = %e, "transport failed");
                Error::Transport(e)
            })?;
        if self.client.config().trace_payloads {
            trace!(payload = %raw, "raw payload");
        }

        let populated = populate::<E>(&self.meta, &self.params, raw).map_err(|e| {
            warn!(error = %e, "payload rejected");
            e
        })?;
        debug!(fields = populated.fields.len(), "resolved");

        Ok(Resolved {
            data:   populated.data,
            fields: populated.fields
        })
    }

    /// Read one declared field, resolving first if needed.
    ///
    /// Absent optional fields read as `null`.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownField`] before any I/O if `name` is not declared.
    pub async fn field(&self, name: &str) -> Result<Value, Error> {
        if !E::Data::declares(name) {
            return Err(Error::UnknownField {
                entity: E::NAME,
                field:  name.to_string()
            });
        }
        let resolved = self.resolve().await?;
        Ok(resolved.field(name).cloned().unwrap_or(Value::Null))
    }

    /// Bind a related entity on the same client and platform.
    ///
    /// The result is an independent lookup, never a back-reference.
    pub fn related<T: Entity>(&self, params: Params) -> Result<Lazy<T>, Error> {
        let related = Lazy::<T>::bind(&self.client, params)?;
        match &self.platform {
            Some(platform) => related.with_platform(platform.clone()),
            None => Ok(related)
        }
    }

    /// Bound path parameters.
    pub const fn params(&self) -> &Params {
        &self.params
    }

    /// Accepted query parameters, by declared name.
    pub fn query(&self) -> &[(&'static str, String)] {
        &self.query
    }

    /// Routing platform.
    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    /// Resolved meta of the declaration.
    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    /// Client the entity was bound through.
    pub const fn client(&self) -> &Client {
        &self.client
    }
}

impl<E> Lazy<E>
where
    E: Entity,
    E::Data: Listing
{
    /// Number of entries, resolving first if needed.
    pub async fn len(&self) -> Result<usize, Error> {
        Ok(self.resolve().await?.data().len())
    }

    /// Check if there are no entries, resolving first if needed.
    pub async fn is_empty(&self) -> Result<bool, Error> {
        Ok(self.resolve().await?.data().is_empty())
    }

    /// Entry at `index`, resolving first if needed.
    pub async fn entry(&self, index: usize) -> Result<Option<<E::Data as Listing>::Item>, Error>
    where
        <E::Data as Listing>::Item: Clone
    {
        Ok(self.resolve().await?.data().get(index).cloned())
    }
}

impl<E: Entity> fmt::Debug for Lazy<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lazy")
            .field("entity", &E::NAME)
            .field("params", &self.params)
            .field("query", &self.query)
            .field("platform", &self.platform)
            .field("phase", &self.phase())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::{
        declaration::{Declaration, wrap_list},
        error::Mismatch,
        fetch::MemoryFetch,
        meta::{MetaDelta, Rules},
        params::{NoQuery, positive},
        record::{Decode, decode_record}
    };

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: String
    }

    impl Record for Row {
        const FIELDS: &'static [&'static str] = &["name"];

        fn from_payload(map: &Map<String, Value>) -> Result<Self, Mismatch> {
            Ok(Self {
                name: Decode::decode(map.get("name")).map_err(|e: Mismatch| e.at("name"))?
            })
        }
    }

    impl Decode for Row {
        fn decode(value: Option<&Value>) -> Result<Self, Mismatch> {
            decode_record(value)
        }
    }

    #[derive(Debug)]
    struct Table {
        rows: Vec<Row>
    }

    impl Record for Table {
        const FIELDS: &'static [&'static str] = &["rows"];

        fn from_payload(map: &Map<String, Value>) -> Result<Self, Mismatch> {
            Ok(Self {
                rows: Decode::decode(map.get("rows")).map_err(|e: Mismatch| e.at("rows"))?
            })
        }
    }

    impl Listing for Table {
        type Item = Row;

        fn entries(&self) -> &[Row] {
            &self.rows
        }
    }

    struct Page(Option<i64>);

    impl QueryParams for Page {
        fn validate(&self) -> Result<(), Error> {
            self.0.map_or(Ok(()), |p| positive("page", p))
        }

        fn pairs(&self) -> Vec<(&'static str, String)> {
            self.0.map(|p| ("page", p.to_string())).into_iter().collect()
        }
    }

    struct Rows;

    impl Declaration for Rows {
        const NAME: &'static str = "Rows";

        fn delta() -> MetaDelta {
            MetaDelta::new()
                .rules(Rules::new().rule("rows_by_table", ["table"]))
                .allow_query(true)
        }

        fn reshape(payload: Value) -> Result<Value, Error> {
            Ok(wrap_list("rows", payload))
        }
    }

    impl Entity for Rows {
        type Data = Table;
        type Query = Page;
    }

    struct Single;

    impl Declaration for Single {
        const NAME: &'static str = "Single";

        fn delta() -> MetaDelta {
            MetaDelta::new().rules(Rules::new().rule("row_by_id", ["id"]))
        }
    }

    impl Entity for Single {
        type Data = Row;
        type Query = NoQuery;
    }

    fn rows_fetch() -> MemoryFetch {
        MemoryFetch::new().respond(
            "rows_by_table",
            &["t1"],
            json!([{"name": "a"}, {"name": "b"}, {"name": "c"}])
        )
    }

    #[tokio::test]
    async fn binding_is_lazy_and_reads_cache() {
        let fetch = Arc::new(rows_fetch());
        let client = Client::new(Arc::clone(&fetch));
        let rows = Lazy::<Rows>::bind(&client, Params::new().with("table", "t1")).unwrap();
        assert_eq!(rows.phase(), Phase::Unresolved);
        assert_eq!(fetch.calls(), 0);

        assert_eq!(rows.len().await.unwrap(), 3);
        assert_eq!(rows.entry(1).await.unwrap().map(|r| r.name), Some("b".to_string()));
        let first = rows.field("rows").await.unwrap();
        let second = rows.field("rows").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(rows.phase(), Phase::Resolved);
        assert_eq!(fetch.calls(), 1);
    }

    #[tokio::test]
    async fn unknown_field_fails_without_io() {
        let fetch = Arc::new(rows_fetch());
        let client = Client::new(Arc::clone(&fetch));
        let rows = Lazy::<Rows>::bind(&client, Params::new().with("table", "t1")).unwrap();
        let err = rows.field("columns").await.unwrap_err();
        assert!(err.is_unknown_field());
        assert_eq!(fetch.calls(), 0);
        assert_eq!(rows.phase(), Phase::Unresolved);
    }

    #[tokio::test]
    async fn concurrent_reads_share_one_call() {
        let fetch = Arc::new(rows_fetch().with_delay(Duration::from_millis(20)));
        let client = Client::new(Arc::clone(&fetch));
        let rows = Lazy::<Rows>::bind(&client, Params::new().with("table", "t1")).unwrap();

        let results = futures::future::join_all((0..8).map(|_| rows.resolve())).await;
        let first = results[0].as_ref().unwrap();
        for result in &results {
            assert!(Arc::ptr_eq(first, result.as_ref().unwrap()));
        }
        assert_eq!(fetch.calls(), 1);
    }

    #[tokio::test]
    async fn concurrent_reads_share_one_failure() {
        let fetch = Arc::new(
            MemoryFetch::new()
                .fail("row_by_id", &["x"], Some(503), "unavailable")
                .with_delay(Duration::from_millis(20))
        );
        let client = Client::new(Arc::clone(&fetch));
        let single = Lazy::<Single>::bind(&client, Params::new().with("id", "x")).unwrap();

        let results = futures::future::join_all((0..4).map(|_| single.resolve())).await;
        for result in &results {
            let err = result.as_ref().unwrap_err();
            assert!(err.is_transport());
            assert_eq!(err.to_string(), "transport error: unavailable (status 503)");
        }
        assert_eq!(fetch.calls(), 1);
        assert_eq!(single.phase(), Phase::Unresolved);

        assert!(single.resolve().await.unwrap_err().is_transport());
        assert_eq!(fetch.calls(), 2);
    }

    #[tokio::test]
    async fn cancellation_leaves_instance_retryable() {
        let fetch = Arc::new(rows_fetch().with_delay(Duration::from_millis(50)));
        let client = Client::new(Arc::clone(&fetch));
        let rows = Lazy::<Rows>::bind(&client, Params::new().with("table", "t1")).unwrap();

        let timed_out = tokio::time::timeout(Duration::from_millis(5), rows.resolve()).await;
        assert!(timed_out.is_err());
        assert_eq!(rows.phase(), Phase::Unresolved);

        assert_eq!(rows.len().await.unwrap(), 3);
        assert_eq!(fetch.calls(), 2);
    }

    #[tokio::test]
    async fn transport_failure_leaves_instance_unresolved() {
        let fetch = Arc::new(MemoryFetch::new().fail("row_by_id", &["x"], Some(500), "boom"));
        let client = Client::new(Arc::clone(&fetch));
        let single = Lazy::<Single>::bind(&client, Params::new().with("id", "x")).unwrap();
        assert!(single.resolve().await.unwrap_err().is_transport());
        assert_eq!(single.phase(), Phase::Unresolved);
        assert!(single.resolve().await.is_err());
        assert_eq!(fetch.calls(), 2);
    }

    #[tokio::test]
    async fn rule_errors_fail_before_io() {
        let fetch = Arc::new(rows_fetch());
        let client = Client::new(Arc::clone(&fetch));
        let rows = Lazy::<Rows>::bind(&client, Params::new()).unwrap();
        assert!(rows.resolve().await.unwrap_err().is_rule());
        assert_eq!(fetch.calls(), 0);
    }

    #[tokio::test]
    async fn query_is_validated_and_forwarded() {
        let fetch = Arc::new(rows_fetch());
        let client = Client::new(Arc::clone(&fetch));
        let mut rows = Lazy::<Rows>::bind(&client, Params::new().with("table", "t1")).unwrap();

        let err = rows.with_query(Page(Some(0))).unwrap_err();
        assert!(err.is_invalid_parameter());
        assert!(rows.query().is_empty());
        assert_eq!(rows.phase(), Phase::Unresolved);

        rows.with_query(Page(Some(2))).unwrap();
        rows.resolve().await.unwrap();
        let requests = fetch.requests();
        assert_eq!(requests[0].query.get("page").map(String::as_str), Some("2"));

        let err = rows.with_query(Page(Some(3))).unwrap_err();
        assert!(err.is_unsupported());
    }

    #[test]
    fn query_requires_allow_query() {
        let client = Client::new(MemoryFetch::new());
        let mut single = Lazy::<Single>::bind(&client, Params::new().with("id", "x")).unwrap();
        assert!(single.with_query(NoQuery).unwrap_err().is_unsupported());
    }

    #[tokio::test]
    async fn platform_routing() {
        let fetch = Arc::new(MemoryFetch::new().respond("row_by_id", &["x"], json!({"name": "n"})));
        let config = crate::config::ClientConfig::new()
            .default_platform("na1")
            .platforms(["na1", "kr"]);
        let client = Client::with_config(Arc::clone(&fetch), config);

        let single = Lazy::<Single>::bind(&client, Params::new().with("id", "x")).unwrap();
        assert_eq!(single.platform(), Some("na1"));
        assert!(
            Lazy::<Single>::bind(&client, Params::new().with("id", "x"))
                .unwrap()
                .with_platform("euw1")
                .unwrap_err()
                .is_invalid_parameter()
        );

        let single = single.with_platform("kr").unwrap();
        single.resolve().await.unwrap();
        let related = single.related::<Single>(Params::new().with("id", "y")).unwrap();
        assert_eq!(related.platform(), Some("kr"));
        assert_eq!(fetch.requests()[0].platform.as_deref(), Some("kr"));
    }
}
