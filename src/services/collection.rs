// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Server-paginated resource collections with cache reconciliation.
//!
//! Projects and tickets share one shape: fetch a page for a query, cache it
//! together with the query, and reconcile the cache after every write.
//! Pagination, filtering, and sorting are authoritative on the server; the
//! cache is only ever a copy of the last page it sent us.

use crate::error::Result;
use crate::models::{
    NewProject, NewTicket, PagedResult, Project, ProjectPatch, QuerySpec, Ticket, TicketPatch,
};
use crate::services::api;
use crate::services::session::SessionStore;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

/// A record type managed by a [`ResourceCollection`].
pub trait Resource:
    Clone + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Collection root path, e.g. `/tickets`.
    const PATH: &'static str;
    /// Singular name for log lines.
    const NAME: &'static str;

    /// Creation payload.
    type Create: Serialize + Send + Sync;
    /// Partial-update payload.
    type Update: Serialize + Send + Sync;

    /// Server-assigned record ID.
    fn id(&self) -> i64;

    /// Listing defaults for this resource.
    fn default_query() -> QuerySpec;
}

impl Resource for Project {
    const PATH: &'static str = "/projects";
    const NAME: &'static str = "project";

    type Create = NewProject;
    type Update = ProjectPatch;

    fn id(&self) -> i64 {
        self.id
    }

    fn default_query() -> QuerySpec {
        QuerySpec::projects()
    }
}

impl Resource for Ticket {
    const PATH: &'static str = "/tickets";
    const NAME: &'static str = "ticket";

    type Create = NewTicket;
    type Update = TicketPatch;

    fn id(&self) -> i64 {
        self.id
    }

    fn default_query() -> QuerySpec {
        QuerySpec::tickets()
    }
}

struct CollectionState<R> {
    page: PagedResult<R>,
    last_query: QuerySpec,
}

/// One paginated collection backed by the session's request primitive.
///
/// Cheap to clone; clones share the same cache.
#[derive(Clone)]
pub struct ResourceCollection<R: Resource> {
    session: Arc<SessionStore>,
    state: Arc<RwLock<CollectionState<R>>>,
}

/// The projects collection.
pub type ProjectCollection = ResourceCollection<Project>;

/// The tickets collection.
pub type TicketCollection = ResourceCollection<Ticket>;

impl<R: Resource> ResourceCollection<R> {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self {
            session,
            state: Arc::new(RwLock::new(CollectionState {
                page: PagedResult::default(),
                last_query: R::default_query(),
            })),
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────────

    /// Snapshot of the cached page.
    pub fn snapshot(&self) -> PagedResult<R> {
        self.read_state(|st| st.page.clone())
    }

    /// Records on the cached page.
    pub fn items(&self) -> Vec<R> {
        self.read_state(|st| st.page.items.clone())
    }

    /// Server-reported total across all pages of the last query.
    pub fn total(&self) -> u64 {
        self.read_state(|st| st.page.total)
    }

    /// The query the cached page was (or is being) fetched with.
    pub fn last_query(&self) -> QuerySpec {
        self.read_state(|st| st.last_query.clone())
    }

    /// Drop the cached page and return to the listing defaults.
    pub fn clear(&self) {
        self.with_state(|st| {
            st.page = PagedResult::default();
            st.last_query = R::default_query();
        });
    }

    // ─── Operations ──────────────────────────────────────────────────────────

    /// Fetch the page selected by `query` and replace the cache wholesale.
    ///
    /// Starting a fetch drops any stale error banner. A 401 that survives
    /// the refresh retry ends the session here; no other collection call
    /// forces a logout.
    pub async fn fetch(&self, query: &QuerySpec) -> Result<PagedResult<R>> {
        self.with_state(|st| st.last_query = query.clone());
        self.session.clear_error();

        let result: Result<PagedResult<R>> = self
            .session
            .auth_fetch(Method::GET, R::PATH, &query.to_params(), None)
            .await;

        match result {
            Ok(page) => {
                tracing::debug!(
                    resource = R::NAME,
                    items = page.items.len(),
                    total = page.total,
                    "Fetched page"
                );
                self.with_state(|st| st.page = page.clone());
                Ok(page)
            }
            Err(err) => {
                if err.is_auth() && self.session.is_authenticated() {
                    self.session.logout().await;
                }
                self.session.record_error(&err);
                Err(err)
            }
        }
    }

    /// Create a record, then re-read the page with the last-used query.
    ///
    /// No optimistic insert: where the new record lands in a sorted,
    /// paginated listing is the server's call. A failed re-read does not
    /// mask the successful create.
    pub async fn create(&self, payload: &R::Create) -> Result<R> {
        let body = api::json_body(payload)?;
        let result: Result<R> = self
            .session
            .auth_fetch(Method::POST, R::PATH, &[], Some(body))
            .await;

        match result {
            Ok(record) => {
                tracing::info!(resource = R::NAME, id = record.id(), "Created");
                let query = self.last_query();
                if let Err(e) = self.fetch(&query).await {
                    tracing::warn!(
                        resource = R::NAME,
                        error = %e,
                        "Refetch after create failed, continuing anyway"
                    );
                }
                Ok(record)
            }
            Err(err) => {
                self.session.record_error(&err);
                Err(err)
            }
        }
    }

    /// Update a record and patch the cached copy in place by id.
    ///
    /// The row keeps its page position until the next fetch even if the new
    /// field values would move it under the active sort.
    pub async fn update(&self, id: i64, payload: &R::Update) -> Result<R> {
        let body = api::json_body(payload)?;
        let path = format!("{}/{}", R::PATH, id);
        let result: Result<R> = self
            .session
            .auth_fetch(Method::PUT, &path, &[], Some(body))
            .await;

        match result {
            Ok(record) => {
                self.with_state(|st| {
                    if let Some(slot) = st.page.items.iter_mut().find(|r| r.id() == id) {
                        *slot = record.clone();
                    }
                });
                tracing::debug!(resource = R::NAME, id, "Updated");
                Ok(record)
            }
            Err(err) => {
                self.session.record_error(&err);
                Err(err)
            }
        }
    }

    /// Delete a record and drop the cached copy.
    ///
    /// Removes at most one row and decrements the total with it, so a
    /// duplicate id (which the server forbids anyway) cannot empty the page.
    pub async fn delete(&self, id: i64) -> Result<R> {
        let path = format!("{}/{}", R::PATH, id);
        let result: Result<R> = self
            .session
            .auth_fetch(Method::DELETE, &path, &[], None)
            .await;

        match result {
            Ok(record) => {
                self.with_state(|st| {
                    if let Some(pos) = st.page.items.iter().position(|r| r.id() == id) {
                        st.page.items.remove(pos);
                        st.page.total = st.page.total.saturating_sub(1);
                    }
                });
                tracing::info!(resource = R::NAME, id, "Deleted");
                Ok(record)
            }
            Err(err) => {
                self.session.record_error(&err);
                Err(err)
            }
        }
    }

    /// Read one record by id without touching the cache.
    pub async fn get(&self, id: i64) -> Result<R> {
        let path = format!("{}/{}", R::PATH, id);
        self.session.auth_fetch(Method::GET, &path, &[], None).await
    }

    // ─── State helpers (guards never cross an await) ─────────────────────────

    fn read_state<T>(&self, f: impl FnOnce(&CollectionState<R>) -> T) -> T {
        f(&self.state.read().unwrap())
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut CollectionState<R>) -> T) -> T {
        f(&mut self.state.write().unwrap())
    }
}
