//! Generic request builders shared by every resource.
//!
//! # Design
//! One builder per verb, parameterized by the decoded entity type (and the
//! payload type for writes). A builder accumulates parameters, is consumed by
//! value by its terminal `send`, and cannot be touched afterwards; the
//! single-use contract is enforced by the type system instead of a runtime
//! flag. Resource modules only contribute entity-specific modifier `impl`
//! blocks and path factories, so the marshaling logic exists exactly once.
//!
//! Forced deletions are acknowledged by the server as
//! `{"deleted": true, "previous": {...}}`; `DeleteRequest` unwraps that
//! envelope so callers always receive the entity either way.

use std::marker::PhantomData;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::client::{Access, Client};
use crate::error::Error;
use crate::http::{Method, Request, Response};
use crate::query::{Context, Order, OrderBy, QueryPairs};
use crate::types::Status;

/// Marker for content entities (posts and pages) that share the standard
/// content collection filters.
pub trait PostLike {}

/// GET of a collection, decoding a JSON array of `T`.
#[must_use = "builders do nothing until send() is called"]
pub struct ListRequest<'c, T> {
    client: &'c Client,
    path: String,
    pub(crate) query: QueryPairs,
    context: Option<Context>,
    marker: PhantomData<fn() -> T>,
}

impl<'c, T> ListRequest<'c, T> {
    pub(crate) fn new(client: &'c Client, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            query: QueryPairs::default(),
            context: None,
            marker: PhantomData,
        }
    }

    /// Request a response shape; `edit` additionally makes this call carry
    /// the client's credentials.
    pub fn context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.query.set("page", page);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.query.set("per_page", per_page);
        self
    }

    pub fn search(mut self, term: &str) -> Self {
        self.query.set("search", term);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.query.set("offset", offset);
        self
    }

    pub fn order(mut self, order: Order) -> Self {
        self.query.set("order", order.as_str());
        self
    }

    pub fn include(mut self, ids: &[u64]) -> Self {
        self.query.set_ids("include", ids);
        self
    }

    pub fn exclude(mut self, ids: &[u64]) -> Self {
        self.query.set_ids("exclude", ids);
        self
    }

    pub(crate) fn into_request(self) -> Request {
        read_request(self.client, &self.path, self.query, self.context)
    }
}

impl<'c, T: DeserializeOwned> ListRequest<'c, T> {
    pub fn send(self) -> Result<Vec<T>, Error> {
        let client = self.client;
        let request = self.into_request();
        let response = client.execute(&request)?;
        decode(&response)
    }
}

/// Filters the server understands on post and page collections.
impl<'c, T: PostLike> ListRequest<'c, T> {
    pub fn after(mut self, after: DateTime<Utc>) -> Self {
        self.query.set("after", rfc3339(after));
        self
    }

    pub fn before(mut self, before: DateTime<Utc>) -> Self {
        self.query.set("before", rfc3339(before));
        self
    }

    pub fn modified_after(mut self, after: DateTime<Utc>) -> Self {
        self.query.set("modified_after", rfc3339(after));
        self
    }

    pub fn modified_before(mut self, before: DateTime<Utc>) -> Self {
        self.query.set("modified_before", rfc3339(before));
        self
    }

    pub fn author(mut self, ids: &[u64]) -> Self {
        self.query.set_ids("author", ids);
        self
    }

    pub fn author_exclude(mut self, ids: &[u64]) -> Self {
        self.query.set_ids("author_exclude", ids);
        self
    }

    pub fn slug(mut self, slugs: &[&str]) -> Self {
        self.query.set_csv("slug", slugs);
        self
    }

    /// Restrict to one publication status. Anything but `publish` requires
    /// credentials on the server side.
    pub fn status(mut self, status: Status) -> Self {
        self.query.set("status", status.as_str());
        self
    }

    /// Ask for every status at once; requires credentials on the server side.
    pub fn status_any(mut self) -> Self {
        self.query.set("status", "any");
        self
    }

    pub fn search_columns(mut self, columns: &[&str]) -> Self {
        self.query.set_csv("search_columns", columns);
        self
    }

    pub fn order_by(mut self, key: OrderBy) -> Self {
        self.query.set("orderby", key.as_str());
        self
    }
}

/// GET of a single entity, decoding `T`.
#[must_use = "builders do nothing until send() is called"]
pub struct RetrieveRequest<'c, T> {
    client: &'c Client,
    path: String,
    pub(crate) query: QueryPairs,
    context: Option<Context>,
    marker: PhantomData<fn() -> T>,
}

impl<'c, T> RetrieveRequest<'c, T> {
    pub(crate) fn new(client: &'c Client, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            query: QueryPairs::default(),
            context: None,
            marker: PhantomData,
        }
    }

    /// Request a response shape; `edit` additionally makes this call carry
    /// the client's credentials.
    pub fn context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    pub(crate) fn into_request(self) -> Request {
        read_request(self.client, &self.path, self.query, self.context)
    }
}

impl<'c, T: DeserializeOwned> RetrieveRequest<'c, T> {
    pub fn send(self) -> Result<T, Error> {
        let client = self.client;
        let request = self.into_request();
        let response = client.execute(&request)?;
        decode(&response)
    }
}

/// POST with a JSON body; used for create, update and autosaves.
#[must_use = "builders do nothing until send() is called"]
pub struct WriteRequest<'c, T, P> {
    client: &'c Client,
    path: String,
    payload: P,
    marker: PhantomData<fn() -> T>,
}

impl<'c, T, P> WriteRequest<'c, T, P> {
    pub(crate) fn new(client: &'c Client, path: impl Into<String>, payload: P) -> Self {
        Self {
            client,
            path: path.into(),
            payload,
            marker: PhantomData,
        }
    }
}

impl<'c, T: DeserializeOwned, P: Serialize> WriteRequest<'c, T, P> {
    pub fn send(self) -> Result<T, Error> {
        let client = self.client;
        let request = self.into_request()?;
        let response = client.execute(&request)?;
        decode(&response)
    }

    pub(crate) fn into_request(self) -> Result<Request, Error> {
        let body = serde_json::to_string(&self.payload).map_err(Error::Encode)?;
        Ok(Request {
            method: Method::Post,
            url: self.client.url(&self.path),
            query: Vec::new(),
            auth: self.client.credentials_for(Access::Write, None),
            body: Some(body),
        })
    }
}

/// DELETE of a single entity. Without `force` the server moves the entity to
/// trash and returns it; with `force` it deletes permanently and the prior
/// state is unwrapped from the acknowledgement envelope.
#[must_use = "builders do nothing until send() is called"]
pub struct DeleteRequest<'c, T> {
    client: &'c Client,
    path: String,
    force: bool,
    marker: PhantomData<fn() -> T>,
}

impl<'c, T> DeleteRequest<'c, T> {
    pub(crate) fn new(client: &'c Client, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            force: false,
            marker: PhantomData,
        }
    }

    /// Delete permanently instead of trashing. Resources without a trash
    /// state (terms, revisions) only accept forced deletion.
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub(crate) fn into_request(self) -> Request {
        let mut query = QueryPairs::default();
        query.set("force", self.force);
        Request {
            method: Method::Delete,
            url: self.client.url(&self.path),
            query: query.into_pairs(),
            auth: self.client.credentials_for(Access::Write, None),
            body: None,
        }
    }
}

impl<'c, T: DeserializeOwned> DeleteRequest<'c, T> {
    pub fn send(self) -> Result<T, Error> {
        let client = self.client;
        let force = self.force;
        let request = self.into_request();
        let response = client.execute(&request)?;
        decode_deleted(&response, force)
    }
}

/// Acknowledgement wrapper for forced deletions. The `deleted` flag is
/// redundant and skipped; only the prior state is surfaced.
#[derive(Deserialize)]
struct Deleted<T> {
    previous: T,
}

fn read_request(
    client: &Client,
    path: &str,
    mut query: QueryPairs,
    context: Option<Context>,
) -> Request {
    if let Some(context) = context {
        query.set("context", context.as_str());
    }
    Request {
        method: Method::Get,
        url: client.url(path),
        query: query.into_pairs(),
        auth: client.credentials_for(Access::Read, context),
        body: None,
    }
}

/// UTC instants go on the wire as RFC 3339 with whole seconds.
pub(crate) fn rfc3339(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Decode a 2xx body into `T`, or a non-2xx body into the richest error the
/// response supports.
pub(crate) fn decode<T: DeserializeOwned>(response: &Response) -> Result<T, Error> {
    if !response.is_success() {
        return Err(Error::from_response(response));
    }
    serde_json::from_str(&response.body).map_err(Error::Decode)
}

pub(crate) fn decode_deleted<T: DeserializeOwned>(
    response: &Response,
    force: bool,
) -> Result<T, Error> {
    if force {
        let deleted: Deleted<T> = decode(response)?;
        Ok(deleted.previous)
    } else {
        decode(response)
    }
}
