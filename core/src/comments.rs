//! Comments resource: the `/wp/v2/comments` routes.
//!
//! # Design
//! Comment collections filter by post, thread parent and author identity
//! rather than by publication status, so [`Comment`] does not take the
//! content filters; this module defines the comment vocabulary on the
//! generic builders directly. Statuses stay plain strings because the server
//! spells the stored value (`approved`) differently from the filter value
//! (`approve`).

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::client::Client;
use crate::query::CommentOrderBy;
use crate::request::{rfc3339, DeleteRequest, ListRequest, RetrieveRequest, WriteRequest};
use crate::types::Rendered;

/// A comment as the server returns it. `author_email` and `author_ip` are
/// only populated in the `edit` context.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Comment {
    pub id: u64,
    #[serde(default)]
    pub post: u64,
    #[serde(default)]
    pub parent: u64,
    #[serde(default)]
    pub author: u64,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub author_email: String,
    #[serde(default)]
    pub author_url: String,
    #[serde(default)]
    pub author_ip: String,
    #[serde(default)]
    pub author_user_agent: String,
    pub date: Option<NaiveDateTime>,
    pub date_gmt: Option<NaiveDateTime>,
    #[serde(default)]
    pub content: Rendered,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub author_avatar_urls: BTreeMap<String, String>,
    #[serde(default)]
    pub meta: serde_json::Value,
}

/// Fields accepted when creating or updating a comment.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommentData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_gmt: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

/// Entry point for comment operations, obtained from [`Client::comments`].
pub struct Comments<'c> {
    client: &'c Client,
}

impl<'c> Comments<'c> {
    pub(crate) fn new(client: &'c Client) -> Self {
        Self { client }
    }

    pub fn list(&self) -> ListRequest<'c, Comment> {
        ListRequest::new(self.client, "/wp/v2/comments")
    }

    pub fn retrieve(&self, id: u64) -> RetrieveRequest<'c, Comment> {
        RetrieveRequest::new(self.client, format!("/wp/v2/comments/{id}"))
    }

    pub fn create(&self, data: CommentData) -> WriteRequest<'c, Comment, CommentData> {
        WriteRequest::new(self.client, "/wp/v2/comments", data)
    }

    pub fn update(&self, id: u64, data: CommentData) -> WriteRequest<'c, Comment, CommentData> {
        WriteRequest::new(self.client, format!("/wp/v2/comments/{id}"), data)
    }

    /// Trash by default; chain `.force(true)` to delete permanently.
    pub fn delete(&self, id: u64) -> DeleteRequest<'c, Comment> {
        DeleteRequest::new(self.client, format!("/wp/v2/comments/{id}"))
    }
}

/// Filters for comment collections.
impl<'c> ListRequest<'c, Comment> {
    pub fn after(mut self, after: DateTime<Utc>) -> Self {
        self.query.set("after", rfc3339(after));
        self
    }

    pub fn before(mut self, before: DateTime<Utc>) -> Self {
        self.query.set("before", rfc3339(before));
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

    pub fn author_email(mut self, email: &str) -> Self {
        self.query.set("author_email", email);
        self
    }

    pub fn parent(mut self, ids: &[u64]) -> Self {
        self.query.set_ids("parent", ids);
        self
    }

    pub fn parent_exclude(mut self, ids: &[u64]) -> Self {
        self.query.set_ids("parent_exclude", ids);
        self
    }

    /// Restrict to comments on the given posts.
    pub fn post(mut self, ids: &[u64]) -> Self {
        self.query.set_ids("post", ids);
        self
    }

    /// Moderation state filter. The server expects `approve`, `hold`,
    /// `spam`, `trash` or `all`.
    pub fn status(mut self, status: &str) -> Self {
        self.query.set("status", status);
        self
    }

    /// Comment type filter; `comment` unless plugins add more.
    pub fn kind(mut self, kind: &str) -> Self {
        self.query.set("type", kind);
        self
    }

    pub fn order_by(mut self, key: CommentOrderBy) -> Self {
        self.query.set("orderby", key.as_str());
        self
    }
}

impl<'c> RetrieveRequest<'c, Comment> {
    /// Password of the protected post this comment belongs to.
    pub fn password(mut self, password: &str) -> Self {
        self.query.set("password", password);
        self
    }
}
