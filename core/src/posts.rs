//! Posts resource: entities, payloads and the `/wp/v2/posts` routes.
//!
//! # Design
//! [`Post`] mirrors the server's response document and is decode-only;
//! [`PostData`] is the write payload, all-optional so unset fields stay out
//! of the JSON body and keep server defaults. The generic builders carry the
//! collection filters shared with pages; the `impl` blocks here add the
//! taxonomy and stickiness filters only post collections understand.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::query::TaxRelation;
use crate::request::{DeleteRequest, ListRequest, PostLike, RetrieveRequest, WriteRequest};
use crate::revisions::Revisions;
use crate::types::{Format, OpenClosed, Rendered, Status};

/// A post as the server returns it. Fields outside the requested context
/// come back at their defaults; `status` is absent in the `embed` context.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Post {
    pub id: u64,
    pub date: Option<NaiveDateTime>,
    pub date_gmt: Option<NaiveDateTime>,
    pub modified: Option<NaiveDateTime>,
    pub modified_gmt: Option<NaiveDateTime>,
    #[serde(default)]
    pub guid: Rendered,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub slug: String,
    pub status: Option<Status>,
    #[serde(default, rename = "type")]
    pub kind: String,
    /// Set only in the `edit` context, and only for protected content.
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub permalink_template: String,
    #[serde(default)]
    pub generated_slug: String,
    #[serde(default)]
    pub title: Rendered,
    #[serde(default)]
    pub content: Rendered,
    #[serde(default)]
    pub excerpt: Rendered,
    #[serde(default)]
    pub author: u64,
    #[serde(default)]
    pub featured_media: u64,
    pub comment_status: Option<OpenClosed>,
    pub ping_status: Option<OpenClosed>,
    pub format: Option<Format>,
    #[serde(default)]
    pub meta: serde_json::Value,
    #[serde(default)]
    pub sticky: bool,
    #[serde(default)]
    pub template: String,
    #[serde(default)]
    pub categories: Vec<u64>,
    #[serde(default)]
    pub tags: Vec<u64>,
}

impl PostLike for Post {}

/// Fields accepted when creating or updating a post. Only set fields are
/// serialized.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_gmt: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_media: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_status: Option<OpenClosed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ping_status: Option<OpenClosed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticky: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<u64>>,
}

/// Entry point for post operations, obtained from [`Client::posts`].
pub struct Posts<'c> {
    client: &'c Client,
}

impl<'c> Posts<'c> {
    pub(crate) fn new(client: &'c Client) -> Self {
        Self { client }
    }

    pub fn list(&self) -> ListRequest<'c, Post> {
        ListRequest::new(self.client, "/wp/v2/posts")
    }

    pub fn retrieve(&self, id: u64) -> RetrieveRequest<'c, Post> {
        RetrieveRequest::new(self.client, format!("/wp/v2/posts/{id}"))
    }

    pub fn create(&self, data: PostData) -> WriteRequest<'c, Post, PostData> {
        WriteRequest::new(self.client, "/wp/v2/posts", data)
    }

    pub fn update(&self, id: u64, data: PostData) -> WriteRequest<'c, Post, PostData> {
        WriteRequest::new(self.client, format!("/wp/v2/posts/{id}"), data)
    }

    /// Trash by default; chain `.force(true)` to delete permanently.
    pub fn delete(&self, id: u64) -> DeleteRequest<'c, Post> {
        DeleteRequest::new(self.client, format!("/wp/v2/posts/{id}"))
    }

    /// Revision history and autosaves of one post.
    pub fn revisions(&self, post_id: u64) -> Revisions<'c, PostData> {
        Revisions::new(self.client, format!("/wp/v2/posts/{post_id}"))
    }
}

/// Filters only post collections understand.
impl<'c> ListRequest<'c, Post> {
    pub fn categories(mut self, ids: &[u64]) -> Self {
        self.query.set_ids("categories", ids);
        self
    }

    pub fn categories_exclude(mut self, ids: &[u64]) -> Self {
        self.query.set_ids("categories_exclude", ids);
        self
    }

    pub fn tags(mut self, ids: &[u64]) -> Self {
        self.query.set_ids("tags", ids);
        self
    }

    pub fn tags_exclude(mut self, ids: &[u64]) -> Self {
        self.query.set_ids("tags_exclude", ids);
        self
    }

    pub fn sticky(mut self, sticky: bool) -> Self {
        self.query.set("sticky", sticky);
        self
    }

    pub fn tax_relation(mut self, relation: TaxRelation) -> Self {
        self.query.set("tax_relation", relation.as_str());
        self
    }
}

impl<'c> RetrieveRequest<'c, Post> {
    /// Password for password-protected content; without it `content` and
    /// `excerpt` come back empty with `protected` set.
    pub fn password(mut self, password: &str) -> Self {
        self.query.set("password", password);
        self
    }
}
