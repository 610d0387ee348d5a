//! Categories resource: the `/wp/v2/categories` term routes.
//!
//! Terms have no trash state, so deleting a category only succeeds with
//! `.force(true)`; the server refuses a plain delete.

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::query::TermOrderBy;
use crate::request::{DeleteRequest, ListRequest, RetrieveRequest, WriteRequest};

/// A category term as the server returns it. `count` is the number of
/// published posts filed under the term.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Category {
    pub id: u64,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub taxonomy: String,
    #[serde(default)]
    pub parent: u64,
    #[serde(default)]
    pub meta: serde_json::Value,
}

/// Fields accepted when creating or updating a category. `name` is the only
/// field the server requires on create.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

/// Entry point for category operations, obtained from [`Client::categories`].
pub struct Categories<'c> {
    client: &'c Client,
}

impl<'c> Categories<'c> {
    pub(crate) fn new(client: &'c Client) -> Self {
        Self { client }
    }

    pub fn list(&self) -> ListRequest<'c, Category> {
        ListRequest::new(self.client, "/wp/v2/categories")
    }

    pub fn retrieve(&self, id: u64) -> RetrieveRequest<'c, Category> {
        RetrieveRequest::new(self.client, format!("/wp/v2/categories/{id}"))
    }

    pub fn create(&self, data: CategoryData) -> WriteRequest<'c, Category, CategoryData> {
        WriteRequest::new(self.client, "/wp/v2/categories", data)
    }

    pub fn update(&self, id: u64, data: CategoryData) -> WriteRequest<'c, Category, CategoryData> {
        WriteRequest::new(self.client, format!("/wp/v2/categories/{id}"), data)
    }

    /// Terms cannot be trashed; only `.force(true)` deletes succeed.
    pub fn delete(&self, id: u64) -> DeleteRequest<'c, Category> {
        DeleteRequest::new(self.client, format!("/wp/v2/categories/{id}"))
    }
}

/// Filters for term collections.
impl<'c> ListRequest<'c, Category> {
    /// Skip terms with no published posts. The server default is to list
    /// every term.
    pub fn hide_empty(mut self, hide: bool) -> Self {
        self.query.set("hide_empty", hide);
        self
    }

    pub fn parent(mut self, parent: u64) -> Self {
        self.query.set("parent", parent);
        self
    }

    /// Restrict to terms assigned to one post.
    pub fn post(mut self, post: u64) -> Self {
        self.query.set("post", post);
        self
    }

    pub fn slug(mut self, slugs: &[&str]) -> Self {
        self.query.set_csv("slug", slugs);
        self
    }

    pub fn order_by(mut self, key: TermOrderBy) -> Self {
        self.query.set("orderby", key.as_str());
        self
    }
}
