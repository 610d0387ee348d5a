//! Revision history and autosaves for a single post or page.
//!
//! # Design
//! [`Revisions`] is anchored to one parent entity and generic over the
//! parent's payload type, so post autosaves take [`crate::posts::PostData`]
//! and page autosaves take [`crate::pages::PageData`] while both decode the
//! same [`Revision`] document. Reading revisions requires edit permission on
//! the parent, so callers pair these requests with
//! [`Context::Edit`](crate::query::Context) to attach credentials.
//!
//! Revisions cannot be trashed; only `.force(true)` deletes succeed.

use std::marker::PhantomData;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::request::{DeleteRequest, ListRequest, RetrieveRequest, WriteRequest};
use crate::types::Rendered;

/// A stored revision of a post or page. Revisions carry no status of their
/// own; `parent` points at the live entity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Revision {
    pub id: u64,
    #[serde(default)]
    pub author: u64,
    pub date: Option<NaiveDateTime>,
    pub date_gmt: Option<NaiveDateTime>,
    pub modified: Option<NaiveDateTime>,
    pub modified_gmt: Option<NaiveDateTime>,
    #[serde(default)]
    pub guid: Rendered,
    #[serde(default)]
    pub parent: u64,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: Rendered,
    #[serde(default)]
    pub content: Rendered,
    #[serde(default)]
    pub excerpt: Rendered,
}

/// Revision operations for one parent entity, obtained from
/// [`crate::posts::Posts::revisions`] or [`crate::pages::Pages::revisions`].
pub struct Revisions<'c, P> {
    client: &'c Client,
    base: String,
    marker: PhantomData<fn() -> P>,
}

impl<'c, P> Revisions<'c, P> {
    pub(crate) fn new(client: &'c Client, base: String) -> Self {
        Self {
            client,
            base,
            marker: PhantomData,
        }
    }

    pub fn list(&self) -> ListRequest<'c, Revision> {
        ListRequest::new(self.client, format!("{}/revisions", self.base))
    }

    pub fn retrieve(&self, revision_id: u64) -> RetrieveRequest<'c, Revision> {
        RetrieveRequest::new(self.client, format!("{}/revisions/{revision_id}", self.base))
    }

    /// Revisions cannot be trashed; chain `.force(true)` or the server
    /// refuses the call.
    pub fn delete(&self, revision_id: u64) -> DeleteRequest<'c, Revision> {
        DeleteRequest::new(self.client, format!("{}/revisions/{revision_id}", self.base))
    }
}

impl<'c, P: Serialize> Revisions<'c, P> {
    /// Store an autosave of the parent. The server keeps one autosave per
    /// author and overwrites it on each call.
    pub fn autosave(&self, data: P) -> WriteRequest<'c, Revision, P> {
        WriteRequest::new(self.client, format!("{}/autosaves", self.base), data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Method;
    use crate::posts::PostData;

    fn client() -> Client {
        Client::new("http://localhost:8080").with_basic_auth("admin", "secret")
    }

    #[test]
    fn revision_decodes_history_document() {
        let raw = r#"{
            "id": 101,
            "author": 1,
            "date": "2024-01-16T08:00:00",
            "date_gmt": "2024-01-16T08:00:00",
            "modified": "2024-01-16T08:00:00",
            "modified_gmt": "2024-01-16T08:00:00",
            "parent": 42,
            "slug": "42-revision-v1",
            "title": {"rendered": "Hello World"},
            "content": {"rendered": "<p>First.</p>"},
            "excerpt": {"rendered": ""}
        }"#;

        let revision: Revision = serde_json::from_str(raw).unwrap();
        assert_eq!(revision.id, 101);
        assert_eq!(revision.parent, 42);
        assert_eq!(revision.slug, "42-revision-v1");
        assert_eq!(revision.title.rendered, "Hello World");
    }

    #[test]
    fn paths_nest_under_the_parent() {
        let client = client();
        let revisions = client.posts().revisions(42);

        let list = revisions.list().into_request();
        assert_eq!(
            list.url,
            "http://localhost:8080/wp-json/wp/v2/posts/42/revisions"
        );

        let retrieve = revisions.retrieve(101).into_request();
        assert_eq!(
            retrieve.url,
            "http://localhost:8080/wp-json/wp/v2/posts/42/revisions/101"
        );
    }

    #[test]
    fn delete_uses_the_delete_verb_with_force() {
        let client = client();
        let request = client
            .posts()
            .revisions(42)
            .delete(101)
            .force(true)
            .into_request();

        assert_eq!(request.method, Method::Delete);
        assert_eq!(
            request.url,
            "http://localhost:8080/wp-json/wp/v2/posts/42/revisions/101"
        );
        assert_eq!(request.query, vec![("force", "true".to_string())]);
        assert!(request.auth.is_some());
    }

    #[test]
    fn autosave_posts_the_parent_payload() {
        let client = client();
        let data = PostData {
            content: Some("<p>Draft in progress.</p>".to_string()),
            ..PostData::default()
        };
        let request = client
            .posts()
            .revisions(42)
            .autosave(data)
            .into_request()
            .unwrap();

        assert_eq!(request.method, Method::Post);
        assert_eq!(
            request.url,
            "http://localhost:8080/wp-json/wp/v2/posts/42/autosaves"
        );
        assert_eq!(
            request.body.as_deref(),
            Some(r#"{"content":"<p>Draft in progress.</p>"}"#)
        );
        assert!(request.auth.is_some());
    }
}
