//! Pages resource: hierarchical content under `/wp/v2/pages`.
//!
//! Pages share the content filters with posts but add hierarchy (`parent`,
//! `menu_order`) and drop taxonomies and stickiness.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::request::{DeleteRequest, ListRequest, PostLike, RetrieveRequest, WriteRequest};
use crate::revisions::Revisions;
use crate::types::{OpenClosed, Rendered, Status};

/// A page as the server returns it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page {
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
    pub parent: u64,
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
    #[serde(default)]
    pub menu_order: i32,
    #[serde(default)]
    pub meta: serde_json::Value,
    #[serde(default)]
    pub template: String,
}

impl PostLike for Page {}

/// Fields accepted when creating or updating a page.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageData {
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
    pub parent: Option<u64>,
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
    pub menu_order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

/// Entry point for page operations, obtained from [`Client::pages`].
pub struct Pages<'c> {
    client: &'c Client,
}

impl<'c> Pages<'c> {
    pub(crate) fn new(client: &'c Client) -> Self {
        Self { client }
    }

    pub fn list(&self) -> ListRequest<'c, Page> {
        ListRequest::new(self.client, "/wp/v2/pages")
    }

    pub fn retrieve(&self, id: u64) -> RetrieveRequest<'c, Page> {
        RetrieveRequest::new(self.client, format!("/wp/v2/pages/{id}"))
    }

    pub fn create(&self, data: PageData) -> WriteRequest<'c, Page, PageData> {
        WriteRequest::new(self.client, "/wp/v2/pages", data)
    }

    pub fn update(&self, id: u64, data: PageData) -> WriteRequest<'c, Page, PageData> {
        WriteRequest::new(self.client, format!("/wp/v2/pages/{id}"), data)
    }

    /// Trash by default; chain `.force(true)` to delete permanently.
    pub fn delete(&self, id: u64) -> DeleteRequest<'c, Page> {
        DeleteRequest::new(self.client, format!("/wp/v2/pages/{id}"))
    }

    /// Revision history and autosaves of one page.
    pub fn revisions(&self, page_id: u64) -> Revisions<'c, PageData> {
        Revisions::new(self.client, format!("/wp/v2/pages/{page_id}"))
    }
}

/// Hierarchy filters only page collections understand.
impl<'c> ListRequest<'c, Page> {
    pub fn parent(mut self, parent: u64) -> Self {
        self.query.set("parent", parent);
        self
    }

    pub fn parent_exclude(mut self, ids: &[u64]) -> Self {
        self.query.set_ids("parent_exclude", ids);
        self
    }

    pub fn menu_order(mut self, order: i32) -> Self {
        self.query.set("menu_order", order);
        self
    }
}

impl<'c> RetrieveRequest<'c, Page> {
    /// Password for password-protected content; without it `content` and
    /// `excerpt` come back empty with `protected` set.
    pub fn password(mut self, password: &str) -> Self {
        self.query.set("password", password);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Client {
        Client::new("http://localhost:8080")
    }

    #[test]
    fn page_decodes_with_hierarchy_fields() {
        let raw = r#"{
            "id": 9,
            "date": "2024-03-01T09:00:00",
            "slug": "about",
            "status": "publish",
            "type": "page",
            "parent": 2,
            "title": {"rendered": "About"},
            "content": {"rendered": "<p>Us.</p>", "protected": false},
            "menu_order": 3,
            "template": ""
        }"#;

        let page: Page = serde_json::from_str(raw).unwrap();
        assert_eq!(page.id, 9);
        assert_eq!(page.parent, 2);
        assert_eq!(page.menu_order, 3);
        assert_eq!(page.kind, "page");
    }

    #[test]
    fn protected_page_document_keeps_the_flag() {
        let raw = r#"{
            "id": 4,
            "slug": "secret",
            "status": "publish",
            "title": {"rendered": "Secret"},
            "content": {"rendered": "", "protected": true},
            "excerpt": {"rendered": "", "protected": true}
        }"#;

        let page: Page = serde_json::from_str(raw).unwrap();
        assert!(page.content.protected);
        assert!(page.content.rendered.is_empty());
    }

    #[test]
    fn hierarchy_filters_take_page_spellings() {
        let client = client();
        let request = client
            .pages()
            .list()
            .parent(2)
            .parent_exclude(&[7, 8])
            .menu_order(1)
            .into_request();

        assert_eq!(
            request.query,
            vec![
                ("menu_order", "1".to_string()),
                ("parent", "2".to_string()),
                ("parent_exclude", "7,8".to_string()),
            ]
        );
    }

    #[test]
    fn page_payload_serializes_hierarchy() {
        let data = PageData {
            title: Some("Team".to_string()),
            parent: Some(9),
            menu_order: Some(2),
            ..PageData::default()
        };
        let body = serde_json::to_value(&data).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"title": "Team", "parent": 9, "menu_order": 2})
        );
    }

    #[test]
    fn revisions_hang_off_the_page_path() {
        let client = client();
        let request = client.pages().revisions(9).list().into_request();
        assert_eq!(
            request.url,
            "http://localhost:8080/wp-json/wp/v2/pages/9/revisions"
        );
    }
}
