//! Posts and pages, including revisions and autosaves.
//!
//! Both resources share one storage shape and one handler core; the public
//! handler functions only pin the [`Kind`]. Every successful update stores a
//! snapshot of the new state, which is what the revision routes serve.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    authorized, error, invalid_param, now, paginate, paging, parse_ids, parse_instant, slugify, Db,
};

const STATUSES: [&str; 6] = ["publish", "future", "draft", "pending", "private", "trash"];

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Kind {
    Post,
    Page,
}

impl Kind {
    fn label(self) -> &'static str {
        match self {
            Kind::Post => "post",
            Kind::Page => "page",
        }
    }

    fn link(self, id: u64) -> String {
        match self {
            Kind::Post => format!("http://localhost/?p={id}"),
            Kind::Page => format!("http://localhost/?page_id={id}"),
        }
    }
}

/// One stored post or page. Dates are UTC; the site runs at GMT offset 0 so
/// local and GMT fields render identically.
#[derive(Clone)]
pub(crate) struct Content {
    pub id: u64,
    pub kind: Kind,
    pub date: NaiveDateTime,
    pub modified: NaiveDateTime,
    pub slug: String,
    pub status: String,
    pub password: String,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub author: u64,
    pub featured_media: u64,
    pub comment_status: String,
    pub ping_status: String,
    pub format: String,
    pub meta: Value,
    pub sticky: bool,
    pub template: String,
    pub categories: Vec<u64>,
    pub tags: Vec<u64>,
    pub parent: u64,
    pub menu_order: i32,
}

/// A revision or autosave of one parent entity.
#[derive(Clone)]
pub(crate) struct Snapshot {
    pub id: u64,
    pub parent: u64,
    pub author: u64,
    pub date: NaiveDateTime,
    pub modified: NaiveDateTime,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub autosave: bool,
}

/// Write payload for both posts and pages; fields that do not apply to the
/// addressed kind are ignored.
#[derive(Deserialize)]
pub(crate) struct ContentInput {
    pub date: Option<NaiveDateTime>,
    pub date_gmt: Option<NaiveDateTime>,
    pub slug: Option<String>,
    pub status: Option<String>,
    pub password: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub author: Option<u64>,
    pub featured_media: Option<u64>,
    pub comment_status: Option<String>,
    pub ping_status: Option<String>,
    pub format: Option<String>,
    pub meta: Option<Value>,
    pub sticky: Option<bool>,
    pub template: Option<String>,
    pub categories: Option<Vec<u64>>,
    pub tags: Option<Vec<u64>>,
    pub parent: Option<u64>,
    pub menu_order: Option<i32>,
}

// Post routes.

pub(crate) async fn list_posts(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    list(Kind::Post, db, headers, params).await
}

pub(crate) async fn retrieve_post(
    State(db): State<Db>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    retrieve(Kind::Post, db, id, headers, params).await
}

pub(crate) async fn create_post(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<ContentInput>,
) -> Response {
    create(Kind::Post, db, headers, input).await
}

pub(crate) async fn update_post(
    State(db): State<Db>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Json(input): Json<ContentInput>,
) -> Response {
    update(Kind::Post, db, id, headers, input).await
}

pub(crate) async fn delete_post(
    State(db): State<Db>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    delete(Kind::Post, db, id, headers, params).await
}

pub(crate) async fn list_post_revisions(
    State(db): State<Db>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    list_revisions(Kind::Post, db, id, headers, params).await
}

pub(crate) async fn retrieve_post_revision(
    State(db): State<Db>,
    Path((id, revision_id)): Path<(u64, u64)>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    retrieve_revision(Kind::Post, db, id, revision_id, headers, params).await
}

pub(crate) async fn delete_post_revision(
    State(db): State<Db>,
    Path((id, revision_id)): Path<(u64, u64)>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    delete_revision(Kind::Post, db, id, revision_id, headers, params).await
}

pub(crate) async fn create_post_autosave(
    State(db): State<Db>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Json(input): Json<ContentInput>,
) -> Response {
    create_autosave(Kind::Post, db, id, headers, input).await
}

// Page routes.

pub(crate) async fn list_pages(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    list(Kind::Page, db, headers, params).await
}

pub(crate) async fn retrieve_page(
    State(db): State<Db>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    retrieve(Kind::Page, db, id, headers, params).await
}

pub(crate) async fn create_page(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<ContentInput>,
) -> Response {
    create(Kind::Page, db, headers, input).await
}

pub(crate) async fn update_page(
    State(db): State<Db>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Json(input): Json<ContentInput>,
) -> Response {
    update(Kind::Page, db, id, headers, input).await
}

pub(crate) async fn delete_page(
    State(db): State<Db>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    delete(Kind::Page, db, id, headers, params).await
}

pub(crate) async fn list_page_revisions(
    State(db): State<Db>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    list_revisions(Kind::Page, db, id, headers, params).await
}

pub(crate) async fn retrieve_page_revision(
    State(db): State<Db>,
    Path((id, revision_id)): Path<(u64, u64)>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    retrieve_revision(Kind::Page, db, id, revision_id, headers, params).await
}

pub(crate) async fn delete_page_revision(
    State(db): State<Db>,
    Path((id, revision_id)): Path<(u64, u64)>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    delete_revision(Kind::Page, db, id, revision_id, headers, params).await
}

pub(crate) async fn create_page_autosave(
    State(db): State<Db>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Json(input): Json<ContentInput>,
) -> Response {
    create_autosave(Kind::Page, db, id, headers, input).await
}

// Handler cores.

async fn list(
    kind: Kind,
    db: Db,
    headers: HeaderMap,
    params: HashMap<String, String>,
) -> Response {
    let paging = match paging(&params) {
        Ok(paging) => paging,
        Err(response) => return response,
    };
    let authed = authorized(&headers);
    let context = params.get("context").map(String::as_str).unwrap_or("view");
    if context == "edit" && !authed {
        return forbidden_context();
    }

    let status = params.get("status").map(String::as_str).unwrap_or("publish");
    if status != "any" && !STATUSES.contains(&status) {
        return invalid_param("status");
    }
    if status != "publish" && !authed {
        return error(
            StatusCode::UNAUTHORIZED,
            "rest_forbidden_status",
            "Status is forbidden.",
        );
    }

    let store = db.read().await;
    let pool = match kind {
        Kind::Post => &store.posts,
        Kind::Page => &store.pages,
    };
    let mut items: Vec<&Content> = pool
        .values()
        .filter(|c| match status {
            "any" => c.status != "trash",
            wanted => c.status == wanted,
        })
        .collect();

    if let Some(term) = params.get("search") {
        let needle = term.to_lowercase();
        items.retain(|c| {
            c.title.to_lowercase().contains(&needle) || c.content.to_lowercase().contains(&needle)
        });
    }
    if let Some(raw) = params.get("author") {
        let wanted = parse_ids(raw);
        items.retain(|c| wanted.contains(&c.author));
    }
    if let Some(raw) = params.get("author_exclude") {
        let unwanted = parse_ids(raw);
        items.retain(|c| !unwanted.contains(&c.author));
    }
    if let Some(raw) = params.get("slug") {
        let wanted: Vec<&str> = raw.split(',').collect();
        items.retain(|c| wanted.contains(&c.slug.as_str()));
    }
    if let Some(raw) = params.get("include") {
        let wanted = parse_ids(raw);
        items.retain(|c| wanted.contains(&c.id));
    }
    if let Some(raw) = params.get("exclude") {
        let unwanted = parse_ids(raw);
        items.retain(|c| !unwanted.contains(&c.id));
    }
    for (param, on_modified) in [
        ("after", false),
        ("before", false),
        ("modified_after", true),
        ("modified_before", true),
    ] {
        if let Some(raw) = params.get(param) {
            let threshold = match parse_instant(raw) {
                Some(at) => at,
                None => return invalid_param(param),
            };
            let lower_bound = param.ends_with("after");
            items.retain(|c| {
                let at = if on_modified { c.modified } else { c.date };
                if lower_bound {
                    at > threshold
                } else {
                    at < threshold
                }
            });
        }
    }

    match kind {
        Kind::Post => {
            if let Some(raw) = params.get("categories") {
                let wanted = parse_ids(raw);
                items.retain(|c| c.categories.iter().any(|id| wanted.contains(id)));
            }
            if let Some(raw) = params.get("categories_exclude") {
                let unwanted = parse_ids(raw);
                items.retain(|c| !c.categories.iter().any(|id| unwanted.contains(id)));
            }
            if let Some(raw) = params.get("tags") {
                let wanted = parse_ids(raw);
                items.retain(|c| c.tags.iter().any(|id| wanted.contains(id)));
            }
            if let Some(raw) = params.get("tags_exclude") {
                let unwanted = parse_ids(raw);
                items.retain(|c| !c.tags.iter().any(|id| unwanted.contains(id)));
            }
            if let Some(raw) = params.get("sticky") {
                let wanted = match raw.as_str() {
                    "true" => true,
                    "false" => false,
                    _ => return invalid_param("sticky"),
                };
                items.retain(|c| c.sticky == wanted);
            }
        }
        Kind::Page => {
            if let Some(raw) = params.get("parent") {
                let wanted = parse_ids(raw);
                items.retain(|c| wanted.contains(&c.parent));
            }
            if let Some(raw) = params.get("parent_exclude") {
                let unwanted = parse_ids(raw);
                items.retain(|c| !unwanted.contains(&c.parent));
            }
            if let Some(raw) = params.get("menu_order") {
                let wanted = match raw.parse::<i32>() {
                    Ok(value) => value,
                    Err(_) => return invalid_param("menu_order"),
                };
                items.retain(|c| c.menu_order == wanted);
            }
        }
    }

    let orderby = params.get("orderby").map(String::as_str).unwrap_or("date");
    let include_order = params.get("include").map(|raw| parse_ids(raw));
    match orderby {
        "author" => items.sort_by_key(|c| (c.author, c.id)),
        "date" | "relevance" => items.sort_by_key(|c| (c.date, c.id)),
        "id" => items.sort_by_key(|c| c.id),
        "include" => {
            let order = include_order.unwrap_or_default();
            items.sort_by_key(|c| order.iter().position(|&id| id == c.id).unwrap_or(usize::MAX));
        }
        "modified" => items.sort_by_key(|c| (c.modified, c.id)),
        "parent" => items.sort_by_key(|c| (c.parent, c.id)),
        "slug" | "include_slugs" => items.sort_by(|a, b| a.slug.cmp(&b.slug)),
        "title" => items.sort_by(|a, b| a.title.cmp(&b.title)),
        _ => return invalid_param("orderby"),
    }
    match params.get("order").map(String::as_str) {
        Some("asc") => {}
        None | Some("desc") => items.reverse(),
        Some(_) => return invalid_param("order"),
    }

    let page = paginate(items, &paging);
    let docs: Vec<Value> = page.iter().map(|c| doc(c, context, !authed)).collect();
    Json(docs).into_response()
}

async fn retrieve(
    kind: Kind,
    db: Db,
    id: u64,
    headers: HeaderMap,
    params: HashMap<String, String>,
) -> Response {
    let authed = authorized(&headers);
    let context = params.get("context").map(String::as_str).unwrap_or("view");
    if context == "edit" && !authed {
        return forbidden_context();
    }

    let store = db.read().await;
    let pool = match kind {
        Kind::Post => &store.posts,
        Kind::Page => &store.pages,
    };
    let content = match pool.get(&id) {
        Some(content) => content,
        None => return not_found(),
    };
    if content.status != "publish" && !authed {
        return error(
            StatusCode::UNAUTHORIZED,
            "rest_forbidden",
            "Sorry, you are not allowed to do that.",
        );
    }

    // Password gate applies outside the edit context.
    let mut hide = false;
    if !content.password.is_empty() && context != "edit" {
        match params.get("password") {
            None => hide = true,
            Some(given) if *given != content.password => {
                return error(
                    StatusCode::FORBIDDEN,
                    "rest_post_incorrect_password",
                    "Incorrect post password.",
                );
            }
            Some(_) => {}
        }
    }

    Json(doc(content, context, hide)).into_response()
}

async fn create(kind: Kind, db: Db, headers: HeaderMap, input: ContentInput) -> Response {
    if !authorized(&headers) {
        return error(
            StatusCode::UNAUTHORIZED,
            "rest_cannot_create",
            "Sorry, you are not allowed to create posts as this user.",
        );
    }
    if let Some(status) = input.status.as_deref() {
        if !STATUSES.contains(&status) {
            return invalid_param("status");
        }
    }

    let mut store = db.write().await;
    let id = store.allocate();
    let stamp = now();
    let title = input.title.unwrap_or_default();
    let requested_slug = input
        .slug
        .filter(|slug| !slug.is_empty())
        .unwrap_or_else(|| slugify(&title));
    let pool = match kind {
        Kind::Post => &store.posts,
        Kind::Page => &store.pages,
    };
    let slug = unique_slug(pool, requested_slug, id);

    let content = Content {
        id,
        kind,
        date: input.date.or(input.date_gmt).unwrap_or(stamp),
        modified: stamp,
        slug,
        status: input.status.unwrap_or_else(|| "draft".to_string()),
        password: input.password.unwrap_or_default(),
        title,
        content: input.content.unwrap_or_default(),
        excerpt: input.excerpt.unwrap_or_default(),
        author: input.author.unwrap_or(1),
        featured_media: input.featured_media.unwrap_or(0),
        comment_status: input.comment_status.unwrap_or_else(|| "open".to_string()),
        ping_status: input.ping_status.unwrap_or_else(|| "open".to_string()),
        format: input.format.unwrap_or_else(|| "standard".to_string()),
        meta: input.meta.unwrap_or_else(|| Value::Array(Vec::new())),
        sticky: input.sticky.unwrap_or(false),
        template: input.template.unwrap_or_default(),
        categories: match kind {
            Kind::Post => input.categories.unwrap_or_else(|| vec![1]),
            Kind::Page => Vec::new(),
        },
        tags: input.tags.unwrap_or_default(),
        parent: input.parent.unwrap_or(0),
        menu_order: input.menu_order.unwrap_or(0),
    };
    let body = doc(&content, "edit", false);
    match kind {
        Kind::Post => store.posts.insert(id, content),
        Kind::Page => store.pages.insert(id, content),
    };

    (StatusCode::CREATED, Json(body)).into_response()
}

async fn update(kind: Kind, db: Db, id: u64, headers: HeaderMap, input: ContentInput) -> Response {
    if !authorized(&headers) {
        return error(
            StatusCode::UNAUTHORIZED,
            "rest_cannot_edit",
            "Sorry, you are not allowed to edit this post.",
        );
    }
    if let Some(status) = input.status.as_deref() {
        if !STATUSES.contains(&status) {
            return invalid_param("status");
        }
    }

    let mut store = db.write().await;
    if !exists(&store, kind, id) {
        return not_found();
    }
    let revision_id = store.allocate();
    let version = store
        .revisions
        .values()
        .filter(|s| s.parent == id && !s.autosave)
        .count()
        + 1;
    let pool = match kind {
        Kind::Post => &mut store.posts,
        Kind::Page => &mut store.pages,
    };
    let content = match pool.get_mut(&id) {
        Some(content) => content,
        None => return not_found(),
    };

    if let Some(date) = input.date.or(input.date_gmt) {
        content.date = date;
    }
    if let Some(slug) = input.slug {
        content.slug = slug;
    }
    if let Some(status) = input.status {
        content.status = status;
    }
    if let Some(password) = input.password {
        content.password = password;
    }
    if let Some(title) = input.title {
        content.title = title;
    }
    if let Some(body) = input.content {
        content.content = body;
    }
    if let Some(excerpt) = input.excerpt {
        content.excerpt = excerpt;
    }
    if let Some(author) = input.author {
        content.author = author;
    }
    if let Some(featured_media) = input.featured_media {
        content.featured_media = featured_media;
    }
    if let Some(comment_status) = input.comment_status {
        content.comment_status = comment_status;
    }
    if let Some(ping_status) = input.ping_status {
        content.ping_status = ping_status;
    }
    if let Some(format) = input.format {
        content.format = format;
    }
    if let Some(meta) = input.meta {
        content.meta = meta;
    }
    if let Some(sticky) = input.sticky {
        content.sticky = sticky;
    }
    if let Some(template) = input.template {
        content.template = template;
    }
    if let Some(categories) = input.categories {
        content.categories = categories;
    }
    if let Some(tags) = input.tags {
        content.tags = tags;
    }
    if let Some(parent) = input.parent {
        content.parent = parent;
    }
    if let Some(menu_order) = input.menu_order {
        content.menu_order = menu_order;
    }
    content.modified = now();

    let body = doc(content, "edit", false);
    let snapshot = Snapshot {
        id: revision_id,
        parent: id,
        author: content.author,
        date: content.modified,
        modified: content.modified,
        slug: format!("{id}-revision-v{version}"),
        title: content.title.clone(),
        content: content.content.clone(),
        excerpt: content.excerpt.clone(),
        autosave: false,
    };
    store.revisions.insert(revision_id, snapshot);

    Json(body).into_response()
}

async fn delete(
    kind: Kind,
    db: Db,
    id: u64,
    headers: HeaderMap,
    params: HashMap<String, String>,
) -> Response {
    if !authorized(&headers) {
        return error(
            StatusCode::UNAUTHORIZED,
            "rest_cannot_delete",
            "Sorry, you are not allowed to delete this post.",
        );
    }
    let force = params.get("force").map(String::as_str) == Some("true");

    let mut store = db.write().await;
    let pool = match kind {
        Kind::Post => &mut store.posts,
        Kind::Page => &mut store.pages,
    };

    if force {
        let content = match pool.remove(&id) {
            Some(content) => content,
            None => return not_found(),
        };
        store.revisions.retain(|_, s| s.parent != id);
        let body = json!({"deleted": true, "previous": doc(&content, "edit", false)});
        return Json(body).into_response();
    }

    let content = match pool.get_mut(&id) {
        Some(content) => content,
        None => return not_found(),
    };
    if content.status == "trash" {
        return error(
            StatusCode::GONE,
            "rest_already_trashed",
            "The post has already been deleted.",
        );
    }
    content.status = "trash".to_string();
    content.modified = now();
    Json(doc(content, "edit", false)).into_response()
}

async fn list_revisions(
    kind: Kind,
    db: Db,
    id: u64,
    headers: HeaderMap,
    params: HashMap<String, String>,
) -> Response {
    let paging = match paging(&params) {
        Ok(paging) => paging,
        Err(response) => return response,
    };
    if !authorized(&headers) {
        return cannot_read_revisions();
    }
    let context = params.get("context").map(String::as_str).unwrap_or("view");

    let store = db.read().await;
    if !exists(&store, kind, id) {
        return not_found();
    }
    let mut snapshots: Vec<&Snapshot> =
        store.revisions.values().filter(|s| s.parent == id).collect();
    snapshots.sort_by_key(|s| (s.date, s.id));
    snapshots.reverse();

    let page = paginate(snapshots, &paging);
    let docs: Vec<Value> = page
        .iter()
        .map(|s| snapshot_doc(s, context == "edit"))
        .collect();
    Json(docs).into_response()
}

async fn retrieve_revision(
    kind: Kind,
    db: Db,
    id: u64,
    revision_id: u64,
    headers: HeaderMap,
    params: HashMap<String, String>,
) -> Response {
    if !authorized(&headers) {
        return cannot_read_revisions();
    }
    let context = params.get("context").map(String::as_str).unwrap_or("view");

    let store = db.read().await;
    if !exists(&store, kind, id) {
        return not_found();
    }
    match store.revisions.get(&revision_id) {
        Some(snapshot) if snapshot.parent == id => {
            Json(snapshot_doc(snapshot, context == "edit")).into_response()
        }
        _ => error(
            StatusCode::NOT_FOUND,
            "rest_post_invalid_id",
            "Invalid revision ID.",
        ),
    }
}

async fn delete_revision(
    kind: Kind,
    db: Db,
    id: u64,
    revision_id: u64,
    headers: HeaderMap,
    params: HashMap<String, String>,
) -> Response {
    if !authorized(&headers) {
        return error(
            StatusCode::UNAUTHORIZED,
            "rest_cannot_delete",
            "Sorry, you are not allowed to delete this revision.",
        );
    }
    let force = params.get("force").map(String::as_str) == Some("true");
    if !force {
        return error(
            StatusCode::NOT_IMPLEMENTED,
            "rest_trash_not_supported",
            "Revisions do not support trashing. Set 'force=true' to delete.",
        );
    }

    let mut store = db.write().await;
    if !exists(&store, kind, id) {
        return not_found();
    }
    match store.revisions.get(&revision_id) {
        Some(snapshot) if snapshot.parent == id => {
            let body = json!({"deleted": true, "previous": snapshot_doc(snapshot, true)});
            store.revisions.remove(&revision_id);
            Json(body).into_response()
        }
        _ => error(
            StatusCode::NOT_FOUND,
            "rest_post_invalid_id",
            "Invalid revision ID.",
        ),
    }
}

async fn create_autosave(
    kind: Kind,
    db: Db,
    id: u64,
    headers: HeaderMap,
    input: ContentInput,
) -> Response {
    if !authorized(&headers) {
        return error(
            StatusCode::UNAUTHORIZED,
            "rest_cannot_edit",
            "Sorry, you are not allowed to edit this post.",
        );
    }

    let mut store = db.write().await;
    let (author, title, body_text, excerpt) = {
        let pool = match kind {
            Kind::Post => &store.posts,
            Kind::Page => &store.pages,
        };
        match pool.get(&id) {
            Some(content) => (
                content.author,
                content.title.clone(),
                content.content.clone(),
                content.excerpt.clone(),
            ),
            None => return not_found(),
        }
    };

    // One autosave per parent; a second call overwrites in place.
    let existing = store
        .revisions
        .values()
        .find(|s| s.parent == id && s.autosave)
        .map(|s| s.id);
    let (status, autosave_id) = match existing {
        Some(previous) => (StatusCode::OK, previous),
        None => (StatusCode::CREATED, store.allocate()),
    };
    let stamp = now();
    let snapshot = Snapshot {
        id: autosave_id,
        parent: id,
        author,
        date: stamp,
        modified: stamp,
        slug: format!("{id}-autosave-v1"),
        title: input.title.unwrap_or(title),
        content: input.content.unwrap_or(body_text),
        excerpt: input.excerpt.unwrap_or(excerpt),
        autosave: true,
    };
    let body = snapshot_doc(&snapshot, true);
    store.revisions.insert(snapshot.id, snapshot);

    (status, Json(body)).into_response()
}

// Shared pieces.

fn exists(store: &crate::Store, kind: Kind, id: u64) -> bool {
    match kind {
        Kind::Post => store.posts.contains_key(&id),
        Kind::Page => store.pages.contains_key(&id),
    }
}

fn not_found() -> Response {
    error(
        StatusCode::NOT_FOUND,
        "rest_post_invalid_id",
        "Invalid post ID.",
    )
}

fn forbidden_context() -> Response {
    error(
        StatusCode::UNAUTHORIZED,
        "rest_forbidden_context",
        "Sorry, you are not allowed to edit posts in this post type.",
    )
}

fn cannot_read_revisions() -> Response {
    error(
        StatusCode::UNAUTHORIZED,
        "rest_cannot_read",
        "Sorry, you are not allowed to view revisions of this post.",
    )
}

fn unique_slug(pool: &HashMap<u64, Content>, requested: String, id: u64) -> String {
    let fallback = if requested.is_empty() {
        id.to_string()
    } else {
        requested
    };
    if pool.values().any(|c| c.slug == fallback) {
        format!("{fallback}-{id}")
    } else {
        fallback
    }
}

fn rendered(raw: &str, edit: bool) -> Value {
    if edit {
        json!({"raw": raw, "rendered": raw})
    } else {
        json!({"rendered": raw})
    }
}

fn gated(raw: &str, edit: bool, protected: bool, hidden: bool) -> Value {
    let shown = if hidden { "" } else { raw };
    let mut body = json!({"rendered": shown, "protected": protected});
    if edit {
        body["raw"] = Value::String(raw.to_string());
    }
    body
}

/// Render one entity for the requested context. `hide` blanks protected
/// content when the caller has not supplied the password.
fn doc(content: &Content, context: &str, hide: bool) -> Value {
    let edit = context == "edit";
    let protected = !content.password.is_empty();
    let hidden = protected && hide;

    if context == "embed" {
        return json!({
            "id": content.id,
            "date": content.date,
            "slug": content.slug,
            "type": content.kind.label(),
            "link": content.kind.link(content.id),
            "title": rendered(&content.title, false),
            "author": content.author,
            "excerpt": gated(&content.excerpt, false, protected, hidden),
            "featured_media": content.featured_media,
        });
    }

    let mut body = json!({
        "id": content.id,
        "date": content.date,
        "date_gmt": content.date,
        "guid": rendered(&content.kind.link(content.id), false),
        "modified": content.modified,
        "modified_gmt": content.modified,
        "slug": content.slug,
        "status": content.status,
        "type": content.kind.label(),
        "link": content.kind.link(content.id),
        "title": rendered(&content.title, edit),
        "content": gated(&content.content, edit, protected, hidden),
        "excerpt": gated(&content.excerpt, edit, protected, hidden),
        "author": content.author,
        "featured_media": content.featured_media,
        "comment_status": content.comment_status,
        "ping_status": content.ping_status,
        "meta": content.meta,
        "template": content.template,
    });
    match content.kind {
        Kind::Post => {
            body["format"] = json!(content.format);
            body["sticky"] = json!(content.sticky);
            body["categories"] = json!(content.categories);
            body["tags"] = json!(content.tags);
        }
        Kind::Page => {
            body["parent"] = json!(content.parent);
            body["menu_order"] = json!(content.menu_order);
        }
    }
    if edit {
        body["password"] = json!(content.password);
        body["permalink_template"] = json!("http://localhost/%postname%/");
        body["generated_slug"] = json!(slugify(&content.title));
    }
    body
}

fn snapshot_doc(snapshot: &Snapshot, edit: bool) -> Value {
    json!({
        "id": snapshot.id,
        "author": snapshot.author,
        "date": snapshot.date,
        "date_gmt": snapshot.date,
        "modified": snapshot.modified,
        "modified_gmt": snapshot.modified,
        "parent": snapshot.parent,
        "slug": snapshot.slug,
        "guid": {"rendered": format!("http://localhost/?p={}", snapshot.id)},
        "title": rendered(&snapshot.title, edit),
        "content": rendered(&snapshot.content, edit),
        "excerpt": rendered(&snapshot.excerpt, edit),
    })
}
