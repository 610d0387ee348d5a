//! Comments. Creation is tied to a published post, and anonymous readers only
//! ever see approved comments.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{authorized, error, invalid_param, now, paginate, paging, parse_ids, parse_instant, Db};

/// One stored comment. `status` is one of approved, hold, spam or trash.
#[derive(Clone)]
pub(crate) struct StoredComment {
    pub id: u64,
    pub post: u64,
    pub parent: u64,
    pub author: u64,
    pub author_name: String,
    pub author_email: String,
    pub author_url: String,
    pub author_ip: String,
    pub author_user_agent: String,
    pub date: NaiveDateTime,
    pub content: String,
    pub status: String,
    pub meta: Value,
}

#[derive(Deserialize)]
pub(crate) struct CommentInput {
    pub post: Option<u64>,
    pub parent: Option<u64>,
    pub author: Option<u64>,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub author_url: Option<String>,
    pub author_ip: Option<String>,
    pub author_user_agent: Option<String>,
    pub date: Option<NaiveDateTime>,
    pub date_gmt: Option<NaiveDateTime>,
    pub content: Option<String>,
    pub status: Option<String>,
    pub meta: Option<Value>,
}

pub(crate) async fn list(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
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

    let status = params.get("status").map(String::as_str).unwrap_or("approve");
    if status != "approve" && !authed {
        return error(
            StatusCode::UNAUTHORIZED,
            "rest_forbidden_param",
            "Query parameter not permitted: status",
        );
    }

    let store = db.read().await;
    let mut comments: Vec<&StoredComment> = store
        .comments
        .values()
        .filter(|c| match status {
            "approve" => c.status == "approved",
            "all" => c.status == "approved" || c.status == "hold",
            wanted => c.status == wanted,
        })
        .collect();

    if let Some(raw) = params.get("post") {
        let wanted = parse_ids(raw);
        comments.retain(|c| wanted.contains(&c.post));
    }
    if let Some(raw) = params.get("parent") {
        let wanted = parse_ids(raw);
        comments.retain(|c| wanted.contains(&c.parent));
    }
    if let Some(raw) = params.get("parent_exclude") {
        let unwanted = parse_ids(raw);
        comments.retain(|c| !unwanted.contains(&c.parent));
    }
    if let Some(raw) = params.get("author") {
        let wanted = parse_ids(raw);
        comments.retain(|c| wanted.contains(&c.author));
    }
    if let Some(raw) = params.get("author_exclude") {
        let unwanted = parse_ids(raw);
        comments.retain(|c| !unwanted.contains(&c.author));
    }
    if let Some(wanted) = params.get("author_email") {
        comments.retain(|c| c.author_email == *wanted);
    }
    if let Some(term) = params.get("search") {
        let needle = term.to_lowercase();
        comments.retain(|c| c.content.to_lowercase().contains(&needle));
    }
    if let Some(raw) = params.get("include") {
        let wanted = parse_ids(raw);
        comments.retain(|c| wanted.contains(&c.id));
    }
    if let Some(raw) = params.get("exclude") {
        let unwanted = parse_ids(raw);
        comments.retain(|c| !unwanted.contains(&c.id));
    }
    if let Some(raw) = params.get("after") {
        let threshold = match parse_instant(raw) {
            Some(at) => at,
            None => return invalid_param("after"),
        };
        comments.retain(|c| c.date > threshold);
    }
    if let Some(raw) = params.get("before") {
        let threshold = match parse_instant(raw) {
            Some(at) => at,
            None => return invalid_param("before"),
        };
        comments.retain(|c| c.date < threshold);
    }
    if let Some(kind) = params.get("type") {
        if kind != "comment" {
            comments.clear();
        }
    }

    let orderby = params.get("orderby").map(String::as_str).unwrap_or("date");
    let include_order = params.get("include").map(|raw| parse_ids(raw));
    match orderby {
        "date" | "date_gmt" => comments.sort_by_key(|c| (c.date, c.id)),
        "id" | "type" => comments.sort_by_key(|c| c.id),
        "include" => {
            let order = include_order.unwrap_or_default();
            comments
                .sort_by_key(|c| order.iter().position(|&id| id == c.id).unwrap_or(usize::MAX));
        }
        "parent" => comments.sort_by_key(|c| (c.parent, c.id)),
        "post" => comments.sort_by_key(|c| (c.post, c.id)),
        _ => return invalid_param("orderby"),
    }
    match params.get("order").map(String::as_str) {
        Some("asc") => {}
        None | Some("desc") => comments.reverse(),
        Some(_) => return invalid_param("order"),
    }

    let page = paginate(comments, &paging);
    let docs: Vec<Value> = page.iter().map(|c| doc(c, context)).collect();
    Json(docs).into_response()
}

pub(crate) async fn create(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<CommentInput>,
) -> Response {
    if !authorized(&headers) {
        return error(
            StatusCode::UNAUTHORIZED,
            "rest_comment_login_required",
            "Sorry, you must be logged in to comment.",
        );
    }
    let post = match input.post {
        Some(post) if post != 0 => post,
        _ => {
            return error(
                StatusCode::FORBIDDEN,
                "rest_comment_invalid_post_id",
                "Sorry, you are not allowed to create this comment without a post.",
            )
        }
    };
    let content = match input.content.filter(|content| !content.is_empty()) {
        Some(content) => content,
        None => {
            return error(
                StatusCode::BAD_REQUEST,
                "rest_comment_content_invalid",
                "Invalid comment content.",
            )
        }
    };
    let status = match input.status.as_deref() {
        None => "approved".to_string(),
        Some(raw) => match normalize_status(raw) {
            Some(status) => status.to_string(),
            None => return invalid_param("status"),
        },
    };

    let mut store = db.write().await;
    let published = store
        .posts
        .get(&post)
        .map(|p| p.status == "publish")
        .unwrap_or(false);
    if !published {
        return error(
            StatusCode::FORBIDDEN,
            "rest_comment_invalid_post_id",
            "Sorry, you are not allowed to create a comment on this post.",
        );
    }

    let id = store.allocate();
    let comment = StoredComment {
        id,
        post,
        parent: input.parent.unwrap_or(0),
        author: input.author.unwrap_or(1),
        author_name: input.author_name.unwrap_or_default(),
        author_email: input.author_email.unwrap_or_default(),
        author_url: input.author_url.unwrap_or_default(),
        author_ip: input.author_ip.unwrap_or_else(|| "127.0.0.1".to_string()),
        author_user_agent: input.author_user_agent.unwrap_or_default(),
        date: input.date.or(input.date_gmt).unwrap_or_else(now),
        content,
        status,
        meta: input.meta.unwrap_or_else(|| Value::Array(Vec::new())),
    };
    let body = doc(&comment, "edit");
    store.comments.insert(id, comment);

    (StatusCode::CREATED, Json(body)).into_response()
}

pub(crate) async fn retrieve(
    State(db): State<Db>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let authed = authorized(&headers);
    let context = params.get("context").map(String::as_str).unwrap_or("view");
    if context == "edit" && !authed {
        return forbidden_context();
    }

    let store = db.read().await;
    let comment = match store.comments.get(&id) {
        Some(comment) => comment,
        None => return not_found(),
    };
    if comment.status != "approved" && !authed {
        return error(
            StatusCode::UNAUTHORIZED,
            "rest_cannot_read",
            "Sorry, you are not allowed to read this comment.",
        );
    }
    Json(doc(comment, context)).into_response()
}

pub(crate) async fn update(
    State(db): State<Db>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Json(input): Json<CommentInput>,
) -> Response {
    if !authorized(&headers) {
        return error(
            StatusCode::UNAUTHORIZED,
            "rest_cannot_edit",
            "Sorry, you are not allowed to edit this comment.",
        );
    }
    let status = match input.status.as_deref() {
        None => None,
        Some(raw) => match normalize_status(raw) {
            Some(status) => Some(status.to_string()),
            None => return invalid_param("status"),
        },
    };

    let mut store = db.write().await;
    let comment = match store.comments.get_mut(&id) {
        Some(comment) => comment,
        None => return not_found(),
    };
    if let Some(post) = input.post {
        comment.post = post;
    }
    if let Some(parent) = input.parent {
        comment.parent = parent;
    }
    if let Some(author) = input.author {
        comment.author = author;
    }
    if let Some(author_name) = input.author_name {
        comment.author_name = author_name;
    }
    if let Some(author_email) = input.author_email {
        comment.author_email = author_email;
    }
    if let Some(author_url) = input.author_url {
        comment.author_url = author_url;
    }
    if let Some(author_ip) = input.author_ip {
        comment.author_ip = author_ip;
    }
    if let Some(author_user_agent) = input.author_user_agent {
        comment.author_user_agent = author_user_agent;
    }
    if let Some(date) = input.date.or(input.date_gmt) {
        comment.date = date;
    }
    if let Some(content) = input.content {
        comment.content = content;
    }
    if let Some(status) = status {
        comment.status = status;
    }
    if let Some(meta) = input.meta {
        comment.meta = meta;
    }

    Json(doc(comment, "edit")).into_response()
}

pub(crate) async fn remove(
    State(db): State<Db>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return error(
            StatusCode::UNAUTHORIZED,
            "rest_cannot_delete",
            "Sorry, you are not allowed to delete this comment.",
        );
    }
    let force = params.get("force").map(String::as_str) == Some("true");

    let mut store = db.write().await;
    if force {
        let comment = match store.comments.remove(&id) {
            Some(comment) => comment,
            None => return not_found(),
        };
        let body = json!({"deleted": true, "previous": doc(&comment, "edit")});
        return Json(body).into_response();
    }

    let comment = match store.comments.get_mut(&id) {
        Some(comment) => comment,
        None => return not_found(),
    };
    if comment.status == "trash" {
        return error(
            StatusCode::GONE,
            "rest_already_trashed",
            "The comment has already been trashed.",
        );
    }
    comment.status = "trash".to_string();
    Json(doc(comment, "edit")).into_response()
}

fn normalize_status(raw: &str) -> Option<&'static str> {
    match raw {
        "approve" | "approved" => Some("approved"),
        "hold" => Some("hold"),
        "spam" => Some("spam"),
        "trash" => Some("trash"),
        _ => None,
    }
}

fn not_found() -> Response {
    error(
        StatusCode::NOT_FOUND,
        "rest_comment_invalid_id",
        "Invalid comment ID.",
    )
}

fn forbidden_context() -> Response {
    error(
        StatusCode::UNAUTHORIZED,
        "rest_forbidden_context",
        "Sorry, you are not allowed to edit comments.",
    )
}

fn doc(comment: &StoredComment, context: &str) -> Value {
    let link = format!(
        "http://localhost/?p={}#comment-{}",
        comment.post, comment.id
    );
    let avatars = json!({
        "24": format!("http://localhost/avatar/{}?s=24", comment.author),
        "48": format!("http://localhost/avatar/{}?s=48", comment.author),
        "96": format!("http://localhost/avatar/{}?s=96", comment.author),
    });
    if context == "embed" {
        return json!({
            "id": comment.id,
            "parent": comment.parent,
            "author": comment.author,
            "author_name": comment.author_name,
            "author_url": comment.author_url,
            "date": comment.date,
            "content": {"rendered": comment.content},
            "link": link,
            "type": "comment",
            "author_avatar_urls": avatars,
        });
    }

    let edit = context == "edit";
    let content = if edit {
        json!({"raw": comment.content, "rendered": comment.content})
    } else {
        json!({"rendered": comment.content})
    };
    let mut body = json!({
        "id": comment.id,
        "post": comment.post,
        "parent": comment.parent,
        "author": comment.author,
        "author_name": comment.author_name,
        "author_url": comment.author_url,
        "date": comment.date,
        "date_gmt": comment.date,
        "content": content,
        "link": link,
        "status": comment.status,
        "type": "comment",
        "author_avatar_urls": avatars,
        "meta": comment.meta,
    });
    if edit {
        body["author_email"] = json!(comment.author_email);
        body["author_ip"] = json!(comment.author_ip);
        body["author_user_agent"] = json!(comment.author_user_agent);
    }
    body
}
