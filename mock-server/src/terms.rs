//! Category terms. Counts are not stored; they are computed from the posts
//! that reference a term at render time, so list filters like `hide_empty`
//! always see current numbers.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{authorized, error, invalid_param, paginate, paging, parse_ids, slugify, Db, Store};

/// One stored category term.
#[derive(Clone)]
pub(crate) struct Term {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub parent: u64,
    pub meta: Value,
}

#[derive(Deserialize)]
pub(crate) struct TermInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub slug: Option<String>,
    pub parent: Option<u64>,
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
    let context = params.get("context").map(String::as_str).unwrap_or("view");
    if context == "edit" && !authorized(&headers) {
        return forbidden_context();
    }

    let store = db.read().await;
    let mut terms: Vec<&Term> = store.categories.values().collect();

    if let Some(term) = params.get("search") {
        let needle = term.to_lowercase();
        terms.retain(|t| t.name.to_lowercase().contains(&needle));
    }
    if let Some(raw) = params.get("parent") {
        let wanted = match raw.parse::<u64>() {
            Ok(value) => value,
            Err(_) => return invalid_param("parent"),
        };
        terms.retain(|t| t.parent == wanted);
    }
    if let Some(raw) = params.get("post") {
        let attached = match raw.parse::<u64>() {
            Ok(id) => store
                .posts
                .get(&id)
                .map(|p| p.categories.clone())
                .unwrap_or_default(),
            Err(_) => return invalid_param("post"),
        };
        terms.retain(|t| attached.contains(&t.id));
    }
    if let Some(raw) = params.get("slug") {
        let wanted: Vec<&str> = raw.split(',').collect();
        terms.retain(|t| wanted.contains(&t.slug.as_str()));
    }
    if let Some(raw) = params.get("include") {
        let wanted = parse_ids(raw);
        terms.retain(|t| wanted.contains(&t.id));
    }
    if let Some(raw) = params.get("exclude") {
        let unwanted = parse_ids(raw);
        terms.retain(|t| !unwanted.contains(&t.id));
    }
    if params.get("hide_empty").map(String::as_str) == Some("true") {
        terms.retain(|t| count(&store, t.id) > 0);
    }

    let orderby = params.get("orderby").map(String::as_str).unwrap_or("name");
    let include_order = params.get("include").map(|raw| parse_ids(raw));
    match orderby {
        "count" => terms.sort_by_key(|t| (count(&store, t.id), t.id)),
        "description" => terms.sort_by(|a, b| a.description.cmp(&b.description)),
        "id" | "term_group" => terms.sort_by_key(|t| t.id),
        "include" => {
            let order = include_order.unwrap_or_default();
            terms.sort_by_key(|t| order.iter().position(|&id| id == t.id).unwrap_or(usize::MAX));
        }
        "name" => terms.sort_by(|a, b| a.name.cmp(&b.name)),
        "slug" | "include_slugs" => terms.sort_by(|a, b| a.slug.cmp(&b.slug)),
        _ => return invalid_param("orderby"),
    }
    match params.get("order").map(String::as_str) {
        None | Some("asc") => {}
        Some("desc") => terms.reverse(),
        Some(_) => return invalid_param("order"),
    }

    let page = paginate(terms, &paging);
    let docs: Vec<Value> = page
        .iter()
        .map(|t| doc(t, count(&store, t.id), context))
        .collect();
    Json(docs).into_response()
}

pub(crate) async fn create(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<TermInput>,
) -> Response {
    if !authorized(&headers) {
        return error(
            StatusCode::UNAUTHORIZED,
            "rest_cannot_create",
            "Sorry, you are not allowed to create terms in this taxonomy.",
        );
    }
    let name = match input.name.filter(|name| !name.is_empty()) {
        Some(name) => name,
        None => {
            return error(
                StatusCode::BAD_REQUEST,
                "rest_missing_callback_param",
                "Missing parameter(s): name",
            )
        }
    };
    let parent = input.parent.unwrap_or(0);

    let mut store = db.write().await;
    let duplicate = store
        .categories
        .values()
        .any(|t| t.parent == parent && t.name.eq_ignore_ascii_case(&name));
    if duplicate {
        return error(
            StatusCode::BAD_REQUEST,
            "term_exists",
            "A term with the name provided already exists with this parent.",
        );
    }

    let id = store.allocate();
    let requested = input
        .slug
        .filter(|slug| !slug.is_empty())
        .unwrap_or_else(|| slugify(&name));
    let slug = if store.categories.values().any(|t| t.slug == requested) {
        format!("{requested}-{id}")
    } else {
        requested
    };
    let term = Term {
        id,
        name,
        slug,
        description: input.description.unwrap_or_default(),
        parent,
        meta: input.meta.unwrap_or_else(|| Value::Array(Vec::new())),
    };
    let body = doc(&term, 0, "edit");
    store.categories.insert(id, term);

    (StatusCode::CREATED, Json(body)).into_response()
}

pub(crate) async fn retrieve(
    State(db): State<Db>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let context = params.get("context").map(String::as_str).unwrap_or("view");
    if context == "edit" && !authorized(&headers) {
        return forbidden_context();
    }

    let store = db.read().await;
    match store.categories.get(&id) {
        Some(term) => Json(doc(term, count(&store, id), context)).into_response(),
        None => not_found(),
    }
}

pub(crate) async fn update(
    State(db): State<Db>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Json(input): Json<TermInput>,
) -> Response {
    if !authorized(&headers) {
        return error(
            StatusCode::UNAUTHORIZED,
            "rest_cannot_update",
            "Sorry, you are not allowed to edit this term.",
        );
    }

    let mut store = db.write().await;
    let term = match store.categories.get_mut(&id) {
        Some(term) => term,
        None => return not_found(),
    };
    if let Some(name) = input.name {
        term.name = name;
    }
    if let Some(description) = input.description {
        term.description = description;
    }
    if let Some(slug) = input.slug {
        term.slug = slug;
    }
    if let Some(parent) = input.parent {
        term.parent = parent;
    }
    if let Some(meta) = input.meta {
        term.meta = meta;
    }
    let rendered = term.clone();

    Json(doc(&rendered, count(&store, id), "edit")).into_response()
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
            "Sorry, you are not allowed to delete this term.",
        );
    }
    if params.get("force").map(String::as_str) != Some("true") {
        return error(
            StatusCode::NOT_IMPLEMENTED,
            "rest_trash_not_supported",
            "Terms do not support trashing. Set 'force=true' to delete.",
        );
    }

    let mut store = db.write().await;
    let term = match store.categories.remove(&id) {
        Some(term) => term,
        None => return not_found(),
    };
    let previous = doc(&term, count(&store, id), "edit");
    for post in store.posts.values_mut() {
        post.categories.retain(|&category| category != id);
    }

    Json(json!({"deleted": true, "previous": previous})).into_response()
}

/// Published posts referencing the term.
fn count(store: &Store, id: u64) -> usize {
    store
        .posts
        .values()
        .filter(|p| p.status == "publish" && p.categories.contains(&id))
        .count()
}

fn not_found() -> Response {
    error(
        StatusCode::NOT_FOUND,
        "rest_term_invalid",
        "Term does not exist.",
    )
}

fn forbidden_context() -> Response {
    error(
        StatusCode::UNAUTHORIZED,
        "rest_forbidden_context",
        "Sorry, you are not allowed to edit terms in this taxonomy.",
    )
}

fn doc(term: &Term, count: usize, context: &str) -> Value {
    let link = format!("http://localhost/?cat={}", term.id);
    if context == "embed" {
        return json!({
            "id": term.id,
            "link": link,
            "name": term.name,
            "slug": term.slug,
            "taxonomy": "category",
        });
    }
    json!({
        "id": term.id,
        "count": count,
        "description": term.description,
        "link": link,
        "name": term.name,
        "slug": term.slug,
        "taxonomy": "category",
        "parent": term.parent,
        "meta": term.meta,
    })
}
