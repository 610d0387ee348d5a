//! In-memory WordPress-style REST API for tests and local development.
//!
//! # Design
//! One [`Store`] behind an `RwLock` holds every resource; ids come from a
//! single counter so no two entities collide. Handlers speak the same wire
//! contract as the real API: the `{code, message, data}` error envelope,
//! context-dependent response shapes, Basic authentication with one fixed
//! account ([`USERNAME`] / [`PASSWORD`]) and trash semantics on deletion.

mod comments;
mod content;
mod taxonomies;
mod terms;

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{NaiveDateTime, Timelike, Utc};
use log::debug;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::RwLock;

/// Username of the only account the server knows.
pub const USERNAME: &str = "admin";
/// Password of the only account the server knows.
pub const PASSWORD: &str = "secret";

/// Everything the server remembers. Category 1 (`Uncategorized`) is seeded
/// so new posts always have a default term.
#[derive(Default)]
pub struct Store {
    next_id: u64,
    pub(crate) posts: HashMap<u64, content::Content>,
    pub(crate) pages: HashMap<u64, content::Content>,
    pub(crate) revisions: HashMap<u64, content::Snapshot>,
    pub(crate) comments: HashMap<u64, comments::StoredComment>,
    pub(crate) categories: HashMap<u64, terms::Term>,
}

impl Store {
    fn seeded() -> Self {
        let mut store = Store {
            next_id: 1,
            ..Store::default()
        };
        store.categories.insert(
            1,
            terms::Term {
                id: 1,
                name: "Uncategorized".to_string(),
                slug: "uncategorized".to_string(),
                description: String::new(),
                parent: 0,
                meta: Value::Array(Vec::new()),
            },
        );
        store
    }

    pub(crate) fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::seeded()));
    Router::new()
        .route("/wp-json", get(discovery))
        .route(
            "/wp-json/wp/v2/posts",
            get(content::list_posts).post(content::create_post),
        )
        .route(
            "/wp-json/wp/v2/posts/{id}",
            get(content::retrieve_post)
                .post(content::update_post)
                .delete(content::delete_post),
        )
        .route(
            "/wp-json/wp/v2/posts/{id}/revisions",
            get(content::list_post_revisions),
        )
        .route(
            "/wp-json/wp/v2/posts/{id}/revisions/{revision_id}",
            get(content::retrieve_post_revision).delete(content::delete_post_revision),
        )
        .route(
            "/wp-json/wp/v2/posts/{id}/autosaves",
            post(content::create_post_autosave),
        )
        .route(
            "/wp-json/wp/v2/pages",
            get(content::list_pages).post(content::create_page),
        )
        .route(
            "/wp-json/wp/v2/pages/{id}",
            get(content::retrieve_page)
                .post(content::update_page)
                .delete(content::delete_page),
        )
        .route(
            "/wp-json/wp/v2/pages/{id}/revisions",
            get(content::list_page_revisions),
        )
        .route(
            "/wp-json/wp/v2/pages/{id}/revisions/{revision_id}",
            get(content::retrieve_page_revision).delete(content::delete_page_revision),
        )
        .route(
            "/wp-json/wp/v2/pages/{id}/autosaves",
            post(content::create_page_autosave),
        )
        .route(
            "/wp-json/wp/v2/comments",
            get(comments::list).post(comments::create),
        )
        .route(
            "/wp-json/wp/v2/comments/{id}",
            get(comments::retrieve)
                .post(comments::update)
                .delete(comments::remove),
        )
        .route(
            "/wp-json/wp/v2/categories",
            get(terms::list).post(terms::create),
        )
        .route(
            "/wp-json/wp/v2/categories/{id}",
            get(terms::retrieve)
                .post(terms::update)
                .delete(terms::remove),
        )
        .route("/wp-json/wp/v2/taxonomies", get(taxonomies::list))
        .route("/wp-json/wp/v2/taxonomies/{slug}", get(taxonomies::retrieve))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Site discovery document served at the API root.
async fn discovery() -> Json<Value> {
    Json(json!({
        "name": "Mock Site",
        "description": "Just another mock site",
        "url": "http://localhost",
        "home": "http://localhost",
        "gmt_offset": 0.0,
        "timezone_string": "UTC",
        "page_for_posts": 0,
        "page_on_front": 0,
        "show_on_front": "posts",
        "namespaces": ["wp/v2"],
        "authentication": {
            "application-passwords": {
                "endpoints": {
                    "authorization": "http://localhost/wp-admin/authorize-application.php"
                }
            }
        },
        "site_logo": 0,
        "site_icon": 0,
        "site_icon_url": ""
    }))
}

/// True when the request carries the one accepted Basic credential.
pub(crate) fn authorized(headers: &HeaderMap) -> bool {
    let expected = format!(
        "Basic {}",
        STANDARD.encode(format!("{USERNAME}:{PASSWORD}"))
    );
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        == Some(expected.as_str())
}

/// Standard error envelope; `data.status` repeats the HTTP status.
pub(crate) fn error(status: StatusCode, code: &str, message: &str) -> Response {
    debug!("{} {code}", status.as_u16());
    (
        status,
        Json(json!({
            "code": code,
            "message": message,
            "data": {"status": status.as_u16()}
        })),
    )
        .into_response()
}

pub(crate) fn invalid_param(name: &str) -> Response {
    error(
        StatusCode::BAD_REQUEST,
        "rest_invalid_param",
        &format!("Invalid parameter(s): {name}"),
    )
}

/// Collection slicing, parsed once per list endpoint. `per_page` is capped
/// at 100 like the real API.
pub(crate) struct Paging {
    pub page: usize,
    pub per_page: usize,
    pub offset: Option<usize>,
}

pub(crate) fn paging(params: &HashMap<String, String>) -> Result<Paging, Response> {
    let per_page = match params.get("per_page") {
        Some(raw) => match raw.parse::<usize>() {
            Ok(value) if (1..=100).contains(&value) => value,
            _ => return Err(invalid_param("per_page")),
        },
        None => 10,
    };
    let page = match params.get("page") {
        Some(raw) => match raw.parse::<usize>() {
            Ok(value) if value >= 1 => value,
            _ => return Err(invalid_param("page")),
        },
        None => 1,
    };
    let offset = match params.get("offset") {
        Some(raw) => match raw.parse::<usize>() {
            Ok(value) => Some(value),
            Err(_) => return Err(invalid_param("offset")),
        },
        None => None,
    };
    Ok(Paging {
        page,
        per_page,
        offset,
    })
}

pub(crate) fn paginate<T>(items: Vec<T>, paging: &Paging) -> Vec<T> {
    let skip = paging
        .offset
        .unwrap_or((paging.page - 1) * paging.per_page);
    items.into_iter().skip(skip).take(paging.per_page).collect()
}

/// Wall clock truncated to whole seconds, the API's date granularity.
pub(crate) fn now() -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    now.with_nanosecond(0).unwrap_or(now)
}

pub(crate) fn parse_ids(raw: &str) -> Vec<u64> {
    raw.split(',')
        .filter_map(|id| id.trim().parse().ok())
        .collect()
}

pub(crate) fn parse_instant(raw: &str) -> Option<NaiveDateTime> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|at| at.naive_utc())
}

pub(crate) fn slugify(text: &str) -> String {
    let mut slug = String::new();
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}
