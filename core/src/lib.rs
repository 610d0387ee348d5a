//! Synchronous typed client for a WordPress-style REST API.
//!
//! # Overview
//! [`Client`] anchors one site. Resource accessors (`posts()`, `pages()`,
//! `comments()`, `categories()`, `taxonomies()`) hand out request builders
//! that accumulate query parameters, perform the HTTP round trip on `send()`
//! and decode JSON into typed entities or a typed [`Error`].
//!
//! # Design
//! - Builders are single-use: `send()` consumes them, so a stale builder is
//!   a compile error rather than a runtime surprise.
//! - One credential policy for the whole crate, applied in `Client`: writes
//!   carry Basic credentials, reads only in the `edit` context.
//! - The four verb builders in [`request`] are generic over the entity;
//!   resource modules only add vocabulary and paths. Entities are
//!   decode-only, payload types are serialize-only.
//! - Non-2xx responses decode the server's error envelope when present and
//!   fall back to the raw body, never losing the HTTP status.

pub mod categories;
pub mod client;
pub mod comments;
pub mod error;
mod http;
pub mod pages;
pub mod posts;
pub mod query;
pub mod request;
pub mod revisions;
pub mod taxonomies;
pub mod types;

pub use categories::{Categories, Category, CategoryData};
pub use client::{Client, Credentials, SiteInfo};
pub use comments::{Comment, CommentData, Comments};
pub use error::Error;
pub use pages::{Page, PageData, Pages};
pub use posts::{Post, PostData, Posts};
pub use query::{CommentOrderBy, Context, Order, OrderBy, TaxRelation, TermOrderBy};
pub use request::{DeleteRequest, ListRequest, RetrieveRequest, WriteRequest};
pub use revisions::{Revision, Revisions};
pub use taxonomies::{Taxonomies, Taxonomy, TaxonomyMap};
pub use types::{Format, OpenClosed, Rendered, Status};

// The transport is part of the public error surface through
// `Error::Transport`.
pub use ureq;
