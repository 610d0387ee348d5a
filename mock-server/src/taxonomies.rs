//! Taxonomy metadata. The site registers the two built-in taxonomies and
//! nothing else, so the documents here are static; only the context decides
//! how much of each is shown.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::{authorized, error, Db};

const SLUGS: [&str; 2] = ["category", "post_tag"];

pub(crate) async fn list(
    State(_db): State<Db>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let context = params.get("context").map(String::as_str).unwrap_or("view");
    if context == "edit" && !authorized(&headers) {
        return error(
            StatusCode::UNAUTHORIZED,
            "rest_cannot_view",
            "Sorry, you are not allowed to manage terms in this taxonomy.",
        );
    }

    let attached_to = params.get("type").map(String::as_str);
    let mut body = json!({});
    for slug in SLUGS {
        // Both built-in taxonomies hang off the post type only.
        if matches!(attached_to, None | Some("post")) {
            body[slug] = doc(slug, context);
        }
    }
    Json(body).into_response()
}

pub(crate) async fn retrieve(
    State(_db): State<Db>,
    Path(slug): Path<String>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let context = params.get("context").map(String::as_str).unwrap_or("view");
    if context == "edit" && !authorized(&headers) {
        return error(
            StatusCode::UNAUTHORIZED,
            "rest_forbidden_context",
            "Sorry, you are not allowed to manage terms in this taxonomy.",
        );
    }
    if !SLUGS.contains(&slug.as_str()) {
        return error(
            StatusCode::NOT_FOUND,
            "rest_taxonomy_invalid",
            "Invalid taxonomy.",
        );
    }
    Json(doc(&slug, context)).into_response()
}

fn doc(slug: &str, context: &str) -> Value {
    let (name, rest_base, hierarchical) = match slug {
        "category" => ("Categories", "categories", true),
        _ => ("Tags", "tags", false),
    };
    if context == "embed" {
        return json!({
            "name": name,
            "slug": slug,
            "rest_base": rest_base,
            "rest_namespace": "wp/v2",
        });
    }

    let mut body = json!({
        "name": name,
        "slug": slug,
        "description": "",
        "types": ["post"],
        "hierarchical": hierarchical,
        "rest_base": rest_base,
        "rest_namespace": "wp/v2",
    });
    if context == "edit" {
        body["capabilities"] = capabilities(slug);
        body["labels"] = labels(slug);
        body["show_cloud"] = json!(!hierarchical);
        body["visibility"] = json!({
            "public": true,
            "publicly_queryable": true,
            "show_ui": true,
            "show_in_menu": true,
            "show_in_nav_menus": true,
            "show_in_quick_edit": true,
            "show_admin_column": hierarchical,
        });
    }
    body
}

fn capabilities(slug: &str) -> Value {
    match slug {
        "category" => json!({
            "manage_terms": "manage_categories",
            "edit_terms": "edit_categories",
            "delete_terms": "delete_categories",
            "assign_terms": "assign_categories",
        }),
        _ => json!({
            "manage_terms": "manage_post_tags",
            "edit_terms": "edit_post_tags",
            "delete_terms": "delete_post_tags",
            "assign_terms": "assign_post_tags",
        }),
    }
}

fn labels(slug: &str) -> Value {
    match slug {
        "category" => json!({
            "name": "Categories",
            "singular_name": "Category",
            "search_items": "Search Categories",
            "popular_items": null,
            "all_items": "All Categories",
            "parent_item": "Parent Category",
            "parent_item_colon": "Parent Category:",
            "edit_item": "Edit Category",
            "view_item": "View Category",
            "update_item": "Update Category",
            "add_new_item": "Add New Category",
            "new_item_name": "New Category Name",
            "separate_items_with_commas": null,
            "add_or_remove_items": null,
            "choose_from_most_used": null,
            "not_found": "No categories found.",
            "no_terms": "No categories",
            "filter_by_item": "Filter by category",
            "items_list_navigation": "Categories list navigation",
            "items_list": "Categories list",
            "most_used": "Most Used",
            "back_to_items": "&larr; Go to Categories",
            "item_link": "Category Link",
            "item_link_description": "A link to a category.",
            "menu_name": "Categories",
            "name_admin_bar": "category",
            "archives": "All Categories",
        }),
        _ => json!({
            "name": "Tags",
            "singular_name": "Tag",
            "search_items": "Search Tags",
            "popular_items": "Popular Tags",
            "all_items": "All Tags",
            "parent_item": null,
            "parent_item_colon": null,
            "edit_item": "Edit Tag",
            "view_item": "View Tag",
            "update_item": "Update Tag",
            "add_new_item": "Add New Tag",
            "new_item_name": "New Tag Name",
            "separate_items_with_commas": "Separate tags with commas",
            "add_or_remove_items": "Add or remove tags",
            "choose_from_most_used": "Choose from the most used tags",
            "not_found": "No tags found.",
            "no_terms": "No tags",
            "filter_by_item": null,
            "items_list_navigation": "Tags list navigation",
            "items_list": "Tags list",
            "most_used": "Most Used",
            "back_to_items": "&larr; Go to Tags",
            "item_link": "Tag Link",
            "item_link_description": "A link to a tag.",
            "menu_name": "Tags",
            "name_admin_bar": "post_tag",
            "archives": "All Tags",
        }),
    }
}
