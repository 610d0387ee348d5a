//! Taxonomies resource: read-only metadata under `/wp/v2/taxonomies`.
//!
//! The collection endpoint returns an object keyed by taxonomy slug rather
//! than an array, so `list` builds on [`RetrieveRequest`] and decodes a
//! [`TaxonomyMap`]. Capabilities, labels and visibility only appear in the
//! `edit` context and stay optional.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::client::Client;
use crate::request::RetrieveRequest;

/// Collection document: taxonomies keyed by slug.
pub type TaxonomyMap = BTreeMap<String, Taxonomy>;

/// A registered taxonomy as the server returns it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Taxonomy {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub hierarchical: bool,
    #[serde(default)]
    pub rest_base: String,
    #[serde(default)]
    pub rest_namespace: String,
    pub capabilities: Option<TaxonomyCapabilities>,
    pub labels: Option<TaxonomyLabels>,
    pub show_cloud: Option<bool>,
    pub visibility: Option<TaxonomyVisibility>,
}

/// Capability names gating term management.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TaxonomyCapabilities {
    #[serde(default)]
    pub manage_terms: String,
    #[serde(default)]
    pub edit_terms: String,
    #[serde(default)]
    pub delete_terms: String,
    #[serde(default)]
    pub assign_terms: String,
}

/// Admin-facing label strings. Individual labels can be null, so every
/// field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TaxonomyLabels {
    pub name: Option<String>,
    pub singular_name: Option<String>,
    pub search_items: Option<String>,
    pub popular_items: Option<String>,
    pub all_items: Option<String>,
    pub parent_item: Option<String>,
    pub parent_item_colon: Option<String>,
    pub edit_item: Option<String>,
    pub view_item: Option<String>,
    pub update_item: Option<String>,
    pub add_new_item: Option<String>,
    pub new_item_name: Option<String>,
    pub separate_items_with_commas: Option<String>,
    pub add_or_remove_items: Option<String>,
    pub choose_from_most_used: Option<String>,
    pub not_found: Option<String>,
    pub no_terms: Option<String>,
    pub filter_by_item: Option<String>,
    pub items_list_navigation: Option<String>,
    pub items_list: Option<String>,
    pub most_used: Option<String>,
    pub back_to_items: Option<String>,
    pub item_link: Option<String>,
    pub item_link_description: Option<String>,
    pub menu_name: Option<String>,
    pub name_admin_bar: Option<String>,
    pub archives: Option<String>,
}

/// Where the taxonomy surfaces in the admin and theme layers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct TaxonomyVisibility {
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub publicly_queryable: bool,
    #[serde(default)]
    pub show_ui: bool,
    #[serde(default)]
    pub show_in_menu: bool,
    #[serde(default)]
    pub show_in_nav_menus: bool,
    #[serde(default)]
    pub show_in_quick_edit: bool,
    #[serde(default)]
    pub show_admin_column: bool,
}

/// Entry point for taxonomy reads, obtained from [`Client::taxonomies`].
pub struct Taxonomies<'c> {
    client: &'c Client,
}

impl<'c> Taxonomies<'c> {
    pub(crate) fn new(client: &'c Client) -> Self {
        Self { client }
    }

    pub fn list(&self) -> RetrieveRequest<'c, TaxonomyMap> {
        RetrieveRequest::new(self.client, "/wp/v2/taxonomies")
    }

    pub fn retrieve(&self, slug: &str) -> RetrieveRequest<'c, Taxonomy> {
        RetrieveRequest::new(self.client, format!("/wp/v2/taxonomies/{slug}"))
    }
}

impl<'c> RetrieveRequest<'c, TaxonomyMap> {
    /// Restrict to taxonomies registered for one post type.
    pub fn post_type(mut self, kind: &str) -> Self {
        self.query.set("type", kind);
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
    fn collection_decodes_as_a_slug_keyed_map() {
        let raw = r#"{
            "category": {
                "name": "Categories",
                "slug": "category",
                "description": "",
                "types": ["post"],
                "hierarchical": true,
                "rest_base": "categories",
                "rest_namespace": "wp/v2"
            },
            "post_tag": {
                "name": "Tags",
                "slug": "post_tag",
                "types": ["post"],
                "hierarchical": false,
                "rest_base": "tags",
                "rest_namespace": "wp/v2"
            }
        }"#;

        let map: TaxonomyMap = serde_json::from_str(raw).unwrap();
        assert_eq!(map.len(), 2);
        let category = &map["category"];
        assert!(category.hierarchical);
        assert_eq!(category.rest_base, "categories");
        assert!(category.labels.is_none());
        assert!(!map["post_tag"].hierarchical);
    }

    #[test]
    fn edit_context_document_fills_the_optional_blocks() {
        let raw = r#"{
            "name": "Categories",
            "slug": "category",
            "types": ["post"],
            "hierarchical": true,
            "rest_base": "categories",
            "rest_namespace": "wp/v2",
            "capabilities": {
                "manage_terms": "manage_categories",
                "edit_terms": "edit_categories",
                "delete_terms": "delete_categories",
                "assign_terms": "assign_categories"
            },
            "labels": {"name": "Categories", "singular_name": "Category", "archives": null},
            "show_cloud": false,
            "visibility": {
                "public": true,
                "publicly_queryable": true,
                "show_ui": true,
                "show_in_menu": true,
                "show_in_nav_menus": true,
                "show_in_quick_edit": true,
                "show_admin_column": true
            }
        }"#;

        let taxonomy: Taxonomy = serde_json::from_str(raw).unwrap();
        let capabilities = taxonomy.capabilities.unwrap();
        assert_eq!(capabilities.manage_terms, "manage_categories");
        let labels = taxonomy.labels.unwrap();
        assert_eq!(labels.singular_name.as_deref(), Some("Category"));
        assert!(labels.archives.is_none());
        assert_eq!(taxonomy.show_cloud, Some(false));
        assert!(taxonomy.visibility.unwrap().public);
    }

    #[test]
    fn post_type_filter_uses_the_type_key() {
        let client = client();
        let request = client.taxonomies().list().post_type("post").into_request();
        assert_eq!(
            request.url,
            "http://localhost:8080/wp-json/wp/v2/taxonomies"
        );
        assert_eq!(request.query, vec![("type", "post".to_string())]);
    }

    #[test]
    fn retrieve_targets_the_slug_path() {
        let client = client();
        let request = client.taxonomies().retrieve("category").into_request();
        assert_eq!(
            request.url,
            "http://localhost:8080/wp-json/wp/v2/taxonomies/category"
        );
    }
}
