//! Query string accumulation and parameter vocabularies.
//!
//! # Design
//! Builders collect parameters into [`QueryPairs`] keyed by the server's own
//! parameter names. The map is ordered so a given builder chain always
//! serializes identically, which keeps request-shape tests exact. Values with
//! a closed vocabulary (context, ordering, tax relation) get fieldless enums
//! instead of raw strings.

use std::collections::BTreeMap;

/// Accumulated query parameters. Setting the same key twice keeps the last
/// value; list parameters are comma-joined, the server's list convention.
#[derive(Debug, Clone, Default)]
pub(crate) struct QueryPairs {
    params: BTreeMap<&'static str, String>,
}

impl QueryPairs {
    pub fn set<V: ToString>(&mut self, key: &'static str, value: V) {
        self.params.insert(key, value.to_string());
    }

    pub fn set_ids(&mut self, key: &'static str, ids: &[u64]) {
        let joined = ids.iter().map(u64::to_string).collect::<Vec<_>>().join(",");
        self.params.insert(key, joined);
    }

    pub fn set_csv(&mut self, key: &'static str, values: &[&str]) {
        self.params.insert(key, values.join(","));
    }

    pub fn into_pairs(self) -> Vec<(&'static str, String)> {
        self.params.into_iter().collect()
    }
}

/// Response-shape and permission mode for reads.
///
/// `Edit` is the only context that makes a read carry credentials; see
/// [`crate::client::Client`] for the attachment policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    View,
    Embed,
    Edit,
}

impl Context {
    pub fn as_str(self) -> &'static str {
        match self {
            Context::View => "view",
            Context::Embed => "embed",
            Context::Edit => "edit",
        }
    }
}

/// Sort direction for collection requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    pub fn as_str(self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

/// Sort key for post and page collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    Author,
    Date,
    Id,
    Include,
    Modified,
    Parent,
    Relevance,
    Slug,
    IncludeSlugs,
    Title,
}

impl OrderBy {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderBy::Author => "author",
            OrderBy::Date => "date",
            OrderBy::Id => "id",
            OrderBy::Include => "include",
            OrderBy::Modified => "modified",
            OrderBy::Parent => "parent",
            OrderBy::Relevance => "relevance",
            OrderBy::Slug => "slug",
            OrderBy::IncludeSlugs => "include_slugs",
            OrderBy::Title => "title",
        }
    }
}

/// Sort key for comment collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentOrderBy {
    Date,
    DateGmt,
    Id,
    Include,
    Post,
    Parent,
    Type,
}

impl CommentOrderBy {
    pub fn as_str(self) -> &'static str {
        match self {
            CommentOrderBy::Date => "date",
            CommentOrderBy::DateGmt => "date_gmt",
            CommentOrderBy::Id => "id",
            CommentOrderBy::Include => "include",
            CommentOrderBy::Post => "post",
            CommentOrderBy::Parent => "parent",
            CommentOrderBy::Type => "type",
        }
    }
}

/// Sort key for term collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermOrderBy {
    Id,
    Include,
    Name,
    Slug,
    IncludeSlugs,
    TermGroup,
    Description,
    Count,
}

impl TermOrderBy {
    pub fn as_str(self) -> &'static str {
        match self {
            TermOrderBy::Id => "id",
            TermOrderBy::Include => "include",
            TermOrderBy::Name => "name",
            TermOrderBy::Slug => "slug",
            TermOrderBy::IncludeSlugs => "include_slugs",
            TermOrderBy::TermGroup => "term_group",
            TermOrderBy::Description => "description",
            TermOrderBy::Count => "count",
        }
    }
}

/// How multiple taxonomy filters on a post collection combine. The server
/// expects the uppercase SQL-ish spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxRelation {
    And,
    Or,
}

impl TaxRelation {
    pub fn as_str(self) -> &'static str {
        match self {
            TaxRelation::And => "AND",
            TaxRelation::Or => "OR",
        }
    }
}
