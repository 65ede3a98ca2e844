//! Listing vocabulary shared by the repository, service and view layers.
//!
//! # Responsibility
//! - Name the listing kinds a reader can ask for.
//! - Translate a listing kind into the storage filter it needs.
//! - Own pagination and title rules.
//!
//! # Invariants
//! - Every filter implicitly includes "published only"; there is no way to
//!   express a query over drafts.

pub mod paginator;
pub mod title;

use crate::model::author::AuthorId;
use serde::Serialize;

/// Discriminator selecting which filter and title rule a listing uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "key", rename_all = "snake_case")]
pub enum ListingKind {
    /// Every published post.
    All,
    /// Published posts written by one author.
    ByAuthor(AuthorId),
    /// Published posts in the category with this slug.
    ByCategory(String),
    /// Published posts carrying the tag with this slug.
    ByTag(String),
    /// Published posts mentioning the raw (untrimmed) search term.
    Search(String),
}

/// Storage-level predicate applied on top of `is_published = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostFilter<'a> {
    All,
    Author(AuthorId),
    CategorySlug(&'a str),
    TagSlug(&'a str),
    /// Case-insensitive substring over title OR excerpt OR content.
    /// The term must already be trimmed and non-empty.
    Mentions(&'a str),
}

impl PostFilter<'_> {
    /// Short stable label used in log events.
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Author(_) => "author",
            Self::CategorySlug(_) => "category",
            Self::TagSlug(_) => "tag",
            Self::Mentions(_) => "search",
        }
    }
}

/// Row window requested from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub limit: u32,
    pub offset: u64,
}
